//! Domain layer for folio
//!
//! Content models, cache keys, and the port traits adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
