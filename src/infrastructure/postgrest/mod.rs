//! PostgREST adapter for the content store port.

pub mod client;
pub mod errors;

pub use client::{query_params, PostgrestClient, PostgrestClientConfig};
pub use errors::StoreError;
