//! Port trait definitions (Hexagonal Architecture)
//!
//! - ContentStore: reads, writes and RPC against the hosted backend
//! - Clock: time source for cache freshness
//!
//! Adapters in `adapters` and `infrastructure` implement these so the
//! services never depend on a concrete backend.

pub mod clock;
pub mod content_store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use content_store::{ContentStore, INCREMENT_VIEW_COUNT};
