//! Service layer: the read cache and the services built on it.

pub mod admin_service;
pub mod cache_stats;
pub mod content_service;
pub mod read_cache;
pub mod store_check;

pub use admin_service::AdminService;
pub use cache_stats::{CacheStats, CacheStatsSnapshot};
pub use content_service::ContentService;
pub use read_cache::{ReadCache, DEFAULT_TTL};
pub use store_check::{check_tables, TableCheck};
