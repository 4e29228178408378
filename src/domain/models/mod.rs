//! Domain models for the folio content layer.

pub mod cache_key;
pub mod config;
pub mod content;
pub mod query;
pub mod slug;

pub use cache_key::CacheKey;
pub use config::{CacheConfig, Config, LoggingConfig, StoreConfig};
pub use content::{
    parse_tech_stack, Collection, Post, PostDraft, Project, ProjectDraft, Research, ResearchDraft,
};
pub use query::{
    Filter, Ordering, PostListOptions, ProjectListOptions, ResearchListOptions, TableQuery,
};
pub use slug::{slugify, validate_slug};
