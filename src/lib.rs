//! folio - cached content access for a blog and portfolio backend
//!
//! folio reads posts, projects and research entries from a PostgREST
//! store (Supabase) through a time-windowed read cache, and provides the
//! admin write paths that invalidate that cache.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Content models, cache keys, ports
//! - **Service Layer** (`services`): Read cache, content and admin services
//! - **Adapters** (`adapters`): In-memory content store
//! - **Infrastructure Layer** (`infrastructure`): PostgREST client, config, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use folio::{ContentService, InMemoryContentStore, PostListOptions, ReadCache};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(InMemoryContentStore::new());
//!     let content = ContentService::new(store, Arc::new(ReadCache::new()));
//!     let posts = content.get_posts(&PostListOptions::with_limit(5)).await?;
//!     println!("{} posts", posts.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::InMemoryContentStore;
pub use domain::models::{
    CacheKey, Collection, Config, Post, PostDraft, PostListOptions, Project, ProjectDraft,
    ProjectListOptions, Research, ResearchDraft, ResearchListOptions,
};
pub use domain::ports::{Clock, ContentStore, ManualClock, SystemClock};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::postgrest::PostgrestClient;
pub use services::{AdminService, ContentService, ReadCache};
