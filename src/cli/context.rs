//! Wiring shared by every command: store, read cache and services.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::adapters::memory::InMemoryContentStore;
use crate::domain::models::{Collection, Config};
use crate::domain::ports::ContentStore;
use crate::infrastructure::postgrest::PostgrestClient;
use crate::services::{AdminService, ContentService, ReadCache};

/// Services for one CLI invocation. Content and admin share one cache so
/// admin writes invalidate what content reads stored.
pub struct AppContext {
    pub store: Arc<dyn ContentStore>,
    pub cache: Arc<ReadCache>,
    pub content: ContentService,
    pub admin: AdminService,
}

impl AppContext {
    pub fn new(store: Arc<dyn ContentStore>, cache: Arc<ReadCache>) -> Self {
        Self {
            content: ContentService::new(Arc::clone(&store), Arc::clone(&cache)),
            admin: AdminService::new(Arc::clone(&store), Arc::clone(&cache)),
            store,
            cache,
        }
    }

    /// Connect to the configured PostgREST endpoint.
    pub fn remote(config: &Config) -> Result<Self> {
        let client = PostgrestClient::from_config(&config.store)
            .context("Failed to build PostgREST client")?;
        Ok(Self::new(
            Arc::new(client),
            Arc::new(ReadCache::from_config(&config.cache)),
        ))
    }

    /// Use an in-memory store seeded with sample content.
    pub async fn offline(config: &Config) -> Result<Self> {
        let store = InMemoryContentStore::new();
        seed_sample_content(&store)
            .await
            .context("Failed to seed in-memory store")?;
        Ok(Self::new(
            Arc::new(store),
            Arc::new(ReadCache::from_config(&config.cache)),
        ))
    }
}

/// Sample rows for offline use.
pub async fn seed_sample_content(store: &InMemoryContentStore) -> crate::domain::DomainResult<()> {
    let now = Utc::now();
    let day = |n: i64| (now - Duration::days(n)).to_rfc3339();

    store
        .seed(
            Collection::Posts.table(),
            &[
                json!({
                    "id": Uuid::new_v4(),
                    "slug": "hello-world",
                    "title": "Hello, world",
                    "content": "First post on the new site.",
                    "excerpt": "Where it all starts",
                    "published_at": day(30),
                    "view_count": 42,
                    "created_at": day(31),
                }),
                json!({
                    "id": Uuid::new_v4(),
                    "slug": "caching-reads",
                    "title": "Caching reads for five minutes",
                    "content": "A time-windowed cache in front of PostgREST.",
                    "excerpt": null,
                    "published_at": day(3),
                    "view_count": 7,
                    "created_at": day(4),
                }),
                json!({
                    "id": Uuid::new_v4(),
                    "slug": "unfinished-thoughts",
                    "title": "Unfinished thoughts",
                    "content": "Draft.",
                    "excerpt": null,
                    "published_at": null,
                    "view_count": 0,
                    "created_at": day(1),
                }),
            ],
        )
        .await?;

    store
        .seed(
            Collection::Projects.table(),
            &[
                json!({
                    "id": Uuid::new_v4(),
                    "title": "folio",
                    "description": "Portfolio backend with a read cache",
                    "tech_stack": ["Rust", "PostgREST"],
                    "github_url": "https://github.com/folio/folio",
                    "featured": true,
                    "created_at": day(10),
                }),
                json!({
                    "id": Uuid::new_v4(),
                    "title": "dotfiles",
                    "tech_stack": ["Shell"],
                    "featured": false,
                    "created_at": day(90),
                }),
            ],
        )
        .await?;

    store
        .seed(
            Collection::Researches.table(),
            &[json!({
                "id": Uuid::new_v4(),
                "title": "Cache invalidation in small sites",
                "description": "Notes on TTL windows versus explicit clears",
                "tech_stack": ["Rust"],
                "category": "systems",
                "created_at": day(20),
            })],
        )
        .await
}
