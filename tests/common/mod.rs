//! Common test utilities for integration tests
//!
//! Shared fixtures for seeding the in-memory store with content rows.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use folio::{ContentService, InMemoryContentStore, ReadCache};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A post row published `days_ago` days ago, or a draft when `None`.
pub fn post_row(slug: &str, days_ago: Option<i64>) -> Value {
    let now = Utc::now();
    json!({
        "id": Uuid::new_v4(),
        "slug": slug,
        "title": format!("Post {slug}"),
        "content": format!("Body of {slug}"),
        "excerpt": null,
        "published_at": days_ago.map(|d| (now - Duration::days(d)).to_rfc3339()),
        "view_count": 0,
        "created_at": (now - Duration::days(days_ago.unwrap_or(0) + 1)).to_rfc3339(),
    })
}

pub fn project_row(title: &str, featured: bool, days_ago: i64) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "title": title,
        "tech_stack": ["Rust"],
        "featured": featured,
        "created_at": (Utc::now() - Duration::days(days_ago)).to_rfc3339(),
    })
}

pub fn research_row(title: &str, category: &str, days_ago: i64) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "title": title,
        "category": category,
        "created_at": (Utc::now() - Duration::days(days_ago)).to_rfc3339(),
    })
}

/// Store with seven published posts, one draft, three projects and three
/// research entries.
pub async fn seeded_store() -> Arc<InMemoryContentStore> {
    let store = Arc::new(InMemoryContentStore::new());

    let mut posts: Vec<Value> = (1..=7)
        .map(|n| post_row(&format!("post-{n}"), Some(n)))
        .collect();
    posts.push(post_row("draft", None));
    store.seed("posts", &posts).await.expect("seed posts");

    store
        .seed(
            "projects",
            &[
                project_row("alpha", true, 1),
                project_row("beta", false, 2),
                project_row("gamma", true, 3),
            ],
        )
        .await
        .expect("seed projects");

    store
        .seed(
            "researches",
            &[
                research_row("caching", "systems", 1),
                research_row("typing", "languages", 2),
                research_row("scheduling", "systems", 3),
            ],
        )
        .await
        .expect("seed researches");

    store
}

/// Content service over `store` with a fresh cache of default TTL.
pub fn content_service(store: &Arc<InMemoryContentStore>) -> ContentService {
    ContentService::new(store.clone(), Arc::new(ReadCache::new()))
}
