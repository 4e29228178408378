//! Cached content reads.
//!
//! Each read builds a canonical key from its operation name and normalized
//! options and delegates to [`ReadCache::cached_fetch`] with a fetcher that
//! runs the matching [`TableQuery`]. View counting goes straight to the
//! store and is never cached.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    CacheKey, Collection, Post, PostListOptions, Project, ProjectListOptions, Research,
    ResearchListOptions, TableQuery,
};
use crate::domain::ports::{ContentStore, INCREMENT_VIEW_COUNT};

use super::read_cache::ReadCache;

/// Decode store rows into typed models.
pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> DomainResult<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(Into::into))
        .collect()
}

/// Public post listing: newest first, drafts hidden unless asked for.
pub fn posts_query(options: &PostListOptions) -> TableQuery {
    let mut query = TableQuery::from_collection(Collection::Posts).order("published_at", false);
    if !options.include_unpublished {
        query = query.not_null("published_at");
    }
    query.limit(options.limit)
}

pub fn post_by_slug_query(slug: &str) -> TableQuery {
    TableQuery::from_collection(Collection::Posts)
        .eq("slug", slug)
        .single()
}

pub fn projects_query(options: &ProjectListOptions) -> TableQuery {
    let mut query = TableQuery::from_collection(Collection::Projects).order("created_at", false);
    if options.featured {
        query = query.eq("featured", "true");
    }
    query.limit(options.limit)
}

pub fn researches_query(options: &ResearchListOptions) -> TableQuery {
    let mut query =
        TableQuery::from_collection(Collection::Researches).order("created_at", false);
    if let Some(category) = options.category.as_deref().filter(|c| !c.is_empty()) {
        query = query.eq("category", category);
    }
    query.limit(options.limit)
}

/// Read side of the site: cached listings and lookups.
#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
    cache: Arc<ReadCache>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>, cache: Arc<ReadCache>) -> Self {
        Self { store, cache }
    }

    pub fn cache(&self) -> &Arc<ReadCache> {
        &self.cache
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, query: &TableQuery) -> DomainResult<Vec<T>> {
        debug!(table = %query.table, filters = query.filters.len(), limit = ?query.limit, "querying store");
        let rows = self.store.select(query).await?;
        decode_rows(rows)
    }

    /// List posts.
    pub async fn get_posts(&self, options: &PostListOptions) -> DomainResult<Arc<Vec<Post>>> {
        let options = options.normalized();
        let key = CacheKey::posts(&options)?;
        let query = posts_query(&options);
        self.cache
            .cached_fetch(key, || self.fetch_rows::<Post>(&query))
            .await
    }

    /// Look up a single post. A missing slug is cached as `None`.
    pub async fn get_post_by_slug(&self, slug: &str) -> DomainResult<Arc<Option<Post>>> {
        let query = post_by_slug_query(slug);
        self.cache
            .cached_fetch(CacheKey::post(slug), || async {
                let posts = self.fetch_rows::<Post>(&query).await?;
                Ok::<_, DomainError>(posts.into_iter().next())
            })
            .await
    }

    pub async fn get_projects(
        &self,
        options: &ProjectListOptions,
    ) -> DomainResult<Arc<Vec<Project>>> {
        let options = options.normalized();
        let key = CacheKey::projects(&options)?;
        let query = projects_query(&options);
        self.cache
            .cached_fetch(key, || self.fetch_rows::<Project>(&query))
            .await
    }

    pub async fn get_researches(
        &self,
        options: &ResearchListOptions,
    ) -> DomainResult<Arc<Vec<Research>>> {
        let options = options.normalized();
        let key = CacheKey::researches(&options)?;
        let query = researches_query(&options);
        self.cache
            .cached_fetch(key, || self.fetch_rows::<Research>(&query))
            .await
    }

    /// Bump the view counter of a post.
    pub async fn increment_view_count(&self, slug: &str) -> DomainResult<()> {
        increment_view_count(self.store.as_ref(), slug).await
    }

    /// Fire-and-forget view count increment. Failures are logged only.
    pub fn spawn_view_increment(&self, slug: &str) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let slug = slug.to_string();
        tokio::spawn(async move {
            if let Err(err) = increment_view_count(store.as_ref(), &slug).await {
                warn!(slug = %slug, error = %err, "view count increment failed");
            }
        })
    }

    /// Drop all cached reads so the next ones hit the store.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}

async fn increment_view_count(store: &dyn ContentStore, slug: &str) -> DomainResult<()> {
    store
        .rpc(INCREMENT_VIEW_COUNT, serde_json::json!({ "post_slug": slug }))
        .await
}

impl std::fmt::Debug for ContentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Filter;

    #[test]
    fn test_posts_query_hides_drafts_by_default() {
        let query = posts_query(&PostListOptions::with_limit(5));
        assert_eq!(query.table, "posts");
        assert_eq!(
            query.filters,
            vec![Filter::NotNull {
                column: "published_at".to_string()
            }]
        );
        let order = query.order.unwrap();
        assert_eq!(order.column, "published_at");
        assert!(!order.ascending);
        assert_eq!(query.limit, Some(5));
    }

    #[test]
    fn test_posts_query_with_drafts() {
        let query = posts_query(&PostListOptions {
            limit: None,
            include_unpublished: true,
        });
        assert!(query.filters.is_empty());
        assert_eq!(query.limit, None);
    }

    #[test]
    fn test_slug_query_is_single() {
        let query = post_by_slug_query("test-post");
        assert!(query.single);
        assert_eq!(
            query.filters,
            vec![Filter::Eq {
                column: "slug".to_string(),
                value: "test-post".to_string()
            }]
        );
    }

    #[test]
    fn test_projects_and_researches_queries() {
        let query = projects_query(&ProjectListOptions::featured());
        assert_eq!(query.order.as_ref().unwrap().column, "created_at");
        assert_eq!(query.filters.len(), 1);

        let query = researches_query(&ResearchListOptions {
            category: Some(String::new()),
            limit: Some(0),
        });
        assert!(query.filters.is_empty());
        assert_eq!(query.limit, None);

        let query = researches_query(&ResearchListOptions::in_category("llm"));
        assert_eq!(
            query.filters,
            vec![Filter::Eq {
                column: "category".to_string(),
                value: "llm".to_string()
            }]
        );
    }
}
