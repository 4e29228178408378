//! Admin write paths.
//!
//! Listings here bypass the read cache so the editor always sees the
//! store's current state. Every successful write clears the read cache;
//! failed writes leave it untouched.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    validate_slug, Collection, Post, PostDraft, Project, ProjectDraft, Research, ResearchDraft,
    TableQuery,
};
use crate::domain::ports::ContentStore;

use super::content_service::decode_rows;
use super::read_cache::ReadCache;

/// Create, update and delete content, keeping the read cache honest.
#[derive(Clone)]
pub struct AdminService {
    store: Arc<dyn ContentStore>,
    cache: Arc<ReadCache>,
}

impl AdminService {
    pub fn new(store: Arc<dyn ContentStore>, cache: Arc<ReadCache>) -> Self {
        Self { store, cache }
    }

    async fn list_rows<T: serde::de::DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> DomainResult<Vec<T>> {
        let query = TableQuery::from_collection(collection).order("created_at", false);
        decode_rows(self.store.select(&query).await?)
    }

    /// All posts, drafts included, newest first.
    pub async fn list_posts(&self) -> DomainResult<Vec<Post>> {
        self.list_rows(Collection::Posts).await
    }

    pub async fn list_projects(&self) -> DomainResult<Vec<Project>> {
        self.list_rows(Collection::Projects).await
    }

    pub async fn list_researches(&self) -> DomainResult<Vec<Research>> {
        self.list_rows(Collection::Researches).await
    }

    async fn invalidate_after(
        &self,
        result: DomainResult<()>,
        action: &str,
        collection: Collection,
    ) -> DomainResult<()> {
        result?;
        info!(action, collection = %collection, "content changed, clearing read cache");
        self.cache.clear().await;
        Ok(())
    }

    async fn insert<D: Serialize>(&self, collection: Collection, draft: &D) -> DomainResult<()> {
        let row = serde_json::to_value(draft)?;
        let result = self.store.insert(collection.table(), row).await;
        self.invalidate_after(result, "create", collection).await
    }

    async fn update<D: Serialize>(
        &self,
        collection: Collection,
        id: Uuid,
        draft: &D,
    ) -> DomainResult<()> {
        let changes = serde_json::to_value(draft)?;
        let result = self.store.update(collection.table(), id, changes).await;
        self.invalidate_after(result, "update", collection).await
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> DomainResult<()> {
        let result = self.store.delete(collection.table(), id).await;
        self.invalidate_after(result, "delete", collection).await
    }

    pub async fn create_post(&self, draft: &PostDraft) -> DomainResult<()> {
        validate_post(draft)?;
        self.insert(Collection::Posts, draft).await
    }

    pub async fn update_post(&self, id: Uuid, draft: &PostDraft) -> DomainResult<()> {
        validate_post(draft)?;
        self.update(Collection::Posts, id, draft).await
    }

    pub async fn delete_post(&self, id: Uuid) -> DomainResult<()> {
        self.delete(Collection::Posts, id).await
    }

    /// Publish a draft now, or pull a published post back to draft.
    ///
    /// Returns the new `published_at`.
    pub async fn toggle_publish(&self, post: &Post) -> DomainResult<Option<DateTime<Utc>>> {
        let published_at = if post.is_published() {
            None
        } else {
            Some(Utc::now())
        };
        let changes = serde_json::json!({ "published_at": published_at });
        let result = self
            .store
            .update(Collection::Posts.table(), post.id, changes)
            .await;
        self.invalidate_after(result, "toggle_publish", Collection::Posts)
            .await?;
        Ok(published_at)
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> DomainResult<()> {
        require_title(&draft.title)?;
        self.insert(Collection::Projects, draft).await
    }

    pub async fn update_project(&self, id: Uuid, draft: &ProjectDraft) -> DomainResult<()> {
        require_title(&draft.title)?;
        self.update(Collection::Projects, id, draft).await
    }

    pub async fn delete_project(&self, id: Uuid) -> DomainResult<()> {
        self.delete(Collection::Projects, id).await
    }

    pub async fn create_research(&self, draft: &ResearchDraft) -> DomainResult<()> {
        require_title(&draft.title)?;
        self.insert(Collection::Researches, draft).await
    }

    pub async fn update_research(&self, id: Uuid, draft: &ResearchDraft) -> DomainResult<()> {
        require_title(&draft.title)?;
        self.update(Collection::Researches, id, draft).await
    }

    pub async fn delete_research(&self, id: Uuid) -> DomainResult<()> {
        self.delete(Collection::Researches, id).await
    }
}

fn require_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::ValidationFailed("title cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_post(draft: &PostDraft) -> DomainResult<()> {
    require_title(&draft.title)?;
    validate_slug(&draft.slug).map_err(DomainError::ValidationFailed)
}

impl std::fmt::Debug for AdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminService")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
