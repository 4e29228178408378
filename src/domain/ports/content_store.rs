//! Content store port.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::TableQuery;

/// Remote procedure that bumps a post's view counter.
pub const INCREMENT_VIEW_COUNT: &str = "increment_view_count";

/// Interface to the hosted relational backend.
///
/// Rows travel as JSON objects; decoding into typed models happens in the
/// services so the port stays table-agnostic.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Run a read query and return the matching rows.
    ///
    /// For `single` queries an absent row yields an empty vector.
    async fn select(&self, query: &TableQuery) -> DomainResult<Vec<Value>>;

    /// Insert one row.
    async fn insert(&self, table: &str, row: Value) -> DomainResult<()>;

    /// Patch the row with the given id.
    async fn update(&self, table: &str, id: Uuid, changes: Value) -> DomainResult<()>;

    /// Delete the row with the given id.
    async fn delete(&self, table: &str, id: Uuid) -> DomainResult<()>;

    /// Invoke a server-side function for its side effect.
    async fn rpc(&self, function: &str, args: Value) -> DomainResult<()>;
}
