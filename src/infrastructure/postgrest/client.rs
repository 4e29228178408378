//! PostgREST HTTP client.
//!
//! Implements [`ContentStore`] against the `/rest/v1` surface exposed by
//! Supabase: table reads with query-string filters, row writes, and
//! `/rpc/<function>` calls. Every request carries the project key both as
//! `apikey` and as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Filter, StoreConfig, TableQuery};
use crate::domain::ports::ContentStore;

use super::errors::StoreError;

/// Media type asking PostgREST for a single object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Configuration for the PostgREST client
#[derive(Debug, Clone)]
pub struct PostgrestClientConfig {
    /// Project URL without the `/rest/v1` suffix
    pub base_url: String,

    /// Anon or service role key
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl From<&StoreConfig> for PostgrestClientConfig {
    fn from(config: &StoreConfig) -> Self {
        Self {
            base_url: config.url.clone(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// HTTP client for a PostgREST endpoint
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    http_client: ReqwestClient,
    rest_url: String,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(config: PostgrestClientConfig) -> Result<Self, StoreError> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            http_client,
            rest_url: format!("{}/rest/v1", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
        })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::new(PostgrestClientConfig::from(config))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}/{path}", self.rest_url))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Turn a non-success response into a classified error.
    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error response".to_string());
        Err(StoreError::from_status(status, body))
    }

    async fn send_select(&self, query: &TableQuery) -> Result<Vec<Value>, StoreError> {
        let mut request = self
            .request(Method::GET, &query.table)
            .query(&query_params(query));
        if query.single {
            request = request.header("Accept", SINGLE_OBJECT);
        }

        let response = request.send().await?;

        // PostgREST answers 406 when a single-object read matches zero rows
        // or several; only the first means "missing".
        if query.single && response.status() == StatusCode::NOT_ACCEPTABLE {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if let Some(rows) = matched_row_count(&body).filter(|&n| n > 1) {
                warn!(table = %query.table, rows, "single-row read matched several rows");
                return Err(StoreError::from_status(status, body));
            }
            debug!(table = %query.table, "single row not found");
            return Ok(Vec::new());
        }

        let response = Self::check(response).await?;
        if query.single {
            let row: Value = response.json().await?;
            Ok(vec![row])
        } else {
            Ok(response.json().await?)
        }
    }

    async fn send_write(
        &self,
        method: Method,
        path: &str,
        id: Option<Uuid>,
        body: Option<&Value>,
    ) -> Result<(), StoreError> {
        let mut request = self
            .request(method, path)
            .header("Prefer", "return=minimal");
        if let Some(id) = id {
            request = request.query(&[("id", format!("eq.{id}"))]);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::check(request.send().await?).await?;
        Ok(())
    }
}

/// Row count reported in a PGRST116 error body, e.g.
/// `"details": "The result contains 2 rows"`.
fn matched_row_count(body: &str) -> Option<u64> {
    let error: Value = serde_json::from_str(body).ok()?;
    let details = error.get("details")?.as_str()?;
    details
        .split_whitespace()
        .find_map(|word| word.parse::<u64>().ok())
}

/// Render a query as PostgREST query-string parameters.
pub fn query_params(query: &TableQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    for filter in &query.filters {
        match filter {
            Filter::Eq { column, value } => params.push((column.clone(), format!("eq.{value}"))),
            Filter::NotNull { column } => {
                params.push((column.clone(), "not.is.null".to_string()));
            }
        }
    }

    if let Some(order) = &query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(("order".to_string(), format!("{}.{direction}", order.column)));
    }

    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

#[async_trait]
impl ContentStore for PostgrestClient {
    #[instrument(skip(self, query), fields(table = %query.table), err)]
    async fn select(&self, query: &TableQuery) -> DomainResult<Vec<Value>> {
        Ok(self.send_select(query).await?)
    }

    #[instrument(skip(self, row), err)]
    async fn insert(&self, table: &str, row: Value) -> DomainResult<()> {
        Ok(self
            .send_write(Method::POST, table, None, Some(&row))
            .await?)
    }

    #[instrument(skip(self, changes), err)]
    async fn update(&self, table: &str, id: Uuid, changes: Value) -> DomainResult<()> {
        Ok(self
            .send_write(Method::PATCH, table, Some(id), Some(&changes))
            .await?)
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, table: &str, id: Uuid) -> DomainResult<()> {
        Ok(self
            .send_write(Method::DELETE, table, Some(id), None)
            .await?)
    }

    #[instrument(skip(self, args), err)]
    async fn rpc(&self, function: &str, args: Value) -> DomainResult<()> {
        let path = format!("rpc/{function}");
        let response = self
            .request(Method::POST, &path)
            .json(&args)
            .send()
            .await
            .map_err(StoreError::from)?;
        Self::check(response).await?;
        Ok(())
    }
}
