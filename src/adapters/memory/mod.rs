//! In-memory content store.
//!
//! Evaluates [`TableQuery`] filters, ordering and limits over JSON rows
//! held in memory. Used by tests and by the CLI's offline mode. Every
//! `select` is counted so callers can observe whether the read cache
//! reached the store.

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Filter, TableQuery};
use crate::domain::ports::{ContentStore, INCREMENT_VIEW_COUNT};

/// Content store backed by a map of table name to rows.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    selects: AtomicUsize,
    rpc_calls: RwLock<Vec<(String, Value)>>,
    failing: AtomicBool,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with typed rows.
    pub async fn seed<T: Serialize>(&self, table: &str, rows: &[T]) -> DomainResult<()> {
        let rows = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .extend(rows);
        Ok(())
    }

    /// Number of `select` calls served so far.
    pub fn select_count(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    /// Remote procedure calls received, in order.
    pub async fn rpc_calls(&self) -> Vec<(String, Value)> {
        self.rpc_calls.read().await.clone()
    }

    /// Make every subsequent call fail with a 503 until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::StoreStatus {
                status: 503,
                body: "store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn field_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn matches(row: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq { column, value } => {
            row.get(column).and_then(field_as_text).as_deref() == Some(value.as_str())
        }
        Filter::NotNull { column } => row.get(column).is_some_and(|v| !v.is_null()),
    }
}

/// Compare two column values; null sorts after everything.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> CmpOrdering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => CmpOrdering::Equal,
        (None, Some(_)) => CmpOrdering::Greater,
        (Some(_), None) => CmpOrdering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(CmpOrdering::Equal),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => field_as_text(x).cmp(&field_as_text(y)),
    }
}

fn id_matches(row: &Value, id: Uuid) -> bool {
    row.get("id").and_then(Value::as_str) == Some(id.to_string().as_str())
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn select(&self, query: &TableQuery) -> DomainResult<Vec<Value>> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(tables);

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }

        let limit = if query.single { Some(1) } else { query.limit };
        if let Some(limit) = limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> DomainResult<()> {
        self.check_available()?;
        let Value::Object(mut fields) = row else {
            return Err(DomainError::ValidationFailed(format!(
                "row for {table} must be a JSON object"
            )));
        };
        fields
            .entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        fields
            .entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));

        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(Value::Object(fields));
        Ok(())
    }

    async fn update(&self, table: &str, id: Uuid, changes: Value) -> DomainResult<()> {
        self.check_available()?;
        let Value::Object(changes) = changes else {
            return Err(DomainError::ValidationFailed(format!(
                "changes for {table} must be a JSON object"
            )));
        };

        let mut tables = self.tables.write().await;
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| id_matches(row, id)) {
                if let Value::Object(fields) = row {
                    merge(fields, &changes);
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &str, id: Uuid) -> DomainResult<()> {
        self.check_available()?;
        if let Some(rows) = self.tables.write().await.get_mut(table) {
            rows.retain(|row| !id_matches(row, id));
        }
        Ok(())
    }

    async fn rpc(&self, function: &str, args: Value) -> DomainResult<()> {
        self.check_available()?;
        self.rpc_calls
            .write()
            .await
            .push((function.to_string(), args.clone()));

        if function != INCREMENT_VIEW_COUNT {
            return Err(DomainError::StoreStatus {
                status: 404,
                body: format!("function {function} not found"),
            });
        }

        let slug = args.get("post_slug").and_then(Value::as_str);
        let mut tables = self.tables.write().await;
        if let (Some(slug), Some(posts)) = (slug, tables.get_mut("posts")) {
            for post in posts
                .iter_mut()
                .filter(|p| p.get("slug").and_then(Value::as_str) == Some(slug))
            {
                let count = post.get("view_count").and_then(Value::as_i64).unwrap_or(0);
                if let Some(fields) = post.as_object_mut() {
                    fields.insert("view_count".to_string(), Value::from(count + 1));
                }
            }
        }
        Ok(())
    }
}

fn merge(fields: &mut Map<String, Value>, changes: &Map<String, Value>) {
    for (k, v) in changes {
        fields.insert(k.clone(), v.clone());
    }
}
