//! Store reachability probe.

use futures::future::join_all;
use serde::Serialize;

use crate::domain::models::{Collection, TableQuery};
use crate::domain::ports::ContentStore;

/// Backend table counted by the site but not read through the cache.
pub const PAGE_VIEWS_TABLE: &str = "page_views";

/// Outcome of probing one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCheck {
    pub table: String,
    pub ok: bool,
    pub error: Option<String>,
}

/// Select one row from every table the site depends on, concurrently.
pub async fn check_tables(store: &dyn ContentStore) -> Vec<TableCheck> {
    let tables = Collection::ALL
        .iter()
        .map(Collection::table)
        .chain(std::iter::once(PAGE_VIEWS_TABLE));

    join_all(tables.map(|table| check_table(store, table))).await
}

async fn check_table(store: &dyn ContentStore, table: &str) -> TableCheck {
    let query = TableQuery::from_table(table).limit(Some(1));
    match store.select(&query).await {
        Ok(_) => TableCheck {
            table: table.to_string(),
            ok: true,
            error: None,
        },
        Err(err) => {
            tracing::warn!(table, error = %err, "table check failed");
            TableCheck {
                table: table.to_string(),
                ok: false,
                error: Some(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryContentStore;

    #[tokio::test]
    async fn test_checks_every_table_in_order() {
        let store = InMemoryContentStore::new();
        let checks = check_tables(&store).await;

        let tables: Vec<&str> = checks.iter().map(|c| c.table.as_str()).collect();
        assert_eq!(tables, vec!["posts", "projects", "researches", "page_views"]);
        assert!(checks.iter().all(|c| c.ok));
    }

    #[tokio::test]
    async fn test_failures_are_reported_per_table() {
        let store = InMemoryContentStore::new();
        store.set_failing(true);
        let checks = check_tables(&store).await;

        assert!(checks.iter().all(|c| !c.ok));
        assert!(checks[0].error.as_deref().is_some_and(|e| e.contains("503")));
    }
}
