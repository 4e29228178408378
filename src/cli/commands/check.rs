//! Store connectivity check.

use anyhow::Result;
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::cli::AlreadyReported;
use crate::services::{check_tables, TableCheck};

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub ok: bool,
    pub tables: Vec<TableCheck>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let summary = if self.ok {
            "All tables reachable."
        } else {
            "Some tables could not be read."
        };
        format!("{}\n\n{summary}", TableFormatter::new().format_checks(&self.tables))
    }
}

/// Probe every table. The report is the only output; failures exit non-zero.
pub async fn execute(ctx: &AppContext, json_mode: bool) -> Result<()> {
    let tables = check_tables(ctx.store.as_ref()).await;
    let ok = tables.iter().all(|t| t.ok);
    output(&CheckOutput { ok, tables }, json_mode);

    if !ok {
        return Err(AlreadyReported("store check failed").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::InMemoryContentStore;
    use crate::cli::error_report;
    use crate::services::ReadCache;

    #[tokio::test]
    async fn test_failed_check_is_reported_once() {
        let store = Arc::new(InMemoryContentStore::new());
        store.set_failing(true);
        let ctx = AppContext::new(store, Arc::new(ReadCache::new()));

        let err = execute(&ctx, true).await.unwrap_err();
        assert!(err.is::<AlreadyReported>());
        assert!(error_report(&err, true).is_none());
    }

    #[tokio::test]
    async fn test_healthy_store_passes() {
        let store = Arc::new(InMemoryContentStore::new());
        let ctx = AppContext::new(store, Arc::new(ReadCache::new()));
        execute(&ctx, false).await.unwrap();
    }
}
