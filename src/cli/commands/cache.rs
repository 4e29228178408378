//! Read cache CLI commands.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::PostListOptions;
use crate::services::CacheStatsSnapshot;

#[derive(Args, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Read through the cache twice, clear it, read again, and report
    Demo {
        /// Post listing limit used for the reads
        #[arg(short, long, default_value = "5")]
        limit: u32,
    },
}

#[derive(Debug, Serialize)]
pub struct DemoStep {
    pub step: String,
    pub served_by: &'static str,
    pub elapsed_us: u128,
}

#[derive(Debug, Serialize)]
pub struct CacheDemoOutput {
    pub ttl_secs: u64,
    pub steps: Vec<DemoStep>,
    pub same_value_on_hit: bool,
    pub entries_before_clear: usize,
    pub stats: CacheStatsSnapshot,
}

impl CommandOutput for CacheDemoOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Read cache (ttl {}s)", self.ttl_secs),
            "─────────────────────────────────────────".to_string(),
        ];
        for step in &self.steps {
            lines.push(format!(
                "{:<28} {:<6} {:>8}µs",
                step.step, step.served_by, step.elapsed_us
            ));
        }
        lines.push(String::new());
        lines.push(format!("Same value on hit:     {}", self.same_value_on_hit));
        lines.push(format!("Entries before clear:  {}", self.entries_before_clear));
        lines.push(format!(
            "Hits {} / misses {} / clears {} (hit rate {:.0}%)",
            self.stats.hits,
            self.stats.misses,
            self.stats.clears,
            self.stats.hit_rate * 100.0
        ));
        lines.join("\n")
    }
}

struct Recorder<'a> {
    ctx: &'a AppContext,
    steps: Vec<DemoStep>,
}

impl Recorder<'_> {
    /// Time one read and note whether it reached the store.
    async fn record<T, F>(&mut self, step: impl Into<String>, read: F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        let misses_before = self.ctx.cache.stats().misses();
        let started = Instant::now();
        let value = read.await?;
        let elapsed_us = started.elapsed().as_micros();
        let served_by = if self.ctx.cache.stats().misses() > misses_before {
            "store"
        } else {
            "cache"
        };
        self.steps.push(DemoStep {
            step: step.into(),
            served_by,
            elapsed_us,
        });
        Ok(value)
    }
}

pub async fn execute(args: CacheArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    match args.command {
        CacheCommands::Demo { limit } => {
            let out = run_demo(ctx, limit).await?;
            output(&out, json_mode);
        }
    }
    Ok(())
}

pub async fn run_demo(ctx: &AppContext, limit: u32) -> Result<CacheDemoOutput> {
    let options = PostListOptions::with_limit(limit);
    let content = &ctx.content;
    let mut recorder = Recorder {
        ctx,
        steps: Vec::new(),
    };

    let label = format!("posts (limit {limit})");
    let first = recorder
        .record(label.clone(), async {
            content.get_posts(&options).await.context("Failed to list posts")
        })
        .await?;
    let second = recorder
        .record(label.clone(), async {
            content.get_posts(&options).await.context("Failed to list posts")
        })
        .await?;

    if let Some(slug) = first.first().map(|post| post.slug.clone()) {
        for _ in 0..2 {
            recorder
                .record(format!("post {slug}"), async {
                    content
                        .get_post_by_slug(&slug)
                        .await
                        .context("Failed to load post")
                })
                .await?;
        }
    }

    let entries_before_clear = ctx.cache.len().await;
    content.clear_cache().await;

    recorder
        .record(format!("{label} after clear"), async {
            content.get_posts(&options).await.context("Failed to list posts")
        })
        .await?;

    Ok(CacheDemoOutput {
        ttl_secs: ctx.cache.ttl().as_secs(),
        same_value_on_hit: Arc::ptr_eq(&first, &second),
        entries_before_clear,
        steps: recorder.steps,
        stats: ctx.cache.stats().snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Config;

    #[tokio::test]
    async fn test_demo_against_sample_content() {
        let ctx = AppContext::offline(&Config::default()).await.unwrap();
        let out = run_demo(&ctx, 5).await.unwrap();

        let served: Vec<&str> = out.steps.iter().map(|s| s.served_by).collect();
        assert_eq!(served, vec!["store", "cache", "store", "cache", "store"]);
        assert!(out.same_value_on_hit);
        assert_eq!(out.entries_before_clear, 2);
        assert_eq!(out.stats.hits, 2);
        assert_eq!(out.stats.misses, 3);
        assert_eq!(out.stats.clears, 1);
    }
}
