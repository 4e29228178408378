//! Research CLI commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Research, ResearchListOptions};

#[derive(Args, Debug)]
pub struct ResearchArgs {
    #[command(subcommand)]
    pub command: ResearchCommands,
}

#[derive(Subcommand, Debug)]
pub enum ResearchCommands {
    /// List research entries, newest first
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Maximum number of entries to display
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

#[derive(Debug, Serialize)]
pub struct ResearchListOutput {
    pub researches: Vec<Research>,
    pub total: usize,
}

impl CommandOutput for ResearchListOutput {
    fn to_human(&self) -> String {
        if self.researches.is_empty() {
            return "No research entries found.".to_string();
        }
        format!(
            "{}\n\nShowing {} entr{}",
            TableFormatter::new().format_researches(&self.researches),
            self.total,
            if self.total == 1 { "y" } else { "ies" }
        )
    }
}

pub async fn execute(args: ResearchArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    match args.command {
        ResearchCommands::List { category, limit } => {
            let options = ResearchListOptions { category, limit };
            let researches = ctx
                .content
                .get_researches(&options)
                .await
                .context("Failed to list research entries")?;

            output(
                &ResearchListOutput {
                    total: researches.len(),
                    researches: researches.as_ref().clone(),
                },
                json_mode,
            );
        }
    }

    Ok(())
}
