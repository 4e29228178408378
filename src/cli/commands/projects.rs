//! Project CLI commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Project, ProjectListOptions};

#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects, newest first
    List {
        /// Only featured projects
        #[arg(short, long)]
        featured: bool,
        /// Maximum number of projects to display
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

#[derive(Debug, Serialize)]
pub struct ProjectListOutput {
    pub projects: Vec<Project>,
    pub total: usize,
}

impl CommandOutput for ProjectListOutput {
    fn to_human(&self) -> String {
        if self.projects.is_empty() {
            return "No projects found.".to_string();
        }
        format!(
            "{}\n\nShowing {} project{}",
            TableFormatter::new().format_projects(&self.projects),
            self.total,
            if self.total == 1 { "" } else { "s" }
        )
    }
}

pub async fn execute(args: ProjectArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    match args.command {
        ProjectCommands::List { featured, limit } => {
            let options = ProjectListOptions { featured, limit };
            let projects = ctx
                .content
                .get_projects(&options)
                .await
                .context("Failed to list projects")?;

            output(
                &ProjectListOutput {
                    total: projects.len(),
                    projects: projects.as_ref().clone(),
                },
                json_mode,
            );
        }
    }

    Ok(())
}
