//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{
    admin::AdminArgs, cache::CacheArgs, posts::PostArgs, projects::ProjectArgs,
    researches::ResearchArgs,
};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "folio - cached content access for a blog and portfolio backend", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .folio/
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use built-in sample content instead of the remote store
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read posts through the cache
    Posts(PostArgs),

    /// Read projects through the cache
    Projects(ProjectArgs),

    /// Read research entries through the cache
    Researches(ResearchArgs),

    /// Uncached listings and content writes
    Admin(AdminArgs),

    /// Read cache diagnostics
    Cache(CacheArgs),

    /// Probe every table the site reads
    Check,
}
