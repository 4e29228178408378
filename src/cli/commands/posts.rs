//! Post CLI commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Post, PostListOptions};
use crate::domain::DomainError;

#[derive(Args, Debug)]
pub struct PostArgs {
    #[command(subcommand)]
    pub command: PostCommands,
}

#[derive(Subcommand, Debug)]
pub enum PostCommands {
    /// List posts, newest first
    List {
        /// Maximum number of posts to display
        #[arg(short, long)]
        limit: Option<u32>,
        /// Include drafts
        #[arg(long)]
        all: bool,
    },
    /// Show a post by slug
    Show {
        /// Post slug
        slug: String,
        /// Count this read as a page view
        #[arg(long)]
        count_view: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct PostListOutput {
    pub posts: Vec<Post>,
    pub total: usize,
}

impl CommandOutput for PostListOutput {
    fn to_human(&self) -> String {
        if self.posts.is_empty() {
            return "No posts found.".to_string();
        }
        format!(
            "{}\n\nShowing {} post{}",
            TableFormatter::new().format_posts(&self.posts),
            self.total,
            if self.total == 1 { "" } else { "s" }
        )
    }
}

#[derive(Debug, Serialize)]
pub struct PostDetailOutput {
    pub post: Post,
    pub view_counted: bool,
}

impl CommandOutput for PostDetailOutput {
    fn to_human(&self) -> String {
        let post = &self.post;
        let published = post
            .published_at
            .map_or_else(|| "draft".to_string(), |at| at.format("%Y-%m-%d %H:%M UTC").to_string());

        let mut lines = vec![
            format!("\n{}", post.title),
            "─────────────────────────────────────────".to_string(),
            format!("Slug:       {}", post.slug),
            format!("ID:         {}", post.id),
            format!("Published:  {published}"),
            format!("Views:      {}", post.view_count),
        ];
        if let Some(excerpt) = &post.excerpt {
            lines.push(format!("Excerpt:    {excerpt}"));
        }
        lines.push(String::new());
        lines.push(post.content.clone());
        lines.join("\n")
    }
}

pub async fn execute(args: PostArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    match args.command {
        PostCommands::List { limit, all } => {
            let options = PostListOptions {
                limit,
                include_unpublished: all,
            };
            let posts = ctx
                .content
                .get_posts(&options)
                .await
                .context("Failed to list posts")?;

            let out = PostListOutput {
                total: posts.len(),
                posts: posts.as_ref().clone(),
            };
            output(&out, json_mode);
        }
        PostCommands::Show { slug, count_view } => {
            let post = ctx
                .content
                .get_post_by_slug(&slug)
                .await
                .context("Failed to load post")?;
            let post = post
                .as_ref()
                .clone()
                .ok_or_else(|| DomainError::NotFound {
                    entity: "post".to_string(),
                    id: slug.clone(),
                })?;

            if count_view {
                // the process exits right after printing, so wait for the bump
                ctx.content
                    .spawn_view_increment(&slug)
                    .await
                    .context("View count task panicked")?;
            }

            output(
                &PostDetailOutput {
                    post,
                    view_counted: count_view,
                },
                json_mode,
            );
        }
    }

    Ok(())
}
