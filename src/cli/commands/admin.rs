//! Admin CLI commands.
//!
//! Listings read the store directly. Writes clear the read cache on
//! success. Rows can be addressed by full UUID or any unique prefix of
//! one; posts also by slug.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use crate::cli::context::AppContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::DomainError;
use crate::domain::models::{
    parse_tech_stack, slugify, Collection, Post, PostDraft, Project, ProjectDraft, Research,
    ResearchDraft,
};

#[derive(Args, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommands,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List every row of a collection, bypassing the read cache
    List {
        /// Collection (posts, projects, researches)
        collection: String,
    },
    /// Create a post
    CreatePost {
        /// Post title
        title: String,
        /// URL slug (derived from the title when omitted)
        #[arg(short, long)]
        slug: Option<String>,
        /// Post body (markdown)
        #[arg(short, long, default_value = "")]
        content: String,
        /// Short summary
        #[arg(short, long)]
        excerpt: Option<String>,
        /// Publish immediately
        #[arg(long)]
        publish: bool,
    },
    /// Edit an existing post
    EditPost {
        /// Post ID, ID prefix or slug
        post: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New slug
        #[arg(short, long)]
        slug: Option<String>,
        /// New body
        #[arg(short, long)]
        content: Option<String>,
        /// New summary
        #[arg(short, long)]
        excerpt: Option<String>,
    },
    /// Publish a draft, or unpublish a published post
    TogglePublish {
        /// Post ID, ID prefix or slug
        post: String,
    },
    /// Create a project
    CreateProject {
        /// Project title
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Comma-separated technologies
        #[arg(short, long, default_value = "")]
        tech_stack: String,
        #[arg(long)]
        github_url: Option<String>,
        #[arg(long)]
        demo_url: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// Show on the landing page
        #[arg(short, long)]
        featured: bool,
    },
    /// Create a research entry
    CreateResearch {
        /// Research title
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Comma-separated technologies
        #[arg(short, long, default_value = "")]
        tech_stack: String,
        #[arg(long)]
        github_url: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Edit an existing project
    EditProject {
        /// Project ID or ID prefix
        project: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Comma-separated technologies, replacing the current list
        #[arg(long)]
        tech_stack: Option<String>,
        #[arg(long)]
        github_url: Option<String>,
        #[arg(long)]
        demo_url: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// Show on the landing page
        #[arg(long)]
        featured: Option<bool>,
    },
    /// Edit an existing research entry
    EditResearch {
        /// Research ID or ID prefix
        research: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Comma-separated technologies, replacing the current list
        #[arg(long)]
        tech_stack: Option<String>,
        #[arg(long)]
        github_url: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a row
    Delete {
        /// Collection (posts, projects, researches)
        collection: String,
        /// Row ID or unique ID prefix
        id: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "collection", content = "rows", rename_all = "snake_case")]
pub enum AdminListOutput {
    Posts(Vec<Post>),
    Projects(Vec<Project>),
    Researches(Vec<Research>),
}

impl CommandOutput for AdminListOutput {
    fn to_human(&self) -> String {
        let formatter = TableFormatter::new();
        let (table, count) = match self {
            Self::Posts(rows) => (formatter.format_posts(rows), rows.len()),
            Self::Projects(rows) => (formatter.format_projects(rows), rows.len()),
            Self::Researches(rows) => (formatter.format_researches(rows), rows.len()),
        };
        if count == 0 {
            return "Collection is empty.".to_string();
        }
        format!("{table}\n\n{count} row(s)")
    }
}

#[derive(Debug, Serialize)]
pub struct AdminActionOutput {
    pub success: bool,
    pub action: String,
    pub collection: Collection,
    pub target: String,
    pub message: String,
}

impl CommandOutput for AdminActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

pub async fn execute(args: AdminArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let admin = &ctx.admin;

    let out = match args.command {
        AdminCommands::List { collection } => {
            let listing = match parse_collection(&collection)? {
                Collection::Posts => AdminListOutput::Posts(admin.list_posts().await?),
                Collection::Projects => AdminListOutput::Projects(admin.list_projects().await?),
                Collection::Researches => {
                    AdminListOutput::Researches(admin.list_researches().await?)
                }
            };
            output(&listing, json_mode);
            return Ok(());
        }

        AdminCommands::CreatePost {
            title,
            slug,
            content,
            excerpt,
            publish,
        } => {
            let slug = slug.unwrap_or_else(|| slugify(&title));
            let draft = PostDraft {
                slug: slug.clone(),
                title,
                content,
                excerpt,
                published_at: publish.then(Utc::now),
            };
            admin
                .create_post(&draft)
                .await
                .context("Failed to create post")?;
            action("create", Collection::Posts, slug.clone(), format!("Created post '{slug}'"))
        }

        AdminCommands::EditPost {
            post,
            title,
            slug,
            content,
            excerpt,
        } => {
            let existing = find_post(ctx, &post).await?;
            let mut draft = existing.to_draft();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(slug) = slug {
                draft.slug = slug;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            if excerpt.is_some() {
                draft.excerpt = excerpt;
            }
            admin
                .update_post(existing.id, &draft)
                .await
                .context("Failed to update post")?;
            action(
                "update",
                Collection::Posts,
                existing.id.to_string(),
                format!("Updated post '{}'", draft.slug),
            )
        }

        AdminCommands::TogglePublish { post } => {
            let existing = find_post(ctx, &post).await?;
            let published_at = admin
                .toggle_publish(&existing)
                .await
                .context("Failed to toggle publish state")?;
            let message = match published_at {
                Some(at) => format!("Published '{}' at {}", existing.slug, at.to_rfc3339()),
                None => format!("Moved '{}' back to drafts", existing.slug),
            };
            action("toggle_publish", Collection::Posts, existing.id.to_string(), message)
        }

        AdminCommands::CreateProject {
            title,
            description,
            tech_stack,
            github_url,
            demo_url,
            image_url,
            featured,
        } => {
            let draft = ProjectDraft {
                title: title.clone(),
                description,
                tech_stack: parse_tech_stack(&tech_stack),
                github_url,
                demo_url,
                image_url,
                featured,
            };
            admin
                .create_project(&draft)
                .await
                .context("Failed to create project")?;
            action("create", Collection::Projects, title.clone(), format!("Created project '{title}'"))
        }

        AdminCommands::CreateResearch {
            title,
            description,
            tech_stack,
            github_url,
            category,
        } => {
            let draft = ResearchDraft {
                title: title.clone(),
                description,
                tech_stack: parse_tech_stack(&tech_stack),
                github_url,
                category,
            };
            admin
                .create_research(&draft)
                .await
                .context("Failed to create research entry")?;
            action(
                "create",
                Collection::Researches,
                title.clone(),
                format!("Created research entry '{title}'"),
            )
        }

        AdminCommands::EditProject {
            project,
            title,
            description,
            tech_stack,
            github_url,
            demo_url,
            image_url,
            featured,
        } => {
            let existing = find_project(ctx, &project).await?;
            let mut draft = existing.to_draft();
            if let Some(title) = title {
                draft.title = title;
            }
            if description.is_some() {
                draft.description = description;
            }
            if let Some(tech_stack) = tech_stack {
                draft.tech_stack = parse_tech_stack(&tech_stack);
            }
            if github_url.is_some() {
                draft.github_url = github_url;
            }
            if demo_url.is_some() {
                draft.demo_url = demo_url;
            }
            if image_url.is_some() {
                draft.image_url = image_url;
            }
            if let Some(featured) = featured {
                draft.featured = featured;
            }
            admin
                .update_project(existing.id, &draft)
                .await
                .context("Failed to update project")?;
            action(
                "update",
                Collection::Projects,
                existing.id.to_string(),
                format!("Updated project '{}'", draft.title),
            )
        }

        AdminCommands::EditResearch {
            research,
            title,
            description,
            tech_stack,
            github_url,
            category,
        } => {
            let existing = find_research(ctx, &research).await?;
            let mut draft = existing.to_draft();
            if let Some(title) = title {
                draft.title = title;
            }
            if description.is_some() {
                draft.description = description;
            }
            if let Some(tech_stack) = tech_stack {
                draft.tech_stack = parse_tech_stack(&tech_stack);
            }
            if github_url.is_some() {
                draft.github_url = github_url;
            }
            if category.is_some() {
                draft.category = category;
            }
            admin
                .update_research(existing.id, &draft)
                .await
                .context("Failed to update research entry")?;
            action(
                "update",
                Collection::Researches,
                existing.id.to_string(),
                format!("Updated research entry '{}'", draft.title),
            )
        }

        AdminCommands::Delete { collection, id } => {
            let collection = parse_collection(&collection)?;
            let ids = list_ids(ctx, collection).await?;
            let id = resolve_id(&ids, &id, collection)?;
            let result = match collection {
                Collection::Posts => admin.delete_post(id).await,
                Collection::Projects => admin.delete_project(id).await,
                Collection::Researches => admin.delete_research(id).await,
            };
            result.with_context(|| format!("Failed to delete from {collection}"))?;
            action("delete", collection, id.to_string(), format!("Deleted {id} from {collection}"))
        }
    };

    output(&out, json_mode);
    Ok(())
}

fn action(action: &str, collection: Collection, target: String, message: String) -> AdminActionOutput {
    AdminActionOutput {
        success: true,
        action: action.to_string(),
        collection,
        target,
        message,
    }
}

fn parse_collection(name: &str) -> Result<Collection> {
    Collection::from_str(name).ok_or_else(|| {
        anyhow::anyhow!("Unknown collection '{name}'. Expected posts, projects or researches")
    })
}

async fn list_ids(ctx: &AppContext, collection: Collection) -> Result<Vec<Uuid>> {
    let admin = &ctx.admin;
    let ids = match collection {
        Collection::Posts => admin.list_posts().await?.iter().map(|p| p.id).collect(),
        Collection::Projects => admin.list_projects().await?.iter().map(|p| p.id).collect(),
        Collection::Researches => admin.list_researches().await?.iter().map(|r| r.id).collect(),
    };
    Ok(ids)
}

/// Find a post by exact slug first, then by ID or ID prefix.
async fn find_post(ctx: &AppContext, reference: &str) -> Result<Post> {
    let posts = ctx.admin.list_posts().await.context("Failed to list posts")?;
    if let Some(post) = posts.iter().find(|p| p.slug == reference) {
        return Ok(post.clone());
    }
    let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let id = resolve_id(&ids, reference, Collection::Posts)?;
    posts
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| row_not_found(Collection::Posts, reference))
}

async fn find_project(ctx: &AppContext, reference: &str) -> Result<Project> {
    let projects = ctx
        .admin
        .list_projects()
        .await
        .context("Failed to list projects")?;
    let ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();
    let id = resolve_id(&ids, reference, Collection::Projects)?;
    projects
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| row_not_found(Collection::Projects, reference))
}

async fn find_research(ctx: &AppContext, reference: &str) -> Result<Research> {
    let researches = ctx
        .admin
        .list_researches()
        .await
        .context("Failed to list research entries")?;
    let ids: Vec<Uuid> = researches.iter().map(|r| r.id).collect();
    let id = resolve_id(&ids, reference, Collection::Researches)?;
    researches
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| row_not_found(Collection::Researches, reference))
}

fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        bail!("ID prefix must not be empty");
    }
    if !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        bail!(
            "Invalid ID prefix '{}': must contain only hex characters and dashes",
            prefix
        );
    }
    Ok(())
}

fn row_not_found(collection: Collection, reference: &str) -> anyhow::Error {
    DomainError::NotFound {
        entity: format!("{collection} row"),
        id: reference.to_string(),
    }
    .into()
}

/// Resolve a full UUID or a unique prefix against known IDs.
///
/// Either form must name an existing row.
pub fn resolve_id(ids: &[Uuid], reference: &str, collection: Collection) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(reference) {
        if ids.contains(&id) {
            return Ok(id);
        }
        return Err(row_not_found(collection, reference));
    }
    validate_prefix(reference)?;

    let needle = reference.to_lowercase();
    let matches: Vec<&Uuid> = ids
        .iter()
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [] => Err(row_not_found(collection, reference)),
        [id] => Ok(**id),
        many => bail!(
            "Ambiguous prefix '{}' matches {} {} rows. Use a longer prefix.",
            reference,
            many.len(),
            collection
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_id_by_prefix() {
        let a = Uuid::parse_str("aaaa1111-0000-4000-8000-000000000000").unwrap();
        let b = Uuid::parse_str("aaab2222-0000-4000-8000-000000000000").unwrap();
        let ids = [a, b];

        assert_eq!(resolve_id(&ids, "aaaa", Collection::Posts).unwrap(), a);
        assert_eq!(resolve_id(&ids, "AAAB", Collection::Posts).unwrap(), b);
        assert_eq!(resolve_id(&ids, &a.to_string(), Collection::Posts).unwrap(), a);

        let err = resolve_id(&ids, "aaa", Collection::Posts).unwrap_err();
        assert!(err.to_string().contains("Ambiguous"));
        assert!(resolve_id(&ids, "ffff", Collection::Posts).is_err());
        assert!(resolve_id(&ids, "not-hex!", Collection::Posts).is_err());
    }

    #[test]
    fn test_resolve_id_rejects_unknown_full_uuid() {
        let known = Uuid::parse_str("aaaa1111-0000-4000-8000-000000000000").unwrap();
        let unknown = Uuid::new_v4();

        let err = resolve_id(&[known], &unknown.to_string(), Collection::Projects).unwrap_err();
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::NotFound { entity, id }) => {
                assert_eq!(entity, "projects row");
                assert_eq!(id, &unknown.to_string());
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }

        let err = resolve_id(&[], &unknown.to_string(), Collection::Projects).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_unmatched_prefix_is_not_found() {
        let known = Uuid::parse_str("aaaa1111-0000-4000-8000-000000000000").unwrap();
        let err = resolve_id(&[known], "bbbb", Collection::Researches).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound { .. })
        ));
    }

    async fn offline_context() -> AppContext {
        AppContext::offline(&crate::domain::models::Config::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_delete_unknown_uuid_is_not_found() {
        let ctx = offline_context().await;
        let before = ctx.admin.list_projects().await.unwrap().len();

        let args = AdminArgs {
            command: AdminCommands::Delete {
                collection: "projects".to_string(),
                id: Uuid::new_v4().to_string(),
            },
        };
        let err = execute(args, &ctx, true).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound { .. })
        ));
        assert_eq!(ctx.admin.list_projects().await.unwrap().len(), before);
        assert_eq!(ctx.cache.stats().clears(), 0);
    }

    #[tokio::test]
    async fn test_edit_project_by_prefix_keeps_other_fields() {
        let ctx = offline_context().await;
        let project = ctx.admin.list_projects().await.unwrap().remove(0);
        let prefix = project.id.to_string()[..8].to_string();

        let args = AdminArgs {
            command: AdminCommands::EditProject {
                project: prefix,
                title: Some("renamed".to_string()),
                description: None,
                tech_stack: Some("rust, tokio".to_string()),
                github_url: None,
                demo_url: None,
                image_url: None,
                featured: None,
            },
        };
        execute(args, &ctx, true).await.unwrap();

        let updated = ctx
            .admin
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .find(|p| p.id == project.id)
            .unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.tech_stack, vec!["rust", "tokio"]);
        assert_eq!(updated.featured, project.featured);
        assert_eq!(updated.description, project.description);
    }

    #[tokio::test]
    async fn test_edit_research_category() {
        let ctx = offline_context().await;
        let research = ctx.admin.list_researches().await.unwrap().remove(0);

        let args = AdminArgs {
            command: AdminCommands::EditResearch {
                research: research.id.to_string(),
                title: None,
                description: None,
                tech_stack: None,
                github_url: None,
                category: Some("systems".to_string()),
            },
        };
        execute(args, &ctx, true).await.unwrap();

        let updated = ctx.admin.list_researches().await.unwrap().remove(0);
        assert_eq!(updated.id, research.id);
        assert_eq!(updated.category.as_deref(), Some("systems"));
        assert_eq!(updated.title, research.title);
    }

    #[test]
    fn test_parse_collection() {
        assert_eq!(parse_collection("projects").unwrap(), Collection::Projects);
        assert!(parse_collection("pages").is_err());
    }
}
