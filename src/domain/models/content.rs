//! Content domain models.
//!
//! Rows of the three collections the site reads (posts, projects,
//! researches) plus the draft shapes the admin screens write back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A logical collection in the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Posts,
    Projects,
    Researches,
}

impl Collection {
    /// All collections, in the order the admin screens show them.
    pub const ALL: [Self; 3] = [Self::Posts, Self::Projects, Self::Researches];

    /// Table name in the remote store.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Projects => "projects",
            Self::Researches => "researches",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "posts" | "post" => Some(Self::Posts),
            "projects" | "project" => Some(Self::Projects),
            "researches" | "research" => Some(Self::Researches),
            _ => None,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// A blog post.
///
/// `published_at` is `None` for drafts; public listings only show rows
/// where it is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    /// Convert back into the editable shape.
    pub fn to_draft(&self) -> PostDraft {
        PostDraft {
            slug: self.slug.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            excerpt: self.excerpt.clone(),
            published_at: self.published_at,
        }
    }
}

/// Editable fields of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            tech_stack: self.tech_stack.clone(),
            github_url: self.github_url.clone(),
            demo_url: self.demo_url.clone(),
            image_url: self.image_url.clone(),
            featured: self.featured,
        }
    }
}

/// Editable fields of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
}

/// A research entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Research {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Research {
    pub fn to_draft(&self) -> ResearchDraft {
        ResearchDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            tech_stack: self.tech_stack.clone(),
            github_url: self.github_url.clone(),
            category: self.category.clone(),
        }
    }
}

/// Editable fields of a research entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchDraft {
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub github_url: Option<String>,
    pub category: Option<String>,
}

/// Split a comma-separated tech stack as typed into the admin form.
pub fn parse_tech_stack(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_tables() {
        assert_eq!(Collection::Posts.table(), "posts");
        assert_eq!(Collection::Projects.table(), "projects");
        assert_eq!(Collection::Researches.table(), "researches");
        assert_eq!(Collection::from_str("Research"), Some(Collection::Researches));
        assert_eq!(Collection::from_str("pages"), None);
    }

    #[test]
    fn test_post_row_decoding() {
        let row = serde_json::json!({
            "id": "6f2d1a8e-8c1e-4b59-9c0a-1f1f3b7d2a10",
            "slug": "test-post",
            "title": "Test Post",
            "content": "Test content",
            "excerpt": null,
            "published_at": "2026-02-10T00:00:00Z",
            "view_count": 3,
            "created_at": "2026-02-10T00:00:00Z"
        });

        let post: Post = serde_json::from_value(row).unwrap();
        assert_eq!(post.slug, "test-post");
        assert!(post.is_published());
        assert_eq!(post.view_count, 3);
        assert!(post.excerpt.is_none());
    }

    #[test]
    fn test_project_row_defaults() {
        let row = serde_json::json!({
            "id": "0b5c3f4e-2d7a-4c8e-9f10-112233445566",
            "title": "folio",
            "created_at": "2026-01-01T12:00:00Z"
        });

        let project: Project = serde_json::from_value(row).unwrap();
        assert!(!project.featured);
        assert!(project.tech_stack.is_empty());
    }

    #[test]
    fn test_parse_tech_stack() {
        assert_eq!(
            parse_tech_stack("Rust, tokio , ,axum"),
            vec!["Rust".to_string(), "tokio".to_string(), "axum".to_string()]
        );
        assert!(parse_tech_stack("").is_empty());
    }
}
