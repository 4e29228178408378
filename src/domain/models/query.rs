//! Read query models.
//!
//! `TableQuery` is the store-agnostic description of a read: equality and
//! non-null filters, a single ordering column, and an optional row limit.
//! The `*ListOptions` types are what page code passes to the content
//! service; they are normalized before being turned into cache keys so that
//! options with the same effect share one entry.

use serde::{Deserialize, Serialize};

use super::content::Collection;

/// A single row filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// `column = value`
    Eq { column: String, value: String },
    /// `column IS NOT NULL`
    NotNull { column: String },
}

/// Ordering on a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub column: String,
    pub ascending: bool,
}

/// A read against one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableQuery {
    pub table: String,
    pub filters: Vec<Filter>,
    pub order: Option<Ordering>,
    pub limit: Option<u32>,
    /// Expect at most one row; an empty result is not an error.
    pub single: bool,
}

impl TableQuery {
    pub fn from_table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            order: None,
            limit: None,
            single: false,
        }
    }

    pub fn from_collection(collection: Collection) -> Self {
        Self::from_table(collection.table())
    }

    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn not_null(mut self, column: impl Into<String>) -> Self {
        self.filters.push(Filter::NotNull {
            column: column.into(),
        });
        self
    }

    #[must_use]
    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Ordering {
            column: column.into(),
            ascending,
        });
        self
    }

    /// Apply a row limit. A limit of zero means "no limit".
    #[must_use]
    pub fn limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit.filter(|&n| n > 0);
        self
    }

    #[must_use]
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }
}

/// Options for listing posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostListOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub include_unpublished: bool,
}

impl PostListOptions {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Drop settings that do not change the query.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            limit: self.limit.filter(|&n| n > 0),
            include_unpublished: self.include_unpublished,
        }
    }
}

/// Options for listing projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectListOptions {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ProjectListOptions {
    pub fn featured() -> Self {
        Self {
            featured: true,
            limit: None,
        }
    }

    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            featured: self.featured,
            limit: self.limit.filter(|&n| n > 0),
        }
    }
}

/// Options for listing researches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchListOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ResearchListOptions {
    pub fn in_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            limit: None,
        }
    }

    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            category: self.category.clone().filter(|c| !c.is_empty()),
            limit: self.limit.filter(|&n| n > 0),
        }
    }
}
