//! Cache key derivation.
//!
//! A key is the logical operation name followed by a canonical JSON
//! rendering of the (normalized) options. Object keys are sorted at every
//! depth so the rendering never depends on field declaration order or on
//! map insertion order.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::domain::errors::DomainResult;

use super::query::{PostListOptions, ProjectListOptions, ResearchListOptions};

/// Operation names used as key prefixes.
pub mod operation {
    pub const POSTS: &str = "posts";
    pub const POST: &str = "post";
    pub const PROJECTS: &str = "projects";
    pub const RESEARCHES: &str = "researches";
}

/// Key for read cache lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build a key from an operation name and its serialized options.
    pub fn for_operation<O: Serialize>(operation: &str, options: &O) -> DomainResult<Self> {
        let value = serde_json::to_value(options)?;
        Ok(Self(format!("{operation}-{}", canonical_json(&value))))
    }

    pub fn posts(options: &PostListOptions) -> DomainResult<Self> {
        Self::for_operation(operation::POSTS, &options.normalized())
    }

    /// Per-slug key for single post lookups.
    pub fn post(slug: &str) -> Self {
        Self(format!("{}-{slug}", operation::POST))
    }

    pub fn projects(options: &ProjectListOptions) -> DomainResult<Self> {
        Self::for_operation(operation::PROJECTS, &options.normalized())
    }

    pub fn researches(options: &ResearchListOptions) -> DomainResult<Self> {
        Self::for_operation(operation::RESEARCHES, &options.normalized())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for CacheKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&CacheKey> for CacheKey {
    fn from(key: &CacheKey) -> Self {
        key.clone()
    }
}

/// Render a JSON value with object keys sorted at every depth.
pub fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let body = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), canonical_json(v)))
                .collect::<Vec<_>>()
                .join(",");
            format!("{{{body}}}")
        }
        Value::Array(items) => {
            let body = items.iter().map(canonical_json).collect::<Vec<_>>().join(",");
            format!("[{body}]")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_list_key() {
        let key = CacheKey::posts(&PostListOptions::with_limit(5)).unwrap();
        assert_eq!(key.as_str(), r#"posts-{"limit":5}"#);

        let key = CacheKey::posts(&PostListOptions::default()).unwrap();
        assert_eq!(key.as_str(), "posts-{}");
    }

    #[test]
    fn test_slug_key() {
        assert_eq!(CacheKey::post("test-post").as_str(), "post-test-post");
        assert_ne!(CacheKey::post("test-post"), CacheKey::post("other-post"));
    }

    #[test]
    fn test_equivalent_options_share_a_key() {
        let explicit = ProjectListOptions {
            featured: false,
            limit: Some(0),
        };
        assert_eq!(
            CacheKey::projects(&explicit).unwrap(),
            CacheKey::projects(&ProjectListOptions::default()).unwrap()
        );
    }

    #[test]
    fn test_canonical_json_sorts_nested_keys() {
        let a = serde_json::json!({"b": 1, "a": {"z": true, "y": [2, {"d": 1, "c": 0}]}});
        assert_eq!(
            canonical_json(&a),
            r#"{"a":{"y":[2,{"c":0,"d":1}],"z":true},"b":1}"#
        );
    }

    #[test]
    fn test_operations_do_not_collide() {
        let posts = CacheKey::posts(&PostListOptions::default()).unwrap();
        let projects = CacheKey::projects(&ProjectListOptions::default()).unwrap();
        let researches = CacheKey::researches(&ResearchListOptions::default()).unwrap();
        assert_ne!(posts, projects);
        assert_ne!(projects, researches);
        assert_ne!(posts, CacheKey::post("s-{}"));
    }
}
