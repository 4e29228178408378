//! CLI command implementations.

pub mod admin;
pub mod cache;
pub mod check;
pub mod posts;
pub mod projects;
pub mod researches;
