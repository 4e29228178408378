//! Table output formatting for CLI commands
//!
//! Renders posts, projects, researches and store checks with comfy-table.
//! Colors are dropped when `NO_COLOR` is set or the terminal is dumb.

use std::env;

use chrono::{DateTime, Utc};
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use crate::domain::models::{Post, Project, Research};
use crate::services::TableCheck;

use super::truncate;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    pub fn format_posts(&self, posts: &[Post]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Slug", "Title", "Published", "Views"]));

        for post in posts {
            let published = match post.published_at {
                Some(at) => self.colored(format_relative_time(&at), Color::Green),
                None => self.colored("draft".to_string(), Color::Yellow),
            };
            table.add_row(vec![
                Cell::new(&post.slug),
                Cell::new(truncate(&post.title, 48)),
                published,
                Cell::new(post.view_count),
            ]);
        }

        table.to_string()
    }

    pub fn format_projects(&self, projects: &[Project]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Title", "Stack", "Featured", "Links"]));

        for project in projects {
            let featured = if project.featured {
                self.colored("yes".to_string(), Color::Cyan)
            } else {
                Cell::new("-")
            };
            let links = [project.github_url.as_deref(), project.demo_url.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join("\n");
            table.add_row(vec![
                Cell::new(truncate(&project.title, 40)),
                Cell::new(project.tech_stack.join(", ")),
                featured,
                Cell::new(if links.is_empty() { "-".to_string() } else { links }),
            ]);
        }

        table.to_string()
    }

    pub fn format_researches(&self, researches: &[Research]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Title", "Category", "Stack", "Created"]));

        for research in researches {
            table.add_row(vec![
                Cell::new(truncate(&research.title, 40)),
                Cell::new(research.category.as_deref().unwrap_or("-")),
                Cell::new(research.tech_stack.join(", ")),
                Cell::new(research.created_at.format("%Y-%m-%d").to_string()),
            ]);
        }

        table.to_string()
    }

    pub fn format_checks(&self, checks: &[TableCheck]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Table", "Status", "Detail"]));

        for check in checks {
            let status = if check.ok {
                self.colored("ok".to_string(), Color::Green)
            } else {
                self.colored("error".to_string(), Color::Red)
            };
            table.add_row(vec![
                Cell::new(&check.table),
                status,
                Cell::new(check.error.as_deref().unwrap_or("-")),
            ]);
        }

        table.to_string()
    }

    fn colored(&self, text: String, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

fn format_relative_time(datetime: &DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(*datetime);

    if duration.num_seconds() < 0 {
        // scheduled
        datetime.format("%Y-%m-%d").to_string()
    } else if duration.num_seconds() < 60 {
        "just now".to_string()
    } else if duration.num_minutes() < 60 {
        let mins = duration.num_minutes();
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if duration.num_hours() < 24 {
        let hours = duration.num_hours();
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if duration.num_days() < 30 {
        let days = duration.num_days();
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        datetime.format("%Y-%m-%d").to_string()
    }
}
