//! Post slug rules.
//!
//! Slugs may contain lowercase ASCII letters, digits, Hangul syllables and
//! `-`. They never start or end with a dash.

const HANGUL_SYLLABLES: std::ops::RangeInclusive<char> = '\u{AC00}'..='\u{D7A3}';

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || HANGUL_SYLLABLES.contains(&c)
}

/// Derive a slug from a post title.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|&c| is_slug_char(c) || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .trim_matches('-')
        .to_string()
}

/// Check a slug entered in the admin form.
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() {
        return Err("slug cannot be empty".to_string());
    }
    if let Some(bad) = slug.chars().find(|&c| !is_slug_char(c)) {
        return Err(format!("slug contains invalid character '{bad}'"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err("slug cannot start or end with '-'".to_string());
    }
    Ok(())
}
