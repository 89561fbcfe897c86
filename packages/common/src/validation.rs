//! Local validation helpers shared across the workspace.

use regex::Regex;
use std::sync::OnceLock;

/// Lowercase alphanumeric segments joined by single hyphens.
fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid")
    })
}

/// Whether `slug` is a well-formed URL slug.
///
/// This is shape validation only; availability against the remote store is
/// a separate check.
pub fn valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug_pattern().is_match(slug)
}
