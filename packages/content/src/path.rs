//! # Content Paths
//!
//! Dotted path addressing into a block's JSON payload.
//!
//! Syntax: dot-separated object keys, with `key[index]` for array elements.
//! Indices may be chained (`rows[0][1]`) and nested freely
//! (`sections[2].items[0].title`).

use crate::error::{ContentError, ContentResult};

/// One resolved step of a content path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member access
    Key(String),
    /// Array element access
    Index(usize),
}

/// Parse a dotted path into typed segments.
///
/// ```
/// use pagecraft_content::path::{parse_path, PathSegment};
///
/// let segments = parse_path("items[0].title").unwrap();
/// assert_eq!(
///     segments,
///     vec![
///         PathSegment::Key("items".to_string()),
///         PathSegment::Index(0),
///         PathSegment::Key("title".to_string()),
///     ]
/// );
/// ```
pub fn parse_path(path: &str) -> ContentResult<Vec<PathSegment>> {
    if path.is_empty() {
        return Err(ContentError::EmptyPath);
    }

    let mut segments = Vec::new();

    for (position, part) in path.split('.').enumerate() {
        let (key, indices) = split_indices(part)?;

        // A part may be pure indices when chained after a previous
        // segment's bracket (e.g. "rows[0]" split never yields that, but
        // "a.[0]" is rejected as an empty key).
        if key.is_empty() {
            return Err(ContentError::EmptyKey(position));
        }
        segments.push(PathSegment::Key(key.to_string()));
        segments.extend(indices.into_iter().map(PathSegment::Index));
    }

    Ok(segments)
}

/// Split `key[1][2]` into the key and its trailing indices.
fn split_indices(part: &str) -> ContentResult<(&str, Vec<usize>)> {
    let Some(open) = part.find('[') else {
        return Ok((part, Vec::new()));
    };

    let (key, mut rest) = part.split_at(open);
    let mut indices = Vec::new();

    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return Err(ContentError::UnbalancedBrackets(part.to_string()));
        }
        let Some(close) = rest.find(']') else {
            return Err(ContentError::UnbalancedBrackets(part.to_string()));
        };
        let raw = &rest[1..close];
        let index = raw
            .parse::<usize>()
            .map_err(|_| ContentError::InvalidIndex(raw.to_string()))?;
        indices.push(index);
        rest = &rest[close + 1..];
    }

    Ok((key, indices))
}
