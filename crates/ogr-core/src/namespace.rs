//! # Namespace Paths
//!
//! A namespace path is an ordered, non-empty sequence of lowercase segment
//! names, written joined by `:` (`og:image:width`). The same value names a
//! registered type (`og:image`) or a property slot on a parent type
//! (`og:image:width`), depending on where it is looked up.
//!
//! ## Validation
//!
//! - At least one segment.
//! - No empty segment (`og::image` is rejected).
//! - Segments are case-folded to lowercase at construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Separator between namespace segments.
pub const SEPARATOR: char = ':';

/// A validated, lowercase, colon-delimited namespace path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespacePath(Vec<String>);

impl NamespacePath {
    /// Parse a colon-joined path such as `og:image:width`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Self::from_segments(raw.split(SEPARATOR))
    }

    /// Build a path from individual segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .collect();

        if segments.is_empty() {
            return Err(ValidationError::InvalidNamespace {
                value: String::new(),
                reason: "no segments".to_string(),
            });
        }
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || s.contains(SEPARATOR))
        {
            return Err(ValidationError::InvalidNamespace {
                value: segments.join(":"),
                reason: if bad.is_empty() {
                    "empty segment".to_string()
                } else {
                    format!("segment {bad:?} contains a separator")
                },
            });
        }

        Ok(Self(segments))
    }

    /// All segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first segment, naming the top-level namespace.
    pub fn root(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    /// The last segment.
    pub fn leaf(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// The path without its last segment, or `None` for a single segment.
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() > 1 {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        } else {
            None
        }
    }

    /// The leading `len` segments, or `None` if `len` is zero or exceeds
    /// the path length.
    pub fn truncated(&self, len: usize) -> Option<Self> {
        if len == 0 || len > self.0.len() {
            return None;
        }
        Some(Self(self.0[..len].to_vec()))
    }

    /// This path extended by one segment.
    pub fn child(&self, segment: &str) -> Result<Self, ValidationError> {
        Self::from_segments(self.0.iter().map(String::as_str).chain([segment]))
    }

    /// Whether `prefix` is a leading sub-path of this path.
    pub fn starts_with(&self, prefix: &NamespacePath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// The colon-joined form.
    pub fn joined(&self) -> String {
        self.0.join(":")
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined())
    }
}

impl FromStr for NamespacePath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NamespacePath {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NamespacePath> for String {
    fn from(path: NamespacePath) -> Self {
        path.joined()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_and_lowercases() {
        let path = NamespacePath::parse("OG:Image:Width").unwrap();
        assert_eq!(path.segments(), &["og", "image", "width"]);
        assert_eq!(path.to_string(), "og:image:width");
    }

    #[test]
    fn root_and_leaf() {
        let path = NamespacePath::parse("og:image:width").unwrap();
        assert_eq!(path.root(), "og");
        assert_eq!(path.leaf(), "width");
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn single_segment_is_its_own_root_and_leaf() {
        let path = NamespacePath::parse("og").unwrap();
        assert_eq!(path.root(), "og");
        assert_eq!(path.leaf(), "og");
        assert!(path.parent().is_none());
    }

    #[test]
    fn empty_input_rejected() {
        assert!(NamespacePath::parse("").is_err());
        assert!(NamespacePath::from_segments(Vec::<String>::new()).is_err());
    }

    #[test]
    fn empty_segment_rejected() {
        let err = NamespacePath::parse("og::image").unwrap_err();
        assert!(err.to_string().contains("empty segment"));
    }

    #[test]
    fn separator_inside_segment_rejected() {
        assert!(NamespacePath::from_segments(["og", "image:url"]).is_err());
    }

    #[test]
    fn parent_and_child() {
        let path = NamespacePath::parse("og:image").unwrap();
        let child = path.child("width").unwrap();
        assert_eq!(child.to_string(), "og:image:width");
        assert_eq!(child.parent().unwrap(), path);
        assert!(child.starts_with(&path));
        assert!(!path.starts_with(&child));
    }

    #[test]
    fn truncated_prefixes() {
        let path = NamespacePath::parse("og:image:width").unwrap();
        assert_eq!(path.truncated(1).unwrap().to_string(), "og");
        assert_eq!(path.truncated(2).unwrap().to_string(), "og:image");
        assert_eq!(path.truncated(3).unwrap(), path);
        assert!(path.truncated(0).is_none());
        assert!(path.truncated(4).is_none());
    }

    #[test]
    fn serde_uses_joined_form() {
        let path = NamespacePath::parse("article:author").unwrap();
        let yaml = serde_yaml::to_string(&path).unwrap();
        assert_eq!(yaml.trim(), "article:author");
        let back: NamespacePath = serde_yaml::from_str("article:author").unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn serde_rejects_invalid() {
        let result: Result<NamespacePath, _> = serde_yaml::from_str("\"og::x\"");
        assert!(result.is_err());
    }
}
