//! # Meta Tag Extraction Contract
//!
//! The markup parser itself lives outside this workspace. What it hands
//! over is a [`DocumentHead`]: the head's `prefix` attribute, its title and
//! the `<meta property=... content=...>` tags in document order. This
//! module turns that into the ordered attribute list the graph is built
//! from.
//!
//! A tag is kept when its lowercased property starts with `og:` or with a
//! namespace declared in the `prefix` attribute, and it has content.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use ogr_core::NamespacePath;

use crate::graph::AttributeGraph;

/// The namespace every OpenGraph document carries.
pub const OG_NAMESPACE: &str = "og";

/// One `<meta>` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    pub property: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl MetaTag {
    pub fn new(property: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            content: Some(content.into()),
        }
    }
}

/// The parts of a document head relevant to OpenGraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentHead {
    /// Raw `prefix` attribute of the head element.
    pub prefix: Option<String>,
    /// Text of the `<title>` element.
    pub title: Option<String>,
    /// Meta tags in document order.
    pub meta: Vec<MetaTag>,
}

/// A namespaced attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub path: NamespacePath,
    pub value: String,
}

impl Attribute {
    pub fn new(path: NamespacePath, value: impl Into<String>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }
}

fn prefix_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(\w+):\s*([^ ]+)").ok())
        .as_ref()
}

/// Namespace names declared by a `prefix` attribute such as
/// `og: http://ogp.me/ns# video: http://ogp.me/ns/video#`, lowercased.
pub fn parse_prefix_attribute(prefix: &str) -> Vec<String> {
    let Some(pattern) = prefix_pattern() else {
        return Vec::new();
    };
    let mut names: Vec<String> = Vec::new();
    for captures in pattern.captures_iter(prefix) {
        let name = captures[1].to_lowercase();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

impl DocumentHead {
    /// Namespaces declared through the `prefix` attribute.
    pub fn declared_namespaces(&self) -> Vec<String> {
        self.prefix
            .as_deref()
            .map(parse_prefix_attribute)
            .unwrap_or_default()
    }

    /// OpenGraph attributes in document order, values trimmed.
    pub fn attributes(&self) -> Vec<Attribute> {
        let mut accepted = vec![format!("{OG_NAMESPACE}:")];
        accepted.extend(
            self.declared_namespaces()
                .into_iter()
                .filter(|ns| ns != OG_NAMESPACE),
        );

        self.meta
            .iter()
            .filter_map(|tag| {
                let content = tag.content.as_deref()?;
                let property = tag.property.to_lowercase();
                if !accepted.iter().any(|p| property.starts_with(p.as_str())) {
                    return None;
                }
                match NamespacePath::parse(&property) {
                    Ok(path) => Some(Attribute::new(path, content.trim())),
                    Err(e) => {
                        tracing::debug!(property = %tag.property, error = %e, "skipping malformed meta property");
                        None
                    }
                }
            })
            .collect()
    }

    /// The attribute graph of this head.
    pub fn graph(&self) -> AttributeGraph {
        AttributeGraph::from_attributes(self.attributes())
    }

    /// Whether the head carries any `og` data.
    pub fn has_open_graph_data(&self) -> bool {
        self.graph().exists(OG_NAMESPACE)
    }
}
