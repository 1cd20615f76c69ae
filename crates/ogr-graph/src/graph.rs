//! # Attribute Graph
//!
//! An ordered tree built from the flat attribute list of a document. Nodes
//! live in an arena and refer to each other by index; the root is unnamed.
//!
//! ## Insertion
//!
//! For each attribute the parent segments are walked from the root,
//! descending into the *last* child with a matching name or creating it.
//! A fresh leaf carrying the value is then appended. Repeated tags
//! therefore never overwrite each other, and tags below a repeated path
//! attach to its most recent occurrence:
//!
//! ```text
//! og:image          = a.png     og ─ image(a.png) ─ width(10)
//! og:image:width    = 10           └ image(b.png) ─ width(20)
//! og:image          = b.png
//! og:image:width    = 20
//! ```
//!
//! ## Traversal
//!
//! [`AttributeGraph::iter`] yields content-bearing nodes depth-first in
//! insertion order. Path-only nodes are skipped.

use ogr_core::NamespacePath;

use crate::extract::Attribute;

const ROOT: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    name: String,
    content: Option<String>,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Ordered tree of namespaced attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeGraph {
    nodes: Vec<Node>,
}

impl Default for AttributeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: String::new(),
                content: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Build a graph from attributes in document order.
    pub fn from_attributes<I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = Attribute>,
    {
        let mut graph = Self::new();
        for attribute in attributes {
            graph.insert(&attribute.path, attribute.value);
        }
        graph
    }

    /// Append a value at `path`.
    pub fn insert(&mut self, path: &NamespacePath, value: impl Into<String>) {
        let segments = path.segments();
        let (leaf, parents) = match segments.split_last() {
            Some(split) => split,
            None => return,
        };

        let mut current = ROOT;
        for segment in parents {
            current = match self.last_child_named(current, segment) {
                Some(child) => child,
                None => self.push_node(current, segment, None),
            };
        }

        let value = value.into();
        tracing::trace!(path = %path, value = %value, "attribute inserted");
        self.push_node(current, leaf, Some(value));
    }

    fn push_node(&mut self, parent: usize, name: &str, content: Option<String>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            name: name.to_string(),
            content,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    fn last_child_named(&self, parent: usize, name: &str) -> Option<usize> {
        self.nodes[parent]
            .children
            .iter()
            .rev()
            .copied()
            .find(|&c| self.nodes[c].name == name)
    }

    fn has_content_below(&self, id: usize) -> bool {
        let node = &self.nodes[id];
        node.content.is_some() || node.children.iter().any(|&c| self.has_content_below(c))
    }

    /// Whether any content exists at or below `path` (`og`, `og:image`).
    pub fn exists(&self, path: &str) -> bool {
        let mut frontier = vec![ROOT];
        for segment in split_path(path) {
            frontier = frontier
                .into_iter()
                .flat_map(|id| self.nodes[id].children.iter().copied())
                .filter(|&c| self.nodes[c].name == segment)
                .collect();
            if frontier.is_empty() {
                return false;
            }
        }
        frontier.into_iter().any(|id| id != ROOT && self.has_content_below(id))
    }

    /// First content-bearing node whose full path equals `path`.
    pub fn find_by(&self, path: &str) -> Option<NodeRef<'_>> {
        let target = split_path(path);
        self.iter().find(|n| n.path_segments() == target)
    }

    /// All content-bearing nodes whose full path equals `path`, in order.
    pub fn select_by(&self, path: &str) -> Vec<NodeRef<'_>> {
        let target = split_path(path);
        self.iter().filter(|n| n.path_segments() == target).collect()
    }

    /// Content of the first node at `path`, or `default`.
    pub fn fetch<'a>(&'a self, path: &str, default: &'a str) -> &'a str {
        self.find_by(path).and_then(|n| n.content()).unwrap_or(default)
    }

    /// Content-bearing nodes, depth-first in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        let mut stack: Vec<usize> = self.nodes[ROOT].children.clone();
        stack.reverse();
        Iter { graph: self, stack }
    }

    /// Number of content-bearing nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.content.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_content_below(ROOT)
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split(ogr_core::namespace::SEPARATOR)
        .map(|s| s.trim().to_lowercase())
        .collect()
}

/// A borrowed view of one graph node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    graph: &'a AttributeGraph,
    id: usize,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.graph.nodes[self.id]
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn content(&self) -> Option<&'a str> {
        self.node().content.as_deref()
    }

    /// Names from the root's first child down to this node.
    pub fn path_segments(&self) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut current = Some(self.id);
        while let Some(id) = current {
            if id == ROOT {
                break;
            }
            let node = &self.graph.nodes[id];
            segments.push(node.name.as_str());
            current = node.parent;
        }
        segments.reverse();
        segments
    }

    /// The full path as a validated namespace path.
    pub fn path(&self) -> Result<NamespacePath, ogr_core::ValidationError> {
        NamespacePath::from_segments(self.path_segments())
    }

    /// The colon-joined full path.
    pub fn full_name(&self) -> String {
        self.path_segments().join(":")
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node()
            .parent
            .filter(|&p| p != ROOT)
            .map(|id| NodeRef { graph: self.graph, id })
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let graph = self.graph;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { graph, id })
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}

/// Depth-first iterator over content-bearing nodes.
#[derive(Debug)]
pub struct Iter<'a> {
    graph: &'a AttributeGraph,
    stack: Vec<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = &self.graph.nodes[id];
            self.stack.extend(node.children.iter().rev().copied());
            if node.content.is_some() {
                return Some(NodeRef {
                    graph: self.graph,
                    id,
                });
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a AttributeGraph {
    type Item = NodeRef<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
