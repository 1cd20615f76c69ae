//! # ogr-graph — Attribute Graph
//!
//! The intermediate representation between a document's meta tags and the
//! typed object tree.
//!
//! - [`extract`]: the [`DocumentHead`] handed over by a markup parser, and
//!   its reduction to an ordered list of [`Attribute`]s.
//! - [`graph`]: the [`AttributeGraph`] built from those attributes, with
//!   path lookups and in-order traversal of content-bearing nodes.
//!
//! ## Crate Policy
//!
//! - Depends only on `ogr-core` internally.
//! - Document order is preserved end to end; nothing here sorts.

pub mod extract;
pub mod graph;

pub use extract::{parse_prefix_attribute, Attribute, DocumentHead, MetaTag, OG_NAMESPACE};
pub use graph::{AttributeGraph, NodeRef};
