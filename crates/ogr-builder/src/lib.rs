//! # ogr-builder — Object Construction & Validation
//!
//! Resolves an [`ogr_graph::AttributeGraph`] into a [`RootContainer`] of
//! typed [`OpenGraphObject`]s.
//!
//! ## Pipeline
//!
//! ```text
//! DocumentHead ─▶ AttributeGraph ─▶ Builder ─▶ synthesis ─▶ prune ─▶ validate ─▶ RootContainer
//! ```
//!
//! A build is all-or-nothing: any fatal [`ogr_core::InvalidObjectError`]
//! aborts it and no partial tree is returned.
//!
//! ## Concurrency
//!
//! The registry is shared read-only; everything build-specific (config,
//! origin, fallback title) travels in a [`BuildContext`]. Builds never
//! touch global state and may run in parallel.
//!
//! ## Crate Policy
//!
//! - Depends on `ogr-core`, `ogr-schema` and `ogr-graph`.
//! - Property access goes through descriptors; there is no reflection.

pub mod builder;
pub mod context;
pub mod object;
pub mod synthesis;
pub mod validate;

pub use builder::Builder;
pub use context::BuildContext;
pub use object::{OpenGraphObject, PropertyValue, RootContainer, ValueRef};

use ogr_core::OgrError;
use ogr_graph::{DocumentHead, OG_NAMESPACE};
use ogr_schema::SchemaRegistry;

/// Build the object tree of an extracted document head.
///
/// The head's `<title>` becomes the fallback title unless the context
/// already has one, and its `prefix` namespaces are added to the declared
/// namespaces.
///
/// # Errors
///
/// [`OgrError::NoOpenGraphData`] when the head carries no `og` attribute,
/// [`OgrError::InvalidObject`] when the build fails.
pub fn build_document(
    head: &DocumentHead,
    registry: &SchemaRegistry,
    mut ctx: BuildContext,
) -> Result<RootContainer, OgrError> {
    let graph = head.graph();
    if !graph.exists(OG_NAMESPACE) {
        return Err(OgrError::NoOpenGraphData(
            "the document has no og: meta tags".to_string(),
        ));
    }

    if ctx.fallback_title.is_none() {
        ctx.fallback_title = head.title.clone();
    }
    for namespace in head.declared_namespaces() {
        if !ctx.declares(&namespace) {
            ctx.declared_namespaces.push(namespace);
        }
    }

    Ok(Builder::new(registry).build(&graph, &ctx)?)
}
