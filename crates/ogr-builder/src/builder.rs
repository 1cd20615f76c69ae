//! # Builder
//!
//! Turns an [`AttributeGraph`] into a [`RootContainer`] of typed objects.
//!
//! Each content-bearing node is one assignment event with a path
//! `root:intermediate*:leaf` and a string value, processed in document
//! order:
//!
//! 1. The root segment selects (or creates) a top-level object.
//! 2. Each intermediate segment descends into a nested object. For a
//!    collection property the last item is reused, unless there is none or
//!    the next leaf would overwrite a singular value it already holds, in
//!    which case a new item starts. A singular property holds one nested
//!    object, created on first use.
//! 3. The leaf is assigned. If the full path names a registered type the
//!    value becomes the content of a nested object (appended to a
//!    collection, or the singular one); otherwise it is processed and
//!    stored as a scalar.
//!
//! Lookup failures (`UnknownNamespace`, `UndefinedProperty`) skip the
//! attribute unless the build is strict. After all assignments the tree is
//! synthesized, pruned and validated.

use std::sync::Arc;

use ogr_core::{InvalidObjectError, NamespacePath};
use ogr_graph::AttributeGraph;
use ogr_schema::{ProcessContext, SchemaRegistry, BASELINE_TYPES, DEFAULT_TYPE, TYPE_PROPERTY};

use crate::context::BuildContext;
use crate::object::{OpenGraphObject, PropertyValue, RootContainer};
use crate::{synthesis, validate};

/// Builds object trees against one registry.
#[derive(Debug, Clone, Copy)]
pub struct Builder<'r> {
    registry: &'r SchemaRegistry,
}

impl<'r> Builder<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Build, synthesize, prune and validate.
    ///
    /// # Errors
    ///
    /// Any fatal [`InvalidObjectError`]; no partial result is returned.
    pub fn build(
        &self,
        graph: &AttributeGraph,
        ctx: &BuildContext,
    ) -> Result<RootContainer, InvalidObjectError> {
        let type_name = graph.fetch(TYPE_PROPERTY, DEFAULT_TYPE).trim().to_lowercase();
        self.check_type(&type_name, ctx)?;

        let mut root = RootContainer::new(type_name, ctx.origin.clone());
        let pctx = ctx.process_context();

        for node in graph.iter() {
            let (Some(value), Ok(path)) = (node.content(), node.path()) else {
                continue;
            };
            tracing::trace!(path = %path, value, "assigning attribute");
            match self.assign(&mut root, &path, value, &pctx) {
                Ok(()) => {}
                Err(e) if e.is_lookup_failure() && !ctx.config.strict => {
                    tracing::debug!(path = %path, error = %e, "skipping attribute");
                }
                Err(e) => return Err(e),
            }
        }

        synthesis::synthesize(&mut root, ctx)?;
        root.prune();
        validate::validate(&root, &ctx.config)?;

        tracing::debug!(
            type_name = root.type_name(),
            objects = root.len(),
            "object tree built"
        );
        Ok(root)
    }

    fn check_type(&self, type_name: &str, ctx: &BuildContext) -> Result<(), InvalidObjectError> {
        if !ctx.config.strict {
            return Ok(());
        }
        let known = BASELINE_TYPES.contains(&type_name)
            || ctx.declares(type_name)
            || self.registry.is_vertical(type_name);
        if known {
            Ok(())
        } else {
            Err(InvalidObjectError::InvalidType {
                type_name: type_name.to_string(),
            })
        }
    }

    fn instantiate(&self, path: &NamespacePath) -> Result<OpenGraphObject, InvalidObjectError> {
        let descriptor = self.registry.resolve(path)?;
        Ok(OpenGraphObject::new(Arc::clone(descriptor), path.clone()))
    }

    fn assign(
        &self,
        root: &mut RootContainer,
        path: &NamespacePath,
        value: &str,
        ctx: &ProcessContext<'_>,
    ) -> Result<(), InvalidObjectError> {
        let namespace = path.root();
        let unknown = || InvalidObjectError::UnknownNamespace {
            namespace: namespace.to_string(),
        };

        if !root.contains(namespace) {
            let root_path = path.truncated(1).ok_or_else(unknown)?;
            let object = self.instantiate(&root_path)?;
            root.insert(namespace, object);
        }
        let mut object = root.get_mut(namespace).ok_or_else(unknown)?;

        let segments = path.segments();
        let Some((leaf, intermediate)) = segments[1..].split_last() else {
            return object.set_content(value, ctx);
        };

        for (offset, segment) in intermediate.iter().enumerate() {
            let here = path.truncated(offset + 2).ok_or_else(unknown)?;
            let owned_leaf = (offset + 1 == intermediate.len()).then_some(leaf.as_str());
            object = self.descend(object, segment, &here, owned_leaf)?;
        }

        self.assign_leaf(object, leaf, path, value, ctx)
    }

    fn descend<'o>(
        &self,
        object: &'o mut OpenGraphObject,
        segment: &str,
        here: &NamespacePath,
        owned_leaf: Option<&str>,
    ) -> Result<&'o mut OpenGraphObject, InvalidObjectError> {
        let collection = object
            .descriptor()
            .property_named(segment)
            .map(|p| p.is_collection())
            .ok_or_else(|| undefined(object, segment))?;

        if !collection {
            return self.singular_object(object, segment, here);
        }

        let reuse = match object.last_item(segment) {
            Some(PropertyValue::Object(last)) => owned_leaf.map_or(true, |leaf| !last.has_singular(leaf)),
            _ => false,
        };
        if !reuse {
            let item = self.instantiate(here)?;
            object.push(segment, PropertyValue::Object(item));
        }
        let missing = undefined(object, segment);
        object.last_object_mut(segment).ok_or(missing)
    }

    fn singular_object<'o>(
        &self,
        object: &'o mut OpenGraphObject,
        name: &str,
        here: &NamespacePath,
    ) -> Result<&'o mut OpenGraphObject, InvalidObjectError> {
        if !matches!(object.singular(name), Some(PropertyValue::Object(_))) {
            let mut item = self.instantiate(here)?;
            if let Some(PropertyValue::Scalar(previous)) = object.take_singular(name) {
                item.set_content_value(previous);
            }
            object.insert_singular(name, PropertyValue::Object(item));
        }
        let missing = undefined(object, name);
        object.singular_object_mut(name).ok_or(missing)
    }

    fn assign_leaf(
        &self,
        object: &mut OpenGraphObject,
        leaf: &str,
        path: &NamespacePath,
        value: &str,
        ctx: &ProcessContext<'_>,
    ) -> Result<(), InvalidObjectError> {
        let collection = object
            .descriptor()
            .property_named(leaf)
            .map(|p| p.is_collection())
            .ok_or_else(|| undefined(object, leaf))?;

        if !self.registry.is_registered(path) {
            return object.set(leaf, value, ctx);
        }

        if !collection {
            return self.singular_object(object, leaf, path)?.set_content(value, ctx);
        }

        // A bare value always starts a new item; later sub-properties
        // extend it through `descend`.
        let mut item = self.instantiate(path)?;
        item.set_content(value, ctx)?;
        object.push(leaf, PropertyValue::Object(item));
        Ok(())
    }
}

fn undefined(object: &OpenGraphObject, property: &str) -> InvalidObjectError {
    InvalidObjectError::UndefinedProperty {
        namespace: object.namespace().joined(),
        property: property.to_string(),
    }
}
