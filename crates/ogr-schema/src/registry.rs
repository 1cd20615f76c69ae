//! # Schema Registry
//!
//! Maps namespace paths to type descriptors. A path is registered either
//! because a type was declared under it (`og:image`) or because a
//! reference property makes it an alias (`article:author` resolves to the
//! `profile` type).
//!
//! The registry is built once through [`RegistryBuilder`], which checks the
//! declarations for consistency, and is immutable afterwards. Types are
//! held in `Arc`s so objects instantiated from the registry share their
//! descriptor without copying it; a built registry is `Send + Sync` and can
//! be shared across concurrent builds.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use thiserror::Error;

use ogr_core::{InvalidObjectError, NamespacePath};

use crate::descriptor::{TypeDescriptor, CONTENT};

/// Separator between a type namespace and a vertical name (`video.movie`).
pub const VERTICAL_SEPARATOR: char = '.';

/// A type declaration is inconsistent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaDefinitionError {
    /// Namespace is not a valid path.
    #[error("invalid type namespace {namespace:?}: {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    /// Two types were declared under the same namespace.
    #[error("namespace {namespace} is declared twice")]
    DuplicateNamespace { namespace: String },

    /// A type declares the same property name twice.
    #[error("property {property} is declared twice on {namespace}")]
    DuplicateProperty { namespace: String, property: String },

    /// A property name is empty, contains a separator, or is reserved.
    #[error("invalid property name {property:?} on {namespace}")]
    InvalidProperty { namespace: String, property: String },

    /// A reference property names a type that was never declared.
    #[error("property {property} on {namespace} references unregistered type {target}")]
    UnknownReference {
        namespace: String,
        property: String,
        target: String,
    },

    /// A reference alias collides with a declared type namespace.
    #[error("reference alias {path} collides with a declared type")]
    ConflictingAlias { path: String },

    /// A vertical name is empty or contains a separator.
    #[error("invalid vertical {vertical:?} on {namespace}:{property}")]
    InvalidVertical {
        namespace: String,
        property: String,
        vertical: String,
    },
}

/// An immutable namespace-to-type mapping.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: BTreeMap<String, Arc<TypeDescriptor>>,
    aliases: BTreeMap<String, String>,
    verticals: BTreeSet<String>,
}

impl SchemaRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Whether `path` names a type, directly or through a reference alias.
    pub fn is_registered(&self, path: &NamespacePath) -> bool {
        self.lookup(&path.joined()).is_some()
    }

    /// The type registered under `path`.
    pub fn resolve(&self, path: &NamespacePath) -> Result<&Arc<TypeDescriptor>, InvalidObjectError> {
        let joined = path.joined();
        self.lookup(&joined)
            .ok_or(InvalidObjectError::UnknownNamespace { namespace: joined })
    }

    fn lookup(&self, joined: &str) -> Option<&Arc<TypeDescriptor>> {
        let namespace = self.aliases.get(joined).map(String::as_str).unwrap_or(joined);
        self.types.get(namespace)
    }

    /// The type declared under exactly `namespace`, ignoring aliases.
    pub fn type_descriptor(&self, namespace: &str) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(namespace)
    }

    /// Declared types, ordered by namespace.
    pub fn types(&self) -> impl Iterator<Item = &Arc<TypeDescriptor>> {
        self.types.values()
    }

    /// Reference aliases as `(path, target namespace)` pairs.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fully qualified verticals such as `video.movie`.
    pub fn verticals(&self) -> &BTreeSet<String> {
        &self.verticals
    }

    pub fn is_vertical(&self, name: &str) -> bool {
        self.verticals.contains(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Collects type declarations and validates them into a [`SchemaRegistry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    types: Vec<TypeDescriptor>,
}

impl RegistryBuilder {
    pub fn register(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    pub fn register_all<I>(mut self, descriptors: I) -> Self
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        self.types.extend(descriptors);
        self
    }

    /// Check every declaration and produce the registry.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaDefinitionError`] found: malformed or
    /// duplicate namespaces and properties, references to undeclared types,
    /// aliases shadowing declared types, and malformed vertical names.
    pub fn build(self) -> Result<SchemaRegistry, SchemaDefinitionError> {
        let mut types: BTreeMap<String, Arc<TypeDescriptor>> = BTreeMap::new();

        for descriptor in self.types {
            let path = NamespacePath::parse(descriptor.namespace()).map_err(|e| {
                SchemaDefinitionError::InvalidNamespace {
                    namespace: descriptor.namespace().to_string(),
                    reason: e.to_string(),
                }
            })?;
            let namespace = path.joined();
            if types.contains_key(&namespace) {
                return Err(SchemaDefinitionError::DuplicateNamespace { namespace });
            }
            check_properties(&path, &descriptor)?;
            types.insert(namespace.clone(), Arc::new(descriptor.with_namespace(namespace)));
        }

        let mut aliases = BTreeMap::new();
        let mut verticals = BTreeSet::new();

        for descriptor in types.values() {
            for property in descriptor.properties() {
                let slot = format!("{}:{}", descriptor.namespace(), property.name());

                if let Some(target) = property.reference() {
                    let target = NamespacePath::parse(target)
                        .map(|p| p.joined())
                        .unwrap_or_else(|_| target.to_string());
                    if !types.contains_key(&target) {
                        return Err(SchemaDefinitionError::UnknownReference {
                            namespace: descriptor.namespace().to_string(),
                            property: property.name().to_string(),
                            target,
                        });
                    }
                    if types.contains_key(&slot) {
                        return Err(SchemaDefinitionError::ConflictingAlias { path: slot });
                    }
                    aliases.insert(slot, target);
                }

                for vertical in property.vertical_names() {
                    verticals.insert(format!(
                        "{}{VERTICAL_SEPARATOR}{vertical}",
                        descriptor.namespace()
                    ));
                }
            }
        }

        tracing::debug!(
            types = types.len(),
            aliases = aliases.len(),
            verticals = verticals.len(),
            "schema registry built"
        );

        Ok(SchemaRegistry {
            types,
            aliases,
            verticals,
        })
    }
}

fn check_properties(
    path: &NamespacePath,
    descriptor: &TypeDescriptor,
) -> Result<(), SchemaDefinitionError> {
    let namespace = path.joined();
    let mut seen = BTreeSet::new();

    for property in descriptor.properties() {
        let name = property.name();
        let well_formed = path
            .child(name)
            .map(|child| child.leaf() == name)
            .unwrap_or(false);
        if !well_formed || name == CONTENT {
            return Err(SchemaDefinitionError::InvalidProperty {
                namespace,
                property: name.to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(SchemaDefinitionError::DuplicateProperty {
                namespace,
                property: name.to_string(),
            });
        }
        if let Some(bad) = property
            .vertical_names()
            .iter()
            .find(|v| v.is_empty() || v.contains(VERTICAL_SEPARATOR))
        {
            return Err(SchemaDefinitionError::InvalidVertical {
                namespace,
                property: name.to_string(),
                vertical: bad.clone(),
            });
        }
    }
    Ok(())
}
