//! # Object Instances & Root Container
//!
//! An [`OpenGraphObject`] is a runtime value of one [`TypeDescriptor`]. It
//! holds an optional content scalar, singular property values and ordered
//! collections. Every access goes through the descriptor's property table:
//! reading or writing an undeclared name is an `UndefinedProperty` error.
//!
//! The [`RootContainer`] maps each top-level namespace (`og`, `article`)
//! to its object, in first-seen order.
//!
//! ## Serialization
//!
//! Objects serialize as maps: `content` first when present, then each
//! populated property in declaration order. Collections serialize as
//! arrays, nested objects as nested maps. The root container serializes as
//! a map keyed by namespace.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use ogr_core::{InvalidObjectError, NamespacePath, Scalar};
use ogr_schema::{ProcessContext, TypeDescriptor, CONTENT};

/// A stored property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Scalar(Scalar),
    Object(OpenGraphObject),
}

impl PropertyValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&OpenGraphObject> {
        match self {
            Self::Object(o) => Some(o),
            Self::Scalar(_) => None,
        }
    }

    fn as_object_mut(&mut self) -> Option<&mut OpenGraphObject> {
        match self {
            Self::Object(o) => Some(o),
            Self::Scalar(_) => None,
        }
    }

    /// Text of a scalar, or the content of an object.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => s.as_str(),
            Self::Object(o) => o.content().and_then(Scalar::as_str),
        }
    }
}

/// A borrowed property value, including declared defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    Scalar(&'a Scalar),
    Object(&'a OpenGraphObject),
}

impl<'a> ValueRef<'a> {
    pub fn as_scalar(&self) -> Option<&'a Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&'a OpenGraphObject> {
        match self {
            Self::Object(o) => Some(o),
            Self::Scalar(_) => None,
        }
    }

    /// Text of a scalar, or the content of an object.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::Scalar(s) => s.as_str(),
            Self::Object(o) => o.content().and_then(Scalar::as_str),
        }
    }
}

impl<'a> From<&'a PropertyValue> for ValueRef<'a> {
    fn from(value: &'a PropertyValue) -> Self {
        match value {
            PropertyValue::Scalar(s) => Self::Scalar(s),
            PropertyValue::Object(o) => Self::Object(o),
        }
    }
}

// ─── Objects ────────────────────────────────────────────────────────

/// A typed OpenGraph object.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenGraphObject {
    descriptor: Arc<TypeDescriptor>,
    namespace: NamespacePath,
    content: Option<Scalar>,
    properties: BTreeMap<String, PropertyValue>,
    collections: BTreeMap<String, Vec<PropertyValue>>,
}

impl OpenGraphObject {
    /// An empty object of `descriptor`'s type, found at `namespace` in the
    /// document (`article:author` for a `profile` object).
    pub fn new(descriptor: Arc<TypeDescriptor>, namespace: NamespacePath) -> Self {
        Self {
            descriptor,
            namespace,
            content: None,
            properties: BTreeMap::new(),
            collections: BTreeMap::new(),
        }
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Path of this object in the document.
    pub fn namespace(&self) -> &NamespacePath {
        &self.namespace
    }

    /// Namespace of the object's type.
    pub fn type_namespace(&self) -> &str {
        self.descriptor.namespace()
    }

    pub fn content(&self) -> Option<&Scalar> {
        self.content.as_ref()
    }

    fn undefined(&self, property: &str) -> InvalidObjectError {
        InvalidObjectError::UndefinedProperty {
            namespace: self.namespace.joined(),
            property: property.to_string(),
        }
    }

    /// Process `raw` as this object's content. Last assignment wins.
    pub fn set_content(&mut self, raw: &str, ctx: &ProcessContext<'_>) -> Result<(), InvalidObjectError> {
        let descriptor = self
            .descriptor
            .content_descriptor()
            .ok_or_else(|| self.undefined(CONTENT))?;
        if let Some(value) = descriptor.process(raw, ctx)? {
            self.content = Some(value);
        }
        Ok(())
    }

    /// Store an already-processed content value.
    pub fn set_content_value(&mut self, value: Scalar) {
        self.content = Some(value);
    }

    /// Process `raw` and assign it to property `name`. Singular properties
    /// are overwritten, collections appended to. A discarded value leaves
    /// the object unchanged.
    pub fn set(&mut self, name: &str, raw: &str, ctx: &ProcessContext<'_>) -> Result<(), InvalidObjectError> {
        let property = self
            .descriptor
            .property_named(name)
            .ok_or_else(|| self.undefined(name))?;
        let collection = property.is_collection();
        if let Some(value) = property.process(raw, ctx)? {
            if collection {
                self.push(name, PropertyValue::Scalar(value));
            } else {
                self.properties
                    .insert(name.to_string(), PropertyValue::Scalar(value));
            }
        }
        Ok(())
    }

    /// The value of `name`: the singular value, the first collection item,
    /// or the declared default.
    pub fn get(&self, name: &str) -> Result<Option<ValueRef<'_>>, InvalidObjectError> {
        let property = self
            .descriptor
            .property_named(name)
            .ok_or_else(|| self.undefined(name))?;
        let stored = self
            .properties
            .get(name)
            .or_else(|| self.collections.get(name).and_then(|c| c.first()))
            .map(ValueRef::from);
        Ok(stored.or_else(|| property.default().map(ValueRef::Scalar)))
    }

    /// Every stored value of `name`, in assignment order.
    pub fn values(&self, name: &str) -> Result<&[PropertyValue], InvalidObjectError> {
        if !self.descriptor.has_property(name) {
            return Err(self.undefined(name));
        }
        if let Some(value) = self.properties.get(name) {
            return Ok(std::slice::from_ref(value));
        }
        Ok(self.collections.get(name).map(Vec::as_slice).unwrap_or_default())
    }

    /// Whether `name` holds a stored value (defaults do not count).
    pub fn is_set(&self, name: &str) -> bool {
        self.properties.contains_key(name)
            || self.collections.get(name).is_some_and(|c| !c.is_empty())
    }

    /// Whether singular property `name` holds a stored value.
    pub fn has_singular(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Names of populated properties, in declaration order.
    pub fn populated_properties(&self) -> Vec<&str> {
        self.descriptor
            .properties()
            .map(|p| p.name())
            .filter(|name| self.is_set(name))
            .collect()
    }

    pub(crate) fn push(&mut self, name: &str, value: PropertyValue) {
        self.collections
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    pub(crate) fn last_item(&self, name: &str) -> Option<&PropertyValue> {
        self.collections.get(name).and_then(|c| c.last())
    }

    pub(crate) fn last_object_mut(&mut self, name: &str) -> Option<&mut OpenGraphObject> {
        self.collections
            .get_mut(name)
            .and_then(|c| c.last_mut())
            .and_then(PropertyValue::as_object_mut)
    }

    pub(crate) fn singular(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub(crate) fn take_singular(&mut self, name: &str) -> Option<PropertyValue> {
        self.properties.remove(name)
    }

    pub(crate) fn insert_singular(&mut self, name: &str, value: PropertyValue) {
        self.properties.insert(name.to_string(), value);
    }

    pub(crate) fn singular_object_mut(&mut self, name: &str) -> Option<&mut OpenGraphObject> {
        self.properties
            .get_mut(name)
            .and_then(PropertyValue::as_object_mut)
    }

    /// First object of collection `name`, mutably.
    pub(crate) fn first_object_mut(&mut self, name: &str) -> Option<&mut OpenGraphObject> {
        self.collections
            .get_mut(name)
            .and_then(|c| c.first_mut())
            .and_then(PropertyValue::as_object_mut)
    }

    /// Nested objects, singular ones first.
    pub fn nested_objects(&self) -> impl Iterator<Item = &OpenGraphObject> {
        self.properties
            .values()
            .chain(self.collections.values().flatten())
            .filter_map(PropertyValue::as_object)
    }

    /// No content and no stored values.
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.properties.is_empty()
            && self.collections.values().all(Vec::is_empty)
    }

    /// Remove nested objects that are empty after pruning their own
    /// children, and the collection slots they occupied.
    pub fn prune(&mut self) {
        self.properties.retain(|_, value| match value {
            PropertyValue::Object(o) => {
                o.prune();
                !o.is_empty()
            }
            PropertyValue::Scalar(_) => true,
        });
        for items in self.collections.values_mut() {
            items.retain_mut(|value| match value {
                PropertyValue::Object(o) => {
                    o.prune();
                    !o.is_empty()
                }
                PropertyValue::Scalar(_) => true,
            });
        }
        self.collections.retain(|_, items| !items.is_empty());
    }

    /// The most specific URL of a media object: `secure_url`, then `url`,
    /// then the content.
    pub fn resolved_url(&self) -> Option<&str> {
        ["secure_url", "url"]
            .iter()
            .filter_map(|name| self.properties.get(*name))
            .find_map(PropertyValue::as_str)
            .or_else(|| self.content.as_ref().and_then(Scalar::as_str))
    }
}

impl Serialize for OpenGraphObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(content) = &self.content {
            map.serialize_entry(CONTENT, content)?;
        }
        for property in self.descriptor.properties() {
            let name = property.name();
            if let Some(value) = self.properties.get(name) {
                map.serialize_entry(name, value)?;
            } else if let Some(items) = self.collections.get(name).filter(|c| !c.is_empty()) {
                map.serialize_entry(name, items)?;
            }
        }
        map.end()
    }
}

// ─── Root Container ─────────────────────────────────────────────────

/// Top-level objects of one document, keyed by namespace in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct RootContainer {
    type_name: String,
    origin: Option<String>,
    objects: Vec<(String, OpenGraphObject)>,
}

impl RootContainer {
    pub fn new(type_name: impl Into<String>, origin: Option<String>) -> Self {
        Self {
            type_name: type_name.into(),
            origin,
            objects: Vec::new(),
        }
    }

    /// The case-folded document type, e.g. `website` or `video.movie`.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The vertical part of a dotted type (`movie` in `video.movie`).
    pub fn vertical(&self) -> Option<(&str, &str)> {
        self.type_name.split_once(ogr_schema::registry::VERTICAL_SEPARATOR)
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn get(&self, namespace: &str) -> Option<&OpenGraphObject> {
        self.objects
            .iter()
            .find(|(ns, _)| ns == namespace)
            .map(|(_, o)| o)
    }

    pub fn get_mut(&mut self, namespace: &str) -> Option<&mut OpenGraphObject> {
        self.objects
            .iter_mut()
            .find(|(ns, _)| ns == namespace)
            .map(|(_, o)| o)
    }

    /// Shortcut for the `og` object.
    pub fn og(&self) -> Option<&OpenGraphObject> {
        self.get(ogr_graph::OG_NAMESPACE)
    }

    /// Add a top-level object unless one exists under `namespace`.
    pub fn insert(&mut self, namespace: impl Into<String>, object: OpenGraphObject) {
        let namespace = namespace.into();
        if self.get(&namespace).is_none() {
            self.objects.push((namespace, object));
        }
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.get(namespace).is_some()
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|(ns, _)| ns.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OpenGraphObject)> {
        self.objects.iter().map(|(ns, o)| (ns.as_str(), o))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Prune every top-level object. Top-level objects themselves stay.
    pub fn prune(&mut self) {
        for (_, object) in &mut self.objects {
            object.prune();
        }
    }
}

impl Serialize for RootContainer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.objects.len()))?;
        for (namespace, object) in &self.objects {
            map.serialize_entry(namespace, object)?;
        }
        map.end()
    }
}
