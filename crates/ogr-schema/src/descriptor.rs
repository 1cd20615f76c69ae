//! # Type Descriptors
//!
//! The declarative description of one OpenGraph object type: its namespace,
//! its optional content value, and its named properties. Descriptors are
//! assembled with chained constructors:
//!
//! ```
//! use ogr_schema::{PropertyDescriptor, TypeDescriptor, Processor};
//!
//! let image = TypeDescriptor::new("og:image")
//!     .content(Processor::Url)
//!     .property(PropertyDescriptor::url("secure_url").image())
//!     .property(PropertyDescriptor::integer("width"));
//!
//! assert!(image.has_property("width"));
//! assert!(image.content_descriptor().is_some());
//! ```
//!
//! Registration and cross-type checks happen in
//! [`RegistryBuilder::build`](crate::RegistryBuilder::build).

use std::collections::BTreeSet;

use serde::Serialize;

use ogr_core::{InvalidObjectError, Scalar};

use crate::processor::{ProcessContext, Processor, ValueOptions};

/// Reserved property name for an object's own scalar value.
pub const CONTENT: &str = "content";

/// Whether a property holds one value or an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Single,
    Collection,
}

// ─── Properties ─────────────────────────────────────────────────────

/// One named property declared on a type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    name: String,
    processor: Processor,
    cardinality: Cardinality,
    required: bool,
    default: Option<Scalar>,
    reference: Option<String>,
    verticals: BTreeSet<String>,
    downcase: bool,
    image: bool,
}

impl PropertyDescriptor {
    /// A single-valued, optional property.
    pub fn new(name: impl Into<String>, processor: Processor) -> Self {
        Self {
            name: name.into(),
            processor,
            cardinality: Cardinality::Single,
            required: false,
            default: None,
            reference: None,
            verticals: BTreeSet::new(),
            downcase: false,
            image: false,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, Processor::String)
    }

    pub fn url(name: impl Into<String>) -> Self {
        Self::new(name, Processor::Url)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, Processor::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, Processor::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, Processor::Boolean)
    }

    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, Processor::DateTime)
    }

    pub fn enumeration(name: impl Into<String>, allowed: &[&str]) -> Self {
        Self::new(
            name,
            Processor::Enum(allowed.iter().map(|s| s.to_string()).collect()),
        )
    }

    /// Mark the property required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Make the property an ordered collection.
    pub fn collection(mut self) -> Self {
        self.cardinality = Cardinality::Collection;
        self
    }

    /// Value reported by lookups when the property is absent.
    pub fn default_value(mut self, value: impl Into<Scalar>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Values of this property are objects of the type registered under
    /// `namespace`; the property's path becomes an alias for that type.
    pub fn references(mut self, namespace: impl Into<String>) -> Self {
        self.reference = Some(namespace.into());
        self
    }

    /// Restrict the property to the given verticals of its type.
    pub fn verticals(mut self, verticals: &[&str]) -> Self {
        self.verticals = verticals.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Case-fold raw values before processing.
    pub fn downcase(mut self) -> Self {
        self.downcase = true;
        self
    }

    /// Values are image URLs.
    pub fn image(mut self) -> Self {
        self.image = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_collection(&self) -> bool {
        self.cardinality == Cardinality::Collection
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Scalar> {
        self.default.as_ref()
    }

    /// Namespace of the referenced type, if any.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn vertical_names(&self) -> &BTreeSet<String> {
        &self.verticals
    }

    /// Whether the property is limited to specific verticals.
    pub fn is_restricted(&self) -> bool {
        !self.verticals.is_empty()
    }

    /// Whether the property may be set on an object of vertical `short`
    /// (`movie` for `video.movie`). Unrestricted properties allow every vertical.
    pub fn allows_vertical(&self, short: &str) -> bool {
        self.verticals.is_empty() || self.verticals.contains(short)
    }

    pub fn is_image(&self) -> bool {
        self.image
    }

    pub fn is_downcased(&self) -> bool {
        self.downcase
    }

    /// Run the property's processor on `raw`.
    pub fn process(
        &self,
        raw: &str,
        ctx: &ProcessContext<'_>,
    ) -> Result<Option<Scalar>, InvalidObjectError> {
        let options = ValueOptions {
            required: self.required,
            reference: self.reference.is_some(),
            image: self.image,
        };
        if self.downcase {
            self.processor
                .process(&self.name, &raw.to_lowercase(), options, ctx)
        } else {
            self.processor.process(&self.name, raw, options, ctx)
        }
    }
}

// ─── Content ────────────────────────────────────────────────────────

/// How the bare value of an object (`og:image=...`) is processed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDescriptor {
    processor: Processor,
    downcase: bool,
    image: bool,
}

impl ContentDescriptor {
    pub fn new(processor: Processor) -> Self {
        Self {
            processor,
            downcase: false,
            image: false,
        }
    }

    pub fn downcase(mut self) -> Self {
        self.downcase = true;
        self
    }

    pub fn image(mut self) -> Self {
        self.image = true;
        self
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    pub fn is_image(&self) -> bool {
        self.image
    }

    /// Process a content value. Content identifies the object, so URL
    /// content is subject to reference validation; it is never required.
    pub fn process(
        &self,
        raw: &str,
        ctx: &ProcessContext<'_>,
    ) -> Result<Option<Scalar>, InvalidObjectError> {
        let options = ValueOptions {
            required: false,
            reference: true,
            image: self.image,
        };
        if self.downcase {
            self.processor
                .process(CONTENT, &raw.to_lowercase(), options, ctx)
        } else {
            self.processor.process(CONTENT, raw, options, ctx)
        }
    }
}

// ─── Types ──────────────────────────────────────────────────────────

/// A registered object type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    namespace: String,
    content: Option<ContentDescriptor>,
    properties: Vec<PropertyDescriptor>,
}

impl TypeDescriptor {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            content: None,
            properties: Vec::new(),
        }
    }

    /// Declare a content value processed by `processor`.
    pub fn content(self, processor: Processor) -> Self {
        self.content_descriptor_with(ContentDescriptor::new(processor))
    }

    /// Declare a content value with full options.
    pub fn content_descriptor_with(mut self, content: ContentDescriptor) -> Self {
        self.content = Some(content);
        self
    }

    /// Declare a property. Declaration order is preserved for listings.
    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub(crate) fn with_namespace(mut self, namespace: String) -> Self {
        self.namespace = namespace;
        self
    }

    /// The colon-joined namespace this type is registered under.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn content_descriptor(&self) -> Option<&ContentDescriptor> {
        self.content.as_ref()
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter()
    }

    pub fn property_named(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property_named(name).is_some()
    }

    pub fn required_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| p.required)
    }

    /// Every short vertical name mentioned by any property.
    pub fn verticals(&self) -> BTreeSet<&str> {
        self.properties
            .iter()
            .flat_map(|p| p.verticals.iter().map(String::as_str))
            .collect()
    }

    /// Names of properties that may be set under vertical `short`, in
    /// declaration order.
    pub fn allowed_in_vertical(&self, short: &str) -> Vec<String> {
        self.properties
            .iter()
            .filter(|p| p.allows_vertical(short))
            .map(|p| p.name.clone())
            .collect()
    }
}
