//! # ogr-schema — Type Processors, Descriptors & Registry
//!
//! Declares what an OpenGraph document may contain and how each raw value
//! is converted.
//!
//! ## Type Processors (`processor`)
//!
//! [`Processor`] converts a raw string into a typed [`ogr_core::Scalar`]:
//! strings, URLs, enumerations, integers, floats, booleans and datetimes.
//! URL processing optionally synthesizes absolute URLs from the document
//! origin. Failures on optional values may be discarded, depending on the
//! [`ogr_core::ReaderConfig`].
//!
//! ## Descriptors (`descriptor`)
//!
//! [`TypeDescriptor`] and [`PropertyDescriptor`] are the declaration DSL:
//! cardinality, required flags, defaults, reference targets, vertical
//! restrictions and case folding.
//!
//! ## Registry (`registry`, `vocabulary`)
//!
//! [`SchemaRegistry`] maps namespace paths to types, including the aliases
//! created by reference properties. [`SchemaRegistry::standard`] loads the
//! OpenGraph protocol vocabulary.
//!
//! ## Crate Policy
//!
//! - Depends only on `ogr-core` internally.
//! - A registry is immutable once built; definitions are checked up front
//!   and reported as [`SchemaDefinitionError`].

pub mod descriptor;
pub mod processor;
pub mod registry;
pub mod vocabulary;

pub use descriptor::{Cardinality, ContentDescriptor, PropertyDescriptor, TypeDescriptor, CONTENT};
pub use processor::{ProcessContext, Processor, ValueOptions};
pub use registry::{RegistryBuilder, SchemaDefinitionError, SchemaRegistry};
pub use vocabulary::{BASELINE_TYPES, DEFAULT_TYPE, TYPE_PROPERTY};
