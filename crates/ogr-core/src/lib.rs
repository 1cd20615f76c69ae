//! # ogr-core — Foundational Types for the OpenGraph Reader
//!
//! This crate is the leaf of the workspace. It defines the primitives every
//! other crate agrees on and depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`NamespacePath` newtype.** A colon-delimited path such as
//!    `og:image:width` is validated once at construction (non-empty,
//!    lowercase segments). Builders and registries never split raw strings.
//!
//! 2. **Typed scalars.** Type processors produce a [`Scalar`], never a bare
//!    string, so an integer property stays an integer all the way to the
//!    serialized output.
//!
//! 3. **Explicit configuration.** [`ReaderConfig`] is a plain value passed
//!    into each build. There is no process-wide mutable configuration.
//!
//! 4. **One error kind per failure class.** [`InvalidObjectError`] has one
//!    variant per way a document can be rejected, so leniency decisions are
//!    a `match`, not string inspection.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ogr-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod namespace;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use config::{ConfigError, ReaderConfig};
pub use error::{InvalidObjectError, OgrError, ValidationError};
pub use namespace::NamespacePath;
pub use value::Scalar;
