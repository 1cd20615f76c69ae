//! # Error Hierarchy
//!
//! Structured error types for the OpenGraph reader, built with `thiserror`.
//!
//! [`InvalidObjectError`] is what a build returns when a document is
//! rejected. Each variant names the failing property and the object or
//! namespace it belongs to, so callers can report the problem without
//! re-parsing the message.
//!
//! ## Recoverability
//!
//! - `UnknownNamespace` and `UndefinedProperty` are lookup failures. A
//!   lenient build skips the offending attribute; a strict build aborts.
//! - `InvalidFormat` and `InvalidReference` are value failures. They are
//!   dropped for optional properties when discarding is enabled.
//! - `MissingRequired`, `InvalidVerticalProperty` and `InvalidType` always
//!   abort the build once their check is enabled.

use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error type for the OpenGraph reader.
#[derive(Error, Debug)]
pub enum OgrError {
    /// The document carries OpenGraph tags but they do not form a valid object.
    #[error("invalid OpenGraph object: {0}")]
    InvalidObject(#[from] InvalidObjectError),

    /// The document carries no OpenGraph tags at all.
    #[error("no OpenGraph data: {0}")]
    NoOpenGraphData(String),

    /// The reader configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A domain primitive failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A namespace path is empty or contains an empty segment.
    #[error("invalid namespace path: {value:?} ({reason})")]
    InvalidNamespace {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// A document was rejected while building or validating its object tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidObjectError {
    /// A path segment has no registered type where one was needed.
    #[error("{namespace} is not a registered namespace")]
    UnknownNamespace {
        /// The colon-joined namespace that failed to resolve.
        namespace: String,
    },

    /// A leaf name is not declared on its resolved type.
    #[error("undefined property {property} on {namespace}")]
    UndefinedProperty {
        /// Namespace of the type the property was looked up on.
        namespace: String,
        /// The undeclared property name.
        property: String,
    },

    /// A scalar value failed its type processor.
    #[error("invalid value for {property}: {expected} expected, but was {value:?}")]
    InvalidFormat {
        /// The property (or `content`) being assigned.
        property: String,
        /// Description of the accepted format.
        expected: String,
        /// The rejected raw value.
        value: String,
    },

    /// A URL value is not absolute and could not be made absolute.
    #[error("invalid URL for {property}: {value:?} {reason}")]
    InvalidReference {
        /// The property (or `content`) being assigned.
        property: String,
        /// The rejected raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A required property is absent after the build.
    #[error("missing required property {property} on {object}")]
    MissingRequired {
        /// The required property name.
        property: String,
        /// Namespace of the object lacking it.
        object: String,
    },

    /// A property is set outside the verticals it is restricted to.
    #[error("set invalid property {property} for {vertical}, valid properties are {allowed:?}")]
    InvalidVerticalProperty {
        /// The offending property name.
        property: String,
        /// The document's vertical type, e.g. `video.movie`.
        vertical: String,
        /// Properties permitted under this vertical.
        allowed: Vec<String>,
    },

    /// The document declares a type that strict mode does not recognize.
    #[error("undefined type {type_name}")]
    InvalidType {
        /// The case-folded type name.
        type_name: String,
    },
}

impl InvalidObjectError {
    /// Whether this is a namespace or property lookup failure, the kinds a
    /// lenient build skips instead of aborting on.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::UnknownNamespace { .. } | Self::UndefinedProperty { .. }
        )
    }

    /// Whether this is a value conversion failure, the kinds that may be
    /// discarded for optional properties.
    pub fn is_value_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. } | Self::InvalidReference { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_namespace_display() {
        let err = InvalidObjectError::UnknownNamespace {
            namespace: "fb".to_string(),
        };
        assert_eq!(err.to_string(), "fb is not a registered namespace");
    }

    #[test]
    fn undefined_property_display() {
        let err = InvalidObjectError::UndefinedProperty {
            namespace: "og".to_string(),
            property: "latitude".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("undefined property latitude"));
        assert!(msg.contains("on og"));
    }

    #[test]
    fn invalid_format_display_quotes_value() {
        let err = InvalidObjectError::InvalidFormat {
            property: "duration".to_string(),
            expected: "integer".to_string(),
            value: "100 minutes".to_string(),
        };
        assert!(err.to_string().contains("integer expected, but was \"100 minutes\""));
    }

    #[test]
    fn invalid_vertical_display_lists_allowed() {
        let err = InvalidObjectError::InvalidVerticalProperty {
            property: "series".to_string(),
            vertical: "video.movie".to_string(),
            allowed: vec!["actor".to_string(), "duration".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("series"));
        assert!(msg.contains("video.movie"));
        assert!(msg.contains("\"actor\""));
    }

    #[test]
    fn lookup_failures_are_classified() {
        assert!(InvalidObjectError::UnknownNamespace {
            namespace: "x".to_string()
        }
        .is_lookup_failure());
        assert!(InvalidObjectError::UndefinedProperty {
            namespace: "og".to_string(),
            property: "x".to_string()
        }
        .is_lookup_failure());
        assert!(!InvalidObjectError::InvalidType {
            type_name: "x".to_string()
        }
        .is_lookup_failure());
    }

    #[test]
    fn value_failures_are_classified() {
        let err = InvalidObjectError::InvalidReference {
            property: "content".to_string(),
            value: "javascript:alert(1)".to_string(),
            reason: "does not start with http:// or https://".to_string(),
        };
        assert!(err.is_value_failure());
        assert!(!err.is_lookup_failure());
    }

    #[test]
    fn ogr_error_wraps_invalid_object() {
        let err: OgrError = InvalidObjectError::InvalidType {
            type_name: "foobar".to_string(),
        }
        .into();
        assert!(format!("{err}").contains("undefined type foobar"));
    }

    #[test]
    fn validation_error_display() {
        let err = ValidationError::InvalidNamespace {
            value: "og::image".to_string(),
            reason: "empty segment".to_string(),
        };
        assert!(err.to_string().contains("og::image"));
        assert!(err.to_string().contains("empty segment"));
    }

    #[test]
    fn ogr_error_no_data_display() {
        let err = OgrError::NoOpenGraphData("page.html".to_string());
        assert!(format!("{err}").contains("page.html"));
    }
}
