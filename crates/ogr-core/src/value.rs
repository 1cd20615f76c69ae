//! # Typed Scalar Values
//!
//! The output of a type processor. Strings and URLs stay textual; integers,
//! floats, booleans and datetimes are converted once and kept typed.
//!
//! Serialization is untagged: a `Scalar` appears in JSON as the bare string,
//! number or boolean. Datetimes serialize as RFC 3339 strings.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// A converted property or content value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Free text.
    Text(String),
    /// An absolute or passed-through URL.
    Url(String),
    /// A base-10 integer.
    Integer(i64),
    /// A base-10 float.
    Float(f64),
    /// A boolean.
    Boolean(bool),
    /// A datetime with its original offset.
    DateTime(DateTime<FixedOffset>),
}

impl Scalar {
    /// The textual value for `Text` and `Url` scalars.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Url(s) => Some(s),
            _ => None,
        }
    }

    /// The value of an `Integer` scalar.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The value of a `Float` scalar.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The value of a `Boolean` scalar.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The value of a `DateTime` scalar.
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Url(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn text_and_url_expose_str() {
        assert_eq!(Scalar::from("hello").as_str(), Some("hello"));
        assert_eq!(
            Scalar::Url("https://example.org/".to_string()).as_str(),
            Some("https://example.org/")
        );
        assert_eq!(Scalar::Integer(5).as_str(), None);
    }

    #[test]
    fn typed_accessors() {
        assert_eq!(Scalar::Integer(50).as_integer(), Some(50));
        assert_eq!(Scalar::Float(1.5).as_float(), Some(1.5));
        assert_eq!(Scalar::Boolean(true).as_bool(), Some(true));
        assert_eq!(Scalar::Text("50".into()).as_integer(), None);
    }

    #[test]
    fn display_datetime_is_rfc3339() {
        let dt = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(1972, 6, 18, 0, 0, 0)
            .unwrap();
        assert_eq!(Scalar::DateTime(dt).to_string(), "1972-06-18T00:00:00+00:00");
    }

    #[test]
    fn serializes_untagged() {
        let yaml = serde_yaml::to_string(&vec![
            Scalar::Text("a".into()),
            Scalar::Integer(3),
            Scalar::Boolean(false),
        ])
        .unwrap();
        assert_eq!(yaml, "- a\n- 3\n- false\n");
    }
}
