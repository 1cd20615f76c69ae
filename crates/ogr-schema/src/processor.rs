//! # Type Processors
//!
//! Pure conversions from a raw attribute string into a typed [`Scalar`].
//! Each processor kind has one failure mode:
//!
//! | processor | accepts | failure |
//! |-----------|---------|---------|
//! | `String`   | anything | never |
//! | `Enum`     | a member of the allowed list (case-sensitive) | `InvalidFormat` |
//! | `Integer`  | base-10 `i64` | `InvalidFormat` |
//! | `Float`    | base-10 finite `f64` | `InvalidFormat` |
//! | `Boolean`  | `true`, `1`, `false`, `0` | `InvalidFormat` |
//! | `DateTime` | ISO 8601, or guessed formats when enabled | `InvalidFormat` |
//! | `Url`      | `http://` / `https://`, or a synthesizable relative URL | `InvalidReference` |
//!
//! ## Leniency
//!
//! [`Processor::process`] wraps the conversion: a failure on an optional
//! value is swallowed (the value resolves to `None`) when
//! `discard_invalid_optional_properties` is enabled. Required values, or
//! any value with discarding disabled, propagate the failure.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use url::Url;

use ogr_core::{InvalidObjectError, ReaderConfig, Scalar};

/// The conversion applied to a raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Processor {
    /// Identity conversion.
    String,
    /// Absolute `http(s)` URL, optionally synthesized from a relative one.
    Url,
    /// One of a fixed list of allowed values.
    Enum(Vec<String>),
    /// Base-10 integer.
    Integer,
    /// Base-10 float.
    Float,
    /// `true`/`1`/`false`/`0`.
    Boolean,
    /// ISO 8601 datetime.
    DateTime,
}

/// Per-value options derived from the descriptor being assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueOptions {
    /// The value belongs to a required property.
    pub required: bool,
    /// The value identifies another object, so reference validation applies.
    pub reference: bool,
    /// The value is an image URL, eligible for image URL synthesis.
    pub image: bool,
}

/// Build-scoped inputs consulted by processors.
#[derive(Debug, Clone, Copy)]
pub struct ProcessContext<'a> {
    /// The active reader configuration.
    pub config: &'a ReaderConfig,
    /// Source URL of the document, used for URL synthesis.
    pub origin: Option<&'a str>,
}

impl<'a> ProcessContext<'a> {
    /// A context without an origin.
    pub fn new(config: &'a ReaderConfig) -> Self {
        Self {
            config,
            origin: None,
        }
    }

    /// Attach the document origin.
    pub fn with_origin(mut self, origin: Option<&'a str>) -> Self {
        self.origin = origin;
        self
    }
}

const ISO8601_OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

const ISO8601_NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const ISO8601_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

const GUESSED_OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S%z"];

const GUESSED_NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const GUESSED_DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

impl Processor {
    /// Short name used in diagnostics and schema listings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Url => "url",
            Self::Enum(_) => "enum",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::DateTime => "datetime",
        }
    }

    /// Convert `raw`, applying the optional-value leniency rule.
    ///
    /// Returns `Ok(None)` when the value was invalid but discarded.
    pub fn process(
        &self,
        property: &str,
        raw: &str,
        options: ValueOptions,
        ctx: &ProcessContext<'_>,
    ) -> Result<Option<Scalar>, InvalidObjectError> {
        match self.convert(property, raw, options, ctx) {
            Ok(value) => Ok(Some(value)),
            Err(e) if !options.required && ctx.config.discard_invalid_optional_properties => {
                tracing::debug!(property, error = %e, "discarding invalid optional value");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Convert `raw` without leniency.
    pub fn convert(
        &self,
        property: &str,
        raw: &str,
        options: ValueOptions,
        ctx: &ProcessContext<'_>,
    ) -> Result<Scalar, InvalidObjectError> {
        let invalid = |expected: String| InvalidObjectError::InvalidFormat {
            property: property.to_string(),
            expected,
            value: raw.to_string(),
        };

        match self {
            Self::String => Ok(Scalar::Text(raw.to_string())),
            Self::Enum(allowed) => {
                if allowed.iter().any(|a| a == raw) {
                    Ok(Scalar::Text(raw.to_string()))
                } else {
                    Err(invalid(format!("one of {allowed:?}")))
                }
            }
            Self::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Scalar::Integer)
                .map_err(|_| invalid("integer".to_string())),
            Self::Float => match raw.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Scalar::Float(n)),
                _ => Err(invalid("float".to_string())),
            },
            Self::Boolean => match raw {
                "true" | "1" => Ok(Scalar::Boolean(true)),
                "false" | "0" => Ok(Scalar::Boolean(false)),
                _ => Err(invalid("boolean".to_string())),
            },
            Self::DateTime => parse_datetime(raw, ctx.config.guess_datetime_format)
                .map(Scalar::DateTime)
                .ok_or_else(|| invalid("ISO 8601 datetime".to_string())),
            Self::Url => convert_url(property, raw, options, ctx),
        }
    }
}

fn convert_url(
    property: &str,
    raw: &str,
    options: ValueOptions,
    ctx: &ProcessContext<'_>,
) -> Result<Scalar, InvalidObjectError> {
    if is_absolute_http(raw) {
        return Ok(Scalar::Url(raw.to_string()));
    }

    let invalid = |reason: String| InvalidObjectError::InvalidReference {
        property: property.to_string(),
        value: raw.to_string(),
        reason,
    };

    let synthesize = (options.image && ctx.config.synthesize_image_url) || ctx.config.synthesize_full_url;
    if synthesize {
        let origin = ctx.origin.ok_or_else(|| {
            invalid("could not be synthesized into a full URL: no origin available".to_string())
        })?;
        let url = synthesize_url(raw, origin).map_err(invalid)?;
        tracing::debug!(property, value = raw, synthesized = %url, "synthesized full URL");
        return Ok(Scalar::Url(url));
    }

    if options.reference && ctx.config.validate_references {
        return Err(invalid("does not start with http:// or https://".to_string()));
    }

    Ok(Scalar::Url(raw.to_string()))
}

/// Whether `value` is an absolute `http` or `https` URL.
pub fn is_absolute_http(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Turn a relative `value` into an absolute URL.
///
/// A scheme-relative value (`//host/path`) with a valid host always
/// becomes `https:`. Anything else is resolved as a root-relative path
/// against `origin`; values without a leading `/` get one.
pub fn synthesize_url(value: &str, origin: &str) -> Result<String, String> {
    let base = Url::parse(origin)
        .map_err(|e| format!("could not be synthesized into a full URL: invalid origin {origin:?} ({e})"))?;

    if let Some(url) = scheme_relative(value) {
        return Ok(url.into());
    }

    let joined = if value.starts_with("//") {
        let mut path_only = base;
        path_only.set_path(value);
        path_only
    } else {
        let reference = if value.starts_with('/') {
            value.to_string()
        } else {
            format!("/{value}")
        };
        base.join(&reference)
            .map_err(|e| format!("could not be synthesized into a full URL ({e})"))?
    };

    match joined.scheme() {
        "http" | "https" => Ok(joined.into()),
        other => Err(format!(
            "could not be synthesized into a full URL: origin scheme {other}: is not http(s)"
        )),
    }
}

fn scheme_relative(value: &str) -> Option<Url> {
    if !value.starts_with("//") {
        return None;
    }
    Url::parse(&format!("https:{value}"))
        .ok()
        .filter(|url| url.host_str().is_some_and(|host| !host.is_empty()))
}

/// Parse a datetime, strictly ISO 8601 unless `guess` is set.
pub fn parse_datetime(raw: &str, guess: bool) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    parse_iso8601(raw).or_else(|| if guess { parse_guessed(raw) } else { None })
}

fn parse_iso8601(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    parse_with(raw, ISO8601_OFFSET_FORMATS, ISO8601_NAIVE_FORMATS, ISO8601_DATE_FORMATS)
}

fn parse_guessed(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt);
    }
    parse_with(raw, GUESSED_OFFSET_FORMATS, GUESSED_NAIVE_FORMATS, GUESSED_DATE_FORMATS)
}

fn parse_with(
    raw: &str,
    offset_formats: &[&str],
    naive_formats: &[&str],
    date_formats: &[&str],
) -> Option<DateTime<FixedOffset>> {
    offset_formats
        .iter()
        .find_map(|f| DateTime::parse_from_str(raw, f).ok())
        .or_else(|| {
            naive_formats
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .and_then(as_utc)
        })
        .or_else(|| {
            date_formats
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .and_then(as_utc)
        })
}

fn as_utc(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    FixedOffset::east_opt(0).map(|utc| utc.from_utc_datetime(&naive))
}
