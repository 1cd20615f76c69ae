//! Reader configuration.
//!
//! Toggles for strictness, leniency and synthesis. Defaults follow the
//! OpenGraph protocol closely: required properties and references are
//! validated, nothing is synthesized, nothing is silently discarded.
//!
//! A configuration is an explicit value handed to each build. Load it from
//! YAML, then optionally apply `OGR_*` environment overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Behavior switches for building an OpenGraph object tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Unknown namespaces, properties and types abort the build instead of
    /// being ignored.
    pub strict: bool,
    /// Enforce presence of required properties.
    pub validate_required: bool,
    /// Enforce that reference-typed URL values are absolute. Turning this
    /// off lets values such as `javascript:` links through.
    pub validate_references: bool,
    /// Drop invalid optional property values instead of failing the build.
    pub discard_invalid_optional_properties: bool,
    /// Fall back to the page title when `og:title` is missing.
    pub synthesize_title: bool,
    /// Fall back to the document origin when `og:url` is missing.
    pub synthesize_url: bool,
    /// Rewrite relative values of every URL property to absolute URLs.
    pub synthesize_full_url: bool,
    /// Rewrite relative values of image URL properties to absolute URLs.
    pub synthesize_image_url: bool,
    /// Fill the primary image's content from its URL when absent.
    pub synthesize_image_content: bool,
    /// Accept non-ISO 8601 datetimes by guessing the format.
    pub guess_datetime_format: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            strict: false,
            validate_required: true,
            validate_references: true,
            discard_invalid_optional_properties: false,
            synthesize_title: false,
            synthesize_url: false,
            synthesize_full_url: false,
            synthesize_image_url: false,
            synthesize_image_content: false,
            guess_datetime_format: false,
        }
    }
}

/// Prefix of the environment variables read by [`ReaderConfig::with_env_overrides`].
pub const ENV_PREFIX: &str = "OGR_";

impl ReaderConfig {
    /// Parse a configuration from YAML. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded reader configuration");
        Ok(config)
    }

    /// Apply `OGR_<FLAG>` environment variables on top of this configuration.
    ///
    /// Each flag is read from the upper-cased field name, e.g. `OGR_STRICT`
    /// or `OGR_SYNTHESIZE_IMAGE_URL`. Accepted values: `true`, `false`, `1`, `0`.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (name, flag) in self.flags_mut() {
            let var = format!("{ENV_PREFIX}{}", name.to_uppercase());
            if let Some(raw) = lookup(&var) {
                *flag = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidValue {
                    variable: var.clone(),
                    value: raw.clone(),
                })?;
                tracing::debug!(variable = %var, value = *flag, "configuration override");
            }
        }
        Ok(self)
    }

    fn flags_mut(&mut self) -> [(&'static str, &mut bool); 10] {
        [
            ("strict", &mut self.strict),
            ("validate_required", &mut self.validate_required),
            ("validate_references", &mut self.validate_references),
            (
                "discard_invalid_optional_properties",
                &mut self.discard_invalid_optional_properties,
            ),
            ("synthesize_title", &mut self.synthesize_title),
            ("synthesize_url", &mut self.synthesize_url),
            ("synthesize_full_url", &mut self.synthesize_full_url),
            ("synthesize_image_url", &mut self.synthesize_image_url),
            ("synthesize_image_content", &mut self.synthesize_image_content),
            ("guess_datetime_format", &mut self.guess_datetime_format),
        ]
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read configuration file {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("invalid configuration: {0}")]
    Parse(String),
    #[error("invalid value {value:?} for {variable} (expected true, false, 1 or 0)")]
    InvalidValue { variable: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_validate_but_do_not_synthesize() {
        let config = ReaderConfig::default();
        assert!(!config.strict);
        assert!(config.validate_required);
        assert!(config.validate_references);
        assert!(!config.discard_invalid_optional_properties);
        assert!(!config.synthesize_title);
        assert!(!config.synthesize_image_content);
        assert!(!config.guess_datetime_format);
    }

    #[test]
    fn yaml_keeps_defaults_for_missing_keys() {
        let config = ReaderConfig::from_yaml_str("strict: true\nsynthesize_url: true\n").unwrap();
        assert!(config.strict);
        assert!(config.synthesize_url);
        assert!(config.validate_required);
    }

    #[test]
    fn yaml_rejects_wrong_types() {
        let err = ReaderConfig::from_yaml_str("strict: maybe\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reader.yaml");
        std::fs::write(&path, "guess_datetime_format: true\n").unwrap();
        let config = ReaderConfig::from_file(&path).unwrap();
        assert!(config.guess_datetime_format);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ReaderConfig::from_file("/nonexistent/reader.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/reader.yaml"));
    }

    #[test]
    fn overrides_apply_by_upper_case_name() {
        let vars: HashMap<&str, &str> = [
            ("OGR_STRICT", "1"),
            ("OGR_VALIDATE_REQUIRED", "false"),
            ("OGR_SYNTHESIZE_IMAGE_URL", "TRUE"),
        ]
        .into_iter()
        .collect();
        let config = ReaderConfig::default()
            .with_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();
        assert!(config.strict);
        assert!(!config.validate_required);
        assert!(config.synthesize_image_url);
        assert!(config.validate_references);
    }

    #[test]
    fn override_with_bad_value_fails() {
        let err = ReaderConfig::default()
            .with_overrides(|name| (name == "OGR_STRICT").then(|| "yes".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("OGR_STRICT"));
    }
}
