//! # ogr-cli — CLI Tool for the OpenGraph Reader
//!
//! Provides the `ogr` command-line interface.
//!
//! ## Subcommands
//!
//! - `ogr build`: Build and validate the OpenGraph tree of a document head.
//! - `ogr schema`: List registered types, reference aliases and verticals.
//!
//! A document head is the JSON (or YAML) form of
//! [`ogr_graph::DocumentHead`]:
//!
//! ```json
//! {
//!   "prefix": "og: http://ogp.me/ns# article: http://ogp.me/ns/article#",
//!   "title": "Page title",
//!   "meta": [
//!     { "property": "og:title", "content": "5 Held in Plot to Bug Office" },
//!     { "property": "og:type", "content": "article" }
//!   ]
//! }
//! ```

pub mod build;
pub mod schema;

use std::path::Path;

use anyhow::{Context, Result};

use ogr_core::ReaderConfig;
use ogr_graph::DocumentHead;

/// Load the reader configuration: the YAML file if given, else defaults,
/// with `OGR_*` environment overrides applied on top.
pub fn load_config(path: Option<&Path>) -> Result<ReaderConfig> {
    let config = match path {
        Some(path) => ReaderConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ReaderConfig::default(),
    };
    config
        .with_env_overrides()
        .context("invalid OGR_* environment override")
}

/// Read a document head. Files ending in `.yaml` or `.yml` are parsed as
/// YAML, everything else as JSON.
pub fn load_document(path: &Path) -> Result<DocumentHead> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let head = if yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML document head {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON document head {}", path.display()))?
    };
    Ok(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert!(config.validate_required);
    }

    #[test]
    fn load_config_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ogr.yaml");
        std::fs::write(&path, "synthesize_image_url: true\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert!(config.synthesize_image_url);
    }

    #[test]
    fn load_config_missing_file_has_context() {
        let err = load_config(Some(Path::new("/nonexistent/ogr.yaml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load configuration"));
    }

    #[test]
    fn load_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("head.json");
        std::fs::write(
            &path,
            r#"{"meta": [{"property": "og:title", "content": "A"}]}"#,
        )
        .unwrap();
        let head = load_document(&path).unwrap();
        assert_eq!(head.meta.len(), 1);
        assert!(head.title.is_none());
    }

    #[test]
    fn load_yaml_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("head.yml");
        std::fs::write(
            &path,
            "title: Page\nmeta:\n  - property: og:title\n    content: A\n",
        )
        .unwrap();
        let head = load_document(&path).unwrap();
        assert_eq!(head.title.as_deref(), Some("Page"));
        assert_eq!(head.meta[0].property, "og:title");
    }

    #[test]
    fn malformed_document_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("head.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(format!("{err:#}").contains("head.json"));
    }
}
