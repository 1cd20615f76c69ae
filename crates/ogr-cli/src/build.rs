//! # Build Subcommand
//!
//! Reads a document head, builds its OpenGraph object tree against the
//! standard vocabulary and prints the tree as JSON.
//!
//! Exit codes: 0 when the tree was built, 1 when the document has no
//! OpenGraph data or is rejected as an invalid object. Operational errors
//! (unreadable files, malformed input) propagate to `main`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ogr_builder::{build_document, BuildContext, RootContainer};
use ogr_core::{OgrError, ReaderConfig};
use ogr_schema::SchemaRegistry;

/// Arguments for the `ogr build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Document head to read (JSON, or YAML for .yaml/.yml files).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Source URL of the document, used to resolve relative URLs.
    #[arg(long, value_name = "URL")]
    pub origin: Option<String>,

    /// Fallback title, overriding the document's own <title>.
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Abort on unknown namespaces and undefined properties.
    #[arg(long)]
    pub strict: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

impl BuildArgs {
    /// The build context for this invocation on top of `config`.
    pub fn context(&self, mut config: ReaderConfig) -> BuildContext {
        config.strict |= self.strict;
        let mut ctx = BuildContext::new(config);
        if let Some(origin) = &self.origin {
            ctx = ctx.with_origin(origin.clone());
        }
        if let Some(title) = &self.title {
            ctx = ctx.with_fallback_title(title.clone());
        }
        ctx
    }
}

/// Execute the build subcommand.
pub fn run_build(args: &BuildArgs, config: ReaderConfig) -> Result<u8> {
    let registry = SchemaRegistry::standard().context("failed to load the standard vocabulary")?;
    let head = crate::load_document(&args.file)?;

    tracing::info!(
        file = %args.file.display(),
        tags = head.meta.len(),
        "building OpenGraph object"
    );

    match build_document(&head, &registry, args.context(config)) {
        Ok(root) => {
            println!("{}", render(&root, args.pretty)?);
            Ok(0)
        }
        Err(e @ (OgrError::InvalidObject(_) | OgrError::NoOpenGraphData(_))) => {
            eprintln!("{}: {e}", args.file.display());
            Ok(1)
        }
        Err(e) => Err(e).context("build failed"),
    }
}

/// Serialize a built tree.
pub fn render(root: &RootContainer, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(root)
    } else {
        serde_json::to_string(root)
    };
    json.context("failed to serialize the object tree")
}
