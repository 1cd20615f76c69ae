//! # ogr CLI entry point
//!
//! Parses command-line arguments, loads the reader configuration and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ogr_cli::build::{run_build, BuildArgs};
use ogr_cli::load_config;
use ogr_cli::schema::{run_schema, SchemaArgs};

/// OpenGraph reader.
///
/// Builds typed, validated OpenGraph object trees from the meta tags of
/// a document head.
#[derive(Parser, Debug)]
#[command(name = "ogr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML reader configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build and validate the OpenGraph object tree of a document head.
    Build(BuildArgs),

    /// List registered namespaces, their properties and the known verticals.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = load_config(cli.config.as_deref()).and_then(|config| {
        tracing::debug!(?config, "reader configuration loaded");
        match cli.command {
            Commands::Build(args) => run_build(&args, config),
            Commands::Schema(args) => run_schema(&args),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_build() {
        let cli = Cli::try_parse_from([
            "ogr",
            "build",
            "head.json",
            "--origin",
            "https://example.org/",
            "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.file, PathBuf::from("head.json"));
                assert_eq!(args.origin.as_deref(), Some("https://example.org/"));
                assert!(args.strict);
                assert!(!args.pretty);
                assert!(args.title.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_build_requires_file() {
        assert!(Cli::try_parse_from(["ogr", "build"]).is_err());
    }

    #[test]
    fn cli_parse_schema_json() {
        let cli = Cli::try_parse_from(["ogr", "schema", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema(SchemaArgs { json: true })));
    }

    #[test]
    fn cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ogr", "schema", "-vv", "--config", "ogr.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("ogr.yaml")));
    }

    #[test]
    fn cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["ogr", "fetch"]).is_err());
    }
}
