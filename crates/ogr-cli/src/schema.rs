//! # Schema Subcommand
//!
//! Lists the registered namespaces of the standard vocabulary with their
//! properties, the reference aliases derived from them and the known
//! verticals. Plain text by default, JSON with `--json`.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use ogr_schema::{PropertyDescriptor, SchemaRegistry, TypeDescriptor};

/// Arguments for the `ogr schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Emit the listing as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    let registry = SchemaRegistry::standard().context("failed to load the standard vocabulary")?;
    tracing::debug!(types = registry.len(), "listing schema");
    if args.json {
        let summary = SchemaSummary::from_registry(&registry);
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to serialize schema")?
        );
    } else {
        print!("{}", render_schema(&registry));
    }
    Ok(0)
}

// ─── Listing ────────────────────────────────────────────────────────

/// Serializable view of a registry.
#[derive(Debug, Serialize)]
pub struct SchemaSummary {
    pub types: Vec<TypeSummary>,
    pub aliases: Vec<AliasSummary>,
    pub verticals: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TypeSummary {
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub properties: Vec<PropertySummary>,
}

#[derive(Debug, Serialize)]
pub struct PropertySummary {
    pub name: String,
    pub processor: String,
    pub collection: bool,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub verticals: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AliasSummary {
    pub path: String,
    pub target: String,
}

impl SchemaSummary {
    pub fn from_registry(registry: &SchemaRegistry) -> Self {
        Self {
            types: registry.types().map(|t| TypeSummary::from_descriptor(t)).collect(),
            aliases: registry
                .aliases()
                .map(|(path, target)| AliasSummary {
                    path: path.to_string(),
                    target: target.to_string(),
                })
                .collect(),
            verticals: registry.verticals().iter().cloned().collect(),
        }
    }
}

impl TypeSummary {
    fn from_descriptor(descriptor: &TypeDescriptor) -> Self {
        Self {
            namespace: descriptor.namespace().to_string(),
            content: descriptor
                .content_descriptor()
                .map(|c| c.processor().name().to_string()),
            properties: descriptor.properties().map(PropertySummary::from_descriptor).collect(),
        }
    }
}

impl PropertySummary {
    fn from_descriptor(property: &PropertyDescriptor) -> Self {
        Self {
            name: property.name().to_string(),
            processor: property.processor().name().to_string(),
            collection: property.is_collection(),
            required: property.is_required(),
            references: property.reference().map(str::to_string),
            verticals: property.vertical_names().iter().cloned().collect(),
        }
    }
}

/// Human-readable listing of `registry`.
pub fn render_schema(registry: &SchemaRegistry) -> String {
    let summary = SchemaSummary::from_registry(registry);
    let mut out = String::new();

    for t in &summary.types {
        match &t.content {
            Some(content) => out.push_str(&format!("{} (content: {content})\n", t.namespace)),
            None => out.push_str(&format!("{}\n", t.namespace)),
        }
        for p in &t.properties {
            let mut flags = Vec::new();
            if p.collection {
                flags.push("collection".to_string());
            }
            if p.required {
                flags.push("required".to_string());
            }
            if let Some(target) = &p.references {
                flags.push(format!("-> {target}"));
            }
            if !p.verticals.is_empty() {
                flags.push(format!("verticals: {}", p.verticals.join(", ")));
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join("; "))
            };
            out.push_str(&format!("  {}: {}{flags}\n", p.name, p.processor));
        }
    }

    if !summary.aliases.is_empty() {
        out.push_str("\naliases\n");
        for a in &summary.aliases {
            out.push_str(&format!("  {} -> {}\n", a.path, a.target));
        }
    }

    if !summary.verticals.is_empty() {
        out.push_str("\nverticals\n");
        for v in &summary.verticals {
            out.push_str(&format!("  {v}\n"));
        }
    }

    out
}
