use anyhow::{Context, Result, anyhow};
use clap::Args;
use keys_core::{ComparisonOptions, DiffStrategy};
use keys_parser::{parse_mapping_file, parse_records_file};
use keys_validator::{ForeignKeyRule, KeyValidator};
use std::path::Path;
use tracing::info;

use crate::output;

#[derive(Debug, Args)]
pub struct MissingArgs {
    /// Dataset holding the foreign key (JSON, YAML or TOML)
    pub child: String,

    /// Referenced dataset (JSON, YAML or TOML)
    pub parent: String,

    /// Key field as LOCAL or LOCAL=FOREIGN when the parent names it differently
    #[arg(short = 'k', long = "field", value_parser = parse_field_pair)]
    pub fields: Vec<(String, String)>,

    /// File mapping parent field names to child field names
    #[arg(short, long)]
    pub mapping: Option<String>,

    /// Name of the referenced schema, used in messages
    #[arg(short = 's', long)]
    pub foreign_schema: String,

    /// Compare every pair of rows instead of indexing the parent keys
    #[arg(long)]
    pub pairwise: bool,

    /// Maximum number of violations to report
    #[arg(long)]
    pub max_violations: Option<usize>,

    /// Output format: text, json
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn execute(args: &MissingArgs) -> Result<()> {
    info!("Checking foreign keys of {} against {}", args.child, args.parent);

    let rule = build_rule(args)?;

    let child = parse_records_file(Path::new(&args.child))
        .with_context(|| format!("Failed to load dataset: {}", args.child))?;
    let parent = parse_records_file(Path::new(&args.parent))
        .with_context(|| format!("Failed to load dataset: {}", args.parent))?;

    if args.format != "json" {
        output::print_info(&format!(
            "Loaded {} child row(s) and {} parent row(s)",
            child.len(),
            parent.len()
        ));
    }

    let strategy = if args.pairwise {
        DiffStrategy::Pairwise
    } else {
        DiffStrategy::Hashed
    };
    let mut options = ComparisonOptions::new().with_strategy(strategy);
    if let Some(max) = args.max_violations {
        options = options.with_max_violations(max);
    }

    let report = KeyValidator::new()
        .with_options(options)
        .check_foreign_keys(&rule, &child, &parent);

    output::print_validation_report(&report, "Foreign key report", &args.format);

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}

/// Combines mapping-file entries and `--field` pairs into one rule.
fn build_rule(args: &MissingArgs) -> Result<ForeignKeyRule> {
    let mut builder = ForeignKeyRule::builder().foreign_schema(&args.foreign_schema);

    if let Some(path) = &args.mapping {
        let mapping = parse_mapping_file(Path::new(path))
            .with_context(|| format!("Failed to load field mapping: {}", path))?;
        let mut pairs: Vec<(&str, &str)> = mapping.iter().collect();
        pairs.sort_unstable_by(|a, b| a.1.cmp(b.1));
        for (foreign, local) in pairs {
            builder = builder.field(local, foreign);
        }
    }

    for (local, foreign) in &args.fields {
        builder = builder.field(local.as_str(), foreign.as_str());
    }

    builder
        .build()
        .map_err(|e| anyhow!("Invalid foreign key definition ({}): pass --field or --mapping", e))
}

/// Parses `LOCAL` or `LOCAL=FOREIGN`.
pub fn parse_field_pair(value: &str) -> std::result::Result<(String, String), String> {
    match value.split_once('=') {
        Some((local, foreign)) if !local.is_empty() && !foreign.is_empty() => {
            Ok((local.to_string(), foreign.to_string()))
        }
        Some(_) => Err(format!("expected LOCAL=FOREIGN, got '{}'", value)),
        None if !value.is_empty() => Ok((value.to_string(), value.to_string())),
        None => Err("field name cannot be empty".to_string()),
    }
}
