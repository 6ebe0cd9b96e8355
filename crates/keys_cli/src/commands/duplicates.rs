use anyhow::{Context, Result};
use clap::Args;
use keys_core::ComparisonOptions;
use keys_parser::parse_records_file;
use keys_validator::{KeyValidator, UniqueRule};
use std::path::Path;
use tracing::info;

use crate::output;

#[derive(Debug, Args)]
pub struct DuplicatesArgs {
    /// Dataset to check (JSON, YAML or TOML)
    pub dataset: String,

    /// Field that is part of the unique key
    #[arg(short = 'k', long = "field", required = true)]
    pub fields: Vec<String>,

    /// Report violations in detection order instead of row order
    #[arg(long)]
    pub unsorted: bool,

    /// Maximum number of violations to report
    #[arg(long)]
    pub max_violations: Option<usize>,

    /// Output format: text, json
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn execute(args: &DuplicatesArgs) -> Result<()> {
    info!("Checking unique keys of {}", args.dataset);

    let rule = UniqueRule::new(args.fields.iter().cloned())
        .context("Invalid unique key definition")?;

    let rows = parse_records_file(Path::new(&args.dataset))
        .with_context(|| format!("Failed to load dataset: {}", args.dataset))?;

    if args.format != "json" {
        output::print_info(&format!("Loaded {} row(s)", rows.len()));
    }

    let mut options = ComparisonOptions::new().with_sort_by_row(!args.unsorted);
    if let Some(max) = args.max_violations {
        options = options.with_max_violations(max);
    }

    let report = KeyValidator::new()
        .with_options(options)
        .check_unique(&rule, &rows);

    output::print_validation_report(&report, "Unique key report", &args.format);

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
