//! Comparison options and validation reports.
//!
//! [`ComparisonOptions`] configures how key comparisons run; a
//! [`ValidationReport`] collects the violations they produce.

use crate::{Record, SchemaErrorKind};
use serde::Serialize;

/// How the foreign-key differ searches the referenced dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiffStrategy {
    /// Index the referenced keys by canonical key, O(|A| + |B|)
    #[default]
    Hashed,
    /// Compare every pair of records, O(|A| × |B|)
    Pairwise,
}

/// Options for key comparison.
#[derive(Debug, Clone)]
pub struct ComparisonOptions {
    /// Search strategy for foreign-key checks
    pub strategy: DiffStrategy,

    /// Sort duplicate-key results by row index
    pub sort_by_row: bool,

    /// Maximum number of violations to keep in a report
    pub max_violations: Option<usize>,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            strategy: DiffStrategy::default(),
            sort_by_row: true,
            max_violations: None,
        }
    }
}

impl ComparisonOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the foreign-key search strategy.
    pub fn with_strategy(mut self, strategy: DiffStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets whether duplicate-key results are sorted by row index.
    pub fn with_sort_by_row(mut self, sort_by_row: bool) -> Self {
        self.sort_by_row = sort_by_row;
        self
    }

    /// Caps the number of violations kept in a report.
    pub fn with_max_violations(mut self, max: usize) -> Self {
        self.max_violations = Some(max);
        self
    }
}

/// One offending row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Row index in the checked dataset
    pub row_index: usize,
    /// Kind of violation
    pub kind: SchemaErrorKind,
    /// Field (or comma-separated fields) the violation applies to
    pub field_name: String,
    /// Key values of the offending row
    pub value: Record,
    /// Human-readable description
    pub message: String,
}

/// Result of a key check.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Whether no violation was found
    pub passed: bool,

    /// Violations kept in the report
    pub violations: Vec<Violation>,

    /// Check statistics
    pub stats: ValidationStats,
}

/// Statistics about a key check.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationStats {
    /// Number of rows checked
    pub records_checked: usize,

    /// Number of rows in the referenced dataset (foreign-key checks only)
    pub reference_records: usize,

    /// Number of violations found, including ones dropped by `max_violations`
    pub violations_found: usize,

    /// Check duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a new passing report.
    pub fn success() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Adds a violation, marking the report as failed.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
        self.stats.violations_found += 1;
        self.passed = false;
    }

    /// Records a violation without keeping its details.
    pub fn count_dropped_violation(&mut self) {
        self.stats.violations_found += 1;
        self.passed = false;
    }
}
