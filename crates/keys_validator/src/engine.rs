//! Key check engine.
//!
//! This module provides `KeyValidator`, which runs the foreign-key differ and
//! the duplicate detector over key datasets and turns each offending row into
//! a `Violation` with a formatted message.

use crate::{SchemaErrorMessages, find_duplicate_keys, find_missing_foreign_keys_with};
use keys_core::{
    ComparisonOptions, CoreError, ErrorData, FieldMapping, IndexedRecord, MessageFormatter,
    Result, SchemaErrorKind, ValidationReport, Violation, check_not_blank, check_not_null,
};
use std::time::Instant;
use tracing::{debug, info};

/// A foreign key from local fields to fields of another schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyRule {
    local_fields: Vec<String>,
    foreign_fields: Vec<String>,
    foreign_schema: String,
}

impl ForeignKeyRule {
    /// Starts building a rule.
    pub fn builder() -> ForeignKeyRuleBuilder {
        ForeignKeyRuleBuilder::default()
    }

    /// Key field names in the checked dataset.
    pub fn local_fields(&self) -> &[String] {
        &self.local_fields
    }

    /// Key field names in the referenced dataset.
    pub fn foreign_fields(&self) -> &[String] {
        &self.foreign_fields
    }

    /// Name of the referenced schema.
    pub fn foreign_schema(&self) -> &str {
        &self.foreign_schema
    }

    /// Mapping from referenced field names to local field names.
    pub fn mapping(&self) -> FieldMapping {
        self.foreign_fields
            .iter()
            .zip(&self.local_fields)
            .filter(|(foreign, local)| foreign != local)
            .map(|(foreign, local)| (foreign.clone(), local.clone()))
            .collect()
    }

    /// Field label used in messages.
    pub fn field_label(&self) -> String {
        self.local_fields.join(", ")
    }
}

/// Builder for creating a `ForeignKeyRule`.
///
/// # Example
///
/// ```rust
/// use keys_validator::ForeignKeyRule;
///
/// let rule = ForeignKeyRule::builder()
///     .field("donor_id", "id")
///     .same_field("program_id")
///     .foreign_schema("donor")
///     .build()
///     .unwrap();
///
/// assert_eq!(rule.local_fields(), ["donor_id", "program_id"]);
/// assert_eq!(rule.mapping().get("id"), Some("donor_id"));
/// ```
#[derive(Debug, Default)]
pub struct ForeignKeyRuleBuilder {
    fields: Vec<(String, String)>,
    foreign_schema: Option<String>,
}

impl ForeignKeyRuleBuilder {
    /// Adds a key field named `local` here and `foreign` in the referenced schema.
    pub fn field(mut self, local: impl Into<String>, foreign: impl Into<String>) -> Self {
        self.fields.push((local.into(), foreign.into()));
        self
    }

    /// Adds a key field with the same name on both sides.
    pub fn same_field(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.field(name.clone(), name)
    }

    /// Sets the referenced schema.
    pub fn foreign_schema(mut self, schema: impl Into<String>) -> Self {
        self.foreign_schema = Some(schema.into());
        self
    }

    /// Builds the rule.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when no field or no schema is given,
    /// or a name is blank.
    pub fn build(self) -> Result<ForeignKeyRule> {
        let foreign_schema = check_not_null("foreign_schema", self.foreign_schema)?;
        check_not_blank("foreign_schema", &foreign_schema)?;

        if self.fields.is_empty() {
            return Err(CoreError::invalid_argument("fields"));
        }

        let mut local_fields = Vec::with_capacity(self.fields.len());
        let mut foreign_fields = Vec::with_capacity(self.fields.len());
        for (local, foreign) in self.fields {
            check_not_blank("local field", &local)?;
            check_not_blank("foreign field", &foreign)?;
            local_fields.push(local);
            foreign_fields.push(foreign);
        }

        Ok(ForeignKeyRule {
            local_fields,
            foreign_fields,
            foreign_schema,
        })
    }
}

/// A set of fields whose combined values must be unique.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueRule {
    fields: Vec<String>,
}

impl UniqueRule {
    /// Creates a rule over the given fields.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` when `fields` is empty or a name is blank.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(CoreError::invalid_argument("fields"));
        }
        for field in &fields {
            check_not_blank("field", field)?;
        }
        Ok(Self { fields })
    }

    /// Key field names.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field label used in messages.
    pub fn field_label(&self) -> String {
        self.fields.join(", ")
    }
}

/// Runs key checks and builds validation reports.
///
/// # Example
///
/// ```rust
/// use keys_core::IndexedRecord;
/// use keys_validator::{KeyValidator, UniqueRule};
///
/// let rows = vec![
///     IndexedRecord::new(0, [("id", "1")].into_iter().collect()),
///     IndexedRecord::new(1, [("id", "1")].into_iter().collect()),
/// ];
///
/// let validator = KeyValidator::new();
/// let report = validator.check_unique(&UniqueRule::new(["id"]).unwrap(), &rows);
///
/// assert!(!report.passed);
/// assert_eq!(report.violations[0].message, "Value for id must be unique.");
/// ```
pub struct KeyValidator {
    options: ComparisonOptions,
    formatter: Box<dyn MessageFormatter>,
}

impl KeyValidator {
    /// Creates a validator with default options and messages.
    pub fn new() -> Self {
        Self {
            options: ComparisonOptions::default(),
            formatter: Box::new(SchemaErrorMessages),
        }
    }

    /// Replaces the comparison options.
    pub fn with_options(mut self, options: ComparisonOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the message formatter.
    pub fn with_formatter(mut self, formatter: impl MessageFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Returns the comparison options.
    pub fn options(&self) -> &ComparisonOptions {
        &self.options
    }

    /// Reports every `child` row whose key is missing from `parent`.
    ///
    /// Child rows are reduced to the rule's local fields and parent rows to its
    /// foreign fields. Rows lacking one of those fields are not compared.
    pub fn check_foreign_keys(
        &self,
        rule: &ForeignKeyRule,
        child: &[IndexedRecord],
        parent: &[IndexedRecord],
    ) -> ValidationReport {
        let start = Instant::now();
        info!(
            fields = %rule.field_label(),
            foreign_schema = rule.foreign_schema(),
            "Checking foreign keys"
        );

        let child_keys = project_rows(child, rule.local_fields());
        let parent_keys = project_rows(parent, rule.foreign_fields());
        let missing = find_missing_foreign_keys_with(
            &child_keys,
            &parent_keys,
            &rule.mapping(),
            self.options.strategy,
        );

        let mut report = ValidationReport::success();
        for row in missing {
            let data = ErrorData::new(rule.field_label())
                .with_value(row.record.clone())
                .with_foreign_schema(rule.foreign_schema());
            self.push_violation(&mut report, SchemaErrorKind::InvalidByForeignKey, row, &data);
        }

        report.stats.records_checked = child.len();
        report.stats.reference_records = parent.len();
        report.stats.duration_ms = start.elapsed().as_millis() as u64;
        report
    }

    /// Reports every row whose key occurs more than once in `rows`.
    pub fn check_unique(&self, rule: &UniqueRule, rows: &[IndexedRecord]) -> ValidationReport {
        let start = Instant::now();
        info!(fields = %rule.field_label(), "Checking unique keys");

        let keys = project_rows(rows, rule.fields());
        let mut duplicates = find_duplicate_keys(&keys);
        if self.options.sort_by_row {
            duplicates.sort_by_key(|row| row.index);
        }

        let mut report = ValidationReport::success();
        for row in duplicates {
            let data = ErrorData::new(rule.field_label()).with_value(row.record.clone());
            self.push_violation(&mut report, SchemaErrorKind::InvalidByUnique, row, &data);
        }

        report.stats.records_checked = rows.len();
        report.stats.duration_ms = start.elapsed().as_millis() as u64;
        report
    }

    fn push_violation(
        &self,
        report: &mut ValidationReport,
        kind: SchemaErrorKind,
        row: &IndexedRecord,
        data: &ErrorData,
    ) {
        if self
            .options
            .max_violations
            .is_some_and(|max| report.violations.len() >= max)
        {
            report.count_dropped_violation();
            return;
        }

        report.add_violation(Violation {
            row_index: row.index,
            kind,
            field_name: data.field_name.clone(),
            value: row.record.clone(),
            message: self.formatter.format_message(kind, data),
        });
    }
}

impl Default for KeyValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduces rows to the given key fields, skipping rows that lack any of them.
fn project_rows(rows: &[IndexedRecord], fields: &[String]) -> Vec<IndexedRecord> {
    rows.iter()
        .filter_map(|row| match row.record.project(fields) {
            Ok(record) => Some(IndexedRecord::new(row.index, record)),
            Err(err) => {
                debug!(row = row.index, error = %err, "Skipping row without full key");
                None
            }
        })
        .collect()
}
