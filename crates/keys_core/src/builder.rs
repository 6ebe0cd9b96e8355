//! Builder pattern for creating key records.
//!
//! This module provides a fluent builder for assembling records field by field,
//! rejecting blank and repeated field names when the record is built.

use crate::{CoreError, KeyValue, Record, Result, check_not_blank};

/// Builder for creating a `Record`.
///
/// # Example
///
/// ```rust
/// use keys_core::{KeyValue, RecordBuilder};
///
/// let record = RecordBuilder::new()
///     .value("program_id", "PACA-CA")
///     .value("submitter_donor_id", "DO-1")
///     .build()
///     .unwrap();
///
/// assert_eq!(record.get("program_id"), Some(&KeyValue::from("PACA-CA")));
/// ```
#[derive(Debug, Default)]
pub struct RecordBuilder {
    fields: Vec<(String, KeyValue)>,
}

impl RecordBuilder {
    /// Creates a new empty record builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single-valued field.
    pub fn value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), KeyValue::Single(value.into())));
        self
    }

    /// Adds a list-valued field.
    pub fn values<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.fields.push((name.into(), KeyValue::Multiple(values)));
        self
    }

    /// Builds the record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` for a blank field name and
    /// `CoreError::StateConflict` when a field name is given twice.
    pub fn build(self) -> Result<Record> {
        let mut record = Record::new();

        for (name, value) in self.fields {
            check_not_blank("field name", &name)?;
            if record.contains_field(&name) {
                return Err(CoreError::state_conflict(format!(
                    "field '{}' is defined more than once",
                    name
                )));
            }
            record.insert(name, value);
        }

        Ok(record)
    }
}
