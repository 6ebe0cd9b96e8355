//! Error kinds and the message formatting seam.
//!
//! Violations are reported as a [`SchemaErrorKind`] plus the [`ErrorData`]
//! needed to describe them. Turning the pair into text is left to a
//! [`MessageFormatter`] so callers can plug in their own wording.

use crate::{CoreError, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of schema violation a field or record can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaErrorKind {
    /// Value has the wrong type
    InvalidFieldValueType,
    /// Value does not match the field's regular expression
    InvalidByRegex,
    /// Value is outside the permitted range
    InvalidByRange,
    /// Value was rejected by a validation script
    InvalidByScript,
    /// Value is not one of the permitted codes
    InvalidEnumValue,
    /// Required field has no value
    MissingRequiredField,
    /// Key is not unique within its dataset
    InvalidByUnique,
    /// Key has no match in the referenced schema
    InvalidByForeignKey,
}

impl SchemaErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [SchemaErrorKind; 8] = [
        SchemaErrorKind::InvalidFieldValueType,
        SchemaErrorKind::InvalidByRegex,
        SchemaErrorKind::InvalidByRange,
        SchemaErrorKind::InvalidByScript,
        SchemaErrorKind::InvalidEnumValue,
        SchemaErrorKind::MissingRequiredField,
        SchemaErrorKind::InvalidByUnique,
        SchemaErrorKind::InvalidByForeignKey,
    ];

    /// Returns the stable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorKind::InvalidFieldValueType => "INVALID_FIELD_VALUE_TYPE",
            SchemaErrorKind::InvalidByRegex => "INVALID_BY_REGEX",
            SchemaErrorKind::InvalidByRange => "INVALID_BY_RANGE",
            SchemaErrorKind::InvalidByScript => "INVALID_BY_SCRIPT",
            SchemaErrorKind::InvalidEnumValue => "INVALID_ENUM_VALUE",
            SchemaErrorKind::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            SchemaErrorKind::InvalidByUnique => "INVALID_BY_UNIQUE",
            SchemaErrorKind::InvalidByForeignKey => "INVALID_BY_FOREIGN_KEY",
        }
    }
}

impl fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SchemaErrorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == s)
            .ok_or_else(|| CoreError::not_found(format!("error kind '{}'", s)))
    }
}

/// Numeric bounds on a field value. Exclusive bounds take precedence over
/// inclusive ones on the same side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeRestriction {
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Inclusive upper bound
    pub max: Option<f64>,
    /// Exclusive lower bound
    pub exclusive_min: Option<f64>,
    /// Exclusive upper bound
    pub exclusive_max: Option<f64>,
}

/// Everything a formatter may need to describe one violation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorData {
    /// Field (or comma-separated fields) the violation applies to
    pub field_name: String,
    /// Offending key values
    pub value: Option<Record>,
    /// Schema a foreign key points to
    pub foreign_schema: Option<String>,
    /// Permitted range
    pub range: Option<RangeRestriction>,
    /// Regular expression the value had to match
    pub regex: Option<String>,
    /// Example values accepted by `regex`
    pub examples: Option<String>,
    /// Message produced by a validation script
    pub message: Option<String>,
}

impl ErrorData {
    /// Creates error data for a field.
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..Default::default()
        }
    }

    /// Sets the offending key values.
    pub fn with_value(mut self, value: Record) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the referenced schema.
    pub fn with_foreign_schema(mut self, schema: impl Into<String>) -> Self {
        self.foreign_schema = Some(schema.into());
        self
    }

    /// Sets the permitted range.
    pub fn with_range(mut self, range: RangeRestriction) -> Self {
        self.range = Some(range);
        self
    }

    /// Sets the regular expression and optional examples.
    pub fn with_regex(mut self, regex: impl Into<String>, examples: Option<String>) -> Self {
        self.regex = Some(regex.into());
        self.examples = examples;
        self
    }

    /// Sets the script message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Turns a violation into human-readable text.
///
/// # Example
///
/// ```rust
/// use keys_core::{ErrorData, MessageFormatter, SchemaErrorKind};
///
/// struct Terse;
///
/// impl MessageFormatter for Terse {
///     fn format_message(&self, kind: SchemaErrorKind, data: &ErrorData) -> String {
///         format!("{} on {}", kind, data.field_name)
///     }
/// }
///
/// let text = Terse.format_message(SchemaErrorKind::InvalidByUnique, &ErrorData::new("id"));
/// assert_eq!(text, "INVALID_BY_UNIQUE on id");
/// ```
pub trait MessageFormatter: Send + Sync {
    /// Formats one violation.
    fn format_message(&self, kind: SchemaErrorKind, data: &ErrorData) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_codes_parse() {
        for kind in SchemaErrorKind::ALL {
            assert_eq!(kind.code().parse::<SchemaErrorKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind() {
        let result = "NOT_A_KIND".parse::<SchemaErrorKind>();
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn test_error_data_setters() {
        let data = ErrorData::new("age")
            .with_range(RangeRestriction {
                min: Some(0.0),
                ..Default::default()
            })
            .with_regex("^[0-9]+$", Some("1, 2".to_string()));

        assert_eq!(data.field_name, "age");
        assert_eq!(data.range.and_then(|r| r.min), Some(0.0));
        assert_eq!(data.regex.as_deref(), Some("^[0-9]+$"));
        assert_eq!(data.examples.as_deref(), Some("1, 2"));
        assert!(data.foreign_schema.is_none());
    }
}
