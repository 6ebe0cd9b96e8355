//! Default wording for schema violations.

use keys_core::{ErrorData, MessageFormatter, RangeRestriction, SchemaErrorKind};

const INVALID_VALUE_ERROR_MESSAGE: &str = "The value is not permissible for this field.";

/// The standard message formatter.
///
/// # Example
///
/// ```rust
/// use keys_core::{ErrorData, MessageFormatter, SchemaErrorKind};
/// use keys_validator::SchemaErrorMessages;
///
/// let text = SchemaErrorMessages.format_message(
///     SchemaErrorKind::MissingRequiredField,
///     &ErrorData::new("donor_id"),
/// );
/// assert_eq!(text, "donor_id is a required field.");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaErrorMessages;

impl MessageFormatter for SchemaErrorMessages {
    fn format_message(&self, kind: SchemaErrorKind, data: &ErrorData) -> String {
        let message = match kind {
            SchemaErrorKind::InvalidFieldValueType | SchemaErrorKind::InvalidEnumValue => {
                Some(INVALID_VALUE_ERROR_MESSAGE.to_string())
            }
            SchemaErrorKind::InvalidByRegex => data
                .regex
                .as_deref()
                .map(|regex| regex_message(regex, data.examples.as_deref())),
            SchemaErrorKind::InvalidByRange => data.range.as_ref().map(|range| {
                format!(
                    "Value is out of permissible range, value must be {}.",
                    range_to_symbol(range)
                )
            }),
            SchemaErrorKind::InvalidByScript => data.message.clone(),
            SchemaErrorKind::MissingRequiredField => {
                Some(format!("{} is a required field.", data.field_name))
            }
            SchemaErrorKind::InvalidByUnique => {
                Some(format!("Value for {} must be unique.", data.field_name))
            }
            SchemaErrorKind::InvalidByForeignKey => Some(foreign_key_message(data)),
        };

        message.unwrap_or_else(|| kind.code().to_string())
    }
}

/// Formats a violation identified by its code.
///
/// Unknown codes are returned unchanged so they can still be looked up.
pub fn schema_error_message(code: &str, data: &ErrorData) -> String {
    match code.parse::<SchemaErrorKind>() {
        Ok(kind) => SchemaErrorMessages.format_message(kind, data),
        Err(_) => code.to_string(),
    }
}

/// Renders a range as comparison symbols, e.g. `>= 0 and < 10`.
///
/// An exclusive bound replaces the inclusive bound on the same side.
pub fn range_to_symbol(range: &RangeRestriction) -> String {
    let lower = range
        .exclusive_min
        .map(|v| format!("> {}", v))
        .or_else(|| range.min.map(|v| format!(">= {}", v)));
    let upper = range
        .exclusive_max
        .map(|v| format!("< {}", v))
        .or_else(|| range.max.map(|v| format!("<= {}", v)));

    match (lower, upper) {
        (Some(lower), Some(upper)) => format!("{} and {}", lower, upper),
        (lower, upper) => format!(
            "{}{}",
            lower.unwrap_or_default(),
            upper.unwrap_or_default()
        ),
    }
}

fn regex_message(regex: &str, examples: Option<&str>) -> String {
    let mut msg = format!(
        "The value is not a permissible for this field, it must meet the regular expression: \"{}\".",
        regex
    );
    if let Some(examples) = examples {
        msg.push_str(&format!(" Examples: {}", examples));
    }
    msg
}

fn foreign_key_message(data: &ErrorData) -> String {
    let key = data
        .value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let schema = data.foreign_schema.as_deref().unwrap_or_default();

    format!(
        "Record violates foreign key restriction defined for field(s) {}. Key {} is not present in schema {}.",
        data.field_name, key, schema
    )
}
