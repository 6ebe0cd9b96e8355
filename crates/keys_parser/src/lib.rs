//! Loaders for key datasets and field mappings.
//!
//! This crate reads the key fields of a dataset, one mapping per row, from
//! JSON, YAML or TOML into indexed records, and reads field-name mappings
//! from flat tables in the same formats.
//!
//! # Example
//!
//! ```rust
//! use keys_core::KeyValue;
//! use keys_parser::{InputFormat, parse_records};
//!
//! let yaml = r#"
//! - donor_id: DO-1
//!   specimens: [SP-1, SP-2]
//! - donor_id: DO-2
//!   specimens: []
//! "#;
//!
//! let rows = parse_records(yaml, InputFormat::Yaml).expect("Failed to parse rows");
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1].index, 1);
//! assert_eq!(rows[0].record.get("donor_id"), Some(&KeyValue::from("DO-1")));
//! ```

use keys_core::{FieldMapping, IndexedRecord, KeyValue, Record};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading input files.
#[derive(Debug, Error)]
pub enum ParserError {
    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Document does not have the expected shape
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A field holds something other than a scalar or a list of scalars
    #[error("Invalid value for field '{field}' in row {row}: expected a scalar or a list of scalars, found {found}")]
    InvalidValue {
        row: usize,
        field: String,
        found: &'static str,
    },
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse key rows from a string.
///
/// JSON and YAML documents are a sequence of mappings. TOML documents hold the
/// rows in a `records` array of tables:
///
/// ```toml
/// [[records]]
/// donor_id = "DO-1"
/// ```
///
/// Strings are kept verbatim, numbers and booleans are converted to strings,
/// lists of scalars become list values, and `null` leaves the field out.
/// Row indices follow document order.
pub fn parse_records(content: &str, format: InputFormat) -> Result<Vec<IndexedRecord>> {
    let document = parse_value(content, format)?;

    let rows = match (format, document) {
        (InputFormat::Toml, Value::Object(mut table)) => match table.remove("records") {
            Some(Value::Array(rows)) => rows,
            Some(_) => {
                return Err(ParserError::InvalidDocument(
                    "'records' must be an array of tables".to_string(),
                ));
            }
            None => Vec::new(),
        },
        (_, Value::Array(rows)) => rows,
        (_, other) => {
            return Err(ParserError::InvalidDocument(format!(
                "expected a sequence of rows, found {}",
                value_kind(&other)
            )));
        }
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            row_to_record(index, row).map(|record| IndexedRecord::new(index, record))
        })
        .collect()
}

/// Parse a field mapping from a string.
///
/// The document is a flat table from source field names to target field names.
///
/// # Example
///
/// ```rust
/// use keys_parser::{InputFormat, parse_mapping};
///
/// let mapping = parse_mapping(r#"{"id": "donor_id"}"#, InputFormat::Json).unwrap();
/// assert_eq!(mapping.get("id"), Some("donor_id"));
/// ```
pub fn parse_mapping(content: &str, format: InputFormat) -> Result<FieldMapping> {
    let mapping = match format {
        InputFormat::Json => serde_json::from_str(content)?,
        InputFormat::Yaml => serde_yaml_ng::from_str(content)?,
        InputFormat::Toml => {
            toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?
        }
    };
    Ok(mapping)
}

/// Detect the input format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.json` → `InputFormat::Json`
/// * `.yaml`, `.yml` → `InputFormat::Yaml`
/// * `.toml` → `InputFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<InputFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(InputFormat::Json),
        "yaml" | "yml" => Ok(InputFormat::Yaml),
        "toml" => Ok(InputFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse key rows from a file with automatic format detection.
///
/// ```no_run
/// use keys_parser::parse_records_file;
/// use std::path::Path;
///
/// let rows = parse_records_file(Path::new("data/specimens.json")).unwrap();
/// println!("Loaded {} rows", rows.len());
/// ```
pub fn parse_records_file(path: &Path) -> Result<Vec<IndexedRecord>> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_records(&content, format)
}

/// Parse a field mapping from a file with automatic format detection.
pub fn parse_mapping_file(path: &Path) -> Result<FieldMapping> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_mapping(&content, format)
}

fn parse_value(content: &str, format: InputFormat) -> Result<Value> {
    let value = match format {
        InputFormat::Json => serde_json::from_str(content)?,
        InputFormat::Yaml => serde_yaml_ng::from_str(content)?,
        InputFormat::Toml => {
            toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?
        }
    };
    Ok(value)
}

fn row_to_record(index: usize, row: Value) -> Result<Record> {
    let fields = match row {
        Value::Object(fields) => fields,
        other => {
            return Err(ParserError::InvalidDocument(format!(
                "row {} must be a mapping, found {}",
                index,
                value_kind(&other)
            )));
        }
    };

    let mut record = Record::new();
    for (name, value) in fields {
        if let Some(key_value) = to_key_value(index, &name, value)? {
            record.insert(name, key_value);
        }
    }
    Ok(record)
}

fn to_key_value(row: usize, field: &str, value: Value) -> Result<Option<KeyValue>> {
    let invalid = |found: &Value| ParserError::InvalidValue {
        row,
        field: field.to_string(),
        found: value_kind(found),
    };

    match value {
        Value::Null => Ok(None),
        Value::Array(items) => {
            let values = items
                .iter()
                .map(|item| scalar_to_string(item).ok_or_else(|| invalid(item)))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(KeyValue::Multiple(values)))
        }
        other => scalar_to_string(&other)
            .map(|s| Some(KeyValue::Single(s)))
            .ok_or_else(|| invalid(&other)),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
