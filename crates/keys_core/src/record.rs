//! Key records and field mappings.
//!
//! A [`Record`] holds the key fields of one dataset row. Field order is kept
//! for display and for resolving rename collisions, but it never takes part in
//! equality: two records are equal when they have the same field names bound to
//! the same values.

use crate::{CoreError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The value bound to one key field.
///
/// Element order of `Multiple` is significant for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    /// A single scalar value
    Single(String),
    /// An ordered list of scalar values
    Multiple(Vec<String>),
}

impl KeyValue {
    /// Returns the value as a string slice if it is a single value.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            KeyValue::Single(s) => Some(s),
            KeyValue::Multiple(_) => None,
        }
    }

    /// Returns the values as a slice if this is a list.
    pub fn as_multiple(&self) -> Option<&[String]> {
        match self {
            KeyValue::Single(_) => None,
            KeyValue::Multiple(values) => Some(values),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Single(s) => write!(f, "{}", s),
            KeyValue::Multiple(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

impl From<String> for KeyValue {
    fn from(s: String) -> Self {
        KeyValue::Single(s)
    }
}

impl From<&str> for KeyValue {
    fn from(s: &str) -> Self {
        KeyValue::Single(s.to_string())
    }
}

impl From<Vec<String>> for KeyValue {
    fn from(values: Vec<String>) -> Self {
        KeyValue::Multiple(values)
    }
}

impl From<Vec<&str>> for KeyValue {
    fn from(values: Vec<&str>) -> Self {
        KeyValue::Multiple(values.into_iter().map(String::from).collect())
    }
}

/// The key fields of a single row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, KeyValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the previous value if the field already existed.
    ///
    /// Replacing a field keeps its original position.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<KeyValue>,
    ) -> Option<KeyValue> {
        self.fields.insert(name.into(), value.into())
    }

    /// Gets the value of a field.
    pub fn get(&self, name: &str) -> Option<&KeyValue> {
        self.fields.get(name)
    }

    /// Returns true if the record has a field with this name.
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterates over field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Builds a record containing only the named fields, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if any of the fields is missing.
    pub fn project<S: AsRef<str>>(&self, fields: &[S]) -> Result<Record> {
        let mut projected = Record::new();
        for field in fields {
            let name = field.as_ref();
            let value = self
                .get(name)
                .ok_or_else(|| CoreError::not_found(format!("field '{}'", name)))?;
            projected.insert(name, value.clone());
        }
        Ok(projected)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<KeyValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// A record paired with the position of its row in the source dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedRecord {
    /// Row index in the source dataset
    pub index: usize,
    /// Key fields of the row
    pub record: Record,
}

impl IndexedRecord {
    /// Creates a new indexed record.
    pub fn new(index: usize, record: Record) -> Self {
        Self { index, record }
    }
}

/// Tags each record with its enumeration position.
pub fn index_records(records: impl IntoIterator<Item = Record>) -> Vec<IndexedRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| IndexedRecord::new(index, record))
        .collect()
}

/// Renaming table from field names on one side to field names on the other.
///
/// Names without an entry are assumed to be identical on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    names: HashMap<String, String>,
}

impl FieldMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mapping from `(from, to)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Adds a rename, returning the previous target for `from` if there was one.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) -> Option<String> {
        self.names.insert(from.into(), to.into())
    }

    /// Gets the target name for `from`, if mapped.
    pub fn get(&self, from: &str) -> Option<&str> {
        self.names.get(from).map(String::as_str)
    }

    /// Gets the target name for `name`, or `name` itself when unmapped.
    pub fn map_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name).unwrap_or(name)
    }

    /// Returns the number of renames.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing is renamed.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over `(from, to)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(from, to)| (from.as_str(), to.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }
}
