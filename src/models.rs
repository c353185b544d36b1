//! Core data structures for BLM parsing.
//!
//! Defines the file sections, pipeline stages, the parsed header, the
//! positional field schema and the records produced from the data section.

use crate::constants::{
    DATA_MARKER, DEFINITION_MARKER, FIELD_SEPARATOR_KEY, GENERATED_DATE_KEY, HEADER_MARKER,
    PROPERTY_COUNT_KEY, RECORD_SEPARATOR_KEY, VERSION_KEY,
};
use crate::error::{BlmError, Result};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::fmt;
use std::sync::Arc;

/// The three named sections of a BLM file, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Definition,
    Data,
}

impl Section {
    /// Marker that opens this section
    pub fn marker(&self) -> &'static str {
        match self {
            Section::Header => HEADER_MARKER,
            Section::Definition => DEFINITION_MARKER,
            Section::Data => DATA_MARKER,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Section::Header => "HEADER",
            Section::Definition => "DEFINITION",
            Section::Data => "DATA",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pipeline stages, in the order the coordinator runs them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Validate,
    Load,
    Header,
    Definition,
    Data,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::Load => "load",
            Stage::Header => "header",
            Stage::Definition => "definition",
            Stage::Data => "data",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field and record separators declared by a header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delimiters {
    /// Separates values within a record (the `EOF` declaration)
    pub field: String,
    /// Separates records (the `EOR` declaration)
    pub record: String,
}

/// Properties declared in the HEADER section, in declaration order
///
/// Redeclaring a property keeps its original position and takes the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    entries: Vec<(String, String)>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, returning the previous value if it was already declared
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let property = property.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(key, _)| *key == property) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((property, value));
                None
            }
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(property, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Delimiters declared under the conventional `EOF`/`EOR` keys
    pub fn delimiters(&self) -> Result<Delimiters> {
        self.delimiters_with(FIELD_SEPARATOR_KEY, RECORD_SEPARATOR_KEY)
    }

    /// Delimiters declared under custom keys
    ///
    /// A key declared with an empty value is treated as undeclared.
    pub fn delimiters_with(&self, field_key: &str, record_key: &str) -> Result<Delimiters> {
        let field = self.get(field_key).filter(|v| !v.is_empty());
        let record = self.get(record_key).filter(|v| !v.is_empty());

        match (field, record) {
            (Some(field), Some(record)) => Ok(Delimiters {
                field: field.to_string(),
                record: record.to_string(),
            }),
            (field, record) => {
                let mut missing = Vec::new();
                if field.is_none() {
                    missing.push(field_key.to_string());
                }
                if record.is_none() {
                    missing.push(record_key.to_string());
                }
                Err(BlmError::MissingDelimiterDeclaration { missing })
            }
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.get(VERSION_KEY)
    }

    pub fn generated_date(&self) -> Option<&str> {
        self.get(GENERATED_DATE_KEY)
    }

    /// Declared property count, when present and numeric
    pub fn property_count(&self) -> Option<usize> {
        self.get(PROPERTY_COUNT_KEY)
            .and_then(|v| v.trim().parse::<usize>().ok())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Header {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut header = Header::new();
        for (key, value) in iter {
            header.insert(key, value);
        }
        header
    }
}

impl Serialize for Header {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Ordered field names from the DEFINITION section
///
/// The order is the positional schema every data record is matched against.
/// Cloning is cheap; all records of a document share one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinitions {
    names: Arc<[String]>,
}

impl FieldDefinitions {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names: names.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Position of the field that supplies this name's value
    ///
    /// A repeated name resolves to its last declaration.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().rposition(|n| n == name)
    }

    /// Whether no later field reuses the name at `index`
    fn is_effective(&self, index: usize) -> bool {
        self.names[index + 1..]
            .iter()
            .all(|later| *later != self.names[index])
    }
}

impl Serialize for FieldDefinitions {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names.iter())
    }
}

/// One data row: field name → raw value, in definition order
///
/// When the definitions repeat a name, the later field's value wins for
/// lookup, iteration and serialization alike; [`Record::values`] still
/// exposes every positional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: FieldDefinitions,
    values: Vec<String>,
}

impl Record {
    /// Zip values against the field schema
    ///
    /// Fails with [`BlmError::SchemaMismatch`] unless there is exactly one value per field.
    pub fn try_new(fields: FieldDefinitions, values: Vec<String>, record_index: usize) -> Result<Self> {
        if values.len() != fields.len() {
            return Err(BlmError::SchemaMismatch {
                expected: fields.len(),
                actual: values.len(),
                record_index,
            });
        }

        Ok(Self { fields, values })
    }

    /// Raw value for this field name
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .position(field)
            .map(|index| self.values[index].as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fields(&self) -> &FieldDefinitions {
        &self.fields
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Iterate over `(field, value)` pairs in definition order, one per distinct name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .zip(self.values.iter().map(String::as_str))
            .enumerate()
            .filter(|(index, _)| self.fields.is_effective(*index))
            .map(|(_, pair)| pair)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.iter().count()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Records of one file, in file order
pub type ParseResult = Vec<Record>;
