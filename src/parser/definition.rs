//! DEFINITION section parsing
//!
//! The definition row lists every field name, separated by the field
//! separator and closed by the record separator.

use std::collections::HashSet;
use tracing::{debug, warn};

use super::section::extract_section;
use crate::error::{BlmError, Result};
use crate::models::{Delimiters, FieldDefinitions, Header, Section};

/// Parse the DEFINITION section using the header's `EOF`/`EOR` delimiters
pub fn extract_definitions(text: &str, header: &Header) -> Result<FieldDefinitions> {
    let delimiters = header.delimiters().map_err(|e| {
        BlmError::precondition_failed(format!("definition extraction needs delimiters: {}", e))
    })?;
    extract_definitions_with(text, &delimiters)
}

/// Parse the DEFINITION section with already resolved delimiters
pub fn extract_definitions_with(text: &str, delimiters: &Delimiters) -> Result<FieldDefinitions> {
    let payload = extract_section(text, Section::Definition)?;

    let mut names: Vec<String> = payload
        .split(delimiters.field.as_str())
        .map(|name| name.trim().to_string())
        .collect();

    // The row ends with EOR, either as its own element or glued to the last name
    if names.last().is_some_and(|last| *last == delimiters.record) {
        names.pop();
    } else if let Some(last) = names.last_mut() {
        if let Some(stripped) = last.strip_suffix(delimiters.record.as_str()) {
            *last = stripped.trim_end().to_string();
        }
    }

    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.as_str()) {
            warn!(
                "Duplicate field name in definitions: '{}' (the last occurrence supplies its value)",
                name
            );
        }
    }

    debug!("Parsed {} field definitions", names.len());
    Ok(FieldDefinitions::new(names))
}
