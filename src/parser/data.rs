//! DATA section parsing
//!
//! Records are separated by the record separator and every value, including
//! the last one in a record, is followed by the field separator. Each record
//! must carry exactly one value per field definition; the first record that
//! does not aborts the whole extraction.

use tracing::debug;

use super::section::extract_section;
use super::stats::ParseStats;
use crate::error::{BlmError, Result};
use crate::models::{Delimiters, FieldDefinitions, Header, Record, Section};

/// Parse the DATA section into records using the header's `EOF`/`EOR` delimiters
pub fn extract_data(
    text: &str,
    header: &Header,
    definitions: &FieldDefinitions,
) -> Result<Vec<Record>> {
    let delimiters = header.delimiters().map_err(|e| {
        BlmError::precondition_failed(format!("data extraction needs delimiters: {}", e))
    })?;
    extract_data_with(text, &delimiters, definitions, &mut ParseStats::new())
}

/// Parse the DATA section with resolved delimiters, counting candidates into `stats`
pub fn extract_data_with(
    text: &str,
    delimiters: &Delimiters,
    definitions: &FieldDefinitions,
    stats: &mut ParseStats,
) -> Result<Vec<Record>> {
    let payload = extract_section(text, Section::Data)?;
    let mut records = Vec::new();

    for candidate in payload.split(delimiters.record.as_str()) {
        stats.record_candidates += 1;

        let candidate = candidate.trim();
        if candidate.is_empty() {
            stats.blank_candidates_skipped += 1;
            continue;
        }

        let mut values: Vec<String> = candidate
            .split(delimiters.field.as_str())
            .map(str::to_string)
            .collect();
        // Drop what follows the terminating field separator
        values.pop();

        let record = Record::try_new(definitions.clone(), values, records.len())?;
        records.push(record);
    }

    stats.records_parsed = records.len();
    debug!(
        "Parsed {} records from {} candidates ({} blank)",
        records.len(),
        stats.record_candidates,
        stats.blank_candidates_skipped
    );

    Ok(records)
}
