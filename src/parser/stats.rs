//! Parsing statistics and document structures for BLM processing

use serde::Serialize;

use crate::models::{FieldDefinitions, Header, Record};

/// A fully parsed BLM file
#[derive(Debug, Clone, Serialize)]
pub struct BlmDocument {
    pub header: Header,

    pub definitions: FieldDefinitions,

    /// Records in file order
    pub records: Vec<Record>,

    pub stats: ParseStats,
}

impl BlmDocument {
    /// Give up the document, keeping only its records
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// Counters gathered while parsing one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Bytes of decoded text processed
    pub bytes_processed: usize,

    /// Number of field definitions
    pub field_count: usize,

    /// Pieces produced by splitting DATA on the record separator
    pub record_candidates: usize,

    /// Candidates that were blank after trimming
    pub blank_candidates_skipped: usize,

    /// Records built from non-blank candidates
    pub records_parsed: usize,

    /// `Property Count` declared by the header, when numeric
    pub declared_property_count: Option<usize>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the header's declared property count agrees with the records parsed
    ///
    /// `None` when the header declares no usable count.
    pub fn property_count_matches(&self) -> Option<bool> {
        self.declared_property_count
            .map(|declared| declared == self.records_parsed)
    }
}
