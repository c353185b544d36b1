//! Error handling for BLM parsing operations.
//!
//! Each pipeline stage fails with a single [`BlmError`]; the coordinator wraps
//! it in a [`PipelineError`] that names the stage and the file being parsed.

use crate::models::{Section, Stage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlmError {
    #[error("Invalid BLM path '{path}': expected a non-empty name ending in .blm")]
    InvalidPath { path: String },

    #[error("Failed to read '{path}': {source}")]
    ReadFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {section} section: marker pair not found")]
    MalformedSection { section: Section },

    #[error("Malformed header line {line_number}: '{line}' has no ':' separator")]
    MalformedHeaderLine { line_number: usize, line: String },

    #[error("Header does not declare delimiter(s): {}", missing.join(", "))]
    MissingDelimiterDeclaration { missing: Vec<String> },

    #[error("Precondition failed: {reason}")]
    PreconditionFailed { reason: String },

    #[error(
        "Schema mismatch in record {record_index}: expected {expected} values, found {actual}"
    )]
    SchemaMismatch {
        expected: usize,
        actual: usize,
        record_index: usize,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl BlmError {
    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a read failure wrapping the loader's I/O error
    pub fn read_failure(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadFailure {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed section error
    pub fn malformed_section(section: Section) -> Self {
        Self::MalformedSection { section }
    }

    /// Create a malformed header line error (line numbers are 1-based within the section)
    pub fn malformed_header_line(line_number: usize, line: impl Into<String>) -> Self {
        Self::MalformedHeaderLine {
            line_number,
            line: line.into(),
        }
    }

    /// Create a precondition failure
    pub fn precondition_failed(reason: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// A failed parse: the stage that failed, the source being parsed and the cause
#[derive(Error, Debug)]
#[error("{stage} stage failed for '{path}': {source}")]
pub struct PipelineError {
    pub stage: Stage,
    pub path: String,
    #[source]
    pub source: BlmError,
}

impl PipelineError {
    pub fn new(stage: Stage, path: impl Into<String>, source: BlmError) -> Self {
        Self {
            stage,
            path: path.into(),
            source,
        }
    }

    /// The underlying error kind
    pub fn kind(&self) -> &BlmError {
        &self.source
    }

    /// Consume the composed error and return the underlying kind
    pub fn into_kind(self) -> BlmError {
        self.source
    }
}

pub type Result<T> = std::result::Result<T, BlmError>;
