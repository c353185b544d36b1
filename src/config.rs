//! Configuration management and validation.
//!
//! Provides configuration for single-file parsing (header keys, strictness,
//! decoding) and for batch runs over many files.

use crate::constants::{FIELD_SEPARATOR_KEY, MAX_DEFAULT_CONCURRENT_FILES, RECORD_SEPARATOR_KEY};
use crate::error::{BlmError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Settings for parsing a single BLM file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Header property naming the field separator
    pub field_separator_key: String,

    /// Header property naming the record separator
    pub record_separator_key: String,

    /// Fail on header lines without a ':' (skip them with a warning when false)
    pub strict_header_lines: bool,

    /// Replace invalid UTF-8 sequences instead of failing the read
    pub lossy_utf8: bool,

    /// Compare the header's declared property count with the parsed record count
    pub check_property_count: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            field_separator_key: FIELD_SEPARATOR_KEY.to_string(),
            record_separator_key: RECORD_SEPARATOR_KEY.to_string(),
            strict_header_lines: true,
            lossy_utf8: false,
            check_property_count: true,
        }
    }
}

impl ParserConfig {
    /// Skip header lines without a ':' instead of failing
    pub fn with_lenient_header(mut self) -> Self {
        self.strict_header_lines = false;
        self
    }

    /// Decode file contents lossily
    pub fn with_lossy_utf8(mut self) -> Self {
        self.lossy_utf8 = true;
        self
    }

    /// Use custom header keys for the delimiters
    pub fn with_delimiter_keys(
        mut self,
        field_separator_key: impl Into<String>,
        record_separator_key: impl Into<String>,
    ) -> Self {
        self.field_separator_key = field_separator_key.into();
        self.record_separator_key = record_separator_key.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.field_separator_key.trim().is_empty() || self.record_separator_key.trim().is_empty()
        {
            return Err(BlmError::configuration(
                "Delimiter header keys must not be empty",
            ));
        }

        if self.field_separator_key == self.record_separator_key {
            return Err(BlmError::configuration(format!(
                "Field and record separator keys must differ (both are '{}')",
                self.field_separator_key
            )));
        }

        Ok(())
    }
}

/// Settings for parsing many files in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum files parsed concurrently
    pub max_concurrent_files: usize,

    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_files: num_cpus::get().clamp(1, MAX_DEFAULT_CONCURRENT_FILES),
            show_progress: false,
        }
    }
}

/// Global configuration for BLM processing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlmConfig {
    pub parser: ParserConfig,
    pub batch: BatchConfig,
}

impl BlmConfig {
    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BlmError::read_failure(path.display().to_string(), e))?;

        let config: BlmConfig = serde_json::from_str(&content).map_err(|e| {
            BlmError::configuration(format!(
                "Invalid configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.batch.max_concurrent_files = max_files;
        self
    }

    /// Enable the batch progress bar
    pub fn with_progress(mut self) -> Self {
        self.batch.show_progress = true;
        self
    }

    /// Replace the parser settings
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;

        if self.batch.max_concurrent_files == 0 {
            return Err(BlmError::configuration(
                "Maximum concurrent files must be greater than 0",
            ));
        }

        Ok(())
    }
}
