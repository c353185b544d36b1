//! Core BLM parser implementation
//!
//! Runs the parsing stages in order (validate, load, header, definition,
//! data) and stops at the first failure. Each call owns its text and results;
//! nothing is shared between calls, so one parser can serve many concurrent
//! parses.

use std::path::Path;
use tracing::{debug, info, warn};

use super::data::extract_data_with;
use super::definition::extract_definitions_with;
use super::header::extract_header_with;
use super::loader::{FsLoader, TextLoader};
use super::stats::{BlmDocument, ParseStats};
use super::validator::validate_path;
use crate::config::ParserConfig;
use crate::constants::IN_MEMORY_SOURCE;
use crate::error::{BlmError, PipelineError};
use crate::models::{ParseResult, Stage};

/// BLM parser, generic over where file text comes from
#[derive(Debug, Clone)]
pub struct BlmParser<L = FsLoader> {
    loader: L,
    config: ParserConfig,
}

impl BlmParser<FsLoader> {
    /// Create a filesystem-backed parser with default settings
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a filesystem-backed parser
    pub fn with_config(config: ParserConfig) -> Self {
        let loader = FsLoader::new().lossy(config.lossy_utf8);
        Self { loader, config }
    }
}

impl Default for BlmParser<FsLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: TextLoader> BlmParser<L> {
    /// Create a parser that reads through a custom loader
    pub fn with_loader(loader: L, config: ParserConfig) -> Self {
        Self { loader, config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a BLM file and return its records in file order
    pub async fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParseResult, PipelineError> {
        self.parse_document(path)
            .await
            .map(BlmDocument::into_records)
    }

    /// Parse a BLM file and return header, definitions, records and statistics
    pub async fn parse_document(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<BlmDocument, PipelineError> {
        let path = path.as_ref();
        let label = path.display().to_string();
        info!("Parsing BLM file: {}", label);

        if !validate_path(path) {
            return Err(PipelineError::new(
                Stage::Validate,
                &label,
                BlmError::invalid_path(&label),
            ));
        }

        let text = self
            .loader
            .load(path)
            .await
            .map_err(|e| PipelineError::new(Stage::Load, &label, BlmError::read_failure(&label, e)))?;

        self.parse_text(&text, &label)
    }

    /// Parse BLM text that is already in memory
    pub fn parse_str(&self, text: &str) -> Result<BlmDocument, PipelineError> {
        self.parse_text(text, IN_MEMORY_SOURCE)
    }

    fn parse_text(&self, text: &str, source: &str) -> Result<BlmDocument, PipelineError> {
        let header = extract_header_with(text, self.config.strict_header_lines)
            .map_err(stage_error(Stage::Header, source))?;

        let delimiters = header
            .delimiters_with(
                &self.config.field_separator_key,
                &self.config.record_separator_key,
            )
            .map_err(stage_error(Stage::Header, source))?;
        debug!(
            "Delimiters for {}: field={:?} record={:?}",
            source, delimiters.field, delimiters.record
        );

        let definitions = extract_definitions_with(text, &delimiters)
            .map_err(stage_error(Stage::Definition, source))?;

        let mut stats = ParseStats {
            bytes_processed: text.len(),
            field_count: definitions.len(),
            declared_property_count: header.property_count(),
            ..ParseStats::new()
        };

        let records = extract_data_with(text, &delimiters, &definitions, &mut stats)
            .map_err(stage_error(Stage::Data, source))?;

        if self.config.check_property_count && stats.property_count_matches() == Some(false) {
            warn!(
                "{} declares {} properties but contains {} records",
                source,
                stats.declared_property_count.unwrap_or_default(),
                stats.records_parsed
            );
        }

        info!(
            "Parsed {} records with {} fields from {}",
            records.len(),
            definitions.len(),
            source
        );

        Ok(BlmDocument {
            header,
            definitions,
            records,
            stats,
        })
    }
}

fn stage_error(stage: Stage, source: &str) -> impl FnOnce(BlmError) -> PipelineError + '_ {
    move |e| PipelineError::new(stage, source, e)
}

/// Parse a BLM file from disk with default settings
pub async fn parse_file(path: impl AsRef<Path>) -> Result<ParseResult, PipelineError> {
    BlmParser::new().parse_file(path).await
}

/// Parse in-memory BLM text with default settings
pub fn parse_str(text: &str) -> Result<BlmDocument, PipelineError> {
    BlmParser::new().parse_str(text)
}
