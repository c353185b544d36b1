//! Batch processing of many BLM files.
//!
//! Discovers `.blm` files under a directory and parses them concurrently
//! with bounded parallelism. Every file gets its own independent parse; one
//! failure never affects another file's outcome.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use walkdir::WalkDir;

use crate::config::{BatchConfig, BlmConfig};
use crate::constants::PROGRESS_TEMPLATE;
use crate::error::{BlmError, PipelineError, Result};
use crate::parser::{BlmDocument, BlmParser, FsLoader, TextLoader, validate_path};

/// Recursively find every file under `dir` whose name passes path validation, sorted
pub fn discover_blm_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| BlmError::read_failure(dir.display().to_string(), e.into()))?;
        if entry.file_type().is_file() && validate_path(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!("Discovered {} BLM files under {}", files.len(), dir.display());
    Ok(files)
}

/// Result of parsing one file in a batch
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: std::result::Result<BlmDocument, PipelineError>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Number of records parsed, zero for failures
    pub fn record_count(&self) -> usize {
        self.result
            .as_ref()
            .map(|doc| doc.records.len())
            .unwrap_or(0)
    }
}

/// Batch processing statistics
#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    pub files_total: usize,
    pub files_succeeded: usize,
    pub files_failed: usize,
    pub total_records: usize,
    pub processing_time: Duration,
}

impl BatchStats {
    fn from_outcomes(outcomes: &[FileOutcome], processing_time: Duration) -> Self {
        let files_succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            files_total: outcomes.len(),
            files_succeeded,
            files_failed: outcomes.len() - files_succeeded,
            total_records: outcomes.iter().map(FileOutcome::record_count).sum(),
            processing_time,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.files_failed == 0
    }
}

/// Parses a list of files concurrently
#[derive(Debug)]
pub struct BatchProcessor<L = FsLoader> {
    parser: BlmParser<L>,
    config: BatchConfig,
}

impl BatchProcessor<FsLoader> {
    /// Create a filesystem-backed processor
    pub fn new(config: &BlmConfig) -> Self {
        Self {
            parser: BlmParser::with_config(config.parser.clone()),
            config: config.batch.clone(),
        }
    }
}

impl<L: TextLoader> BatchProcessor<L> {
    pub fn with_parser(parser: BlmParser<L>, config: BatchConfig) -> Self {
        Self { parser, config }
    }

    /// Parse every path, returning one outcome per path in input order
    pub async fn process(&self, paths: &[PathBuf]) -> (Vec<FileOutcome>, BatchStats) {
        let start_time = Instant::now();
        let concurrent_limit = self.config.max_concurrent_files.clamp(1, paths.len().max(1));
        info!(
            "Parsing {} files with up to {} in flight",
            paths.len(),
            concurrent_limit
        );

        let pb = self.progress_bar(paths.len());

        let mut indexed: Vec<(usize, FileOutcome)> = stream::iter(paths.iter().enumerate())
            .map(|(index, path)| {
                let pb = pb.clone();
                async move {
                    if let Some(file_name) = path.file_name() {
                        pb.set_message(format!("Parsing: {}", file_name.to_string_lossy()));
                    }

                    let result = self.parser.parse_document(path).await;
                    pb.inc(1);

                    match &result {
                        Ok(doc) => debug!(
                            "Parsed {} records from {}",
                            doc.records.len(),
                            path.display()
                        ),
                        Err(e) => error!("Failed to parse {}: {}", path.display(), e),
                    }

                    (
                        index,
                        FileOutcome {
                            path: path.clone(),
                            result,
                        },
                    )
                }
            })
            .buffer_unordered(concurrent_limit)
            .collect()
            .await;

        pb.finish_and_clear();

        indexed.sort_by_key(|(index, _)| *index);
        let outcomes: Vec<FileOutcome> = indexed.into_iter().map(|(_, outcome)| outcome).collect();
        let stats = BatchStats::from_outcomes(&outcomes, start_time.elapsed());

        info!(
            "Batch complete: {} succeeded, {} failed, {} records in {:?}",
            stats.files_succeeded, stats.files_failed, stats.total_records, stats.processing_time
        );

        (outcomes, stats)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());

        let pb = ProgressBar::new(len as u64);
        pb.set_style(style);
        pb
    }
}
