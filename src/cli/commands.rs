//! Command implementations for the BLM parser CLI
//!
//! This module contains command execution, output rendering and logging
//! setup for the command-line interface.

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cli::args::{Args, Commands, HeaderArgs, OutputFormat, ParseArgs, ValidateArgs};
use crate::config::BlmConfig;
use crate::parser::header::extract_header_with;
use crate::parser::{FsLoader, TextLoader, validate_path};
use crate::models::{Delimiters, Header};
use crate::processor::{BatchProcessor, BatchStats, FileOutcome, discover_blm_files};
use crate::BlmError;

/// How many inputs a command handled and how many of them failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl CommandReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Main command runner
pub async fn run(args: Args) -> Result<CommandReport> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    match &args.command {
        Some(Commands::Parse(parse_args)) => run_parse(parse_args, config).await,
        Some(Commands::Validate(validate_args)) => run_validate(validate_args, config).await,
        Some(Commands::Header(header_args)) => run_header(header_args, config).await,
        None => Ok(CommandReport::default()),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("blm_parser={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(io::stderr),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration from the optional file, falling back to defaults
fn load_configuration(args: &Args) -> Result<BlmConfig> {
    match &args.config_path {
        Some(path) => BlmConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(BlmConfig::default()),
    }
}

/// Expand directories into the BLM files they contain; plain paths pass through
fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = discover_blm_files(path)
                .with_context(|| format!("Failed to scan directory {}", path.display()))?;
            if found.is_empty() {
                eprintln!(
                    "{} no .blm files found under {}",
                    "warning:".yellow().bold(),
                    path.display()
                );
            }
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    Ok(files)
}

async fn run_parse(args: &ParseArgs, config: BlmConfig) -> Result<CommandReport> {
    args.validate()?;
    let config = args.apply_to(config);
    config.validate()?;

    let files = expand_inputs(&args.paths)?;
    info!("Parsing {} files", files.len());

    let processor = BatchProcessor::new(&config);
    let (outcomes, stats) = processor.process(&files).await;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match args.format {
        OutputFormat::Json => write_json(&mut writer, &outcomes, single_file(args))?,
        OutputFormat::Ndjson => write_ndjson(&mut writer, &outcomes)?,
        OutputFormat::Summary => write_summary(&mut writer, &outcomes, &stats)?,
    }
    writer.flush().context("Failed to flush output")?;

    if args.format != OutputFormat::Summary {
        report_failures(&outcomes);
    }

    Ok(CommandReport {
        succeeded: stats.files_succeeded,
        failed: stats.files_failed,
    })
}

/// A single file argument prints a bare record array
fn single_file(args: &ParseArgs) -> bool {
    args.paths.len() == 1 && !args.paths[0].is_dir()
}

fn write_json(writer: &mut dyn Write, outcomes: &[FileOutcome], single: bool) -> Result<()> {
    if single {
        if let Some(Ok(document)) = outcomes.first().map(|o| &o.result) {
            serde_json::to_writer_pretty(&mut *writer, &document.records)?;
            writeln!(writer)?;
        }
        return Ok(());
    }

    let mut by_file = serde_json::Map::new();
    for outcome in outcomes {
        if let Ok(document) = &outcome.result {
            by_file.insert(
                outcome.path.display().to_string(),
                serde_json::to_value(&document.records)?,
            );
        }
    }
    serde_json::to_writer_pretty(&mut *writer, &by_file)?;
    writeln!(writer)?;
    Ok(())
}

fn write_ndjson(writer: &mut dyn Write, outcomes: &[FileOutcome]) -> Result<()> {
    for outcome in outcomes {
        if let Ok(document) = &outcome.result {
            for record in &document.records {
                serde_json::to_writer(&mut *writer, record)?;
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}

fn write_summary(writer: &mut dyn Write, outcomes: &[FileOutcome], stats: &BatchStats) -> Result<()> {
    for outcome in outcomes {
        match &outcome.result {
            Ok(document) => {
                let mut line = format!(
                    "{} {}: {} records, {} fields",
                    "✓".bright_green(),
                    outcome.path.display(),
                    document.records.len().to_string().bright_white().bold(),
                    document.definitions.len()
                );
                if document.stats.property_count_matches() == Some(false) {
                    line.push_str(&format!(
                        " {}",
                        format!(
                            "(header declares {})",
                            document.stats.declared_property_count.unwrap_or_default()
                        )
                        .yellow()
                    ));
                }
                writeln!(writer, "{}", line)?;
            }
            Err(e) => {
                writeln!(
                    writer,
                    "{} {}: {}",
                    "✗".bright_red(),
                    outcome.path.display(),
                    e.to_string().red()
                )?;
            }
        }
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "{} {} files, {} succeeded, {} failed, {} records in {:.2?}",
        "Total:".bright_cyan(),
        stats.files_total,
        stats.files_succeeded.to_string().bright_green(),
        stats.files_failed.to_string().bright_red(),
        stats.total_records,
        stats.processing_time
    )?;
    Ok(())
}

fn report_failures(outcomes: &[FileOutcome]) {
    for outcome in outcomes {
        if let Err(e) = &outcome.result {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
        }
    }
}

async fn run_validate(args: &ValidateArgs, config: BlmConfig) -> Result<CommandReport> {
    config.validate()?;
    let files = expand_inputs(&args.paths)?;
    let mut report = CommandReport::default();

    if !args.deep {
        for path in &files {
            if validate_path(path) {
                report.succeeded += 1;
                println!("{} {}", "valid".bright_green(), path.display());
            } else {
                report.failed += 1;
                println!("{} {}", "invalid".bright_red(), path.display());
            }
        }
        return Ok(report);
    }

    let (outcomes, _stats) = BatchProcessor::new(&config).process(&files).await;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(document) => {
                report.succeeded += 1;
                println!(
                    "{} {} ({} records)",
                    "valid".bright_green(),
                    outcome.path.display(),
                    document.records.len()
                );
            }
            Err(e) => {
                report.failed += 1;
                println!(
                    "{} {} [{} stage] {}",
                    "invalid".bright_red(),
                    outcome.path.display(),
                    e.stage,
                    e.kind()
                );
            }
        }
    }

    Ok(report)
}

async fn run_header(args: &HeaderArgs, config: BlmConfig) -> Result<CommandReport> {
    config.validate()?;
    let path: &Path = &args.path;

    if !validate_path(path) {
        return Err(BlmError::invalid_path(path.display().to_string()).into());
    }

    let text = FsLoader::new()
        .lossy(config.parser.lossy_utf8)
        .load(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let header = extract_header_with(&text, config.parser.strict_header_lines)
        .with_context(|| format!("Failed to parse header of {}", path.display()))?;
    let delimiters = header.delimiters_with(
        &config.parser.field_separator_key,
        &config.parser.record_separator_key,
    );

    let mut writer = BufWriter::new(io::stdout().lock());
    write_header(&mut writer, path, &header, delimiters.as_ref().ok(), args.json)?;
    writer.flush().context("Failed to flush output")?;

    let delimiters =
        delimiters.with_context(|| format!("{} cannot be parsed further", path.display()))?;
    debug!(
        "Delimiters: field={:?} record={:?}",
        delimiters.field, delimiters.record
    );

    Ok(CommandReport {
        succeeded: 1,
        failed: 0,
    })
}

/// JSON shape of the header command
#[derive(Serialize)]
struct HeaderReport<'a> {
    header: &'a Header,
    delimiters: Option<&'a Delimiters>,
}

fn write_header(
    writer: &mut dyn Write,
    path: &Path,
    header: &Header,
    delimiters: Option<&Delimiters>,
    json: bool,
) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *writer, &HeaderReport { header, delimiters })?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "{}", path.display().to_string().bright_cyan().bold())?;
    for (property, value) in header.iter() {
        writeln!(writer, "  {}: {}", property.bright_white(), value)?;
    }

    match delimiters {
        Some(delimiters) => writeln!(
            writer,
            "{} field {:?}, record {:?}",
            "Delimiters:".bright_green(),
            delimiters.field,
            delimiters.record
        )?,
        None => writeln!(writer, "{}", "Delimiters: not declared".yellow())?,
    }
    Ok(())
}
