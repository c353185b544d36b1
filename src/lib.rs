//! BLM Parser Library
//!
//! A Rust library for reading BLM real-estate data-feed files into
//! structured property records.
//!
//! This library provides tools for:
//! - Validating feed paths before any I/O
//! - Locating the HEADER, DEFINITION and DATA sections of a feed
//! - Deriving the field and record separators from the header
//! - Zipping every data row against the field definitions, with strict arity checks
//! - Parsing many feeds concurrently with per-file outcomes
//!
//! ```rust
//! # async fn example() -> Result<(), blm_parser::PipelineError> {
//! let records = blm_parser::parse_file("feeds/agent_1234.blm").await?;
//! for record in &records {
//!     println!("{:?}", record.get("AGENT_REF"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{BatchConfig, BlmConfig, ParserConfig};
pub use error::{BlmError, PipelineError, Result};
pub use models::{Delimiters, FieldDefinitions, Header, ParseResult, Record, Section, Stage};
pub use parser::{BlmDocument, BlmParser, ParseStats, parse_file, parse_str, validate};
pub use processor::{BatchProcessor, BatchStats, FileOutcome, discover_blm_files};
