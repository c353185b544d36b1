//! BLM feed parser
//!
//! A BLM file carries three sections in order:
//!
//! ```text
//! #HEADER#
//! Version : 3
//! EOF : '^'
//! EOR : '~'
//! #DEFINITION#
//! AGENT_REF^ADDRESS_1^PRICE^~
//! #DATA#
//! 1234_ABC^1 High Street^250000^~
//! #END#
//! ```
//!
//! The header declares the field separator (`EOF`) and record separator
//! (`EOR`); the definition row names every field; each data row is zipped
//! against those names.
//!
//! ## Architecture
//!
//! - [`validator`] - path checks before anything is read
//! - [`loader`] - the [`TextLoader`] seam and its filesystem/in-memory implementations
//! - [`section`] - marker scanning shared by the extractors
//! - [`header`] - header properties and delimiters
//! - [`definition`] - the ordered field list
//! - [`data`] - record assembly and arity checks
//! - [`pipeline`] - stage orchestration
//! - [`stats`] - parse statistics and the document type
//!
//! ## Usage
//!
//! ```rust
//! use blm_parser::parser::BlmParser;
//!
//! let text = "#HEADER#\nEOF:'|'\nEOR:';'\n#DEFINITION#\nname|price|;\n#DATA#\nAlice|100000|;\n#END#\n";
//! let document = BlmParser::new().parse_str(text).unwrap();
//!
//! assert_eq!(document.records.len(), 1);
//! assert_eq!(document.records[0].get("price"), Some("100000"));
//! ```

pub mod data;
pub mod definition;
pub mod header;
pub mod loader;
pub mod pipeline;
pub mod section;
pub mod stats;
pub mod validator;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use data::extract_data;
pub use definition::extract_definitions;
pub use header::extract_header;
pub use loader::{FsLoader, MemoryLoader, TextLoader};
pub use pipeline::{BlmParser, parse_file, parse_str};
pub use section::extract_section;
pub use stats::{BlmDocument, ParseStats};
pub use validator::{validate, validate_path};
