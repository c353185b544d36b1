//! Format constants for BLM feed files
//!
//! Section markers, the well-known header keys and file naming rules used
//! throughout the parser.

// =============================================================================
// Section Markers
// =============================================================================

/// Opens the header section
pub const HEADER_MARKER: &str = "#HEADER#";

/// Opens the field definition section
pub const DEFINITION_MARKER: &str = "#DEFINITION#";

/// Opens the data section
pub const DATA_MARKER: &str = "#DATA#";

/// Closes the data section (and the file)
pub const END_MARKER: &str = "#END#";

/// Terminates the header and definition sections
pub const SECTION_TERMINATOR: char = '#';

// =============================================================================
// Header Keys
// =============================================================================

/// Header property declaring the field separator ("end of field")
pub const FIELD_SEPARATOR_KEY: &str = "EOF";

/// Header property declaring the record separator ("end of record")
pub const RECORD_SEPARATOR_KEY: &str = "EOR";

/// Header property carrying the feed format version
pub const VERSION_KEY: &str = "Version";

/// Header property carrying the number of properties the producer claims to have written
pub const PROPERTY_COUNT_KEY: &str = "Property Count";

/// Header property carrying the feed generation timestamp
pub const GENERATED_DATE_KEY: &str = "Generated Date";

/// Separator between a header property and its value
pub const HEADER_KEY_VALUE_SEPARATOR: char = ':';

/// Quote characters stripped once from either end of header properties and values
pub const HEADER_QUOTE_CHARS: &[char] = &['\'', '"'];

// =============================================================================
// File Naming
// =============================================================================

/// Required file extension, compared case-insensitively
pub const BLM_EXTENSION: &str = "blm";

/// Label used in errors for text that did not come from a file
pub const IN_MEMORY_SOURCE: &str = "<memory>";

// =============================================================================
// Batch Defaults
// =============================================================================

/// Upper bound on concurrently parsed files when not configured
pub const MAX_DEFAULT_CONCURRENT_FILES: usize = 16;

/// Progress bar template for batch parsing
pub const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";
