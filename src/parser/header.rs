//! HEADER section parsing
//!
//! The header is a list of `property : value` lines. Both sides are trimmed
//! and lose one surrounding quote character, so `EOF : '^'` declares `^`.

use tracing::{debug, warn};

use super::section::extract_section;
use crate::constants::{HEADER_KEY_VALUE_SEPARATOR, HEADER_QUOTE_CHARS};
use crate::error::{BlmError, Result};
use crate::models::{Header, Section};

/// Parse the HEADER section, failing on lines without a ':'
pub fn extract_header(text: &str) -> Result<Header> {
    extract_header_with(text, true)
}

/// Parse the HEADER section
///
/// With `strict` unset, lines that carry no ':' are skipped with a warning.
pub fn extract_header_with(text: &str, strict: bool) -> Result<Header> {
    let payload = extract_section(text, Section::Header)?;
    let mut header = Header::new();

    for (index, line) in payload.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let Some((property, value)) = line.split_once(HEADER_KEY_VALUE_SEPARATOR) else {
            if strict {
                return Err(BlmError::malformed_header_line(index + 1, line.trim()));
            }
            warn!("Skipping header line {} without ':': {}", index + 1, line.trim());
            continue;
        };

        let property = clean_token(property);
        let value = clean_token(value);

        if let Some(previous) = header.insert(property, value) {
            debug!(
                "Header property '{}' redeclared (was '{}', now '{}')",
                property, previous, value
            );
        }
    }

    debug!("Parsed header with {} properties", header.len());
    Ok(header)
}

/// Trim whitespace, then one leading and one trailing quote character
fn clean_token(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix(HEADER_QUOTE_CHARS)
        .unwrap_or(trimmed);
    trimmed.strip_suffix(HEADER_QUOTE_CHARS).unwrap_or(trimmed)
}
