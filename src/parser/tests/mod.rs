//! Test utilities and fixtures for BLM parser testing
//!
//! Shared sample feeds and helpers used across the parser test modules.

use std::io::Write;
use tempfile::{Builder, NamedTempFile};

// Test modules
mod header_tests;
mod pipeline_tests;

/// A realistic feed using the conventional `^`/`~` delimiters
pub fn create_sample_blm() -> String {
    r#"#HEADER#
Version : 3
EOF : '^'
EOR : '~'
Property Count : 2
Generated Date : 16-Jan-2013 12:00

#DEFINITION#
AGENT_REF^ADDRESS_1^POSTCODE1^POSTCODE2^SUMMARY^PRICE^STATUS_ID^~

#DATA#
1234_ABC01^12 High Street^SW1^1AA^Two bedroom flat^250000^0^~
1234_ABC02^3 Mill Lane^BS8^2QT^Detached house: garden, garage^475000^1^~
#END#
"#
    .to_string()
}

/// The smallest feed exercising every section
pub fn create_minimal_blm() -> String {
    "#HEADER#\nEOF:|\nEOR:;\n#DEFINITION#\nname|address|price;\n#DATA#\nAlice|123 Rd|100000|;\n#END#\n"
        .to_string()
}

/// Assemble a feed from raw section payloads
pub fn build_blm(header: &str, definition: &str, data: &str) -> String {
    format!("#HEADER#\n{header}\n#DEFINITION#\n{definition}\n#DATA#\n{data}\n#END#\n")
}

/// Helper to create a temporary `.blm` file with given content
pub fn create_temp_blm(content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".blm").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}
