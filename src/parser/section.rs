//! Section location within raw BLM text
//!
//! HEADER and DEFINITION run from their opening marker to the next `#`;
//! DATA runs from `#DATA#` to `#END#`. A literal `#` inside a header or
//! definition payload therefore ends that section early.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::{
    DATA_MARKER, DEFINITION_MARKER, END_MARKER, HEADER_MARKER, SECTION_TERMINATOR,
};
use crate::error::{BlmError, Result};
use crate::models::Section;

static HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| section_pattern(HEADER_MARKER, &SECTION_TERMINATOR.to_string()));

static DEFINITION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| section_pattern(DEFINITION_MARKER, &SECTION_TERMINATOR.to_string()));

static DATA_PATTERN: LazyLock<Regex> = LazyLock::new(|| section_pattern(DATA_MARKER, END_MARKER));

fn section_pattern(open: &str, close: &str) -> Regex {
    let pattern = format!("(?s){}(.*?){}", regex::escape(open), regex::escape(close));
    Regex::new(&pattern).expect("section pattern is built from escaped literals")
}

/// Return the payload of `section`, excluding its markers
pub fn extract_section(text: &str, section: Section) -> Result<&str> {
    let pattern = match section {
        Section::Header => &*HEADER_PATTERN,
        Section::Definition => &*DEFINITION_PATTERN,
        Section::Data => &*DATA_PATTERN,
    };

    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| BlmError::malformed_section(section))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "#HEADER#\nEOF:'|'\nEOR:';'\n#DEFINITION#\nname|price|;\n#DATA#\nA|1|;\nB|2|;\n#END#\n";

    #[test]
    fn test_extracts_each_section() {
        assert_eq!(
            extract_section(SAMPLE, Section::Header).unwrap(),
            "\nEOF:'|'\nEOR:';'\n"
        );
        assert_eq!(
            extract_section(SAMPLE, Section::Definition).unwrap(),
            "\nname|price|;\n"
        );
        assert_eq!(
            extract_section(SAMPLE, Section::Data).unwrap(),
            "\nA|1|;\nB|2|;\n"
        );
    }

    #[test]
    fn test_missing_marker_names_the_section() {
        let text = "#HEADER#\nEOF:|\n#DATA#\nA|;\n#END#";

        match extract_section(text, Section::Definition) {
            Err(BlmError::MalformedSection { section }) => assert_eq!(section, Section::Definition),
            other => panic!("Expected MalformedSection, got {:?}", other),
        }
    }

    #[test]
    fn test_data_requires_end_marker() {
        let text = "#DATA#\nA|1|;\n";
        assert!(matches!(
            extract_section(text, Section::Data),
            Err(BlmError::MalformedSection {
                section: Section::Data
            })
        ));
    }

    #[test]
    fn test_hash_in_header_payload_truncates_section() {
        let text = "#HEADER#\nComment:see #5\nEOF:|\n#DEFINITION#\n";
        assert_eq!(
            extract_section(text, Section::Header).unwrap(),
            "\nComment:see "
        );
    }

    #[test]
    fn test_data_payload_may_contain_hash() {
        let text = "#DATA#\nFlat #4|;\n#END#";
        assert_eq!(extract_section(text, Section::Data).unwrap(), "\nFlat #4|;\n");
    }
}
