//! Tests for BLM header parsing functionality

use super::super::header::{extract_header, extract_header_with};
use super::create_sample_blm;
use crate::error::BlmError;
use crate::models::Section;

#[test]
fn test_header_parsing_complete() {
    let header = extract_header(&create_sample_blm()).unwrap();

    assert_eq!(header.version(), Some("3"));
    assert_eq!(header.get("EOF"), Some("^"));
    assert_eq!(header.get("EOR"), Some("~"));
    assert_eq!(header.property_count(), Some(2));
    assert_eq!(header.generated_date(), Some("16-Jan-2013 12:00"));
    assert_eq!(header.len(), 5);
}

#[test]
fn test_header_quoted_properties() {
    let text = "#HEADER#\n\"EOF\" : \"|\"\n'EOR':';'\n#DEFINITION#";
    let header = extract_header(text).unwrap();

    let delimiters = header.delimiters().unwrap();
    assert_eq!(delimiters.field, "|");
    assert_eq!(delimiters.record, ";");
}

#[test]
fn test_header_blank_lines_skipped() {
    let text = "#HEADER#\n\n   \nEOF:|\n\t\nEOR:;\n\n#DEFINITION#";
    let header = extract_header(text).unwrap();

    assert_eq!(header.len(), 2);
}

#[test]
fn test_header_line_without_colon_is_error() {
    let text = "#HEADER#\nEOF:|\nthis line has no separator\nEOR:;\n#DEFINITION#";

    match extract_header(text) {
        Err(BlmError::MalformedHeaderLine { line_number, line }) => {
            assert_eq!(line_number, 3);
            assert_eq!(line, "this line has no separator");
        }
        other => panic!("Expected MalformedHeaderLine, got {:?}", other),
    }
}

#[test]
fn test_lenient_header_skips_line_without_colon() {
    let text = "#HEADER#\nEOF:|\nthis line has no separator\nEOR:;\n#DEFINITION#";
    let header = extract_header_with(text, false).unwrap();

    assert_eq!(header.len(), 2);
    assert!(header.delimiters().is_ok());
}

#[test]
fn test_header_missing_marker() {
    let text = "#DEFINITION#\na|b|;\n#DATA#\n#END#";

    assert!(matches!(
        extract_header(text),
        Err(BlmError::MalformedSection {
            section: Section::Header
        })
    ));
}

#[test]
fn test_empty_header_section() {
    let header = extract_header("#HEADER##DEFINITION#").unwrap();

    assert!(header.is_empty());
    assert!(matches!(
        header.delimiters(),
        Err(BlmError::MissingDelimiterDeclaration { .. })
    ));
}

#[test]
fn test_header_redeclared_property_takes_last_value() {
    let text = "#HEADER#\nEOF:|\nEOF:^\nEOR:~\n#DEFINITION#";
    let header = extract_header(text).unwrap();

    assert_eq!(header.get("EOF"), Some("^"));
    assert_eq!(header.len(), 2);
}
