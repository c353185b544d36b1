//! Tests for the parsing pipeline: stage ordering, error composition and loaders

use std::error::Error as _;
use std::path::Path;

use super::super::loader::MemoryLoader;
use super::super::pipeline::BlmParser;
use super::{build_blm, create_minimal_blm, create_sample_blm, create_temp_blm};
use crate::config::ParserConfig;
use crate::error::BlmError;
use crate::models::{Section, Stage};

#[tokio::test]
async fn test_parse_sample_file() {
    let file = create_temp_blm(&create_sample_blm());
    let parser = BlmParser::new();

    let records = parser.parse_file(file.path()).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("AGENT_REF"), Some("1234_ABC01"));
    assert_eq!(records[0].get("PRICE"), Some("250000"));
    assert_eq!(
        records[1].get("SUMMARY"),
        Some("Detached house: garden, garage")
    );
    assert!(records.iter().all(|r| r.len() == 7));
}

#[tokio::test]
async fn test_parse_document_stats() {
    let file = create_temp_blm(&create_sample_blm());
    let document = BlmParser::new().parse_document(file.path()).await.unwrap();

    assert_eq!(document.definitions.len(), 7);
    assert_eq!(document.stats.field_count, 7);
    assert_eq!(document.stats.records_parsed, 2);
    assert_eq!(document.stats.record_candidates, 3);
    assert_eq!(document.stats.blank_candidates_skipped, 1);
    assert_eq!(document.stats.declared_property_count, Some(2));
    assert_eq!(document.stats.property_count_matches(), Some(true));
    assert_eq!(document.stats.bytes_processed, create_sample_blm().len());
}

#[tokio::test]
async fn test_invalid_path_fails_before_loading() {
    // The loader knows this file, so only validation can reject it
    let loader = MemoryLoader::new().with_file("feed.txt", create_minimal_blm());
    let parser = BlmParser::with_loader(loader, ParserConfig::default());

    let error = parser.parse_file("feed.txt").await.unwrap_err();

    assert_eq!(error.stage, Stage::Validate);
    assert!(matches!(error.kind(), BlmError::InvalidPath { .. }));
}

#[tokio::test]
async fn test_read_failure_wraps_io_error() {
    let error = BlmParser::new()
        .parse_file("/definitely/not/here.blm")
        .await
        .unwrap_err();

    assert_eq!(error.stage, Stage::Load);
    match error.kind() {
        BlmError::ReadFailure { path, source } => {
            assert_eq!(path, "/definitely/not/here.blm");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected ReadFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_message_names_stage_and_file() {
    let text = build_blm("EOF:|", "a|b|;", "1|2|;");
    let loader = MemoryLoader::new().with_file("listing.blm", text);
    let parser = BlmParser::with_loader(loader, ParserConfig::default());

    let error = parser.parse_file("listing.blm").await.unwrap_err();
    let message = error.to_string();

    assert!(message.contains("header stage"), "message: {}", message);
    assert!(message.contains("listing.blm"), "message: {}", message);
    assert!(error.source().is_some());
}

#[test]
fn test_missing_delimiter_reported_at_header_stage() {
    // DEFINITION and DATA are both broken too; the header stage must fail first
    let text = "#HEADER#\nEOF:|\n#DEFINITION#\n";
    let error = BlmParser::new().parse_str(text).unwrap_err();

    assert_eq!(error.stage, Stage::Header);
    match error.into_kind() {
        BlmError::MissingDelimiterDeclaration { missing } => {
            assert_eq!(missing, vec!["EOR".to_string()]);
        }
        other => panic!("Expected MissingDelimiterDeclaration, got {:?}", other),
    }
}

#[test]
fn test_missing_definition_section() {
    let text = "#HEADER#\nEOF:|\nEOR:;\n#DATA#\na|;\n#END#";
    let error = BlmParser::new().parse_str(text).unwrap_err();

    assert_eq!(error.stage, Stage::Definition);
    assert!(matches!(
        error.kind(),
        BlmError::MalformedSection {
            section: Section::Definition
        }
    ));
}

#[test]
fn test_missing_data_section() {
    let text = "#HEADER#\nEOF:|\nEOR:;\n#DEFINITION#\na|;\n#DATA#\n1|;\n";
    let error = BlmParser::new().parse_str(text).unwrap_err();

    assert_eq!(error.stage, Stage::Data);
    assert!(matches!(
        error.kind(),
        BlmError::MalformedSection {
            section: Section::Data
        }
    ));
}

#[test]
fn test_custom_delimiter_keys() {
    let text = build_blm("FIELD_SEP:|\nRECORD_SEP:;", "a|b|;", "1|2|;");
    let config = ParserConfig::default().with_delimiter_keys("FIELD_SEP", "RECORD_SEP");
    let document = BlmParser::with_config(config).parse_str(&text).unwrap();

    assert_eq!(document.records[0].get("b"), Some("2"));
}

#[test]
fn test_lenient_header_config() {
    let text = build_blm("Feed for agent 1234\nEOF:|\nEOR:;", "a|;", "1|;");

    let strict = BlmParser::new().parse_str(&text).unwrap_err();
    assert!(matches!(
        strict.kind(),
        BlmError::MalformedHeaderLine { .. }
    ));

    let lenient = BlmParser::with_config(ParserConfig::default().with_lenient_header())
        .parse_str(&text)
        .unwrap();
    assert_eq!(lenient.records.len(), 1);
}

#[test]
fn test_property_count_mismatch_is_not_an_error() {
    let text = build_blm("EOF:|\nEOR:;\nProperty Count:5", "a|;", "1|;\n2|;");
    let document = BlmParser::new().parse_str(&text).unwrap();

    assert_eq!(document.records.len(), 2);
    assert_eq!(document.stats.property_count_matches(), Some(false));
}

#[test]
fn test_empty_data_section() {
    let text = build_blm("EOF:|\nEOR:;", "a|b|;", "");
    let document = BlmParser::new().parse_str(&text).unwrap();

    assert!(document.records.is_empty());
    assert_eq!(document.definitions.len(), 2);
}

#[test]
fn test_empty_definitions_reject_any_record() {
    let text = build_blm("EOF:|\nEOR:;", ";", "x|;");
    let error = BlmParser::new().parse_str(&text).unwrap_err();

    assert!(matches!(
        error.kind(),
        BlmError::SchemaMismatch {
            expected: 0,
            actual: 1,
            record_index: 0
        }
    ));
}

#[tokio::test]
async fn test_concurrent_parses_are_independent() {
    let good = build_blm("EOF:|\nEOR:;", "a|;", "1|;");
    let bad = build_blm("EOF:|", "a|;", "1|;");
    let loader = MemoryLoader::new()
        .with_file("good.blm", good)
        .with_file("bad.blm", bad);
    let parser = BlmParser::with_loader(loader, ParserConfig::default());

    let (good, bad) = tokio::join!(
        parser.parse_file(Path::new("good.blm")),
        parser.parse_file(Path::new("bad.blm"))
    );

    assert_eq!(good.unwrap().len(), 1);
    let bad = bad.unwrap_err();
    assert_eq!(bad.path, "bad.blm");
    assert_eq!(bad.stage, Stage::Header);
}

#[test]
fn test_repeated_field_name_reads_the_same_everywhere() {
    let text = build_blm("EOF:|\nEOR:;", "id|id|;", "first|second|;");
    let document = BlmParser::new().parse_str(&text).unwrap();
    let record = &document.records[0];

    assert_eq!(record.get("id"), Some("second"));
    assert_eq!(
        serde_json::to_string(&document.records).unwrap(),
        r#"[{"id":"second"}]"#
    );
    assert_eq!(
        serde_json::to_value(&document.records).unwrap(),
        serde_json::json!([{"id": "second"}])
    );
}
