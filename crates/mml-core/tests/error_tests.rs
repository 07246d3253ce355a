//! Tests for the tag vocabulary and the error model

use mml_core::error::{ErrorCollection, ErrorKind, MmlError, Severity, ValidationError};
use mml_core::line::parse_line;
use mml_core::Tag;
use pretty_assertions::assert_eq;
use rstest::rstest;

// ============================================================================
// Tag Vocabulary Tests
// ============================================================================

#[rstest]
#[case("T", Tag::Title)]
#[case("H", Tag::Section)]
#[case("P", Tag::Paragraph)]
#[case("M", Tag::Metadata)]
#[case("L", Tag::Link)]
#[case("IMG", Tag::Image)]
#[case("img", Tag::Image)]
#[case("C", Tag::Code)]
#[case("q", Tag::Quote)]
#[case("Cfg", Tag::Config)]
#[case("PKT", Tag::Packet)]
#[case("IMAGE", Tag::Unknown)]
#[case("", Tag::Unknown)]
fn test_tag_from_prefix(#[case] prefix: &str, #[case] expected: Tag) {
    assert_eq!(Tag::from_prefix(prefix), expected);
}

#[test]
fn test_known_tags_round_trip_through_prefix() {
    for tag in Tag::KNOWN {
        assert_eq!(Tag::from_prefix(tag.prefix()), tag);
        assert_eq!(tag.to_string(), tag.prefix());
    }
    assert_eq!(Tag::Unknown.prefix(), "UNKNOWN");
    assert_eq!(Tag::valid_prefixes(), "T, H, P, M, L, IMG, C, Q, CFG, PKT");
}

// ============================================================================
// Line Parser Tests
// ============================================================================

#[test]
fn test_parse_line_trims_tag_and_content() {
    let parsed = parse_line("img : Alt | url ", 4, false).unwrap();

    assert_eq!(parsed.tag, Tag::Image);
    assert_eq!(parsed.content, "Alt | url");
    assert_eq!(parsed.line, 4);
}

#[test]
fn test_parse_line_allows_unknown_when_configured() {
    let parsed = parse_line("XYZ:payload", 1, true).unwrap();
    assert_eq!(parsed.tag, Tag::Unknown);

    let error = parse_line("XYZ:payload", 1, false).unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnknownTag);
}

#[test]
fn test_parse_line_empty_content() {
    let parsed = parse_line("P:", 1, false).unwrap();
    assert_eq!(parsed.content, "");
}

// ============================================================================
// Error Model Tests
// ============================================================================

#[rstest]
#[case(Severity::Low, true)]
#[case(Severity::Medium, true)]
#[case(Severity::High, false)]
#[case(Severity::Critical, false)]
fn test_recoverability_follows_severity(#[case] severity: Severity, #[case] recoverable: bool) {
    let error = MmlError::new(ErrorKind::Structure, severity, "x");
    assert_eq!(error.is_recoverable(), recoverable);
}

#[test]
fn test_severity_ordering() {
    assert!(Severity::Low < Severity::Medium);
    assert!(Severity::Medium < Severity::High);
    assert!(Severity::High < Severity::Critical);
    assert_eq!(Severity::Critical.to_string(), "critical");
}

#[test]
fn test_syntax_error_display() {
    let error = MmlError::syntax(3, 1, "oops");

    assert_eq!(
        error.to_string(),
        "MML error at line 3, column 1: syntax error (found 'oops', expected 'TAG:content'). \
         Use format 'TAG:content' where TAG is a valid MML tag"
    );
}

#[test]
fn test_error_display_without_location() {
    let error = MmlError::structure("paragraph without section", "Add a section");
    assert_eq!(
        error.to_string(),
        "MML error: paragraph without section. Add a section"
    );
}

#[test]
fn test_metadata_error_context() {
    let error = MmlError::metadata("", "v", "empty key", "Provide a key");

    assert_eq!(error.context.as_deref(), Some("key='', value='v'"));
    assert_eq!(error.severity, Severity::Medium);
}

#[test]
fn test_limit_error_message() {
    let error = MmlError::limit_exceeded("sections", 1, 1, "Raise the limit");
    assert_eq!(error.message, "sections limit exceeded: 1 used, 1 maximum");
    assert_eq!(error.severity, Severity::High);
}

fn sample_collection() -> ErrorCollection {
    let mut errors = ErrorCollection::new();
    errors.push(MmlError::unknown_tag("X", 1, "fix"));
    errors.push(MmlError::syntax(2, 1, "bad"));
    errors.push(MmlError::link("", "u", "empty text", "fix"));
    errors
}

#[test]
fn test_collection_queries() {
    let errors = sample_collection();

    assert!(errors.has_errors());
    assert!(!errors.has_critical());
    assert_eq!(errors.len(), 3);

    let serious: Vec<_> = errors
        .filter_by_severity(Severity::Medium)
        .into_iter()
        .map(|e| e.kind)
        .collect();
    assert_eq!(serious, vec![ErrorKind::Syntax, ErrorKind::Link]);

    let recoverable: Vec<_> = errors.recoverable().into_iter().map(|e| e.kind).collect();
    assert_eq!(recoverable, vec![ErrorKind::UnknownTag, ErrorKind::Link]);
}

#[test]
fn test_collection_has_critical() {
    let mut errors = ErrorCollection::new();
    assert!(!errors.has_errors());

    errors.push(MmlError::new(ErrorKind::Structure, Severity::Critical, "fatal"));
    assert!(errors.has_critical());
}

#[test]
fn test_collection_report() {
    assert_eq!(ErrorCollection::new().report(), "No errors");
    assert_eq!(ErrorCollection::new().to_string(), "no errors");

    let report = sample_collection().report();
    assert!(report.starts_with("3 errors found:\n1. MML error at line 1: unknown tag 'X'"));
    assert!(report.contains("(severity: low)\n   Suggestion: fix\n"));
    assert!(report.contains("2. MML error at line 2, column 1: syntax error"));
}

#[test]
fn test_validation_error_messages() {
    assert_eq!(ValidationError::EmptyDocument.to_string(), "document is empty");

    let error = ValidationError::UntitledSection { index: 3 };
    assert_eq!(error.to_string(), "section 3 has no title");
    assert_eq!(error.to_mml_error().kind, ErrorKind::Validation);
}
