//! Parser tests - error reporting
//!
//! Every failure carries the 1-based line number and the verbatim
//! offending line.

use blueprint::{DslParser, ParserError};
use rstest::rstest;

fn parse_err(source: &str) -> ParserError {
    let mut parser = DslParser::new();
    parser.parse_str(source).unwrap_err()
}

#[test]
fn test_duplicate_identifier() {
    let err = parse_err(
        "workspace {\n    model {\n        u = person \"U\"\n        u = person \"U2\"\n    }\n}",
    );
    assert!(err.message.contains("\"u\" is already in use"));
    assert_eq!(err.line_number, 4);
    assert_eq!(err.source_line, "        u = person \"U2\"");
}

#[test]
fn test_identifier_shared_between_namespaces_is_rejected() {
    let err = parse_err(
        "workspace {\n    model {\n        a = person \"P\"\n        b = softwareSystem \"S\"\n        a = b -> a \"uses\"\n    }\n}",
    );
    assert!(err.message.contains("already in use"));
    assert_eq!(err.line_number, 5);
}

#[test]
fn test_invalid_identifier_characters() {
    let err = parse_err("workspace {\n    model {\n        web-app = softwareSystem \"S\"\n    }\n}");
    assert!(err.message.contains("invalid characters"));
}

#[test]
fn test_unexpected_tokens() {
    let err = parse_err("workspace {\n    banana\n}");
    assert_eq!(err.message, "Unexpected tokens");
    assert_eq!(err.line_number, 2);
    assert_eq!(err.source_line, "    banana");
}

#[test]
fn test_keyword_in_wrong_context_is_unexpected() {
    // `container` is only legal inside a software system or a views block
    let err = parse_err("workspace {\n    model {\n        container \"C\"\n    }\n}");
    assert_eq!(err.message, "Unexpected tokens");
}

#[test]
fn test_unexpected_closing_brace() {
    let err = parse_err("}");
    assert!(err.message.contains("Unexpected }"));
    assert_eq!(err.line_number, 1);
}

#[test]
fn test_unterminated_string() {
    let err = parse_err("workspace \"Bank {\n}");
    assert!(err.message.contains("Unterminated string"));
    assert_eq!(err.line_number, 1);
}

#[test]
fn test_unclosed_block_at_end_of_input() {
    let err = parse_err("workspace {\n    model {\n    }");
    assert!(err.message.contains("unclosed workspace block"));
    assert_eq!(err.line_number, 3);
    assert_eq!(err.source_line, "    }");
}

#[test]
fn test_unknown_element_reference() {
    let err = parse_err("workspace {\n    model {\n        u -> s \"uses\"\n    }\n}");
    assert!(err.message.contains("The element \"u\" does not exist"));
}

#[test]
fn test_this_outside_element_definition() {
    let err = parse_err("workspace {\n    model {\n        s = softwareSystem \"S\"\n        this -> s\n    }\n}");
    assert!(err.message.contains("\"this\" is only valid"));
}

#[test]
fn test_duplicate_element_name() {
    let err = parse_err(
        "workspace {\n    model {\n        person \"User\"\n        person \"User\"\n    }\n}",
    );
    assert!(err.message.contains("already exists"));
    assert_eq!(err.line_number, 4);
}

#[test]
fn test_display_includes_location() {
    let err = parse_err("workspace {\n    banana\n}");
    assert_eq!(err.to_string(), "Unexpected tokens at line 2:     banana");
}

#[test]
fn test_unreadable_file_has_no_line() {
    let mut parser = DslParser::new();
    let err = parser.parse_path("no/such/file.dsl").unwrap_err();
    assert_eq!(err.line_number, 0);
    assert_eq!(err.source_line, "");
    assert!(err.to_string().contains("file.dsl"));
}

// Every error's line number indexes a line whose content equals the
// reported source line.
#[rstest]
#[case("workspace {\n    banana\n}")]
#[case("workspace {\n    model {\n        u = person \"U\"\n        u = person \"U2\"\n    }\n}")]
#[case("workspace \"Bank {\n}")]
#[case("}")]
fn test_error_locality(#[case] source: &str) {
    let err = parse_err(source);
    let line = source.split('\n').nth(err.line_number - 1).unwrap();
    assert_eq!(err.source_line, line);
}

#[test]
fn test_missing_argument_reports_grammar() {
    let err = parse_err("workspace {\n    model {\n        person\n    }\n}");
    assert!(err.message.starts_with("Expected: person"));
}
