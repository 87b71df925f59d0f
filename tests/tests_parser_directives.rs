//! Parser tests - directives and substitution
//!
//! `!constant`, `${...}` expansion, `!identifiers`,
//! `!impliedRelationships`, `!docs`/`!adrs`, and restricted mode.

use std::sync::Mutex;

use blueprint::workspace::{ElementKind, Workspace};
use blueprint::DslParser;
use once_cell::sync::Lazy;

/// Environment-variable tests mutate process state; serialize them.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn parse(source: &str) -> Workspace {
    let mut parser = DslParser::new();
    parser.parse_str(source).unwrap();
    parser.into_workspace()
}

// ============================================================================
// Constants and substitution
// ============================================================================

#[test]
fn test_constant_substitution() {
    let workspace = parse(
        r#"
        !constant NAME "Alice"
        workspace {
            model {
                person "${NAME}"
            }
        }
        "#,
    );
    assert!(workspace
        .model
        .find_element(ElementKind::Person, "Alice")
        .is_some());
}

#[test]
fn test_constant_redefinition_last_wins() {
    let workspace = parse(
        r#"
        !constant NAME "first"
        !constant NAME "second"
        workspace {
            model {
                person "${NAME}"
            }
        }
        "#,
    );
    assert!(workspace
        .model
        .find_element(ElementKind::Person, "second")
        .is_some());
}

#[test]
fn test_unknown_reference_is_left_intact() {
    let workspace = parse(
        r#"
        workspace {
            model {
                person "${UNDEFINED_CONSTANT_XYZ}"
            }
        }
        "#,
    );
    assert!(workspace
        .model
        .find_element(ElementKind::Person, "${UNDEFINED_CONSTANT_XYZ}")
        .is_some());
}

#[test]
fn test_invalid_constant_name_fails() {
    let mut parser = DslParser::new();
    let err = parser.parse_str("!constant \"bad name\" \"value\"").unwrap_err();
    assert!(err.message.contains("invalid characters"));
}

#[test]
fn test_environment_variable_substitution() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("BLUEPRINT_TEST_PERSON", "EnvUser");
    let workspace = parse(
        r#"
        workspace {
            model {
                person "${BLUEPRINT_TEST_PERSON}"
            }
        }
        "#,
    );
    std::env::remove_var("BLUEPRINT_TEST_PERSON");
    assert!(workspace
        .model
        .find_element(ElementKind::Person, "EnvUser")
        .is_some());
}

#[test]
fn test_constant_masks_environment_variable() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("BLUEPRINT_TEST_MASKED", "from-env");
    let workspace = parse(
        r#"
        !constant BLUEPRINT_TEST_MASKED "from-constant"
        workspace {
            model {
                person "${BLUEPRINT_TEST_MASKED}"
            }
        }
        "#,
    );
    std::env::remove_var("BLUEPRINT_TEST_MASKED");
    assert!(workspace
        .model
        .find_element(ElementKind::Person, "from-constant")
        .is_some());
}

#[test]
fn test_restricted_mode_ignores_environment() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("BLUEPRINT_TEST_RESTRICTED", "leaked");
    let mut parser = DslParser::new();
    parser.set_restricted(true);
    parser
        .parse_str(
            r#"
            workspace {
                model {
                    person "${BLUEPRINT_TEST_RESTRICTED}"
                }
            }
            "#,
        )
        .unwrap();
    std::env::remove_var("BLUEPRINT_TEST_RESTRICTED");
    assert!(parser
        .workspace()
        .model
        .find_element(ElementKind::Person, "${BLUEPRINT_TEST_RESTRICTED}")
        .is_some());
}

// ============================================================================
// Model directives
// ============================================================================

#[test]
fn test_implied_relationships_flag() {
    let workspace = parse(
        r#"
        workspace {
            model {
                !impliedRelationships false
            }
        }
        "#,
    );
    assert!(!workspace.model.implied_relationships);
}

#[test]
fn test_implied_relationships_requires_boolean() {
    let mut parser = DslParser::new();
    let err = parser
        .parse_str("workspace {\n    model {\n        !impliedRelationships maybe\n    }\n}")
        .unwrap_err();
    assert!(err.message.contains("Invalid"));
}

#[test]
fn test_identifiers_directive_rejects_other_modes() {
    let mut parser = DslParser::new();
    let err = parser
        .parse_str("workspace {\n    !identifiers soft\n}")
        .unwrap_err();
    assert!(err.message.contains("Expected"));
}

// ============================================================================
// Documentation directives
// ============================================================================

#[test]
fn test_docs_and_adrs_record_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("docs")).unwrap();
    std::fs::create_dir(dir.path().join("adrs")).unwrap();
    let file = dir.path().join("workspace.dsl");
    std::fs::write(&file, "workspace {\n    !docs docs\n    !adrs adrs\n}\n").unwrap();

    let mut parser = DslParser::new();
    parser.parse_path(&file).unwrap();
    let workspace = parser.into_workspace();
    assert_eq!(workspace.documentation.docs, vec![dir.path().join("docs")]);
    assert_eq!(workspace.documentation.adrs, vec![dir.path().join("adrs")]);
}

#[test]
fn test_docs_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("workspace.dsl");
    std::fs::write(&file, "workspace {\n    !docs nowhere\n}\n").unwrap();

    let mut parser = DslParser::new();
    let err = parser.parse_path(&file).unwrap_err();
    assert!(err.message.contains("is not a directory"));
    assert_eq!(err.line_number, 2);
}

#[test]
fn test_docs_is_a_no_op_when_restricted() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("workspace.dsl");
    std::fs::write(&file, "workspace {\n    !docs nowhere\n}\n").unwrap();

    let mut parser = DslParser::new();
    parser.set_restricted(true);
    parser.parse_path(&file).unwrap();
    assert!(parser.workspace().documentation.docs.is_empty());
}
