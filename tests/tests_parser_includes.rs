//! Parser tests - file inclusion and directory parsing

use std::fs;

use blueprint::workspace::ElementKind;
use blueprint::DslParser;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_include_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "people.dsl", "u = person \"User\"\n");
    let main = write(
        &dir,
        "workspace.dsl",
        "workspace {\n    model {\n        !include people.dsl\n        s = softwareSystem \"S\"\n        u -> s \"Uses\"\n    }\n}\n",
    );

    let mut parser = DslParser::new();
    parser.parse_path(&main).unwrap();
    let workspace = parser.into_workspace();
    assert_eq!(workspace.model.elements().count(), 2);
    assert_eq!(workspace.model.relationships().count(), 1);
}

#[test]
fn test_include_is_spliced_into_preserved_source() {
    let dir = TempDir::new().unwrap();
    write(&dir, "people.dsl", "u = person \"User\"");
    let main = write(
        &dir,
        "workspace.dsl",
        "workspace {\n    model {\n        !include people.dsl\n    }\n}",
    );

    let mut parser = DslParser::new();
    parser.parse_path(&main).unwrap();
    let source = parser.into_workspace().source.unwrap();
    assert!(source.contains("u = person \"User\""));
    assert!(!source.contains("!include"));
}

#[test]
fn test_nested_include_resolves_relative_to_including_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "sub/inner.dsl", "u = person \"User\"\n");
    write(&dir, "sub/outer.dsl", "!include inner.dsl\n");
    let main = write(
        &dir,
        "workspace.dsl",
        "workspace {\n    model {\n        !include sub/outer.dsl\n    }\n}\n",
    );

    let mut parser = DslParser::new();
    parser.parse_path(&main).unwrap();
    assert_eq!(parser.workspace().model.elements().count(), 1);
}

#[test]
fn test_include_directory_in_sorted_order() {
    let dir = TempDir::new().unwrap();
    write(&dir, "fragments/01-people.dsl", "u = person \"User\"\n");
    write(&dir, "fragments/02-systems.dsl", "s = softwareSystem \"S\"\nu -> s \"Uses\"\n");
    let main = write(
        &dir,
        "workspace.dsl",
        "workspace {\n    model {\n        !include fragments\n    }\n}\n",
    );

    let mut parser = DslParser::new();
    parser.parse_path(&main).unwrap();
    let workspace = parser.into_workspace();
    assert_eq!(workspace.model.elements().count(), 2);
    assert_eq!(workspace.model.relationships().count(), 1);
}

#[test]
fn test_include_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let main = write(
        &dir,
        "workspace.dsl",
        "workspace {\n    model {\n        !include nope.dsl\n    }\n}\n",
    );

    let mut parser = DslParser::new();
    let err = parser.parse_path(&main).unwrap_err();
    assert!(err.message.contains("could not be found"));
    assert_eq!(err.line_number, 3);
}

#[test]
fn test_remote_include_is_rejected() {
    let mut parser = DslParser::new();
    let err = parser
        .parse_str("workspace {\n    model {\n        !include https://example.com/x.dsl\n    }\n}")
        .unwrap_err();
    assert!(err.message.contains("Remote includes are not supported"));
}

#[test]
fn test_include_is_a_no_op_when_restricted() {
    let dir = TempDir::new().unwrap();
    write(&dir, "people.dsl", "u = person \"User\"\n");
    let main = write(
        &dir,
        "workspace.dsl",
        "workspace {\n    model {\n        !include people.dsl\n    }\n}\n",
    );

    let mut parser = DslParser::new();
    parser.set_restricted(true);
    parser.parse_path(&main).unwrap();
    assert_eq!(parser.workspace().model.elements().count(), 0);
}

#[test]
fn test_error_line_numbers_are_local_to_the_included_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "people.dsl", "u = person \"User\"\nbroken line here\n");
    let main = write(
        &dir,
        "workspace.dsl",
        "workspace {\n    model {\n        !include people.dsl\n    }\n}\n",
    );

    let mut parser = DslParser::new();
    let err = parser.parse_path(&main).unwrap_err();
    assert_eq!(err.line_number, 2);
    assert_eq!(err.source_line, "broken line here");
}

#[test]
fn test_parse_directory_shares_state_across_files() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a-constants.dsl", "!constant NAME \"Alice\"\n");
    write(
        &dir,
        "b-workspace.dsl",
        "workspace {\n    model {\n        person \"${NAME}\"\n    }\n}\n",
    );

    let mut parser = DslParser::new();
    parser.parse_path(dir.path()).unwrap();
    assert!(parser
        .workspace()
        .model
        .find_element(ElementKind::Person, "Alice")
        .is_some());
}
