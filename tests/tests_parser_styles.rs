//! Parser tests - styles

use blueprint::workspace::{Border, Routing, Shape, Workspace};
use blueprint::DslParser;
use rstest::rstest;

fn parse(source: &str) -> Workspace {
    let mut parser = DslParser::new();
    parser.parse_str(source).unwrap();
    parser.into_workspace()
}

fn with_styles(styles: &str) -> Workspace {
    parse(&format!(
        "workspace {{\n    views {{\n        styles {{\n{styles}\n        }}\n    }}\n}}"
    ))
}

#[test]
fn test_element_style_fields() {
    let workspace = with_styles(
        r#"
        element "Person" {
            shape person
            icon https://example.com/icon.png
            width 400
            height 300
            background #08427b
            colour #FFFFFF
            fontSize 22
            border dashed
            opacity 80
            metadata false
            description true
        }
        "#,
    );

    let style = &workspace.views.styles.elements[0];
    assert_eq!(style.tag, "Person");
    assert_eq!(style.shape, Some(Shape::Person));
    assert_eq!(style.icon.as_deref(), Some("https://example.com/icon.png"));
    assert_eq!(style.width, Some(400));
    assert_eq!(style.height, Some(300));
    assert_eq!(style.background.as_deref(), Some("#08427b"));
    // colour values are normalised to lowercase
    assert_eq!(style.color.as_deref(), Some("#ffffff"));
    assert_eq!(style.font_size, Some(22));
    assert_eq!(style.border, Some(Border::Dashed));
    assert_eq!(style.opacity, Some(80));
    assert_eq!(style.metadata, Some(false));
    assert_eq!(style.description, Some(true));
}

#[test]
fn test_relationship_style_fields() {
    let workspace = with_styles(
        r#"
        relationship "Relationship" {
            thickness 2
            color #ff0000
            dashed false
            routing orthogonal
            fontSize 18
            width 300
            position 60
            opacity 100
        }
        "#,
    );

    let style = &workspace.views.styles.relationships[0];
    assert_eq!(style.tag, "Relationship");
    assert_eq!(style.thickness, Some(2));
    assert_eq!(style.color.as_deref(), Some("#ff0000"));
    assert_eq!(style.dashed, Some(false));
    assert_eq!(style.routing, Some(Routing::Orthogonal));
    assert_eq!(style.font_size, Some(18));
    assert_eq!(style.width, Some(300));
    assert_eq!(style.position, Some(60));
    assert_eq!(style.opacity, Some(100));
}

#[test]
fn test_multiple_styles_keep_declaration_order() {
    let workspace = with_styles(
        "element \"A\" {\n}\nelement \"B\" {\n}\nrelationship \"R\" {\n}",
    );
    let tags: Vec<_> = workspace
        .views
        .styles
        .elements
        .iter()
        .map(|s| s.tag.clone())
        .collect();
    assert_eq!(tags, vec!["A", "B"]);
    assert_eq!(workspace.views.styles.relationships.len(), 1);
}

#[rstest]
#[case("shape triangle")]
#[case("background red")]
#[case("colour #12345")]
#[case("width many")]
#[case("border wavy")]
#[case("metadata maybe")]
fn test_invalid_element_style_values(#[case] line: &str) {
    let mut parser = DslParser::new();
    let err = parser
        .parse_str(&format!(
            "workspace {{\n    views {{\n        styles {{\n            element \"X\" {{\n                {line}\n            }}\n        }}\n    }}\n}}"
        ))
        .unwrap_err();
    assert!(err.message.starts_with("Invalid"), "{}", err.message);
    assert_eq!(err.line_number, 5);
}

#[rstest]
#[case("routing diagonal")]
#[case("dashed sometimes")]
#[case("thickness thick")]
fn test_invalid_relationship_style_values(#[case] line: &str) {
    let mut parser = DslParser::new();
    let err = parser
        .parse_str(&format!(
            "workspace {{\n    views {{\n        styles {{\n            relationship \"X\" {{\n                {line}\n            }}\n        }}\n    }}\n}}"
        ))
        .unwrap_err();
    assert!(err.message.starts_with("Invalid"), "{}", err.message);
}

#[test]
fn test_restricted_mode_drops_icons() {
    let mut parser = DslParser::new();
    parser.set_restricted(true);
    parser
        .parse_str(
            "workspace {\n    views {\n        styles {\n            element \"X\" {\n                icon https://example.com/icon.png\n                shape circle\n            }\n        }\n    }\n}",
        )
        .unwrap();
    let style = &parser.workspace().views.styles.elements[0];
    assert_eq!(style.icon, None);
    assert_eq!(style.shape, Some(Shape::Circle));
}

#[test]
fn test_restricted_mode_drops_branding_logo() {
    let mut parser = DslParser::new();
    parser.set_restricted(true);
    parser
        .parse_str(
            "workspace {\n    views {\n        branding {\n            logo logo.png\n            font \"Open Sans\"\n        }\n    }\n}",
        )
        .unwrap();
    assert_eq!(parser.workspace().views.branding.logo, None);
    assert!(parser.workspace().views.branding.font.is_some());
}
