//! Integration tests for the validation gate: documents are either accepted
//! whole or rejected with every violation located by instance path.

use pretty_assertions::assert_eq;

use handraw::{parse_config, parse_diagram, Element, SchemaError};

#[test]
fn test_accepts_full_featured_document() {
    let diagram = parse_diagram(
        r##"{"elements": [
            {"id": "infra", "type": "container", "x": 0, "y": 0, "width": 400, "height": 200,
             "label": "Infra", "children": [
                {"id": "db", "type": "ellipse", "x": 20, "y": 60, "label": "DB",
                 "style": {"fill": "#e3f2fd", "strokeStyle": "dashed"}},
                {"id": "api", "type": "rectangle", "x": 220, "y": 60, "cornerRadius": 8,
                 "rotation": 15, "label": "API"}
            ]},
            {"type": "text", "text": "Overview", "x": 10, "y": -40,
             "fontSize": 24, "fontFamily": "code", "textAlign": "center"},
            {"type": "line", "x": 0, "y": 220, "points": [[0, 0], [200, 0], [200, 40]]},
            {"type": "arrow", "start": "api", "end": "db", "label": "reads",
             "startArrowhead": "bar", "endArrowhead": "dot", "endSide": "right",
             "style": {"stroke": "#d32f2f", "strokeWidth": 3, "opacity": 80}}
        ]}"##,
    )
    .unwrap();
    assert_eq!(diagram.elements.len(), 4);
    assert!(matches!(diagram.elements[3], Element::Arrow(_)));
}

#[test]
fn test_reports_every_violation_with_its_path() {
    let err = parse_diagram(
        r#"{"elements": [
            {"type": "pentagon"},
            {"type": "line", "points": [[1, 1]]},
            {"type": "rectangle", "style": {"roughness": 5, "opacity": 150}}
        ]}"#,
    )
    .unwrap_err();
    let SchemaError::Invalid(violations) = err else {
        panic!("expected Invalid, got {:?}", err);
    };
    let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/elements/0",
            "/elements/1/points",
            "/elements/2/style/roughness",
            "/elements/2/style/opacity",
        ]
    );
}

#[test]
fn test_violation_display_pairs_path_and_message() {
    let err = parse_diagram(
        r#"{"elements": [{"type": "rectangle", "style": {"strokeWidth": 9}}]}"#,
    )
    .unwrap_err();
    assert!(err
        .to_string()
        .contains("/elements/0/style/strokeWidth: must be <= 4"));
}

#[test]
fn test_deeply_nested_violation_path() {
    let err = parse_diagram(
        r#"{"elements": [
            {"type": "container", "children": [
                {"type": "container", "children": [
                    {"type": "rectangle", "style": {"opacity": -1}}
                ]}
            ]}
        ]}"#,
    )
    .unwrap_err();
    let SchemaError::Invalid(violations) = err else {
        panic!("expected Invalid");
    };
    assert_eq!(
        violations[0].path,
        "/elements/0/children/0/children/0/style/opacity"
    );
}

#[test]
fn test_children_only_allowed_under_shapes() {
    let err = parse_diagram(
        r#"{"elements": [
            {"type": "text", "text": "nope", "children": []}
        ]}"#,
    )
    .unwrap_err();
    let SchemaError::Invalid(violations) = err else {
        panic!("expected Invalid");
    };
    assert_eq!(violations[0].path, "/elements/0");
    assert!(violations[0].message.contains("children"));
}

#[test]
fn test_non_json_input() {
    assert!(matches!(
        parse_diagram("elements: []"),
        Err(SchemaError::Json(_))
    ));
}

#[test]
fn test_config_empty_object_uses_defaults() {
    let config = parse_config("{}").unwrap();
    assert_eq!(config.background, "#ffffff");
    assert_eq!(config.padding, 20.0);
}

#[test]
fn test_config_override_and_bounds() {
    let config = parse_config(r##"{"background": "#123456", "padding": 0}"##).unwrap();
    assert_eq!(config.background, "#123456");
    assert_eq!(config.padding, 0.0);
    assert!(parse_config(r#"{"padding": -0.5}"#).is_err());
}
