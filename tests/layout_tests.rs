//! Integration tests for the layout pipeline: coordinate resolution,
//! bounding boxes, fit transform, and connection points, driven through
//! the public JSON front door.

use float_cmp::approx_eq;

use handraw::layout::{self, Point};
use handraw::model::Side;
use handraw::parse_diagram;
use handraw::Diagram;

fn diagram(json: &str) -> Diagram {
    parse_diagram(json).unwrap_or_else(|e| panic!("invalid test diagram: {}", e))
}

#[test]
fn test_nested_offsets_accumulate() {
    let doc = diagram(
        r#"{"elements": [
            {"type": "container", "x": 20, "y": 30, "children": [
                {"id": "inner", "type": "rectangle", "x": 5, "y": 5}
            ]}
        ]}"#,
    );
    let lookup = layout::resolve(&doc.elements, 0.0, 0.0);
    let inner = &lookup["inner"];
    assert_eq!((inner.absolute_x, inner.absolute_y), (25.0, 35.0));
    assert_eq!((inner.absolute_width, inner.absolute_height), (100.0, 60.0));
}

#[test]
fn test_duplicate_ids_last_write_wins() {
    let doc = diagram(
        r#"{"elements": [
            {"id": "x", "type": "rectangle", "x": 0, "y": 0},
            {"id": "x", "type": "rectangle", "x": 500, "y": 0}
        ]}"#,
    );
    let lookup = layout::resolve(&doc.elements, 0.0, 0.0);
    assert_eq!(lookup.len(), 1);
    assert_eq!(lookup["x"].absolute_x, 500.0);
}

#[test]
fn test_line_and_arrow_ids_register_with_zero_extent() {
    let doc = diagram(
        r#"{"elements": [
            {"id": "a", "type": "rectangle"},
            {"id": "b", "type": "rectangle", "x": 300},
            {"id": "l", "type": "line", "x": 10, "y": 20, "points": [[0, 0], [50, 0]]},
            {"id": "arr", "type": "arrow", "start": "a", "end": "b"}
        ]}"#,
    );
    let lookup = layout::resolve(&doc.elements, 0.0, 0.0);
    let line = &lookup["l"];
    assert_eq!((line.absolute_x, line.absolute_y), (10.0, 20.0));
    assert_eq!((line.absolute_width, line.absolute_height), (0.0, 0.0));
    assert!(lookup.contains_key("arr"));
}

#[test]
fn test_empty_diagram_bounding_box_default() {
    let doc = diagram(r#"{"elements": []}"#);
    let lookup = layout::resolve(&doc.elements, 0.0, 0.0);
    let bounds = layout::compute_bounding_box(&doc.elements, &lookup, 0.0, 0.0);
    assert_eq!(
        (bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y),
        (0.0, 0.0, 100.0, 100.0)
    );
}

#[test]
fn test_text_measurement_in_bounding_box() {
    // "hello world" is 11 chars; width 11 * 20 * 0.6, height 20 * 1.2
    let doc = diagram(
        r#"{"elements": [
            {"type": "text", "text": "hello world", "x": 50, "y": 30, "fontSize": 20}
        ]}"#,
    );
    let lookup = layout::resolve(&doc.elements, 0.0, 0.0);
    let bounds = layout::compute_bounding_box(&doc.elements, &lookup, 0.0, 0.0);
    assert_eq!(bounds.max_x, 182.0);
    assert_eq!(bounds.max_y, 54.0);
}

#[test]
fn test_arrow_anchors_extend_bounding_box() {
    let doc = diagram(
        r#"{"elements": [
            {"id": "a", "type": "rectangle", "x": 0, "y": 0},
            {"type": "container", "x": 600, "y": 400, "children": [
                {"id": "b", "type": "rectangle", "x": 0, "y": 0}
            ]},
            {"type": "arrow", "start": "a", "end": "b"}
        ]}"#,
    );
    let lookup = layout::resolve(&doc.elements, 0.0, 0.0);
    let bounds = layout::compute_bounding_box(&doc.elements, &lookup, 0.0, 0.0);
    // The nested anchor's full rect (600..700, 400..460) is folded in.
    assert_eq!(bounds.max_x, 700.0);
    assert_eq!(bounds.max_y, 460.0);
}

#[test]
fn test_fit_centers_with_uniform_scale() {
    let doc = diagram(
        r#"{"elements": [
            {"type": "rectangle", "x": 0, "y": 0, "width": 200, "height": 100}
        ]}"#,
    );
    let lookup = layout::resolve(&doc.elements, 0.0, 0.0);
    let bounds = layout::compute_bounding_box(&doc.elements, &lookup, 0.0, 0.0);
    let fit = layout::compute_fit(&bounds, 400.0, 300.0, 20.0);

    // Limiting axis is x: (400 - 40) / 200 = 1.8
    assert!(approx_eq!(f64, fit.scale, 1.8, ulps = 2));

    // Corners land symmetrically inside the canvas on both axes.
    let (left, top) = fit.apply(bounds.min_x, bounds.min_y);
    let (right, bottom) = fit.apply(bounds.max_x, bounds.max_y);
    assert!(approx_eq!(f64, left, 400.0 - right, epsilon = 1e-9));
    assert!(approx_eq!(f64, top, 300.0 - bottom, epsilon = 1e-9));
    assert!(left >= 20.0 && top >= 20.0);
}

#[test]
fn test_fit_degenerate_axis_ignored() {
    let doc = diagram(
        r#"{"elements": [
            {"type": "line", "x": 10, "y": 10, "points": [[0, 0], [0, 80]]}
        ]}"#,
    );
    let lookup = layout::resolve(&doc.elements, 0.0, 0.0);
    let bounds = layout::compute_bounding_box(&doc.elements, &lookup, 0.0, 0.0);
    assert_eq!(bounds.width, 0.0);

    // The zero-width axis contributes no ratio; height decides alone.
    let fit = layout::compute_fit(&bounds, 400.0, 300.0, 20.0);
    assert!(approx_eq!(f64, fit.scale, 3.25, ulps = 2));
    // Still centered: the line's midpoint maps to the canvas midpoint.
    let (x, y) = fit.apply(10.0, 50.0);
    assert!(approx_eq!(f64, x, 200.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, y, 150.0, epsilon = 1e-9));
}

#[test]
fn test_auto_connection_picks_facing_edge() {
    let doc = diagram(
        r#"{"elements": [
            {"id": "a", "type": "rectangle", "x": 0, "y": 0, "width": 100, "height": 100}
        ]}"#,
    );
    let lookup = layout::resolve(&doc.elements, 0.0, 0.0);
    let a = &lookup["a"];

    // Target to the right: horizontal dominance, right edge midpoint.
    let p = layout::connection_point(a, Side::Auto, Some(Point::new(300.0, 50.0)));
    assert_eq!((p.x, p.y), (100.0, 50.0));

    // Target below: bottom edge midpoint.
    let p = layout::connection_point(a, Side::Auto, Some(Point::new(50.0, 300.0)));
    assert_eq!((p.x, p.y), (50.0, 100.0));

    // Exact diagonal tie resolves vertically.
    let p = layout::connection_point(a, Side::Auto, Some(Point::new(250.0, 250.0)));
    assert_eq!((p.x, p.y), (50.0, 100.0));
}

#[test]
fn test_explicit_side_overrides_auto_choice() {
    let doc = diagram(
        r#"{"elements": [
            {"id": "a", "type": "rectangle", "x": 0, "y": 0, "width": 100, "height": 100}
        ]}"#,
    );
    let lookup = layout::resolve(&doc.elements, 0.0, 0.0);
    let a = &lookup["a"];
    let p = layout::connection_point(a, Side::Top, Some(Point::new(300.0, 50.0)));
    assert_eq!((p.x, p.y), (50.0, 0.0));
}
