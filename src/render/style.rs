//! Style resolver
//!
//! Merges a sparse per-element style override onto the documented defaults
//! and maps the result into the drawing backend's option vocabulary. Opacity
//! is deliberately not part of [`RenderOptions`]: it is applied as surface
//! global alpha around each element's draws, because it also governs text
//! fill which the sketch options do not cover.

use crate::model::{
    FillStyle, StrokeStyle, Style, DEFAULT_FILL, DEFAULT_OPACITY, DEFAULT_ROUGHNESS,
    DEFAULT_STROKE, DEFAULT_STROKE_WIDTH,
};

use super::backend::RenderOptions;

/// Dash pattern for `strokeStyle: dashed`
const DASH_PATTERN: [f64; 2] = [8.0, 8.0];
/// Dash pattern for `strokeStyle: dotted`
const DOT_PATTERN: [f64; 2] = [2.0, 4.0];

/// Resolve a sparse style into concrete drawing options.
///
/// A `transparent` fill (the default) resolves to no fill at all rather than
/// the literal color string.
pub fn resolve_style(style: Option<&Style>) -> RenderOptions {
    let fill = style
        .and_then(|s| s.fill.clone())
        .unwrap_or_else(|| DEFAULT_FILL.to_string());

    RenderOptions {
        fill: (fill != DEFAULT_FILL).then_some(fill),
        stroke: style
            .and_then(|s| s.stroke.clone())
            .unwrap_or_else(|| DEFAULT_STROKE.to_string()),
        stroke_width: style
            .and_then(|s| s.stroke_width)
            .unwrap_or(DEFAULT_STROKE_WIDTH),
        roughness: style.and_then(|s| s.roughness).unwrap_or(DEFAULT_ROUGHNESS),
        fill_style: style
            .and_then(|s| s.fill_style)
            .unwrap_or(FillStyle::Hachure),
        stroke_line_dash: match style.and_then(|s| s.stroke_style).unwrap_or_default() {
            StrokeStyle::Dashed => Some(DASH_PATTERN),
            StrokeStyle::Dotted => Some(DOT_PATTERN),
            StrokeStyle::Solid => None,
        },
    }
}

/// The stroke color an element's text and labels are filled with
pub fn stroke_color(style: Option<&Style>) -> String {
    style
        .and_then(|s| s.stroke.clone())
        .unwrap_or_else(|| DEFAULT_STROKE.to_string())
}

/// Element opacity as a 0..=1 alpha value
pub fn alpha(style: Option<&Style>) -> f64 {
    style.and_then(|s| s.opacity).unwrap_or(DEFAULT_OPACITY) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(json: &str) -> Style {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults_when_no_style() {
        let options = resolve_style(None);
        assert_eq!(options.fill, None);
        assert_eq!(options.stroke, "#1e1e1e");
        assert_eq!(options.stroke_width, 2.0);
        assert_eq!(options.roughness, 1.0);
        assert_eq!(options.fill_style, FillStyle::Hachure);
        assert_eq!(options.stroke_line_dash, None);
    }

    #[test]
    fn test_transparent_fill_omitted() {
        let s = style(r#"{"fill": "transparent"}"#);
        assert_eq!(resolve_style(Some(&s)).fill, None);
    }

    #[test]
    fn test_concrete_fill_passes_through() {
        let s = style(r##"{"fill": "#ffc9c9"}"##);
        assert_eq!(resolve_style(Some(&s)).fill, Some("#ffc9c9".to_string()));
    }

    #[test]
    fn test_dash_patterns() {
        let dashed = style(r#"{"strokeStyle": "dashed"}"#);
        assert_eq!(
            resolve_style(Some(&dashed)).stroke_line_dash,
            Some([8.0, 8.0])
        );
        let dotted = style(r#"{"strokeStyle": "dotted"}"#);
        assert_eq!(
            resolve_style(Some(&dotted)).stroke_line_dash,
            Some([2.0, 4.0])
        );
        let solid = style(r#"{"strokeStyle": "solid"}"#);
        assert_eq!(resolve_style(Some(&solid)).stroke_line_dash, None);
    }

    #[test]
    fn test_numeric_passthrough() {
        let s = style(r#"{"strokeWidth": 4, "roughness": 0}"#);
        let options = resolve_style(Some(&s));
        assert_eq!(options.stroke_width, 4.0);
        assert_eq!(options.roughness, 0.0);
    }

    #[test]
    fn test_opacity_not_in_options() {
        let s = style(r#"{"opacity": 40}"#);
        assert_eq!(alpha(Some(&s)), 0.4);
        assert_eq!(alpha(None), 1.0);
    }

    #[test]
    fn test_label_stroke_color() {
        let s = style(r##"{"stroke": "#e03131"}"##);
        assert_eq!(stroke_color(Some(&s)), "#e03131");
        assert_eq!(stroke_color(None), "#1e1e1e");
    }
}
