//! Diagram element model and configuration
//!
//! The element tree is a closed tagged variant over four kinds: shapes
//! (rectangle, ellipse, diamond, container), text, polylines, and anchored
//! arrows. Coordinates are always relative to the immediate parent; only
//! shapes may carry children.

use serde::Deserialize;
use serde_json::Value;

/// Default width for shapes without an explicit `width`
pub const DEFAULT_SHAPE_WIDTH: f64 = 100.0;
/// Default height for shapes without an explicit `height`
pub const DEFAULT_SHAPE_HEIGHT: f64 = 60.0;
/// Placeholder width registered for text elements (true bounds are
/// approximated separately during bounding-box computation)
pub const TEXT_PLACEHOLDER_WIDTH: f64 = 100.0;
/// Placeholder height registered for text elements
pub const TEXT_PLACEHOLDER_HEIGHT: f64 = 20.0;
/// Default font size for text elements and shape labels
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Documented style defaults
pub const DEFAULT_FILL: &str = "transparent";
pub const DEFAULT_STROKE: &str = "#1e1e1e";
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const DEFAULT_ROUGHNESS: f64 = 1.0;
pub const DEFAULT_OPACITY: f64 = 100.0;

/// A validated diagram document: `{ "elements": [...] }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Diagram {
    pub elements: Vec<Element>,
}

/// A single diagram element
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Shape(ShapeElement),
    Text(TextElement),
    Line(LineElement),
    Arrow(ArrowElement),
}

impl Element {
    /// The element id, if declared
    pub fn id(&self) -> Option<&str> {
        match self {
            Element::Shape(e) => e.id.as_deref(),
            Element::Text(e) => e.id.as_deref(),
            Element::Line(e) => e.id.as_deref(),
            Element::Arrow(e) => e.id.as_deref(),
        }
    }

    /// X offset relative to the parent origin (0 when omitted)
    pub fn x(&self) -> f64 {
        match self {
            Element::Shape(e) => e.x,
            Element::Text(e) => e.x,
            Element::Line(e) => e.x,
            Element::Arrow(e) => e.x,
        }
        .unwrap_or(0.0)
    }

    /// Y offset relative to the parent origin (0 when omitted)
    pub fn y(&self) -> f64 {
        match self {
            Element::Shape(e) => e.y,
            Element::Text(e) => e.y,
            Element::Line(e) => e.y,
            Element::Arrow(e) => e.y,
        }
        .unwrap_or(0.0)
    }

    /// The per-element style override, if any
    pub fn style(&self) -> Option<&Style> {
        match self {
            Element::Shape(e) => e.style.as_ref(),
            Element::Text(e) => e.style.as_ref(),
            Element::Line(e) => e.style.as_ref(),
            Element::Arrow(e) => e.style.as_ref(),
        }
    }

    /// Build an element from a JSON value, dispatching on the `type` tag.
    ///
    /// The four shape kinds share one struct, so the tag cannot be expressed
    /// as a plain serde enum attribute; the tag is stripped here and the
    /// remaining fields go through the derived deserializers (which reject
    /// unknown fields).
    pub(crate) fn from_value(value: Value) -> Result<Element, String> {
        let Value::Object(mut fields) = value else {
            return Err("element must be an object".to_string());
        };
        let kind = match fields.remove("type") {
            Some(Value::String(kind)) => kind,
            Some(_) => return Err("field 'type' must be a string".to_string()),
            None => return Err("missing required field 'type'".to_string()),
        };
        let body = Value::Object(fields);
        let detail = |e: serde_json::Error| e.to_string();

        match kind.as_str() {
            "rectangle" | "ellipse" | "diamond" | "container" => {
                let mut shape: ShapeElement = serde_json::from_value(body).map_err(detail)?;
                shape.kind = match kind.as_str() {
                    "rectangle" => ShapeKind::Rectangle,
                    "ellipse" => ShapeKind::Ellipse,
                    "diamond" => ShapeKind::Diamond,
                    _ => ShapeKind::Container,
                };
                Ok(Element::Shape(shape))
            }
            "text" => Ok(Element::Text(serde_json::from_value(body).map_err(detail)?)),
            "line" => Ok(Element::Line(serde_json::from_value(body).map_err(detail)?)),
            "arrow" => Ok(Element::Arrow(serde_json::from_value(body).map_err(detail)?)),
            other => Err(format!("unknown element type '{}'", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Element::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// The geometric kind of a shape element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Diamond,
    /// Invisible grouping shape: draws nothing itself, only its children
    Container,
}

/// Rectangle, ellipse, diamond, or container
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ShapeElement {
    #[serde(skip)]
    pub kind: ShapeKind,
    pub id: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Rotation in degrees, clockwise, about the shape center
    pub rotation: Option<f64>,
    pub label: Option<String>,
    /// Corner rounding, honored for rectangles only
    pub corner_radius: Option<f64>,
    pub style: Option<Style>,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl ShapeElement {
    /// Declared width or the default (100)
    pub fn width(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_SHAPE_WIDTH)
    }

    /// Declared height or the default (60)
    pub fn height(&self) -> f64 {
        self.height.unwrap_or(DEFAULT_SHAPE_HEIGHT)
    }
}

/// A free-standing text element
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct TextElement {
    pub id: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    /// Rotation in degrees, clockwise, about the text origin
    pub rotation: Option<f64>,
    pub text: String,
    pub font_size: Option<f64>,
    pub font_family: Option<FontFamily>,
    pub text_align: Option<TextAlign>,
    pub style: Option<Style>,
}

impl TextElement {
    /// Declared font size or the default (16)
    pub fn font_size(&self) -> f64 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }
}

/// A multi-point polyline; points are relative to the line's own origin
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct LineElement {
    pub id: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    pub points: Vec<[f64; 2]>,
    pub style: Option<Style>,
}

/// A connector anchored to two other elements by id
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ArrowElement {
    pub id: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    /// Id of the element this arrow starts from
    pub start: String,
    /// Id of the element this arrow points to
    pub end: String,
    pub label: Option<String>,
    pub start_arrowhead: Option<Arrowhead>,
    pub end_arrowhead: Option<Arrowhead>,
    pub start_side: Option<Side>,
    pub end_side: Option<Side>,
    pub style: Option<Style>,
}

/// Arrowhead marker variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrowhead {
    Arrow,
    Dot,
    Bar,
}

/// Which boundary of an anchor element a connector attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
    /// Pick the side facing the other endpoint
    Auto,
}

/// Font family keywords, mapped to fixed CSS stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Hand,
    Normal,
    Code,
}

impl FontFamily {
    /// The CSS font-family stack for this keyword
    pub fn css(&self) -> &'static str {
        match self {
            FontFamily::Hand => "Virgil, Segoe UI Emoji, sans-serif",
            FontFamily::Normal => "Arial, Helvetica, sans-serif",
            FontFamily::Code => "Courier New, monospace",
        }
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Stroke dash variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Fill pattern variants for sketchy backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStyle {
    Solid,
    #[default]
    Hachure,
    CrossHatch,
}

/// Sparse per-element style override. Merged over the documented defaults at
/// draw time; never inherited from a parent.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_style: Option<StrokeStyle>,
    pub fill_style: Option<FillStyle>,
    pub roughness: Option<f64>,
    pub opacity: Option<f64>,
}

/// Render configuration: `{ background, padding }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase", default)]
pub struct Config {
    /// Canvas background color
    pub background: String,
    /// Padding in output pixels around the fitted diagram
    pub padding: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            padding: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(json: &str) -> Element {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_deserialize_rectangle() {
        let el = element(r#"{"type": "rectangle", "id": "a", "x": 10, "y": 20}"#);
        match el {
            Element::Shape(shape) => {
                assert_eq!(shape.kind, ShapeKind::Rectangle);
                assert_eq!(shape.id.as_deref(), Some("a"));
                assert_eq!(shape.width(), DEFAULT_SHAPE_WIDTH);
                assert_eq!(shape.height(), DEFAULT_SHAPE_HEIGHT);
            }
            other => panic!("expected shape, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_all_shape_kinds() {
        for (tag, kind) in [
            ("rectangle", ShapeKind::Rectangle),
            ("ellipse", ShapeKind::Ellipse),
            ("diamond", ShapeKind::Diamond),
            ("container", ShapeKind::Container),
        ] {
            let el = element(&format!(r#"{{"type": "{}"}}"#, tag));
            match el {
                Element::Shape(shape) => assert_eq!(shape.kind, kind),
                other => panic!("expected shape, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_deserialize_nested_children() {
        let el = element(
            r#"{"type": "container", "children": [
                {"type": "text", "text": "hi"},
                {"type": "rectangle", "id": "inner"}
            ]}"#,
        );
        let Element::Shape(shape) = el else {
            panic!("expected shape");
        };
        assert_eq!(shape.children.len(), 2);
        assert!(matches!(shape.children[0], Element::Text(_)));
    }

    #[test]
    fn test_deserialize_arrow_options() {
        let el = element(
            r#"{"type": "arrow", "start": "a", "end": "b",
                "startArrowhead": "dot", "endSide": "left"}"#,
        );
        let Element::Arrow(arrow) = el else {
            panic!("expected arrow");
        };
        assert_eq!(arrow.start_arrowhead, Some(Arrowhead::Dot));
        assert_eq!(arrow.end_arrowhead, None);
        assert_eq!(arrow.end_side, Some(Side::Left));
    }

    #[test]
    fn test_null_arrowhead_reads_as_none() {
        let el = element(r#"{"type": "arrow", "start": "a", "end": "b", "endArrowhead": null}"#);
        let Element::Arrow(arrow) = el else {
            panic!("expected arrow");
        };
        assert_eq!(arrow.end_arrowhead, None);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<Element, _> = serde_json::from_str(r#"{"type": "star"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown element type 'star'"), "{}", err);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Element, _> =
            serde_json::from_str(r#"{"type": "rectangle", "radius": 4}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_text_requires_text_field() {
        let result: Result<Element, _> = serde_json::from_str(r#"{"type": "text"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_font_family_css_mapping() {
        assert_eq!(FontFamily::Hand.css(), "Virgil, Segoe UI Emoji, sans-serif");
        assert_eq!(FontFamily::Normal.css(), "Arial, Helvetica, sans-serif");
        assert_eq!(FontFamily::Code.css(), "Courier New, monospace");
    }

    #[test]
    fn test_fill_style_kebab_case() {
        let style: Style = serde_json::from_str(r#"{"fillStyle": "cross-hatch"}"#).unwrap();
        assert_eq!(style.fill_style, Some(FillStyle::CrossHatch));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.background, "#ffffff");
        assert_eq!(config.padding, 20.0);
    }

    #[test]
    fn test_config_partial_override() {
        let config: Config = serde_json::from_str(r#"{"padding": 0}"#).unwrap();
        assert_eq!(config.background, "#ffffff");
        assert_eq!(config.padding, 0.0);
    }
}
