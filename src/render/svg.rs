//! Reference SVG canvas
//!
//! Implements both drawing contracts over an SVG document built as strings.
//! Strokes are drawn clean (no sketchy wobble) and patterned fills render as
//! solid fill; `roughness`/`fillStyle` stay available in the options for
//! backends that can honor them. Surface state (transform, alpha, font) is an
//! explicit state machine with a save/restore stack, so the draw pass's
//! canvas-style discipline maps directly onto emitted attributes.

use crate::layout::Point;
use crate::model::TextAlign;

use super::backend::{RenderOptions, SketchBackend, Surface, TextBaseline};

/// 2D affine transform in canvas matrix form (a b c d e f)
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Transform {
    const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(dx: f64, dy: f64) -> Transform {
        Transform {
            e: dx,
            f: dy,
            ..Transform::IDENTITY
        }
    }

    fn rotation(radians: f64) -> Transform {
        let (sin, cos) = radians.sin_cos();
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Post-multiply: the result applies `other` in the current local frame,
    /// matching canvas `translate`/`rotate` semantics.
    fn then(&self, other: Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }
}

#[derive(Debug, Clone)]
struct GraphicsState {
    transform: Transform,
    alpha: f64,
    fill: String,
    font_size: f64,
    font_family: String,
    text_align: TextAlign,
    text_baseline: TextBaseline,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            alpha: 1.0,
            fill: "#000000".to_string(),
            font_size: 10.0,
            font_family: "sans-serif".to_string(),
            text_align: TextAlign::Left,
            text_baseline: TextBaseline::Bottom,
        }
    }
}

/// An SVG document that accepts the full drawing contract
#[derive(Debug)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    body: Vec<String>,
    state: GraphicsState,
    stack: Vec<GraphicsState>,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: vec![],
            state: GraphicsState::default(),
            stack: vec![],
        }
    }

    /// The assembled SVG document
    pub fn to_svg(&self) -> String {
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );
        for element in &self.body {
            out.push('\n');
            out.push_str("  ");
            out.push_str(element);
        }
        out.push_str("\n</svg>\n");
        out
    }

    /// Attributes carried by every emitted element: current transform and
    /// global alpha, omitted when they are at their defaults.
    fn state_attrs(&self) -> String {
        let mut attrs = String::new();
        let t = self.state.transform;
        if t != Transform::IDENTITY {
            attrs.push_str(&format!(
                r#" transform="matrix({} {} {} {} {} {})""#,
                t.a, t.b, t.c, t.d, t.e, t.f
            ));
        }
        if self.state.alpha < 1.0 {
            attrs.push_str(&format!(r#" opacity="{}""#, self.state.alpha));
        }
        attrs
    }

    /// Fill/stroke attributes from sketch options
    fn option_attrs(&self, options: &RenderOptions) -> String {
        let mut attrs = String::new();
        match &options.fill {
            Some(color) => attrs.push_str(&format!(r#" fill="{}""#, escape(color))),
            None => attrs.push_str(r#" fill="none""#),
        }
        attrs.push_str(&format!(
            r#" stroke="{}" stroke-width="{}""#,
            escape(&options.stroke),
            options.stroke_width
        ));
        if let Some([dash, gap]) = options.stroke_line_dash {
            attrs.push_str(&format!(r#" stroke-dasharray="{},{}""#, dash, gap));
        }
        attrs
    }

    fn push_element(&mut self, element: String) {
        self.body.push(element);
    }
}

impl SketchBackend for SvgCanvas {
    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64, options: &RenderOptions) {
        let element = format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
            x,
            y,
            width,
            height,
            self.option_attrs(options),
            self.state_attrs()
        );
        self.push_element(element);
    }

    fn ellipse(&mut self, cx: f64, cy: f64, width: f64, height: f64, options: &RenderOptions) {
        let element = format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}"{}{}/>"#,
            cx,
            cy,
            width / 2.0,
            height / 2.0,
            self.option_attrs(options),
            self.state_attrs()
        );
        self.push_element(element);
    }

    fn polygon(&mut self, points: &[Point], options: &RenderOptions) {
        let points_str = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        let element = format!(
            r#"<polygon points="{}"{}{}/>"#,
            points_str,
            self.option_attrs(options),
            self.state_attrs()
        );
        self.push_element(element);
    }

    fn path(&mut self, svg_path: &str, options: &RenderOptions) {
        let element = format!(
            r#"<path d="{}"{}{}/>"#,
            escape(svg_path),
            self.option_attrs(options),
            self.state_attrs()
        );
        self.push_element(element);
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, options: &RenderOptions) {
        let element = format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}{}/>"#,
            x1,
            y1,
            x2,
            y2,
            self.option_attrs(options),
            self.state_attrs()
        );
        self.push_element(element);
    }

    fn linear_path(&mut self, points: &[Point], options: &RenderOptions) {
        let points_str = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        // Polylines are never filled, whatever the options say.
        let element = format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"{}{}/>"#,
            points_str,
            escape(&options.stroke),
            options.stroke_width,
            options
                .stroke_line_dash
                .map(|[dash, gap]| format!(r#" stroke-dasharray="{},{}""#, dash, gap))
                .unwrap_or_default(),
            self.state_attrs()
        );
        self.push_element(element);
    }

    fn circle(&mut self, cx: f64, cy: f64, radius: f64, options: &RenderOptions) {
        let element = format!(
            r#"<circle cx="{}" cy="{}" r="{}"{}{}/>"#,
            cx,
            cy,
            radius,
            self.option_attrs(options),
            self.state_attrs()
        );
        self.push_element(element);
    }
}

impl Surface for SvgCanvas {
    fn set_fill_style(&mut self, color: &str) {
        self.state.fill = color.to_string();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let element = format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}/>"#,
            x,
            y,
            width,
            height,
            escape(&self.state.fill),
            self.state_attrs()
        );
        self.push_element(element);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self.state.transform.then(Transform::translation(dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.state.transform = self.state.transform.then(Transform::rotation(radians));
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        // Unbalanced restore is a no-op, canvas style.
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_font(&mut self, size: f64, family: &str) {
        self.state.font_size = size;
        self.state.font_family = family.to_string();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let anchor = match self.state.text_align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let baseline = match self.state.text_baseline {
            TextBaseline::Top => r#" dominant-baseline="hanging""#,
            TextBaseline::Middle => r#" dominant-baseline="central""#,
            TextBaseline::Bottom => "",
        };
        let element = format!(
            r#"<text x="{}" y="{}" font-size="{}" font-family="{}" text-anchor="{}"{} fill="{}"{}>{}</text>"#,
            x,
            y,
            self.state.font_size,
            escape(&self.state.font_family),
            anchor,
            baseline,
            escape(&self.state.fill),
            self.state_attrs(),
            escape(text)
        );
        self.push_element(element);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha;
    }

    fn to_image_bytes(&self) -> Vec<u8> {
        self.to_svg().into_bytes()
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
