//! Drawing collaborator contracts
//!
//! The layout core never draws pixels itself. It issues primitives through
//! two traits: [`SketchBackend`] for stroke-rendered primitives (the slot a
//! hand-drawn/rough renderer plugs into) and [`Surface`] for raster-surface
//! state and text. A backend implements both; [`crate::render::svg::SvgCanvas`]
//! is the shipped reference implementation.

use crate::layout::Point;
use crate::model::{FillStyle, TextAlign};

/// Resolved drawing options passed with every sketch primitive.
///
/// `roughness` and `fill_style` are carried through unchanged for backends
/// that render sketchy strokes and patterned fills; plain backends may treat
/// any fill as solid.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Fill color; `None` means no fill at all
    pub fill: Option<String>,
    pub stroke: String,
    pub stroke_width: f64,
    pub roughness: f64,
    pub fill_style: FillStyle,
    /// Dash pattern as (dash, gap); `None` means a solid stroke
    pub stroke_line_dash: Option<[f64; 2]>,
}

/// Vertical text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// Primitive vocabulary of the stroke renderer
pub trait SketchBackend {
    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64, options: &RenderOptions);
    /// Ellipse given by center and full extents
    fn ellipse(&mut self, cx: f64, cy: f64, width: f64, height: f64, options: &RenderOptions);
    fn polygon(&mut self, points: &[Point], options: &RenderOptions);
    /// SVG path data; used only for rounded rectangles
    fn path(&mut self, svg_path: &str, options: &RenderOptions);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, options: &RenderOptions);
    /// Open polyline through `points`
    fn linear_path(&mut self, points: &[Point], options: &RenderOptions);
    fn circle(&mut self, cx: f64, cy: f64, radius: f64, options: &RenderOptions);
}

/// Raster-surface state machine: transform, alpha, font, and text output.
///
/// `save`/`restore` follow canvas stack discipline; the draw pass pairs them
/// on every exit path so sibling elements never observe leaked state.
pub trait Surface {
    fn set_fill_style(&mut self, color: &str);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, radians: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn set_font(&mut self, size: f64, family: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn set_global_alpha(&mut self, alpha: f64);
    /// Encode the finished surface (format is the backend's concern)
    fn to_image_bytes(&self) -> Vec<u8>;
}
