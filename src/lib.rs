//! Handraw - hand-drawn-style diagrams from declarative JSON
//!
//! This library validates a JSON diagram document, resolves its layout
//! (absolute coordinates, bounding box, fit-to-canvas transform, arrow
//! connection points), and draws it through a pluggable canvas backend.
//! The built-in backend emits SVG.
//!
//! # Example
//!
//! ```rust
//! use handraw::render;
//!
//! let svg = render(r#"{"elements": [{"type": "rectangle", "label": "hi"}]}"#).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod layout;
pub mod model;
pub mod render;
pub mod schema;

pub use model::{Config, Diagram, Element};
pub use render::backend::{SketchBackend, Surface};
pub use render::svg::SvgCanvas;
pub use schema::{parse_config, parse_diagram, SchemaError, Violation};

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Diagram configuration (background, padding)
    pub config: Config,
    /// Output canvas width in pixels
    pub width: u32,
    /// Output canvas height in pixels
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            config: Config::default(),
            width: 800,
            height: 600,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diagram configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the output canvas size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Render a JSON diagram document to SVG with default configuration
///
/// This is the main entry point for the library. It validates the document,
/// resolves layout, and draws onto an SVG canvas.
///
/// # Example
///
/// ```rust
/// use handraw::render;
///
/// let svg = render(r#"{
///     "elements": [
///         {"id": "a", "type": "rectangle", "x": 0, "y": 0},
///         {"id": "b", "type": "ellipse", "x": 200, "y": 0},
///         {"type": "arrow", "start": "a", "end": "b"}
///     ]
/// }"#).unwrap();
///
/// assert!(svg.contains("<svg"));
/// assert!(svg.contains("<ellipse"));
/// ```
pub fn render(input: &str) -> Result<String, SchemaError> {
    render_with_config(input, RenderConfig::default())
}

/// Render a JSON diagram document to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use handraw::{render_with_config, Config, RenderConfig};
///
/// let config = RenderConfig::new()
///     .with_size(400, 300)
///     .with_config(Config {
///         background: "#fdf6e3".to_string(),
///         padding: 40.0,
///     });
///
/// let svg = render_with_config(r#"{"elements": []}"#, config).unwrap();
/// assert!(svg.contains(r#"width="400""#));
/// ```
pub fn render_with_config(input: &str, config: RenderConfig) -> Result<String, SchemaError> {
    let diagram = schema::parse_diagram(input)?;
    let mut canvas = SvgCanvas::new(config.width, config.height);
    render::draw_diagram(&mut canvas, &diagram, &config.config, config.width, config.height);
    Ok(canvas.to_svg())
}

/// Render a JSON diagram document onto a caller-supplied canvas
///
/// Use this to target a backend other than the built-in SVG one, e.g. a
/// sketchy raster canvas. The canvas decides what `to_image_bytes` produces.
pub fn render_to_canvas<C>(input: &str, config: RenderConfig, canvas: &mut C) -> Result<(), SchemaError>
where
    C: SketchBackend + Surface,
{
    let diagram = schema::parse_diagram(input)?;
    render::draw_diagram(canvas, &diagram, &config.config, config.width, config.height);
    Ok(())
}
