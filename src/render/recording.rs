//! Command-recording canvas
//!
//! Records every backend call instead of producing pixels. Tests assert on
//! the command log: ordering (z-order, save/restore pairing), geometry, and
//! state changes are all observable without decoding an image.

use crate::layout::Point;
use crate::model::TextAlign;

use super::backend::{RenderOptions, SketchBackend, Surface, TextBaseline};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        options: RenderOptions,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
        options: RenderOptions,
    },
    Polygon {
        points: Vec<Point>,
        options: RenderOptions,
    },
    Path {
        data: String,
        options: RenderOptions,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        options: RenderOptions,
    },
    LinearPath {
        points: Vec<Point>,
        options: RenderOptions,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        options: RenderOptions,
    },
    SetFillStyle(String),
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Translate {
        dx: f64,
        dy: f64,
    },
    Rotate {
        radians: f64,
    },
    Save,
    Restore,
    SetFont {
        size: f64,
        family: String,
    },
    SetTextAlign(TextAlign),
    SetTextBaseline(TextBaseline),
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
    SetGlobalAlpha(f64),
}

/// A backend that appends every call to `commands`
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands that draw sketch primitives (ignoring surface state changes)
    pub fn primitives(&self) -> Vec<&DrawCommand> {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::Rectangle { .. }
                        | DrawCommand::Ellipse { .. }
                        | DrawCommand::Polygon { .. }
                        | DrawCommand::Path { .. }
                        | DrawCommand::Line { .. }
                        | DrawCommand::LinearPath { .. }
                        | DrawCommand::Circle { .. }
                )
            })
            .collect()
    }
}

impl SketchBackend for RecordingCanvas {
    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64, options: &RenderOptions) {
        self.commands.push(DrawCommand::Rectangle {
            x,
            y,
            width,
            height,
            options: options.clone(),
        });
    }

    fn ellipse(&mut self, cx: f64, cy: f64, width: f64, height: f64, options: &RenderOptions) {
        self.commands.push(DrawCommand::Ellipse {
            cx,
            cy,
            width,
            height,
            options: options.clone(),
        });
    }

    fn polygon(&mut self, points: &[Point], options: &RenderOptions) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            options: options.clone(),
        });
    }

    fn path(&mut self, svg_path: &str, options: &RenderOptions) {
        self.commands.push(DrawCommand::Path {
            data: svg_path.to_string(),
            options: options.clone(),
        });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, options: &RenderOptions) {
        self.commands.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            options: options.clone(),
        });
    }

    fn linear_path(&mut self, points: &[Point], options: &RenderOptions) {
        self.commands.push(DrawCommand::LinearPath {
            points: points.to_vec(),
            options: options.clone(),
        });
    }

    fn circle(&mut self, cx: f64, cy: f64, radius: f64, options: &RenderOptions) {
        self.commands.push(DrawCommand::Circle {
            cx,
            cy,
            radius,
            options: options.clone(),
        });
    }
}

impl Surface for RecordingCanvas {
    fn set_fill_style(&mut self, color: &str) {
        self.commands.push(DrawCommand::SetFillStyle(color.to_string()));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn rotate(&mut self, radians: f64) {
        self.commands.push(DrawCommand::Rotate { radians });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_font(&mut self, size: f64, family: &str) {
        self.commands.push(DrawCommand::SetFont {
            size,
            family: family.to_string(),
        });
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.commands.push(DrawCommand::SetTextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.commands.push(DrawCommand::SetTextBaseline(baseline));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::SetGlobalAlpha(alpha));
    }

    fn to_image_bytes(&self) -> Vec<u8> {
        // A recording canvas has no image; tests read `commands` directly.
        Vec::new()
    }
}
