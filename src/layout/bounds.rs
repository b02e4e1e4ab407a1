//! Bounding-box calculator
//!
//! Computes the minimal enclosing rectangle of the whole diagram by folding
//! every element's extent into a running min/max. Shape positions are
//! re-derived from relative coordinates along the same recursion as the
//! resolver; the lookup is consulted only to resolve arrow anchors, whose
//! entire rectangles are folded in.

use crate::model::{Element, DEFAULT_FONT_SIZE};

use super::types::{BoundingBox, ElementLookup};

/// Per-character width factor of the coarse text approximation
const TEXT_WIDTH_FACTOR: f64 = 0.6;
/// Line-height factor of the coarse text approximation
const TEXT_HEIGHT_FACTOR: f64 = 1.2;

struct Extent {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Extent {
    fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    fn fold_point(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn fold_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.fold_point(x, y);
        self.fold_point(x + width, y + height);
    }

    fn finish(self) -> BoundingBox {
        // A traversal that touched no coordinates yields the defined default.
        if self.min_x.is_infinite() {
            return BoundingBox::empty_diagram();
        }
        BoundingBox::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Compute the minimal enclosing rectangle of `elements`.
///
/// Unresolved arrow anchors contribute nothing here; the diagnostic for them
/// is emitted at draw time.
pub fn compute_bounding_box(
    elements: &[Element],
    lookup: &ElementLookup<'_>,
    parent_x: f64,
    parent_y: f64,
) -> BoundingBox {
    let mut extent = Extent::new();
    for element in elements {
        fold_element(element, lookup, parent_x, parent_y, &mut extent);
    }
    extent.finish()
}

fn fold_element(
    element: &Element,
    lookup: &ElementLookup<'_>,
    parent_x: f64,
    parent_y: f64,
    extent: &mut Extent,
) {
    let x = parent_x + element.x();
    let y = parent_y + element.y();

    match element {
        Element::Line(line) => {
            for [px, py] in &line.points {
                extent.fold_point(x + px, y + py);
            }
        }
        Element::Arrow(arrow) => {
            for anchor_id in [&arrow.start, &arrow.end] {
                if let Some(anchor) = lookup.get(anchor_id) {
                    extent.fold_rect(
                        anchor.absolute_x,
                        anchor.absolute_y,
                        anchor.absolute_width,
                        anchor.absolute_height,
                    );
                }
            }
        }
        Element::Text(text) => {
            let font_size = text.font_size.unwrap_or(DEFAULT_FONT_SIZE);
            let width = text.text.chars().count() as f64 * font_size * TEXT_WIDTH_FACTOR;
            let height = font_size * TEXT_HEIGHT_FACTOR;
            extent.fold_rect(x, y, width, height);
        }
        Element::Shape(shape) => {
            extent.fold_rect(x, y, shape.width(), shape.height());
            for child in &shape.children {
                fold_element(child, lookup, x, y, extent);
            }
        }
    }
}
