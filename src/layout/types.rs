//! Core types for layout resolution

use std::collections::HashMap;

use crate::model::Element;

/// A 2D point in diagram space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The minimal enclosing rectangle of a diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Build a box from its corners; width/height are derived
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// The defined box for an empty diagram
    pub fn empty_diagram() -> Self {
        Self::new(0.0, 0.0, 100.0, 100.0)
    }
}

/// An element paired with its absolute (canvas-space) position and size
#[derive(Debug, Clone, Copy)]
pub struct ResolvedElement<'a> {
    pub element: &'a Element,
    pub absolute_x: f64,
    pub absolute_y: f64,
    pub absolute_width: f64,
    pub absolute_height: f64,
}

impl ResolvedElement<'_> {
    /// Geometric center of the absolute rectangle
    pub fn center(&self) -> Point {
        Point::new(
            self.absolute_x + self.absolute_width / 2.0,
            self.absolute_y + self.absolute_height / 2.0,
        )
    }
}

/// Id-indexed table of resolved elements, built once per render.
/// Duplicate ids overwrite in resolution order (last write wins).
pub type ElementLookup<'a> = HashMap<String, ResolvedElement<'a>>;

/// The single uniform scale + translation applied to every absolute
/// coordinate to center the diagram within the output canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FitTransform {
    /// Map a diagram-space coordinate pair into output pixels
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (self.offset_x + x) * self.scale,
            (self.offset_y + y) * self.scale,
        )
    }

    /// Map a diagram-space point into output pixels
    pub fn apply_point(&self, point: Point) -> Point {
        let (x, y) = self.apply(point.x, point.y);
        Point::new(x, y)
    }

    /// Scale a length (width, height, font size, radius)
    pub fn scale_len(&self, length: f64) -> f64 {
        length * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_derives_extent() {
        let bounds = BoundingBox::new(10.0, 20.0, 110.0, 80.0);
        assert_eq!(bounds.width, 100.0);
        assert_eq!(bounds.height, 60.0);
    }

    #[test]
    fn test_empty_diagram_box() {
        let bounds = BoundingBox::empty_diagram();
        assert_eq!(
            (bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y),
            (0.0, 0.0, 100.0, 100.0)
        );
        assert_eq!((bounds.width, bounds.height), (100.0, 100.0));
    }

    #[test]
    fn test_fit_transform_apply() {
        let fit = FitTransform {
            scale: 2.0,
            offset_x: 5.0,
            offset_y: -5.0,
        };
        assert_eq!(fit.apply(10.0, 10.0), (30.0, 10.0));
        assert_eq!(fit.scale_len(7.0), 14.0);
    }
}
