//! Fit-and-center transform
//!
//! Derives the uniform scale and translation that map the diagram's bounding
//! box into the padded output canvas. The scale is never anisotropic.

use super::types::{BoundingBox, FitTransform};

/// Compute the shared affine transform for the whole scene.
///
/// A zero-dimension box axis contributes no constraint: its ratio is skipped
/// and the other axis decides the scale, or the scale falls back to 1 when
/// both axes are degenerate. This keeps the result finite for empty or
/// collinear diagrams.
pub fn compute_fit(
    bounds: &BoundingBox,
    output_width: f64,
    output_height: f64,
    padding: f64,
) -> FitTransform {
    let available_width = output_width - 2.0 * padding;
    let available_height = output_height - 2.0 * padding;

    let ratio_x = (bounds.width > 0.0).then(|| available_width / bounds.width);
    let ratio_y = (bounds.height > 0.0).then(|| available_height / bounds.height);
    let scale = match (ratio_x, ratio_y) {
        (Some(rx), Some(ry)) => rx.min(ry),
        (Some(rx), None) => rx,
        (None, Some(ry)) => ry,
        (None, None) => 1.0,
    };

    FitTransform {
        scale,
        offset_x: (output_width - bounds.width * scale) / (2.0 * scale) - bounds.min_x,
        offset_y: (output_height - bounds.height * scale) / (2.0 * scale) - bounds.min_y,
    }
}
