//! Connection-point resolver
//!
//! Given an anchor element and a side (explicit or `auto`), computes the
//! exact boundary coordinate a connector attaches to. Invoked once per arrow
//! endpoint with the other endpoint's center as the target, so the two sides
//! are chosen independently.

use crate::model::Side;

use super::types::{Point, ResolvedElement};

/// Compute the attachment point on `resolved`'s boundary.
///
/// Explicit sides pick the midpoint of that edge. `auto` with a target picks
/// the edge facing the target: horizontal when |dx| > |dy|, vertical
/// otherwise (ties resolve vertical). `auto` without a target returns the
/// center.
pub fn connection_point(
    resolved: &ResolvedElement<'_>,
    side: Side,
    target: Option<Point>,
) -> Point {
    let x = resolved.absolute_x;
    let y = resolved.absolute_y;
    let width = resolved.absolute_width;
    let height = resolved.absolute_height;
    let center = resolved.center();

    match side {
        Side::Top => Point::new(center.x, y),
        Side::Bottom => Point::new(center.x, y + height),
        Side::Left => Point::new(x, center.y),
        Side::Right => Point::new(x + width, center.y),
        Side::Auto => {
            let Some(target) = target else {
                return center;
            };
            let dx = target.x - center.x;
            let dy = target.y - center.y;
            if dx.abs() > dy.abs() {
                if dx > 0.0 {
                    Point::new(x + width, center.y)
                } else {
                    Point::new(x, center.y)
                }
            } else if dy > 0.0 {
                Point::new(center.x, y + height)
            } else {
                Point::new(center.x, y)
            }
        }
    }
}
