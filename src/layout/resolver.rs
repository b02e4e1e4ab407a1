//! Coordinate resolver: relative tree positions to absolute coordinates
//!
//! Walks the element tree once, accumulating parent offsets, and produces the
//! id-indexed lookup used for arrow anchor resolution. Pure function of its
//! inputs; the lookup is read-only for the rest of the render.

use crate::model::{Element, TEXT_PLACEHOLDER_HEIGHT, TEXT_PLACEHOLDER_WIDTH};

use super::types::{ElementLookup, ResolvedElement};

/// Resolve every element's absolute position, returning the id lookup.
///
/// Children are resolved depth-first with their parent's absolute origin as
/// the new offset, so an element nested N levels deep ends up at the sum of
/// all N+1 relative offsets.
pub fn resolve(elements: &[Element], parent_x: f64, parent_y: f64) -> ElementLookup<'_> {
    let mut lookup = ElementLookup::new();
    resolve_into(elements, parent_x, parent_y, &mut lookup);
    lookup
}

fn resolve_into<'a>(
    elements: &'a [Element],
    parent_x: f64,
    parent_y: f64,
    lookup: &mut ElementLookup<'a>,
) {
    for element in elements {
        let absolute_x = parent_x + element.x();
        let absolute_y = parent_y + element.y();

        // Lines and arrows carry no extent of their own; text gets a
        // placeholder since true bounds depend on rendering.
        let (width, height) = match element {
            Element::Shape(shape) => (shape.width(), shape.height()),
            Element::Text(_) => (TEXT_PLACEHOLDER_WIDTH, TEXT_PLACEHOLDER_HEIGHT),
            Element::Line(_) | Element::Arrow(_) => (0.0, 0.0),
        };

        if let Some(id) = element.id() {
            lookup.insert(
                id.to_string(),
                ResolvedElement {
                    element,
                    absolute_x,
                    absolute_y,
                    absolute_width: width,
                    absolute_height: height,
                },
            );
        }

        if let Element::Shape(shape) = element {
            resolve_into(&shape.children, absolute_x, absolute_y, lookup);
        }
    }
}
