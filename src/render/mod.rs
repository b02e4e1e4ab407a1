//! Drawing pass
//!
//! Walks the element tree and issues primitives to a backend, applying the
//! fit transform to every coordinate. Arrows are collected during the walk
//! (at any nesting depth) and drawn after all other elements so connectors
//! always sit on top. Surface transform and alpha mutations are paired with
//! their restore on every exit path.

pub mod backend;
pub mod recording;
pub mod style;
pub mod svg;

use std::f64::consts::PI;

use log::warn;

use crate::layout::{
    self, connection_point, ElementLookup, FitTransform, Point, ResolvedElement,
};
use crate::model::{
    Arrowhead, ArrowElement, Config, Diagram, Element, FontFamily, LineElement, ShapeElement,
    ShapeKind, Side, Style, TextAlign, TextElement, DEFAULT_FONT_SIZE,
};

use backend::{RenderOptions, SketchBackend, Surface, TextBaseline};

/// Arrowhead size in output pixels (screen space, not diagram space)
const ARROWHEAD_SIZE: f64 = 10.0;
/// Font size for shape labels, in diagram units
const LABEL_FONT_SIZE: f64 = DEFAULT_FONT_SIZE;
/// Font size for arrow labels, in diagram units
const ARROW_LABEL_FONT_SIZE: f64 = 14.0;
/// Distance a shape label sits below the top edge of a labeled container
const CONTAINER_LABEL_INSET: f64 = 8.0;
/// Distance an arrow label sits above its line
const ARROW_LABEL_OFFSET: f64 = 5.0;

/// Draw a complete diagram onto `canvas`.
///
/// Resolves coordinates, computes the bounding box and fit transform, fills
/// the background, then draws every element. Dangling arrow references are
/// skipped with a warning; everything else still renders.
pub fn draw_diagram<C>(canvas: &mut C, diagram: &Diagram, config: &Config, width: u32, height: u32)
where
    C: SketchBackend + Surface,
{
    canvas.set_fill_style(&config.background);
    canvas.fill_rect(0.0, 0.0, width as f64, height as f64);

    let lookup = layout::resolve(&diagram.elements, 0.0, 0.0);
    let bounds = layout::compute_bounding_box(&diagram.elements, &lookup, 0.0, 0.0);
    let fit = layout::compute_fit(&bounds, width as f64, height as f64, config.padding);

    let mut arrows = Vec::new();
    draw_elements(canvas, &diagram.elements, 0.0, 0.0, fit, &lookup, &mut arrows);
    for arrow in arrows {
        draw_arrow(canvas, arrow, fit, &lookup);
    }
}

fn draw_elements<'a, C>(
    canvas: &mut C,
    elements: &'a [Element],
    offset_x: f64,
    offset_y: f64,
    fit: FitTransform,
    lookup: &ElementLookup<'_>,
    arrows: &mut Vec<&'a ArrowElement>,
) where
    C: SketchBackend + Surface,
{
    for element in elements {
        match element {
            Element::Shape(shape) => {
                draw_shape(canvas, shape, offset_x, offset_y, fit, lookup, arrows)
            }
            Element::Text(text) => draw_text(canvas, text, offset_x, offset_y, fit),
            Element::Line(line) => draw_line(canvas, line, offset_x, offset_y, fit),
            Element::Arrow(arrow) => arrows.push(arrow),
        }
    }
}

fn draw_shape<'a, C>(
    canvas: &mut C,
    shape: &'a ShapeElement,
    offset_x: f64,
    offset_y: f64,
    fit: FitTransform,
    lookup: &ElementLookup<'_>,
    arrows: &mut Vec<&'a ArrowElement>,
) where
    C: SketchBackend + Surface,
{
    let local_x = offset_x + shape.x.unwrap_or(0.0);
    let local_y = offset_y + shape.y.unwrap_or(0.0);
    let (x, y) = fit.apply(local_x, local_y);
    let width = fit.scale_len(shape.width());
    let height = fit.scale_len(shape.height());
    let options = style::resolve_style(shape.style.as_ref());

    canvas.set_global_alpha(style::alpha(shape.style.as_ref()));

    let rotation = shape.rotation.unwrap_or(0.0);
    if rotation != 0.0 {
        let cx = x + width / 2.0;
        let cy = y + height / 2.0;
        canvas.save();
        canvas.translate(cx, cy);
        canvas.rotate(rotation * PI / 180.0);
        canvas.translate(-cx, -cy);
    }

    match shape.kind {
        ShapeKind::Rectangle => {
            let corner_radius = fit.scale_len(shape.corner_radius.unwrap_or(0.0));
            if corner_radius > 0.0 {
                canvas.path(&rounded_rect_path(x, y, width, height, corner_radius), &options);
            } else {
                canvas.rectangle(x, y, width, height, &options);
            }
        }
        ShapeKind::Ellipse => {
            canvas.ellipse(x + width / 2.0, y + height / 2.0, width, height, &options)
        }
        ShapeKind::Diamond => {
            let points = [
                Point::new(x + width / 2.0, y),
                Point::new(x + width, y + height / 2.0),
                Point::new(x + width / 2.0, y + height),
                Point::new(x, y + height / 2.0),
            ];
            canvas.polygon(&points, &options);
        }
        // Containers draw nothing themselves, only their children.
        ShapeKind::Container => {}
    }

    if let Some(label) = &shape.label {
        if shape.kind != ShapeKind::Container {
            canvas.set_font(fit.scale_len(LABEL_FONT_SIZE), FontFamily::Hand.css());
            canvas.set_fill_style(&style::stroke_color(shape.style.as_ref()));
            canvas.set_text_align(TextAlign::Center);
            if shape.children.is_empty() {
                canvas.set_text_baseline(TextBaseline::Middle);
                canvas.fill_text(label, x + width / 2.0, y + height / 2.0);
            } else {
                // With children inside, the label moves to the top edge.
                canvas.set_text_baseline(TextBaseline::Top);
                canvas.fill_text(
                    label,
                    x + width / 2.0,
                    y + fit.scale_len(CONTAINER_LABEL_INSET),
                );
            }
        }
    }

    if rotation != 0.0 {
        canvas.restore();
    }
    canvas.set_global_alpha(1.0);

    draw_elements(canvas, &shape.children, local_x, local_y, fit, lookup, arrows);
}

fn draw_text<C>(canvas: &mut C, text: &TextElement, offset_x: f64, offset_y: f64, fit: FitTransform)
where
    C: SketchBackend + Surface,
{
    let (x, y) = fit.apply(offset_x + text.x.unwrap_or(0.0), offset_y + text.y.unwrap_or(0.0));
    let font_size = fit.scale_len(text.font_size());

    canvas.set_global_alpha(style::alpha(text.style.as_ref()));
    canvas.set_font(font_size, text.font_family.unwrap_or_default().css());
    canvas.set_fill_style(&style::stroke_color(text.style.as_ref()));
    canvas.set_text_align(text.text_align.unwrap_or_default());
    canvas.set_text_baseline(TextBaseline::Top);

    match text.rotation {
        Some(degrees) if degrees != 0.0 => {
            canvas.save();
            canvas.translate(x, y);
            canvas.rotate(degrees * PI / 180.0);
            canvas.fill_text(&text.text, 0.0, 0.0);
            canvas.restore();
        }
        _ => canvas.fill_text(&text.text, x, y),
    }

    canvas.set_global_alpha(1.0);
}

fn draw_line<C>(canvas: &mut C, line: &LineElement, offset_x: f64, offset_y: f64, fit: FitTransform)
where
    C: SketchBackend + Surface,
{
    let (base_x, base_y) = fit.apply(offset_x + line.x.unwrap_or(0.0), offset_y + line.y.unwrap_or(0.0));
    let points: Vec<Point> = line
        .points
        .iter()
        .map(|[px, py]| Point::new(base_x + fit.scale_len(*px), base_y + fit.scale_len(*py)))
        .collect();

    canvas.set_global_alpha(style::alpha(line.style.as_ref()));
    canvas.linear_path(&points, &style::resolve_style(line.style.as_ref()));
    canvas.set_global_alpha(1.0);
}

fn draw_arrow<C>(canvas: &mut C, arrow: &ArrowElement, fit: FitTransform, lookup: &ElementLookup<'_>)
where
    C: SketchBackend + Surface,
{
    let Some(start_el) = lookup.get(&arrow.start) else {
        warn_dangling(arrow, "start", &arrow.start);
        return;
    };
    let Some(end_el) = lookup.get(&arrow.end) else {
        warn_dangling(arrow, "end", &arrow.end);
        return;
    };

    // Each endpoint picks its side against the other endpoint's center.
    let start_point = attach(start_el, arrow.start_side, end_el.center());
    let end_point = attach(end_el, arrow.end_side, start_el.center());

    let Point { x: sx, y: sy } = fit.apply_point(start_point);
    let Point { x: ex, y: ey } = fit.apply_point(end_point);

    canvas.set_global_alpha(style::alpha(arrow.style.as_ref()));

    let options = style::resolve_style(arrow.style.as_ref());
    canvas.line(sx, sy, ex, ey, &options);

    let angle = (ey - sy).atan2(ex - sx);
    draw_arrowhead(canvas, sx, sy, angle + PI, arrow.start_arrowhead, arrow.style.as_ref());
    draw_arrowhead(
        canvas,
        ex,
        ey,
        angle,
        Some(arrow.end_arrowhead.unwrap_or(Arrowhead::Arrow)),
        arrow.style.as_ref(),
    );

    if let Some(label) = &arrow.label {
        let mid_x = (sx + ex) / 2.0;
        let mid_y = (sy + ey) / 2.0;
        canvas.set_font(fit.scale_len(ARROW_LABEL_FONT_SIZE), FontFamily::Hand.css());
        canvas.set_fill_style(&style::stroke_color(arrow.style.as_ref()));
        canvas.set_text_align(TextAlign::Center);
        canvas.set_text_baseline(TextBaseline::Bottom);

        // Nudge the label perpendicular to the line, above it.
        let offset = fit.scale_len(ARROW_LABEL_OFFSET);
        let perp = angle - PI / 2.0;
        canvas.fill_text(
            label,
            mid_x + perp.cos() * offset,
            mid_y + perp.sin() * offset,
        );
    }

    canvas.set_global_alpha(1.0);
}

fn attach(anchor: &ResolvedElement<'_>, side: Option<Side>, target: Point) -> Point {
    connection_point(anchor, side.unwrap_or(Side::Auto), Some(target))
}

fn warn_dangling(arrow: &ArrowElement, which: &str, missing: &str) {
    warn!(
        "arrow '{}' references unknown {} element '{}'",
        arrow.id.as_deref().unwrap_or("unnamed"),
        which,
        missing
    );
}

fn draw_arrowhead<C>(
    canvas: &mut C,
    x: f64,
    y: f64,
    angle: f64,
    head: Option<Arrowhead>,
    arrow_style: Option<&Style>,
) where
    C: SketchBackend + Surface,
{
    let Some(head) = head else { return };
    let size = ARROWHEAD_SIZE;
    let options = style::resolve_style(arrow_style);

    canvas.save();
    canvas.translate(x, y);
    canvas.rotate(angle);

    match head {
        Arrowhead::Arrow => {
            canvas.line(-size, -size / 2.0, 0.0, 0.0, &options);
            canvas.line(-size, size / 2.0, 0.0, 0.0, &options);
        }
        Arrowhead::Dot => {
            let mut filled = options.clone();
            filled.fill = Some(filled.stroke.clone());
            canvas.circle(0.0, 0.0, size / 2.0, &filled);
        }
        Arrowhead::Bar => canvas.line(0.0, -size / 2.0, 0.0, size / 2.0, &options),
    }

    canvas.restore();
}

/// SVG path data for a rectangle with rounded corners
fn rounded_rect_path(x: f64, y: f64, width: f64, height: f64, radius: f64) -> String {
    let right = x + width;
    let bottom = y + height;
    format!(
        "M {} {} L {} {} Q {} {} {} {} L {} {} Q {} {} {} {} L {} {} Q {} {} {} {} L {} {} Q {} {} {} {} Z",
        x + radius, y,
        right - radius, y,
        right, y, right, y + radius,
        right, bottom - radius,
        right, bottom, right - radius, bottom,
        x + radius, bottom,
        x, bottom, x, bottom - radius,
        x, y + radius,
        x, y, x + radius, y,
    )
}
