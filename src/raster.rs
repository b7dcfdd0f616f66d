//! Software rendering of the canvas model into an RGBA frame, used for
//! image export. Keeps to axis-aligned fills; outline and fill always share
//! one color, so stroking a boundary reduces to filling the bounds inflated
//! by half the outline width.

use egui::{Color32, Rect};
use image::{Rgba, RgbaImage};

use crate::canvas::Canvas;
use crate::shape::{DrawableShape, ShapeKind};

/// Render the canvas back to front: background color, background image,
/// then the visible shapes in z-order.
pub fn render(canvas: &Canvas) -> RgbaImage {
    let [width, height] = canvas.size();
    let mut frame = RgbaImage::from_pixel(width, height, to_rgba(canvas.background_color()));

    if let Some(background) = canvas.background() {
        blit(&mut frame, background.pixels());
    }
    for shape in canvas.shapes() {
        draw_shape(&mut frame, shape);
    }
    frame
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_array())
}

/// Copy `src` onto the frame's top-left corner, clipped to the frame.
fn blit(frame: &mut RgbaImage, src: &RgbaImage) {
    let width = src.width().min(frame.width());
    let height = src.height().min(frame.height());
    for y in 0..height {
        for x in 0..width {
            frame.put_pixel(x, y, *src.get_pixel(x, y));
        }
    }
}

fn draw_shape(frame: &mut RgbaImage, shape: &DrawableShape) {
    let bounds = shape.rect().expand(shape.stroke_width() / 2.0);
    match shape.kind() {
        ShapeKind::FreehandSegment => fill_ellipse(frame, bounds, shape.color()),
        ShapeKind::Rectangle | ShapeKind::Square | ShapeKind::EraserPatch => {
            fill_rect(frame, bounds, shape.color());
        }
    }
}

/// Pixel span of `bounds` clipped to the frame, `None` when degenerate.
fn clipped_span(frame: &RgbaImage, bounds: Rect) -> Option<(u32, u32, u32, u32)> {
    let x0 = bounds.min.x.floor().max(0.0) as u32;
    let y0 = bounds.min.y.floor().max(0.0) as u32;
    let x1 = (bounds.max.x.ceil().max(0.0) as u32).min(frame.width());
    let y1 = (bounds.max.y.ceil().max(0.0) as u32).min(frame.height());
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

fn fill_rect(frame: &mut RgbaImage, bounds: Rect, color: Color32) {
    let pixel = to_rgba(color);
    if let Some((x0, y0, x1, y1)) = clipped_span(frame, bounds) {
        for y in y0..y1 {
            for x in x0..x1 {
                frame.put_pixel(x, y, pixel);
            }
        }
    }
}

fn fill_ellipse(frame: &mut RgbaImage, bounds: Rect, color: Color32) {
    let rx = bounds.width() / 2.0;
    let ry = bounds.height() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let center = bounds.center();
    let pixel = to_rgba(color);
    if let Some((x0, y0, x1, y1)) = clipped_span(frame, bounds) {
        for y in y0..y1 {
            for x in x0..x1 {
                // Sample at the pixel center.
                let dx = (x as f32 + 0.5 - center.x) / rx;
                let dy = (y as f32 + 0.5 - center.y) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    frame.put_pixel(x, y, pixel);
                }
            }
        }
    }
}
