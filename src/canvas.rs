use std::collections::HashMap;

use egui::{pos2, vec2, Color32, Context, Painter, Pos2, Rect, TextureHandle, TextureOptions};
use image::RgbaImage;

use crate::raster;
use crate::shape::{DrawableShape, ShapeId};

/// A raster image loaded from disk, drawn as a single flattened layer
/// behind the shape sequence. It is not decomposable into shapes and does
/// not participate in undo/redo.
pub struct BackgroundImage {
    pixels: RgbaImage,
    texture: Option<TextureHandle>,
}

impl BackgroundImage {
    fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            texture: None,
        }
    }

    pub fn size(&self) -> [u32; 2] {
        [self.pixels.width(), self.pixels.height()]
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Upload the pixels once, on first draw.
    fn ensure_texture(&mut self, ctx: &Context) {
        if self.texture.is_none() {
            let size = [self.pixels.width() as usize, self.pixels.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, self.pixels.as_raw());
            self.texture =
                Some(ctx.load_texture("canvas_background", color_image, TextureOptions::LINEAR));
        }
    }
}

/// The drawing surface: the ordered sequence of visible shapes (insertion
/// order is z-order, later on top), the hidden store of undone shapes, and
/// the optional flattened background image.
pub struct Canvas {
    size: [u32; 2],
    background_color: Color32,
    background: Option<BackgroundImage>,
    visible: Vec<DrawableShape>,
    hidden: HashMap<ShapeId, DrawableShape>,
}

impl Canvas {
    pub fn new(size: [u32; 2], background_color: Color32) -> Self {
        Self {
            size,
            background_color,
            background: None,
            visible: Vec::new(),
            hidden: HashMap::new(),
        }
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    /// The currently visible shapes, bottom to top.
    pub fn shapes(&self) -> &[DrawableShape] {
        &self.visible
    }

    pub fn find_shape(&self, id: ShapeId) -> Option<&DrawableShape> {
        self.visible.iter().find(|shape| shape.id() == id)
    }

    /// Take ownership of a committed shape and append it to the visible
    /// sequence.
    pub fn add_shape(&mut self, shape: DrawableShape) -> ShapeId {
        let id = shape.id();
        self.visible.push(shape);
        id
    }

    /// Move a shape out of the visible sequence, keeping it for redo.
    pub fn hide_shape(&mut self, id: ShapeId) {
        if let Some(index) = self.visible.iter().position(|shape| shape.id() == id) {
            let shape = self.visible.remove(index);
            self.hidden.insert(id, shape);
        }
    }

    /// Restore a hidden shape at the end of the visible sequence. Undo
    /// always hides the most recent commit, so appending puts the shape
    /// back where it was.
    pub fn show_shape(&mut self, id: ShapeId) {
        if let Some(shape) = self.hidden.remove(&id) {
            self.visible.push(shape);
        }
    }

    /// Empty the canvas: visible shapes, hidden shapes, and any loaded
    /// background image.
    pub fn remove_all_shapes(&mut self) {
        self.visible.clear();
        self.hidden.clear();
        self.background = None;
    }

    /// Install a decoded image as the flattened background layer, anchored
    /// at the canvas origin.
    pub fn set_background(&mut self, pixels: RgbaImage) {
        self.background = Some(BackgroundImage::new(pixels));
    }

    /// Rasterize the whole canvas into an RGBA frame.
    pub fn render_full_image(&self) -> RgbaImage {
        raster::render(self)
    }

    /// Paint the canvas into `painter`, with the model origin at `origin`.
    pub fn draw(&mut self, ctx: &Context, painter: &Painter, origin: Pos2) {
        let offset = origin.to_vec2();
        let canvas_rect =
            Rect::from_min_size(origin, vec2(self.size[0] as f32, self.size[1] as f32));
        painter.rect_filled(canvas_rect, 0.0, self.background_color);

        if let Some(background) = &mut self.background {
            background.ensure_texture(ctx);
            let [w, h] = background.size();
            if let Some(texture) = &background.texture {
                painter.image(
                    texture.id(),
                    Rect::from_min_size(origin, vec2(w as f32, h as f32)),
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
        }

        for shape in &self.visible {
            shape.draw(painter, offset);
        }
    }
}
