use egui::{pos2, vec2, Color32, Pos2};

use crate::shape::{DrawableShape, ShapeKind};
use crate::tool::{BrushShape, ToolMode, ToolState};

/// Transient pointer-drag state. One stroke runs from press to release and
/// produces zero or more committed shapes; nothing here is persisted.
#[derive(Debug, Default)]
pub struct StrokeTracker {
    active: bool,
    last_point: Option<Pos2>,
}

impl StrokeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drag started: forget any previous point so the first sample of this
    /// stroke produces no shape.
    pub fn begin(&mut self) {
        self.active = true;
        self.last_point = None;
    }

    /// Drag ended.
    pub fn end(&mut self) {
        self.active = false;
        self.last_point = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed one drag-move sample, returning the mark to commit, if any.
    ///
    /// The previous point advances on every sample, including the first of
    /// a drag, which only seeds it. Samples outside an active drag are
    /// ignored entirely.
    pub fn sample(
        &mut self,
        point: Pos2,
        tools: &ToolState,
        background: Color32,
    ) -> Option<DrawableShape> {
        if !self.active {
            return None;
        }
        let shape = self
            .last_point
            .map(|last| make_shape(last, point, tools, background));
        self.last_point = Some(point);
        shape
    }
}

fn make_shape(last: Pos2, point: Pos2, tools: &ToolState, background: Color32) -> DrawableShape {
    let width = tools.brush_size() as f32;
    match tools.mode() {
        ToolMode::Brush => match tools.brush_shape() {
            BrushShape::Circle => DrawableShape::new(
                ShapeKind::FreehandSegment,
                last,
                point,
                width,
                tools.color(),
            ),
            BrushShape::Rectangle => {
                DrawableShape::new(ShapeKind::Rectangle, last, point, width, tools.color())
            }
            BrushShape::Square => {
                // Side length comes from the horizontal delta alone.
                let side = (point.x - last.x).abs();
                DrawableShape::new(
                    ShapeKind::Square,
                    last,
                    pos2(last.x + side, last.y + side),
                    width,
                    tools.color(),
                )
            }
        },
        // The eraser ignores the brush shape: a square patch of background
        // color centered on the sample, half-extent twice the brush size.
        ToolMode::Eraser => {
            let half = (tools.brush_size() * 2) as f32;
            DrawableShape::new(
                ShapeKind::EraserPatch,
                point - vec2(half, half),
                point + vec2(half, half),
                0.0,
                background,
            )
        }
    }
}
