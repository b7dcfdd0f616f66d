use egui::epaint::EllipseShape;
use egui::{Color32, Painter, Pos2, Rect, Stroke as EguiStroke, Vec2};
use uuid::Uuid;

/// Opaque handle identifying one committed shape.
///
/// History entries reference shapes by id only; the canvas owns the shapes
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// The kinds of marks a drag sample can commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// One elliptical segment of a freehand stroke (circle brush).
    FreehandSegment,
    /// A rectangle spanned by two drag samples.
    Rectangle,
    /// A rectangle forced square, anchored at the previous sample.
    Square,
    /// A background-colored patch painted by the eraser.
    EraserPatch,
}

/// One committed mark on the canvas. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableShape {
    id: ShapeId,
    kind: ShapeKind,
    start: Pos2,
    end: Pos2,
    stroke_width: f32,
    color: Color32,
}

impl DrawableShape {
    pub fn new(kind: ShapeKind, start: Pos2, end: Pos2, stroke_width: f32, color: Color32) -> Self {
        Self {
            id: ShapeId::generate(),
            kind,
            start,
            end,
            stroke_width,
            color,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Bounding rectangle of the mark, in canvas coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_two_pos(self.start, self.end)
    }

    /// Paint the mark, offset so canvas coordinates land at `offset` on
    /// screen. Outline and fill always share the shape's color.
    pub fn draw(&self, painter: &Painter, offset: Vec2) {
        let rect = self.rect().translate(offset);
        match self.kind {
            ShapeKind::FreehandSegment => {
                painter.add(EllipseShape {
                    center: rect.center(),
                    radius: rect.size() / 2.0,
                    fill: self.color,
                    stroke: EguiStroke::new(self.stroke_width, self.color),
                });
            }
            ShapeKind::Rectangle | ShapeKind::Square => {
                painter.rect_filled(rect, 0.0, self.color);
                painter.rect_stroke(rect, 0.0, EguiStroke::new(self.stroke_width, self.color));
            }
            ShapeKind::EraserPatch => {
                painter.rect_filled(rect, 0.0, self.color);
            }
        }
    }
}
