use egui::{pos2, Color32};
use virtual_painter::{Action, AppConfig, BrushShape, Editor, ShapeKind};

fn editor() -> Editor {
    Editor::new(&AppConfig::default())
}

#[test]
fn first_sample_of_a_drag_only_seeds_the_stroke() {
    let mut editor = editor();
    editor.pointer_pressed();
    assert!(editor.pointer_moved(pos2(10.0, 10.0)).is_none());
    assert!(editor.canvas().shapes().is_empty());

    // The second sample pairs with the first.
    assert!(editor.pointer_moved(pos2(20.0, 20.0)).is_some());
    assert_eq!(editor.canvas().shapes().len(), 1);
}

#[test]
fn samples_outside_a_drag_are_ignored() {
    let mut editor = editor();
    assert!(editor.pointer_moved(pos2(10.0, 10.0)).is_none());
    assert!(editor.pointer_moved(pos2(20.0, 20.0)).is_none());
    assert!(editor.canvas().shapes().is_empty());

    editor.pointer_pressed();
    editor.pointer_moved(pos2(0.0, 0.0));
    editor.pointer_released();

    // Release forgets the last point as well.
    assert!(editor.pointer_moved(pos2(5.0, 5.0)).is_none());
    assert!(editor.canvas().shapes().is_empty());
}

#[test]
fn each_later_sample_commits_exactly_one_shape() {
    let mut editor = editor();
    editor.pointer_pressed();
    for i in 0..4 {
        editor.pointer_moved(pos2(i as f32 * 10.0, 0.0));
    }
    editor.pointer_released();

    assert_eq!(editor.canvas().shapes().len(), 3);
    assert_eq!(editor.history().undo_depth(), 3);
}

#[test]
fn rectangle_brush_spans_the_two_samples() {
    let mut editor = editor();
    editor.apply(Action::SetBrushShape(BrushShape::Rectangle)).unwrap();
    editor.apply(Action::SetBrushSize(3)).unwrap();
    editor.apply(Action::SetColor(Color32::RED)).unwrap();

    editor.pointer_pressed();
    editor.pointer_moved(pos2(10.0, 10.0));
    editor.pointer_moved(pos2(30.0, 20.0));
    editor.pointer_released();

    let shape = &editor.canvas().shapes()[0];
    assert_eq!(shape.kind(), ShapeKind::Rectangle);
    assert_eq!(shape.rect().min, pos2(10.0, 10.0));
    assert_eq!(shape.rect().max, pos2(30.0, 20.0));
    assert_eq!(shape.color(), Color32::RED);
    assert_eq!(shape.stroke_width(), 3.0);
}

#[test]
fn square_brush_uses_only_the_horizontal_delta() {
    let mut editor = editor();
    editor.apply(Action::SetBrushShape(BrushShape::Square)).unwrap();

    editor.pointer_pressed();
    editor.pointer_moved(pos2(10.0, 10.0));
    editor.pointer_moved(pos2(30.0, 50.0)); // vertical delta is ignored
    editor.pointer_released();

    let shape = &editor.canvas().shapes()[0];
    assert_eq!(shape.kind(), ShapeKind::Square);
    assert_eq!(shape.rect().min, pos2(10.0, 10.0));
    assert_eq!(shape.rect().max, pos2(30.0, 30.0));
}

#[test]
fn square_brush_anchors_at_the_previous_sample_even_dragging_left() {
    let mut editor = editor();
    editor.apply(Action::SetBrushShape(BrushShape::Square)).unwrap();

    editor.pointer_pressed();
    editor.pointer_moved(pos2(30.0, 10.0));
    editor.pointer_moved(pos2(10.0, 40.0));
    editor.pointer_released();

    // Side |10 - 30| = 20, grown right and down from the anchor.
    let shape = &editor.canvas().shapes()[0];
    assert_eq!(shape.rect().min, pos2(30.0, 10.0));
    assert_eq!(shape.rect().max, pos2(50.0, 30.0));
}

#[test]
fn eraser_paints_background_patches_regardless_of_brush_shape() {
    let mut editor = editor();
    editor.apply(Action::SetBrushShape(BrushShape::Square)).unwrap();
    editor.apply(Action::SetColor(Color32::RED)).unwrap();
    editor.apply(Action::SwitchToEraser).unwrap();

    editor.pointer_pressed();
    editor.pointer_moved(pos2(50.0, 50.0));
    editor.pointer_moved(pos2(100.0, 100.0));
    editor.pointer_released();

    // Half-extent is twice the default brush size of 2.
    let patch = &editor.canvas().shapes()[0];
    assert_eq!(patch.kind(), ShapeKind::EraserPatch);
    assert_eq!(patch.rect().min, pos2(96.0, 96.0));
    assert_eq!(patch.rect().max, pos2(104.0, 104.0));
    assert_eq!(patch.color(), editor.canvas().background_color());
}

#[test]
fn switching_back_to_brush_restores_painting() {
    let mut editor = editor();
    editor.apply(Action::SwitchToEraser).unwrap();
    editor.apply(Action::SwitchToBrush).unwrap();

    editor.pointer_pressed();
    editor.pointer_moved(pos2(0.0, 0.0));
    editor.pointer_moved(pos2(10.0, 10.0));
    editor.pointer_released();

    assert_eq!(editor.canvas().shapes()[0].kind(), ShapeKind::FreehandSegment);
}
