use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use egui::{pos2, Color32};
use virtual_painter::persistence::save_canvas;
use virtual_painter::{Action, AppConfig, BrushShape, Editor, EditorError, PersistenceError};

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("virtual_painter_tests_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

// An editor with one big red rectangle committed.
fn editor_with_mark() -> Editor {
    let mut editor = Editor::new(&AppConfig::default());
    editor.apply(Action::SetBrushShape(BrushShape::Rectangle)).unwrap();
    editor.apply(Action::SetColor(Color32::RED)).unwrap();
    editor.pointer_pressed();
    editor.pointer_moved(pos2(100.0, 100.0));
    editor.pointer_moved(pos2(200.0, 200.0));
    editor.pointer_released();
    editor
}

#[test]
fn save_writes_a_decodable_image_of_the_canvas() {
    let editor = editor_with_mark();
    let path = scratch_path("saved_canvas.png");

    save_canvas(editor.canvas(), &path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.width(), 800);
    assert_eq!(decoded.height(), 600);
    assert_eq!(decoded.get_pixel(150, 150).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(10, 10).0, [255, 255, 255, 255]);
}

#[test]
fn load_replaces_shapes_with_a_flattened_background_and_resets_history() {
    let source = editor_with_mark();
    let path = scratch_path("loaded_canvas.png");
    save_canvas(source.canvas(), &path).unwrap();

    let mut editor = editor_with_mark();
    editor.apply(Action::Undo).unwrap();
    assert_eq!(editor.history().redo_depth(), 1);

    editor.apply(Action::Load(path)).unwrap();

    assert!(editor.canvas().shapes().is_empty());
    let background = editor.canvas().background().expect("background installed");
    assert_eq!(background.size(), [800, 600]);
    assert_eq!(editor.history().undo_depth(), 0);
    assert_eq!(editor.history().redo_depth(), 0);

    // Loading is not undoable: the background stays put.
    editor.apply(Action::Undo).unwrap();
    assert!(editor.canvas().background().is_some());
}

#[test]
fn loading_garbage_fails_with_format_and_leaves_the_canvas_alone() {
    let path = scratch_path("garbage.png");
    fs::write(&path, b"definitely not an image").unwrap();

    let mut editor = editor_with_mark();
    let err = editor.apply(Action::Load(path)).unwrap_err();
    match err {
        EditorError::Persistence(err) => assert!(err.is_format()),
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(editor.canvas().shapes().len(), 1);
    assert!(editor.canvas().background().is_none());
    assert_eq!(editor.history().undo_depth(), 1);
}

#[test]
fn loading_a_missing_path_fails_with_io() {
    let mut editor = editor_with_mark();
    let err = editor
        .apply(Action::Load(scratch_path("does_not_exist.png")))
        .unwrap_err();
    match err {
        EditorError::Persistence(PersistenceError::Io { .. }) => {}
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(editor.canvas().shapes().len(), 1);
}

#[test]
fn saving_to_an_unwritable_path_fails_with_io() {
    let editor = editor_with_mark();
    let path = scratch_path("missing_dir").join("nested").join("out.png");
    match save_canvas(editor.canvas(), &path) {
        Err(PersistenceError::Io { .. }) => {}
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn saving_with_an_unknown_extension_fails_with_format() {
    let editor = editor_with_mark();
    match save_canvas(editor.canvas(), &scratch_path("canvas.xyz")) {
        Err(PersistenceError::Format { .. }) => {}
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn background_save_reports_completion() {
    let mut editor = editor_with_mark();
    let path = scratch_path("background_save.png");

    editor.apply(Action::Save(path.clone())).unwrap();
    assert!(editor.save_in_progress());

    let deadline = Instant::now() + Duration::from_secs(10);
    let outcome = loop {
        if let Some(outcome) = editor.poll_save() {
            break outcome;
        }
        assert!(Instant::now() < deadline, "background save never finished");
        std::thread::sleep(Duration::from_millis(10));
    };
    outcome.unwrap();
    assert!(!editor.save_in_progress());
    assert!(image::open(&path).is_ok());
}
