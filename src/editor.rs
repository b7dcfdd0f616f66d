use std::path::PathBuf;

use egui::{Color32, Pos2};
use thiserror::Error;

use crate::canvas::Canvas;
use crate::config::AppConfig;
use crate::history::CommandHistory;
use crate::persistence::{self, PersistenceError, PersistenceResult, SaveTask};
use crate::shape::ShapeId;
use crate::stroke::StrokeTracker;
use crate::tool::{BrushShape, InvalidBrushConfig, ToolMode, ToolState};

/// One user-interface operation. Every menu item maps to exactly one
/// variant, dispatched through [`Editor::apply`] — the handlers are plain
/// methods on the shared application state, not callbacks captured at
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Save(PathBuf),
    Load(PathBuf),
    ClearCanvas,
    SetColor(Color32),
    SetBrushSize(i32),
    SetBrushShape(BrushShape),
    SwitchToBrush,
    SwitchToEraser,
    Undo,
    Redo,
}

#[derive(Debug, Error)]
pub enum EditorError {
    /// Rejected brush input; prior state is untouched.
    #[error(transparent)]
    Config(#[from] InvalidBrushConfig),
    /// Save or load failure; canvas and history are untouched.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// The whole mutable application state: tool configuration, canvas,
/// history, and the in-flight pointer stroke. Event handlers receive this
/// struct explicitly; there are no globals.
pub struct Editor {
    tools: ToolState,
    canvas: Canvas,
    history: CommandHistory,
    stroke: StrokeTracker,
    pending_save: Option<SaveTask>,
}

impl Editor {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            tools: config.brush.clone(),
            canvas: Canvas::new(config.canvas_size, config.background),
            history: CommandHistory::new(),
            stroke: StrokeTracker::new(),
            pending_save: None,
        }
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Reinstall brush settings persisted from a previous session.
    pub fn restore_tools(&mut self, tools: ToolState) {
        self.tools = tools;
    }

    /// Route one UI action to its handler.
    pub fn apply(&mut self, action: Action) -> Result<(), EditorError> {
        match action {
            Action::Save(path) => self.begin_save(path),
            Action::Load(path) => {
                persistence::load_canvas(&mut self.canvas, &mut self.history, &path)?
            }
            Action::ClearCanvas => self.clear_canvas(),
            Action::SetColor(color) => self.tools.set_color(color),
            Action::SetBrushSize(size) => self.tools.set_brush_size(size)?,
            Action::SetBrushShape(shape) => self.tools.set_brush_shape(shape),
            Action::SwitchToBrush => self.tools.set_mode(ToolMode::Brush),
            Action::SwitchToEraser => self.tools.set_mode(ToolMode::Eraser),
            Action::Undo => self.history.undo(&mut self.canvas),
            Action::Redo => self.history.redo(&mut self.canvas),
        }
        Ok(())
    }

    pub fn pointer_pressed(&mut self) {
        self.stroke.begin();
    }

    /// Feed one drag sample; commits at most one shape and clears any
    /// redoable history when it does.
    pub fn pointer_moved(&mut self, pos: Pos2) -> Option<ShapeId> {
        let shape = self
            .stroke
            .sample(pos, &self.tools, self.canvas.background_color())?;
        let id = self.canvas.add_shape(shape);
        self.history.commit(id);
        Some(id)
    }

    pub fn pointer_released(&mut self) {
        self.stroke.end();
    }

    /// Wipe shapes and history together. Clear itself is not undoable.
    pub fn clear_canvas(&mut self) {
        self.canvas.remove_all_shapes();
        self.history.clear();
        log::info!("canvas cleared");
    }

    /// Rasterize on this thread, then hand the frame to a background
    /// writer. The outcome is picked up by [`Editor::poll_save`].
    fn begin_save(&mut self, path: PathBuf) {
        let frame = self.canvas.render_full_image();
        self.pending_save = Some(persistence::spawn_save(frame, path));
    }

    /// Outcome of a finished background save, if one just completed.
    pub fn poll_save(&mut self) -> Option<PersistenceResult<()>> {
        let outcome = self.pending_save.as_ref()?.poll()?;
        self.pending_save = None;
        Some(outcome)
    }

    pub fn save_in_progress(&self) -> bool {
        self.pending_save.is_some()
    }
}
