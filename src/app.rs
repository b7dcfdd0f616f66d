use std::path::PathBuf;

use eframe::egui;

use crate::config::AppConfig;
use crate::editor::{Action, Editor, EditorError};
use crate::tool::{BrushShape, ToolMode, ToolState};

/// The eframe shell around the [`Editor`] core: menu bar, canvas region,
/// file dialogs, and error surfacing.
pub struct PainterApp {
    editor: Editor,
    /// Last persistence failure, shown until dismissed.
    error: Option<String>,
}

impl PainterApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut editor = Editor::new(&config);

        // Brush settings survive restarts; the canvas always starts fresh.
        if let Some(tools) = cc
            .storage
            .and_then(|storage| eframe::get_value::<ToolState>(storage, eframe::APP_KEY))
        {
            editor.restore_tools(tools);
        }

        Self {
            editor,
            error: None,
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) -> Option<Action> {
        let mut pending = None;

        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Save…").clicked() {
                    ui.close_menu();
                    if let Some(path) = save_dialog() {
                        pending = Some(Action::Save(path));
                    }
                }
                if ui.button("Load…").clicked() {
                    ui.close_menu();
                    if let Some(path) = open_dialog() {
                        pending = Some(Action::Load(path));
                    }
                }
                ui.separator();
                if ui.button("Clear Canvas").clicked() {
                    ui.close_menu();
                    pending = Some(Action::ClearCanvas);
                }
            });

            ui.menu_button("Brush", |ui| {
                let tools = self.editor.tools();

                ui.horizontal(|ui| {
                    ui.label("Color:");
                    let mut color = tools.color();
                    if egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut color,
                        egui::color_picker::Alpha::Opaque,
                    )
                    .changed()
                    {
                        pending = Some(Action::SetColor(color));
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Size:");
                    let mut size = tools.brush_size();
                    if ui
                        .add(egui::DragValue::new(&mut size).range(1..=100))
                        .changed()
                    {
                        pending = Some(Action::SetBrushSize(size));
                    }
                });

                for shape in BrushShape::ALL {
                    if ui
                        .selectable_label(tools.brush_shape() == shape, shape.label())
                        .clicked()
                    {
                        pending = Some(Action::SetBrushShape(shape));
                    }
                }

                ui.separator();
                let erasing = tools.mode() == ToolMode::Eraser;
                if ui.add_enabled(!erasing, egui::Button::new("Switch to Eraser")).clicked() {
                    ui.close_menu();
                    pending = Some(Action::SwitchToEraser);
                }
                if ui.add_enabled(erasing, egui::Button::new("Switch to Brush")).clicked() {
                    ui.close_menu();
                    pending = Some(Action::SwitchToBrush);
                }
            });

            ui.menu_button("Edit", |ui| {
                let history = self.editor.history();
                if ui
                    .add_enabled(history.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    ui.close_menu();
                    pending = Some(Action::Undo);
                }
                if ui
                    .add_enabled(history.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    ui.close_menu();
                    pending = Some(Action::Redo);
                }
            });
        });

        pending
    }

    fn canvas_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let [width, height] = self.editor.canvas().size();
        let (response, painter) =
            ui.allocate_painter(egui::vec2(width as f32, height as f32), egui::Sense::drag());
        let origin = response.rect.min;
        let painter = painter.with_clip_rect(response.rect);

        if response.drag_started() {
            self.editor.pointer_pressed();
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.editor.pointer_moved(pos - origin.to_vec2());
            }
        }
        if response.drag_stopped() {
            self.editor.pointer_released();
        }

        self.editor.canvas_mut().draw(ctx, &painter, origin);
    }

    fn dispatch(&mut self, action: Action) {
        match self.editor.apply(action) {
            Ok(()) => {}
            // Bad brush input is recovered locally, nothing to show.
            Err(EditorError::Config(err)) => log::debug!("ignored brush input: {err}"),
            Err(EditorError::Persistence(err)) => {
                log::error!("{err}");
                self.error = Some(err.to_string());
            }
        }
    }
}

impl eframe::App for PainterApp {
    /// Called by the framework to persist state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.editor.tools());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut pending = None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            pending = self.menu_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas_panel(ctx, ui);
        });

        if let Some(action) = pending {
            self.dispatch(action);
        }

        if let Some(Err(err)) = self.editor.poll_save() {
            log::error!("{err}");
            self.error = Some(err.to_string());
        }

        if let Some(message) = self.error.clone() {
            egui::Window::new("File Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("Dismiss").clicked() {
                        self.error = None;
                    }
                });
        }
    }
}

fn save_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("PNG image", &["png"])
        .add_filter("JPEG image", &["jpg", "jpeg"])
        .add_filter("Bitmap image", &["bmp"])
        .set_file_name("drawing.png")
        .save_file()
}

fn open_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
        .pick_file()
}
