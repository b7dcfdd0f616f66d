use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use image::{ImageError, RgbaImage};
use parking_lot::Mutex;
use thiserror::Error;

use crate::canvas::Canvas;
use crate::history::CommandHistory;

/// Errors from saving or loading the canvas image. Either way the
/// in-memory canvas is left exactly as it was.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The path could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file content or target format is not a supported image.
    #[error("{path} is not a supported image: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

impl PersistenceError {
    pub fn is_format(&self) -> bool {
        matches!(self, PersistenceError::Format { .. })
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

fn classify(path: &Path, err: ImageError) -> PersistenceError {
    match err {
        ImageError::IoError(source) => PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => PersistenceError::Format {
            path: path.to_path_buf(),
            source: other,
        },
    }
}

/// Encode the current canvas into an image file, format chosen by the file
/// extension.
pub fn save_canvas(canvas: &Canvas, path: &Path) -> PersistenceResult<()> {
    write_frame(canvas.render_full_image(), path)
}

fn write_frame(frame: RgbaImage, path: &Path) -> PersistenceResult<()> {
    frame.save(path).map_err(|err| classify(path, err))?;
    log::info!("saved canvas to {}", path.display());
    Ok(())
}

/// Replace the canvas content with a decoded image file.
///
/// The image becomes the single flattened background layer and both history
/// stacks reset; loading is not undoable. Nothing is mutated unless
/// decoding succeeds.
pub fn load_canvas(
    canvas: &mut Canvas,
    history: &mut CommandHistory,
    path: &Path,
) -> PersistenceResult<()> {
    let decoded = image::open(path).map_err(|err| classify(path, err))?;
    canvas.remove_all_shapes();
    canvas.set_background(decoded.to_rgba8());
    history.clear();
    log::info!("loaded {} as canvas background", path.display());
    Ok(())
}

/// Handle to an export running on a worker thread.
///
/// The frame is rasterized on the caller's thread before the worker starts,
/// so the canvas is never read while the event loop mutates it; only the
/// finished frame crosses the thread boundary.
pub struct SaveTask {
    path: PathBuf,
    slot: Arc<Mutex<Option<PersistenceResult<()>>>>,
}

/// Encode and write `frame` to `path` in the background.
pub fn spawn_save(frame: RgbaImage, path: PathBuf) -> SaveTask {
    let slot = Arc::new(Mutex::new(None));
    let outcome = Arc::clone(&slot);
    let target = path.clone();
    thread::spawn(move || {
        *outcome.lock() = Some(write_frame(frame, &target));
    });
    SaveTask { path, slot }
}

impl SaveTask {
    /// Take the outcome if the worker has finished.
    pub fn poll(&self) -> Option<PersistenceResult<()>> {
        self.slot.lock().take()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
