//! Reading notebook files from disk into the domain model.

use std::path::Path;

use tracing::{info, warn};

use crate::{
    application::error::AppError,
    domain::notebook::Notebook,
    infra::files::{self, NOTEBOOK_EXTENSION},
};

/// Load and decode a `.ipynb` file. Other extensions are rejected before any
/// read happens.
pub fn load_notebook(path: &Path) -> Result<Notebook, AppError> {
    if !files::is_notebook_path(path) {
        return Err(AppError::validation(format!(
            "expected a .{NOTEBOOK_EXTENSION} (Jupyter) notebook file, got `{}`",
            path.display()
        )));
    }

    let text = files::read_text(path)?;
    let notebook = Notebook::from_json_str(&text).inspect_err(|err| {
        warn!(
            target = "nbfolio::intake",
            path = %path.display(),
            error = %err,
            "failed to decode notebook"
        );
    })?;

    let unknown = notebook.cells().iter().filter(|cell| cell.is_unknown()).count();
    info!(
        target = "nbfolio::intake",
        path = %path.display(),
        cells = notebook.len(),
        unknown,
        "notebook loaded"
    );

    Ok(notebook)
}
