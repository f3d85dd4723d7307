//! Writing an exported project to disk.

use std::path::{Path, PathBuf};

use metrics::counter;
use tracing::info;

use crate::{
    application::{error::AppError, export},
    domain::notebook::Notebook,
    infra::{files, telemetry::FILES_GENERATED_TOTAL},
};

/// A generated file as it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub content: String,
}

/// Generate the project files for `notebook` and write them under
/// `output_dir`. With `write_cells`, every code cell is also written as
/// `cell-<index>.py`. Files are returned in the order they were written.
pub fn write_project(
    notebook: &Notebook,
    output_dir: &Path,
    write_cells: bool,
) -> Result<Vec<WrittenFile>, AppError> {
    let mut generated: Vec<(String, String)> = export::generate(notebook).into_iter().collect();
    if write_cells {
        generated.extend(
            export::cell_scripts(notebook)
                .into_iter()
                .map(|script| (script.file_name, script.source)),
        );
    }

    let paths = files::write_tree(
        output_dir,
        generated
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str())),
    )?;
    counter!(FILES_GENERATED_TOTAL).increment(paths.len() as u64);

    info!(
        target = "nbfolio::scaffold",
        output_dir = %output_dir.display(),
        files = paths.len(),
        "project written"
    );

    Ok(paths
        .into_iter()
        .zip(generated)
        .map(|(path, (_, content))| WrittenFile { path, content })
        .collect())
}
