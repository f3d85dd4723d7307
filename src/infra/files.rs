//! Filesystem access for the binary: reading notebooks and writing exports.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::error::InfraError;

pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Whether the path names a Jupyter notebook file.
pub fn is_notebook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension == NOTEBOOK_EXTENSION)
}

pub fn read_text(path: &Path) -> Result<String, InfraError> {
    let text = fs::read_to_string(path).map_err(|err| InfraError::io(path, err))?;
    debug!(
        target = "nbfolio::infra::files",
        path = %path.display(),
        bytes = text.len(),
        "read input file"
    );
    Ok(text)
}

/// Write each `(relative path, content)` pair under `root`, creating parent
/// directories as needed. Returns the written paths in input order.
pub fn write_tree<'a, I>(root: &Path, files: I) -> Result<Vec<PathBuf>, InfraError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut written = Vec::new();
    for (relative, content) in files {
        let target = root.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|err| InfraError::io(parent, err))?;
        }
        fs::write(&target, content).map_err(|err| InfraError::io(&target, err))?;
        debug!(
            target = "nbfolio::infra::files",
            path = %target.display(),
            bytes = content.len(),
            "wrote generated file"
        );
        written.push(target);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_notebook_extension() {
        assert!(is_notebook_path(Path::new("analysis.ipynb")));
        assert!(is_notebook_path(Path::new("dir/nested.v2.ipynb")));
        assert!(!is_notebook_path(Path::new("analysis.json")));
        assert!(!is_notebook_path(Path::new("ipynb")));
        assert!(!is_notebook_path(Path::new("analysis.IPYNB")));
    }

    #[test]
    fn write_tree_creates_nested_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let written = write_tree(
            dir.path(),
            [("package.json", "{}"), ("src/NotebookData.js", "data")],
        )
        .expect("files written");

        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("src/NotebookData.js")).expect("readable"),
            "data"
        );
    }

    #[test]
    fn read_text_reports_missing_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.ipynb");
        let err = read_text(&missing).expect_err("missing file");
        assert!(matches!(err, InfraError::Io { ref path, .. } if path == &missing));
    }
}
