//! Project scaffold generation.
//!
//! Export is a pure data-to-text transformation: the exporter never touches
//! the filesystem. Writing the generated files is left to the caller.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::notebook::{Cell, Notebook};

pub const MANIFEST_PATH: &str = "package.json";
pub const NOTEBOOK_DATA_PATH: &str = "src/NotebookData.js";

const EXCERPT_ELLIPSIS: &str = "...";

/// Generated files keyed by their relative path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectFiles {
    files: BTreeMap<String, String>,
}

impl ProjectFiles {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn insert(&mut self, path: impl Into<String>, content: String) {
        self.files.insert(path.into(), content);
    }
}

impl IntoIterator for ProjectFiles {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    name: &'static str,
    version: &'static str,
    private: bool,
    scripts: ManifestScripts,
    dependencies: ManifestDependencies,
    dev_dependencies: ManifestDevDependencies,
}

#[derive(Debug, Serialize)]
struct ManifestScripts {
    start: &'static str,
    build: &'static str,
    preview: &'static str,
}

#[derive(Debug, Serialize)]
struct ManifestDependencies {
    react: &'static str,
    #[serde(rename = "react-dom")]
    react_dom: &'static str,
}

#[derive(Debug, Serialize)]
struct ManifestDevDependencies {
    vite: &'static str,
}

const MANIFEST: PackageManifest = PackageManifest {
    name: "notebook-web-export",
    version: "1.0.0",
    private: true,
    scripts: ManifestScripts {
        start: "vite",
        build: "vite build",
        preview: "vite preview",
    },
    dependencies: ManifestDependencies {
        react: "^18.0.0",
        react_dom: "^18.0.0",
    },
    dev_dependencies: ManifestDevDependencies { vite: "^5.0.0" },
};

/// Builds the scaffold files that embed a notebook.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectExporter;

impl ProjectExporter {
    pub fn new() -> Self {
        Self
    }

    /// Produce the manifest and the notebook data module. Deterministic: the
    /// same notebook always yields byte-identical files.
    pub fn generate(&self, notebook: &Notebook) -> ProjectFiles {
        let mut files = ProjectFiles::default();
        files.insert(MANIFEST_PATH, manifest_content());
        files.insert(NOTEBOOK_DATA_PATH, notebook_data_content(notebook));
        files
    }
}

/// Produce the project files with the default exporter.
pub fn generate(notebook: &Notebook) -> ProjectFiles {
    ProjectExporter::new().generate(notebook)
}

/// The fixed project manifest, pretty-printed with two-space indentation.
pub fn manifest_content() -> String {
    to_pretty_json(&MANIFEST)
}

/// A module assigning the notebook document to a default export.
pub fn notebook_data_content(notebook: &Notebook) -> String {
    let document = to_pretty_json(notebook.document());
    format!("const notebook = {document}; export default notebook;")
}

// Serializing string maps, booleans and JSON values cannot fail.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// A standalone script holding one code cell's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellScript {
    pub index: usize,
    pub file_name: String,
    pub source: String,
}

/// One script per code cell, named after the cell's position in the notebook.
pub fn cell_scripts(notebook: &Notebook) -> Vec<CellScript> {
    notebook
        .cells()
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| match cell {
            Cell::Code { source, .. } => Some(CellScript {
                index,
                file_name: format!("cell-{index}.py"),
                source: source.clone(),
            }),
            Cell::Markdown { .. } | Cell::Unknown { .. } => None,
        })
        .collect()
}

/// The first `max_chars` characters of `content`, with an ellipsis when cut.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{EXCERPT_ELLIPSIS}", &content[..cut]),
        None => content.to_string(),
    }
}
