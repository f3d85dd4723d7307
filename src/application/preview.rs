//! Logical presentation of notebook cells.
//!
//! This is a pure projection from [`Cell`] to [`DisplayPayload`]; no layout or
//! styling decisions are made here.

use metrics::counter;
use serde::Serialize;

use crate::application::markup::{LineMarkupConverter, MarkupConverter};
use crate::domain::notebook::{Cell, Notebook, Output};
use crate::infra::telemetry::{CELLS_DEGRADED_TOTAL, CELLS_PRESENTED_TOTAL};

/// Separator placed between consecutive outputs of one code cell.
pub const OUTPUT_SEPARATOR: &str = "\n\n";

/// What a consumer needs to display one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayPayload {
    Markup {
        html: String,
    },
    Code {
        code: String,
        #[serde(rename = "outputText")]
        output_text: String,
    },
    Unknown {
        #[serde(rename = "cellType")]
        cell_type: Option<String>,
    },
}

/// A payload together with the cell's position and a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentedCell {
    pub index: usize,
    pub label: String,
    pub payload: DisplayPayload,
}

/// Maps cells to display payloads using a markup converter for markdown cells.
#[derive(Debug, Clone, Default)]
pub struct CellPresenter<C = LineMarkupConverter> {
    converter: C,
}

impl CellPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: MarkupConverter> CellPresenter<C> {
    pub fn with_converter(converter: C) -> Self {
        Self { converter }
    }

    pub fn present(&self, cell: &Cell) -> DisplayPayload {
        match cell {
            Cell::Markdown { source } => DisplayPayload::Markup {
                html: self.converter.convert(source),
            },
            Cell::Code { source, outputs } => DisplayPayload::Code {
                code: source.clone(),
                output_text: join_outputs(outputs),
            },
            Cell::Unknown { cell_type } => DisplayPayload::Unknown {
                cell_type: cell_type.clone(),
            },
        }
    }

    /// Present every cell of the notebook, in notebook order.
    pub fn present_notebook(&self, notebook: &Notebook) -> Vec<PresentedCell> {
        let presented: Vec<PresentedCell> = notebook
            .cells()
            .iter()
            .enumerate()
            .map(|(index, cell)| PresentedCell {
                index,
                label: cell_label(index, cell),
                payload: self.present(cell),
            })
            .collect();

        let degraded = presented
            .iter()
            .filter(|cell| matches!(cell.payload, DisplayPayload::Unknown { .. }))
            .count();
        counter!(CELLS_PRESENTED_TOTAL).increment(presented.len() as u64);
        counter!(CELLS_DEGRADED_TOTAL).increment(degraded as u64);

        presented
    }
}

/// Present a single cell with the default converter.
pub fn present(cell: &Cell) -> DisplayPayload {
    CellPresenter::new().present(cell)
}

/// Join output texts with a blank line between consecutive outputs.
pub fn join_outputs(outputs: &[Output]) -> String {
    outputs
        .iter()
        .map(Output::text)
        .collect::<Vec<_>>()
        .join(OUTPUT_SEPARATOR)
}

pub fn cell_label(index: usize, cell: &Cell) -> String {
    match cell {
        Cell::Markdown { .. } => format!("Markdown cell #{index}"),
        Cell::Code { .. } => format!("Code cell #{index}"),
        Cell::Unknown { cell_type } => {
            format!(
                "Unknown cell type {}",
                cell_type.as_deref().unwrap_or("undefined")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct ShoutingConverter;

    impl MarkupConverter for ShoutingConverter {
        fn convert(&self, source: &str) -> String {
            source.to_uppercase()
        }
    }

    #[test]
    fn markdown_cells_become_markup() {
        let cell = Cell::Markdown {
            source: "# Hi\n**there**".to_string(),
        };
        assert_eq!(
            present(&cell),
            DisplayPayload::Markup {
                html: "<h1>Hi</h1>\n<p><strong>there</strong></p>".to_string()
            }
        );
    }

    #[test]
    fn code_cells_join_outputs_with_blank_line() {
        let cell = Cell::decode(&json!({
            "cell_type": "code",
            "source": ["print(1)\n", "print(2)"],
            "outputs": [
                {"data": {"text/plain": ["1"]}},
                {"data": {"text/plain": ["2"]}}
            ]
        }));

        assert_eq!(
            present(&cell),
            DisplayPayload::Code {
                code: "print(1)\nprint(2)".to_string(),
                output_text: "1\n\n2".to_string(),
            }
        );
    }

    #[test]
    fn raw_outputs_join_in_compact_form() {
        let outputs = vec![
            Output::Text("a\n".to_string()),
            Output::Raw(json!({"output_type": "error"})),
        ];
        assert_eq!(join_outputs(&outputs), "a\n\n\n{\"output_type\":\"error\"}");
    }

    #[test]
    fn code_cell_without_outputs_has_empty_output_text() {
        let cell = Cell::decode(&json!({"cell_type": "code"}));
        assert_eq!(
            present(&cell),
            DisplayPayload::Code {
                code: String::new(),
                output_text: String::new(),
            }
        );
    }

    #[test]
    fn unknown_cells_keep_their_tag() {
        let cell = Cell::decode(&json!({"cell_type": "raw", "source": "x"}));
        assert_eq!(
            present(&cell),
            DisplayPayload::Unknown {
                cell_type: Some("raw".to_string())
            }
        );
    }

    #[test]
    fn custom_converter_is_used_for_markdown() {
        let presenter = CellPresenter::with_converter(ShoutingConverter);
        let cell = Cell::Markdown {
            source: "quiet".to_string(),
        };
        assert_eq!(
            presenter.present(&cell),
            DisplayPayload::Markup {
                html: "QUIET".to_string()
            }
        );
    }

    #[test]
    fn labels_follow_notebook_positions() {
        let notebook = Notebook::parse(&json!({
            "cells": [
                {"cell_type": "markdown", "source": []},
                {"cell_type": "code", "source": []},
                {"cell_type": "raw"},
                {}
            ]
        }))
        .expect("valid notebook");

        let labels: Vec<_> = CellPresenter::new()
            .present_notebook(&notebook)
            .into_iter()
            .map(|cell| cell.label)
            .collect();

        assert_eq!(
            labels,
            vec![
                "Markdown cell #0",
                "Code cell #1",
                "Unknown cell type raw",
                "Unknown cell type undefined",
            ]
        );
    }

    #[test]
    fn payloads_serialize_with_kind_tag() {
        let payload = DisplayPayload::Code {
            code: "x".to_string(),
            output_text: "1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&payload).expect("serializable payload"),
            json!({"kind": "code", "code": "x", "outputText": "1"})
        );

        let unknown = DisplayPayload::Unknown { cell_type: None };
        assert_eq!(
            serde_json::to_value(&unknown).expect("serializable payload"),
            json!({"kind": "unknown", "cellType": null})
        );
    }
}
