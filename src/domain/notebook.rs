//! Decoded notebook documents.
//!
//! Decoding is strict at the document level and lenient per cell: a document
//! without a `cells` sequence is rejected with [`FormatError`], while a single
//! malformed cell only degrades to [`Cell::Unknown`] so the rest of the
//! notebook stays usable.

use std::borrow::Cow;

use serde_json::{Map, Value};

use super::error::FormatError;
use super::fragments;

const MARKDOWN_CELL: &str = "markdown";
const CODE_CELL: &str = "code";
const PLAIN_TEXT_MIME: &str = "text/plain";

/// A decoded notebook. Cells keep their document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    cells: Vec<Cell>,
    document: Value,
}

impl Notebook {
    /// Decode a notebook from an already-parsed JSON document.
    pub fn parse(raw: &Value) -> Result<Self, FormatError> {
        let cells = decode_cells(raw)?;
        Ok(Self {
            cells,
            document: raw.clone(),
        })
    }

    /// Decode a notebook from an owned JSON document, keeping it as-is for export.
    pub fn from_value(raw: Value) -> Result<Self, FormatError> {
        let cells = decode_cells(&raw)?;
        Ok(Self {
            cells,
            document: raw,
        })
    }

    /// Parse JSON text and decode the resulting document.
    pub fn from_json_str(text: &str) -> Result<Self, FormatError> {
        let raw: Value = serde_json::from_str(text)?;
        Self::from_value(raw)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The document the notebook was decoded from, with its original key order.
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn decode_cells(raw: &Value) -> Result<Vec<Cell>, FormatError> {
    let Value::Object(fields) = raw else {
        return Err(FormatError::not_an_object(fragments::kind_of(raw)));
    };

    match fields.get("cells") {
        None => Err(FormatError::MissingCells),
        Some(Value::Array(cells)) => Ok(cells.iter().map(Cell::decode).collect()),
        Some(other) => Err(FormatError::cells_not_sequence(fragments::kind_of(other))),
    }
}

/// One notebook cell. The variant set is closed: anything that is not a
/// well-formed markdown or code cell is [`Cell::Unknown`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Markdown {
        source: String,
    },
    Code {
        source: String,
        outputs: Vec<Output>,
    },
    /// Unrecognised or malformed cell. `cell_type` is the literal tag, if any.
    Unknown {
        cell_type: Option<String>,
    },
}

impl Cell {
    /// Decode a single cell record. Never fails.
    pub fn decode(raw: &Value) -> Self {
        let Value::Object(fields) = raw else {
            return Cell::Unknown { cell_type: None };
        };

        let tag = cell_type_tag(fields);
        let decoded = match tag.as_deref() {
            Some(MARKDOWN_CELL) => {
                source_text(fields).map(|source| Cell::Markdown { source })
            }
            Some(CODE_CELL) => source_text(fields).and_then(|source| {
                outputs(fields).map(|outputs| Cell::Code { source, outputs })
            }),
            _ => None,
        };

        decoded.unwrap_or(Cell::Unknown { cell_type: tag })
    }

    /// The cell's type tag as it appeared in the document.
    pub fn cell_type(&self) -> Option<&str> {
        match self {
            Cell::Markdown { .. } => Some(MARKDOWN_CELL),
            Cell::Code { .. } => Some(CODE_CELL),
            Cell::Unknown { cell_type } => cell_type.as_deref(),
        }
    }

    /// Concatenated source text; `None` for unknown cells.
    pub fn source(&self) -> Option<&str> {
        match self {
            Cell::Markdown { source } | Cell::Code { source, .. } => Some(source.as_str()),
            Cell::Unknown { .. } => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Cell::Unknown { .. })
    }
}

fn cell_type_tag(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("cell_type") {
        None | Some(Value::Null) => None,
        Some(Value::String(tag)) => Some(tag.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Missing `source` reads as empty; a present but non-text `source` is malformed.
fn source_text(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("source") {
        None | Some(Value::Null) => Some(String::new()),
        Some(value) => fragments::concat(value),
    }
}

fn outputs(fields: &Map<String, Value>) -> Option<Vec<Output>> {
    match fields.get("outputs") {
        None | Some(Value::Null) => Some(Vec::new()),
        Some(Value::Array(items)) => Some(items.iter().map(Output::decode).collect()),
        Some(_) => None,
    }
}

/// A captured code-cell output, classified by which text field it carries.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Text from the `data["text/plain"]` mime bundle entry.
    PlainData(String),
    /// Text from a direct `text` field, as stream outputs carry.
    Text(String),
    /// Neither field was usable; the record is kept for display.
    Raw(Value),
}

impl Output {
    /// Classify an output record, preferring `data["text/plain"]` over `text`.
    pub fn decode(raw: &Value) -> Self {
        let plain = raw
            .get("data")
            .and_then(|data| data.get(PLAIN_TEXT_MIME))
            .and_then(fragments::concat);
        if let Some(text) = plain {
            return Output::PlainData(text);
        }

        if let Some(text) = raw.get("text").and_then(fragments::concat) {
            return Output::Text(text);
        }

        Output::Raw(raw.clone())
    }

    /// Display text. Raw records fall back to their compact JSON form.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Output::PlainData(text) | Output::Text(text) => Cow::Borrowed(text.as_str()),
            Output::Raw(value) => Cow::Owned(value.to_string()),
        }
    }
}
