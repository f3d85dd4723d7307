use thiserror::Error;

/// Document-level decoding failures. Cell-level problems never surface here;
/// they degrade to [`Cell::Unknown`](super::notebook::Cell::Unknown) instead.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("notebook is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("notebook document must be an object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("notebook document has no `cells` field")]
    MissingCells,
    #[error("notebook `cells` field must be a sequence, found {found}")]
    CellsNotSequence { found: &'static str },
}

impl FormatError {
    pub fn not_an_object(found: &'static str) -> Self {
        Self::NotAnObject { found }
    }

    pub fn cells_not_sequence(found: &'static str) -> Self {
        Self::CellsNotSequence { found }
    }
}
