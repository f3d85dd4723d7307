//! Notebook document model and its decoding invariants.

pub mod error;
mod fragments;
pub mod notebook;

pub use error::FormatError;
pub use notebook::{Cell, Notebook, Output};
