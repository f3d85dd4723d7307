//! Application services: preview and export over a decoded notebook.

pub mod error;
pub mod export;
pub mod intake;
pub mod markup;
pub mod preview;
pub mod scaffold;
