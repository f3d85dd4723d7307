//! Terminal-facing formatting of preview and export results.

pub mod listing;
