//! Notebook preview and project export.
//!
//! A notebook document is decoded once into [`domain::Notebook`]; the preview
//! ([`application::preview`]) and export ([`application::export`]) services
//! then run independently over the same immutable model.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
