//! Maintenance commands over a YAML stream catalog.

pub mod commands;
pub mod config;
pub mod report;

pub use config::CatalogConfig;
pub use report::{control_rows, ControlRow, StreamSummary};
