//! Report generation and export.

pub mod export;
pub mod generator;

pub use export::{write_csv, write_summary_json};
pub use generator::{render_records_table, render_summary};
