//! Persisting analysis results: CSV history and JSON export.

pub mod csv_writer;
pub mod export;

pub use csv_writer::{append_report, init_history_csv};
pub use export::export_reports_json;
