//! PLATiNA::ARCHiVE result recognizer
//!
//! Reads a PLATiNA::LAB result screenshot (jacket, judgement counts, score,
//! difficulty) and derives accuracy, rank and P.A.T.C.H. from what was read.

pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod jacket;
pub mod layout;
pub mod ocr;
pub mod output;
pub mod paths;
pub mod scoring;

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

pub use analyzer::{AnalysisReport, ScreenshotAnalyzer, ScreenshotSource, SharedAnalyzer};
pub use catalog::{Pattern, Song};
pub use config::AnalyzerConfig;
pub use error::{AnalyzeError, ScoringError};

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("platina_archive.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}
