//! Screenshot analysis.
//!
//! This module provides:
//! - The analyzer that turns one screenshot into an [`AnalysisReport`]
//! - A shared snapshot that is swapped wholesale on catalog refresh
//! - A worker loop that analyzes queued screenshots off the caller's thread

pub mod engine;
pub mod report;
pub mod shared;
pub mod worker;

pub use engine::{ScreenshotAnalyzer, ScreenshotSource};
pub use report::{AnalysisReport, RecognizedFields, ReportSummary, ReportWarning};
pub use shared::SharedAnalyzer;
pub use worker::{create_job_queue, run_analysis_worker, AnalysisJob, AnalysisOutcome};
