//! Analysis off the caller's thread.
//!
//! Jobs arrive over an unbounded mpsc channel and are processed one at a time
//! in arrival order. Each job uses the analyzer snapshot current when it
//! starts, so a catalog refresh never changes a job halfway through.

use chrono::{DateTime, Local};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use super::engine::ScreenshotSource;
use super::report::AnalysisReport;
use super::shared::SharedAnalyzer;
use crate::error::AnalyzeError;

/// A screenshot waiting for analysis.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    /// Caller-chosen id, echoed in the outcome
    pub id: u32,
    pub source: ScreenshotSource,
    pub requested_at: DateTime<Local>,
}

impl AnalysisJob {
    pub fn new(id: u32, source: ScreenshotSource) -> Self {
        Self {
            id,
            source,
            requested_at: Local::now(),
        }
    }

    /// File path, or "clipboard".
    pub fn source_label(&self) -> String {
        match &self.source {
            ScreenshotSource::File(path) => path.display().to_string(),
            ScreenshotSource::Clipboard(_) => "clipboard".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct AnalysisOutcome {
    pub job_id: u32,
    pub source: String,
    pub requested_at: DateTime<Local>,
    pub result: Result<AnalysisReport, AnalyzeError>,
}

/// Creates the job queue. The channel is unbounded.
pub fn create_job_queue() -> (Sender<AnalysisJob>, Receiver<AnalysisJob>) {
    channel()
}

/// Runs the analysis loop until the job sender is dropped.
///
/// Blocks, so run it on a dedicated thread. Stops early when the outcome
/// receiver is gone.
pub fn run_analysis_worker(
    receiver: Receiver<AnalysisJob>,
    shared: Arc<SharedAnalyzer>,
    results: Sender<AnalysisOutcome>,
) {
    crate::log("Analysis worker started");

    while let Ok(job) = receiver.recv() {
        let source = job.source_label();
        crate::log(&format!("Analysis worker: processing job {} ({})", job.id, source));

        let analyzer = shared.current();
        let result = analyzer.extract_info(job.source);
        if let Err(e) = &result {
            crate::log(&format!("Analysis worker: job {} failed: {}", job.id, e));
        }

        let outcome = AnalysisOutcome {
            job_id: job.id,
            source,
            requested_at: job.requested_at,
            result,
        };
        if results.send(outcome).is_err() {
            crate::log("Analysis worker: result receiver dropped, exiting");
            break;
        }
    }

    crate::log("Analysis worker finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::engine::tests::ScriptedRecognizer;
    use crate::analyzer::engine::ScreenshotAnalyzer;
    use crate::catalog::models::tests::make_song;
    use crate::config::AnalyzerConfig;
    use crate::jacket::DctHasher;
    use image::{DynamicImage, RgbImage};
    use std::path::PathBuf;
    use std::thread;

    fn shared() -> Arc<SharedAnalyzer> {
        let analyzer = ScreenshotAnalyzer::new(
            Vec::new(),
            Arc::new(ScriptedRecognizer::new("6", &[])),
            Arc::new(DctHasher),
            AnalyzerConfig::default(),
        );
        Arc::new(SharedAnalyzer::new(analyzer))
    }

    #[test]
    fn test_job_queue_keeps_order() {
        let (sender, receiver) = create_job_queue();

        for i in 1..=3 {
            sender
                .send(AnalysisJob::new(i, ScreenshotSource::Clipboard(None)))
                .unwrap();
        }

        for i in 1..=3 {
            assert_eq!(receiver.recv().unwrap().id, i);
        }
    }

    #[test]
    fn test_worker_reports_each_job() {
        let (sender, receiver) = create_job_queue();
        let (result_tx, result_rx) = channel();
        let shared = shared();

        let handle = thread::spawn(move || run_analysis_worker(receiver, shared, result_tx));

        sender
            .send(AnalysisJob::new(1, ScreenshotSource::File(PathBuf::from("missing.png"))))
            .unwrap();
        sender
            .send(AnalysisJob::new(
                2,
                ScreenshotSource::Clipboard(Some(DynamicImage::ImageRgb8(RgbImage::new(192, 108)))),
            ))
            .unwrap();
        drop(sender);

        let first = result_rx.recv().unwrap();
        assert_eq!(first.job_id, 1);
        assert_eq!(first.source, "missing.png");
        assert!(matches!(first.result, Err(AnalyzeError::FileNotFound(_))));

        let second = result_rx.recv().unwrap();
        assert_eq!(second.job_id, 2);
        assert_eq!(second.source, "clipboard");
        assert!(second.result.is_ok());

        handle.join().expect("Worker thread panicked");
        assert!(result_rx.recv().is_err());
    }

    #[test]
    fn test_worker_uses_refreshed_catalog() {
        let (sender, receiver) = create_job_queue();
        let (result_tx, result_rx) = channel();
        let shared = shared();
        shared.refresh(vec![make_song(9, Some("0000000000000000"), None)]);

        let worker_shared = Arc::clone(&shared);
        let handle = thread::spawn(move || run_analysis_worker(receiver, worker_shared, result_tx));

        let blank = DynamicImage::ImageRgb8(RgbImage::new(192, 108));
        sender
            .send(AnalysisJob::new(1, ScreenshotSource::Clipboard(Some(blank))))
            .unwrap();
        drop(sender);

        let outcome = result_rx.recv().unwrap();
        let report = outcome.result.unwrap();
        assert_eq!(report.song().map(|s| s.id), Some(9));

        handle.join().expect("Worker thread panicked");
    }

    #[test]
    fn test_worker_exits_when_channel_closes() {
        let (sender, receiver) = create_job_queue();
        let (result_tx, _result_rx) = channel();
        let shared = shared();

        let handle = thread::spawn(move || run_analysis_worker(receiver, shared, result_tx));
        drop(sender);

        handle.join().expect("Worker thread panicked");
    }
}
