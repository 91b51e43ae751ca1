//! PLATiNA::ARCHiVE command line
//!
//! Analyzes PLATiNA::LAB result screenshots against a catalog snapshot and
//! prints the recognized result.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;

use platina_archive::analyzer::{create_job_queue, run_analysis_worker, AnalysisJob};
use platina_archive::catalog::load_catalog;
use platina_archive::config::init_config;
use platina_archive::jacket::{DctHasher, ImageHasher, NO_MATCH_DISTANCE};
use platina_archive::layout::{crop_field, Field};
use platina_archive::output::{append_report, export_reports_json, init_history_csv};
use platina_archive::{log, paths, ScreenshotAnalyzer, ScreenshotSource, SharedAnalyzer, Song};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

#[derive(Parser)]
#[command(
    name = "platina-archive",
    version,
    about = "PLATiNA::LAB result screenshot recognizer"
)]
struct Cli {
    /// Path to config.json (defaults to the one next to the executable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize result screenshots
    Analyze {
        /// Screenshot files or directories of screenshots
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Catalog snapshot (defaults to catalog.json next to the executable)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Append every result to this CSV file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Write the results as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Print the jacket hash of a screenshot
    Hash {
        path: PathBuf,

        /// The image is a bare jacket, not a full screenshot
        #[arg(long)]
        jacket: bool,
    },
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        let log_path = paths::get_logs_dir().join("platina_archive.log");
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            use std::io::Write;
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));

    let cli = Cli::parse();

    paths::ensure_directories().context("Failed to create output directories")?;
    let config = init_config(cli.config.as_deref());

    match cli.command {
        Commands::Analyze {
            paths: inputs,
            catalog,
            history,
            json,
        } => {
            let catalog_path = catalog.unwrap_or_else(paths::get_catalog_path);
            let songs = load_songs(&catalog_path)?;
            let analyzer = ScreenshotAnalyzer::with_tesseract(songs, config.clone())?;
            run_analyze(analyzer, &inputs, history.as_deref(), json.as_deref())
        }
        Commands::Hash { path, jacket } => run_hash(&path, jacket),
    }
}

/// An explicit catalog must load; a missing default one means an empty catalog.
fn load_songs(path: &Path) -> Result<Vec<Song>> {
    if !path.exists() {
        log(&format!(
            "Warning: catalog {} not found, songs will not be identified",
            path.display()
        ));
        return Ok(Vec::new());
    }
    load_catalog(path)
}

fn run_analyze(
    analyzer: ScreenshotAnalyzer,
    inputs: &[PathBuf],
    history: Option<&Path>,
    json: Option<&Path>,
) -> Result<()> {
    let files = collect_screenshots(inputs)?;
    if files.is_empty() {
        return Err(anyhow!("No screenshots found"));
    }

    if let Some(history) = history {
        init_history_csv(history)?;
    }

    let shared = Arc::new(SharedAnalyzer::new(analyzer));
    let (sender, receiver) = create_job_queue();
    let (result_tx, result_rx) = channel();

    let worker_shared = Arc::clone(&shared);
    let worker = thread::spawn(move || run_analysis_worker(receiver, worker_shared, result_tx));

    for (id, file) in (1u32..).zip(files) {
        sender
            .send(AnalysisJob::new(id, ScreenshotSource::File(file)))
            .context("Analysis worker stopped unexpectedly")?;
    }
    drop(sender);

    let mut summaries = Vec::new();
    let mut failures = 0usize;

    for outcome in result_rx {
        let report = match outcome.result {
            Ok(report) => report,
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", outcome.source, e);
                continue;
            }
        };

        println!("== {}", outcome.source);
        println!("{}", report);
        let distance = match report.match_distance() {
            NO_MATCH_DISTANCE => "-".to_string(),
            d => d.to_string(),
        };
        println!("Jacket: {} (distance {})", report.jacket_hash(), distance);
        for warning in report.warnings() {
            println!("Warning: {}", warning);
        }
        println!();

        if let Some(history) = history {
            if let Err(e) = append_report(history, outcome.requested_at, &outcome.source, &report) {
                log(&format!("Failed to append result to {}: {}", history.display(), e));
            }
        }
        summaries.push(report.summary());
    }

    worker
        .join()
        .map_err(|_| anyhow!("Analysis worker panicked"))?;

    if let Some(json) = json {
        export_reports_json(&summaries, json)?;
        log(&format!("Exported {} results to {}", summaries.len(), json.display()));
    }

    log(&format!(
        "Analyzed {} screenshots, {} failed",
        summaries.len(),
        failures
    ));
    Ok(())
}

/// Expands directories into their image files, sorted by name.
fn collect_screenshots(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = std::fs::read_dir(input)
            .context(format!("Failed to read directory: {}", input.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_image_file(path))
            .collect();
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn run_hash(path: &Path, jacket: bool) -> Result<()> {
    let image = ScreenshotSource::File(path.to_path_buf()).load()?;
    let target = if jacket {
        image
    } else {
        DynamicImage::ImageRgb8(crop_field(&image.to_rgb8(), Field::Jacket))
    };

    println!("{}", DctHasher.hash(&target));
    Ok(())
}
