//! Result history as an append-only CSV file.
//!
//! The file is opened in append mode for every row, so results already
//! written survive a crash later in the run.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::analyzer::AnalysisReport;
use crate::jacket::NO_MATCH_DISTANCE;

const CSV_HEADER: &str = "timestamp,source,song_id,title,artist,line,difficulty,level,accuracy,rank,score,patch,full_combo,perfect_decode,match_distance";

/// Writes the header unless the file already has content.
pub fn init_history_csv(path: &Path) -> Result<()> {
    if path.exists() {
        let file = File::open(path).context("Failed to open existing CSV")?;
        let reader = BufReader::new(file);
        if reader.lines().next().is_some() {
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).context("Failed to create CSV directory")?;
        }
    }

    let mut file = File::create(path).context("Failed to create CSV file")?;
    writeln!(file, "{}", CSV_HEADER).context("Failed to write CSV header")?;
    Ok(())
}

/// Appends one analyzed screenshot.
///
/// Song fields are empty when no song matched, and so is the distance when
/// the catalog had no jackets.
pub fn append_report(
    path: &Path,
    analyzed_at: DateTime<Local>,
    source: &str,
    report: &AnalysisReport,
) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("Failed to open CSV for append")?;

    let (song_id, title, artist) = match report.song() {
        Some(song) => (song.id.to_string(), song.title.as_str(), song.artist.as_str()),
        None => (String::new(), "", ""),
    };
    let distance = match report.match_distance() {
        NO_MATCH_DISTANCE => String::new(),
        d => d.to_string(),
    };

    let line = format!(
        "{},{},{},{},{},{},{},{},{:.4},{},{},{:.2},{},{},{}",
        analyzed_at.format("%Y-%m-%dT%H:%M:%S"),
        csv_field(source),
        song_id,
        csv_field(title),
        csv_field(artist),
        report.line(),
        report.difficulty(),
        report.level(),
        report.accuracy(),
        report.rank(),
        report.score(),
        report.patch(),
        report.is_full_combo(),
        report.is_perfect_decode(),
        distance,
    );

    writeln!(file, "{}", line).context("Failed to write CSV row")?;
    Ok(())
}

/// Quotes a value that contains a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
