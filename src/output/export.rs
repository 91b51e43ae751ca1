//! JSON export of analysis summaries.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::analyzer::ReportSummary;

/// Writes the summaries as a pretty-printed JSON array.
pub fn export_reports_json(summaries: &[ReportSummary], output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(summaries).context("Failed to serialize reports to JSON")?;

    let mut file = File::create(output_path)
        .context(format!("Failed to create JSON file: {}", output_path.display()))?;

    file.write_all(json.as_bytes())
        .context("Failed to write JSON data")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::report::tests::sample_report;
    use crate::catalog::models::tests::make_song;
    use tempfile::tempdir;

    #[test]
    fn test_export_reports_json() {
        let summaries = vec![
            sample_report(Some(make_song(3, None, None))).summary(),
            sample_report(None).summary(),
        ];

        let dir = tempdir().unwrap();
        let path = dir.path().join("reports.json");

        export_reports_json(&summaries, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[0]["title"], "Song 3");
        assert_eq!(value[1]["title"], "UNKNOWN SONG");
        assert!(value[1]["song_id"].is_null());
        assert!(content.contains("\"patch\": 395.14"));
    }
}
