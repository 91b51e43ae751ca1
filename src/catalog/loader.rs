//! Catalog snapshot reader.
//!
//! Parses the JSON snapshot of the two collections served by the catalog API
//! (songs and patterns) and links patterns to their songs. Fetching the
//! snapshot is left to the caller.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::models::{Pattern, Song};
use crate::scoring::Difficulty;

/// Song row as served by the catalog API.
#[derive(Clone, Debug, Deserialize)]
pub struct SongRecord {
    #[serde(rename = "songID")]
    pub song_id: u32,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(rename = "BPM", default)]
    pub bpm: Option<TextValue>,
    #[serde(rename = "DLC", default)]
    pub dlc: Option<TextValue>,
    #[serde(rename = "pHash", default)]
    pub phash: Option<String>,
    #[serde(rename = "plusPHash", default)]
    pub plus_phash: Option<String>,
}

/// Pattern row as served by the catalog API.
#[derive(Clone, Debug, Deserialize)]
pub struct PatternRecord {
    #[serde(rename = "songID")]
    pub song_id: u32,
    pub line: u32,
    pub difficulty: Difficulty,
    pub level: u32,
    #[serde(default)]
    pub designer: Option<String>,
}

/// A field the API serves as either text or a number (BPM "120-180" or 180).
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl TextValue {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Both collections as stored on disk.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub songs: Vec<SongRecord>,
    #[serde(default)]
    pub patterns: Vec<PatternRecord>,
}

/// Loads a catalog snapshot file and builds the song list.
pub fn load_catalog(path: &Path) -> Result<Vec<Song>> {
    let contents = fs::read_to_string(path)
        .context(format!("Failed to read catalog file: {}", path.display()))?;
    let snapshot: CatalogSnapshot = serde_json::from_str(&contents)
        .context(format!("Failed to parse catalog file: {}", path.display()))?;

    let songs = build_catalog(snapshot.songs, snapshot.patterns);
    crate::log(&format!("{} songs loaded from {}", songs.len(), path.display()));
    Ok(songs)
}

/// Builds songs from API rows, keeping the order songs first appear in.
///
/// A repeated song id replaces the earlier row in place. Patterns whose song
/// id is unknown are dropped.
pub fn build_catalog(records: Vec<SongRecord>, patterns: Vec<PatternRecord>) -> Vec<Song> {
    let mut songs: Vec<Song> = Vec::with_capacity(records.len());
    let mut positions: HashMap<u32, usize> = HashMap::new();

    for record in records {
        let song = Song {
            id: record.song_id,
            title: record.title,
            artist: record.artist.unwrap_or_default().trim().to_string(),
            bpm: record.bpm.map(TextValue::into_string).unwrap_or_default(),
            dlc: record.dlc.map(TextValue::into_string),
            phash: record.phash.filter(|h| !h.is_empty()),
            plus_phash: record.plus_phash.filter(|h| !h.is_empty()),
            patterns: Vec::new(),
        };

        match positions.get(&song.id) {
            Some(&idx) => songs[idx] = song,
            None => {
                positions.insert(song.id, songs.len());
                songs.push(song);
            }
        }
    }

    let mut orphans = 0usize;
    for record in patterns {
        match positions.get(&record.song_id) {
            Some(&idx) => songs[idx].add_pattern(Pattern {
                line: record.line,
                difficulty: record.difficulty,
                level: record.level,
                designer: record.designer.unwrap_or_default(),
            }),
            None => orphans += 1,
        }
    }

    if orphans > 0 {
        crate::log(&format!(
            "Warning: Dropped {} patterns referring to unknown songs",
            orphans
        ));
    }

    songs
}
