use serde::Serialize;

use crate::scoring::Difficulty;

/// One chart of a song.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Pattern {
    /// Number of lanes, 4 or 6
    pub line: u32,
    pub difficulty: Difficulty,
    pub level: u32,
    pub designer: String,
}

/// A catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Song {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub bpm: String,
    pub dlc: Option<String>,
    /// Jacket hash, hexadecimal
    pub phash: Option<String>,
    /// Hash of the alternate jacket shown on PLUS charts
    pub plus_phash: Option<String>,
    pub patterns: Vec<Pattern>,
}

impl Song {
    pub fn add_pattern(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    /// Levels registered for a lane count and difficulty, in catalog order.
    ///
    /// The catalog does not guarantee uniqueness, so this can hold zero, one
    /// or several levels.
    pub fn available_levels(&self, line: u32, difficulty: Difficulty) -> Vec<u32> {
        self.patterns
            .iter()
            .filter(|p| p.line == line && p.difficulty == difficulty)
            .map(|p| p.level)
            .collect()
    }

    pub fn is_level_registered(&self, line: u32, difficulty: Difficulty, level: u32) -> bool {
        self.available_levels(line, difficulty).contains(&level)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_song(id: u32, phash: Option<&str>, plus_phash: Option<&str>) -> Song {
        Song {
            id,
            title: format!("Song {}", id),
            artist: "Artist".to_string(),
            bpm: "180".to_string(),
            dlc: None,
            phash: phash.map(str::to_string),
            plus_phash: plus_phash.map(str::to_string),
            patterns: Vec::new(),
        }
    }

    pub(crate) fn pattern(line: u32, difficulty: Difficulty, level: u32) -> Pattern {
        Pattern {
            line,
            difficulty,
            level,
            designer: "designer".to_string(),
        }
    }

    #[test]
    fn test_available_levels_filters_by_line_and_difficulty() {
        let mut song = make_song(1, None, None);
        song.add_pattern(pattern(4, Difficulty::Easy, 3));
        song.add_pattern(pattern(6, Difficulty::Easy, 5));
        song.add_pattern(pattern(6, Difficulty::Hard, 9));

        assert_eq!(song.available_levels(6, Difficulty::Easy), vec![5]);
        assert_eq!(
            song.available_levels(4, Difficulty::Hard),
            Vec::<u32>::new()
        );
    }

    #[test]
    fn test_available_levels_tolerates_duplicates() {
        let mut song = make_song(1, None, None);
        song.add_pattern(pattern(6, Difficulty::Over, 12));
        song.add_pattern(pattern(6, Difficulty::Over, 13));

        assert_eq!(song.available_levels(6, Difficulty::Over), vec![12, 13]);
        assert!(song.is_level_registered(6, Difficulty::Over, 13));
        assert!(!song.is_level_registered(6, Difficulty::Over, 14));
    }
}
