use crate::catalog::Song;

use super::difficulty::Difficulty;

/// Picks the level to report for a chart.
///
/// When the matched song registers exactly one level for the recognized lane
/// count and difficulty, that level wins over the OCR reading. Otherwise the
/// OCR reading is kept.
pub fn resolve_level(
    song: Option<&Song>,
    line: u32,
    difficulty: Difficulty,
    ocr_level: u32,
) -> u32 {
    let Some(song) = song else {
        return ocr_level;
    };

    match song.available_levels(line, difficulty).as_slice() {
        [level] => *level,
        _ => ocr_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::tests::{make_song, pattern};

    #[test]
    fn test_single_catalog_level_overrides_ocr() {
        let mut song = make_song(1, None, None);
        song.add_pattern(pattern(6, Difficulty::Hard, 11));

        assert_eq!(resolve_level(Some(&song), 6, Difficulty::Hard, 17), 11);
    }

    #[test]
    fn test_ambiguous_catalog_keeps_ocr() {
        let mut song = make_song(1, None, None);
        song.add_pattern(pattern(6, Difficulty::Hard, 11));
        song.add_pattern(pattern(6, Difficulty::Hard, 12));

        assert_eq!(resolve_level(Some(&song), 6, Difficulty::Hard, 12), 12);
    }

    #[test]
    fn test_no_catalog_level_keeps_ocr() {
        let song = make_song(1, None, None);
        assert_eq!(resolve_level(Some(&song), 4, Difficulty::Easy, 3), 3);
        assert_eq!(resolve_level(None, 4, Difficulty::Easy, 3), 3);
    }
}
