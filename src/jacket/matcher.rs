use crate::catalog::Song;

use super::phash::PerceptualHash;

/// Distance reported when the index has no candidates at all.
pub const NO_MATCH_DISTANCE: u32 = u32::MAX;

/// Distances above this are flagged as uncertain by callers.
pub const DEFAULT_PHASH_THRESHOLD: u32 = 5;

/// Hash index over the catalog jackets.
///
/// Standard and PLUS jacket hashes both point at the song they belong to.
/// Entries keep catalog order, standard before PLUS, which is the tie-break
/// order of [`JacketIndex::best_match`].
#[derive(Clone, Debug, Default)]
pub struct JacketIndex {
    entries: Vec<(PerceptualHash, usize)>,
}

impl JacketIndex {
    /// Builds the index from catalog songs; each entry stores the song position.
    ///
    /// Hashes that fail to parse are skipped.
    pub fn build(songs: &[Song]) -> Self {
        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for (idx, song) in songs.iter().enumerate() {
            for text in [&song.phash, &song.plus_phash].into_iter().flatten() {
                match text.parse::<PerceptualHash>() {
                    Ok(hash) => entries.push((hash, idx)),
                    Err(e) => {
                        skipped += 1;
                        crate::log(&format!(
                            "Warning: Skipping jacket hash of song {} ({}): {}",
                            song.id, song.title, e
                        ));
                    }
                }
            }
        }

        if skipped > 0 {
            crate::log(&format!("Jacket index: {} hashes skipped", skipped));
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the song position with the smallest distance to `target`.
    ///
    /// The first minimum wins. Never rejects a candidate; an empty index gives
    /// `(None, NO_MATCH_DISTANCE)`.
    pub fn best_match(&self, target: PerceptualHash) -> (Option<usize>, u32) {
        let mut best: Option<usize> = None;
        let mut min_distance = NO_MATCH_DISTANCE;

        for &(hash, idx) in &self.entries {
            let distance = target - hash;
            if best.is_none() || distance < min_distance {
                min_distance = distance;
                best = Some(idx);
            }
        }

        (best, min_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::tests::make_song;

    #[test]
    fn test_empty_catalog_has_no_match() {
        let index = JacketIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(
            index.best_match(PerceptualHash(42)),
            (None, NO_MATCH_DISTANCE)
        );
    }

    #[test]
    fn test_exact_hash_matches_with_zero_distance() {
        let songs = vec![make_song(1, Some("c3c3c3c3c3c3c3c3"), None)];
        let index = JacketIndex::build(&songs);

        let target: PerceptualHash = "c3c3c3c3c3c3c3c3".parse().unwrap();
        assert_eq!(index.best_match(target), (Some(0), 0));
    }

    #[test]
    fn test_plus_jacket_points_to_same_song() {
        let songs = vec![
            make_song(1, Some("0000000000000000"), None),
            make_song(2, Some("ffffffffffffffff"), Some("00000000ffffffff")),
        ];
        let index = JacketIndex::build(&songs);
        assert_eq!(index.len(), 3);

        let (song, distance) = index.best_match(PerceptualHash(0x0000_0000_ffff_fff0));
        assert_eq!(song, Some(1));
        assert_eq!(distance, 4);
    }

    #[test]
    fn test_far_match_is_still_returned() {
        let songs = vec![make_song(1, Some("0000000000000000"), None)];
        let index = JacketIndex::build(&songs);

        let (song, distance) = index.best_match(PerceptualHash(0xffff));
        assert_eq!(song, Some(0));
        assert_eq!(distance, 16);
    }

    #[test]
    fn test_ties_go_to_first_catalog_entry() {
        let songs = vec![
            make_song(1, Some("000000000000000f"), None),
            make_song(2, Some("00000000000000f0"), None),
        ];
        let index = JacketIndex::build(&songs);

        // Both are 4 bits away
        let (song, distance) = index.best_match(PerceptualHash(0));
        assert_eq!(song, Some(0));
        assert_eq!(distance, 4);
    }

    #[test]
    fn test_unparseable_hashes_are_skipped() {
        let songs = vec![
            make_song(1, Some("not-a-hash"), None),
            make_song(2, Some("00000000000000ff"), Some("")),
        ];
        let index = JacketIndex::build(&songs);
        assert_eq!(index.len(), 1);
        assert_eq!(index.best_match(PerceptualHash(0xff)), (Some(1), 0));
    }
}
