//! Region table for the result screen, measured on the 1920x1080 reference canvas.

use std::fmt;

use super::coords::ratio;

/// A region in reference pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Bounding box `[x0, x1) x [y0, y1)`
    Box { x0: u32, y0: u32, x1: u32, y1: u32 },
    /// Vertical band that borrows its X range from [`Field::NotesArea`]
    Band { y0: u32, y1: u32 },
    /// Single pixel
    Point { x: u32, y: u32 },
}

/// Every field read from the result screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Jacket,
    /// Accuracy ("judge") percentage
    Judge,
    Line,
    Level,
    Patch,
    Score,
    /// Shared X range of the judgement count column; its Y values are unused
    NotesArea,
    TotalNotes,
    PerfectHigh,
    Perfect,
    Great,
    Good,
    Miss,
    DifficultyColor,
}

/// Fields addressed by the notes-area X range and their own Y range.
pub const JUDGEMENT_BANDS: [Field; 6] = [
    Field::TotalNotes,
    Field::PerfectHigh,
    Field::Perfect,
    Field::Great,
    Field::Good,
    Field::Miss,
];

impl Field {
    /// Reference coordinates of this field.
    pub const fn region(self) -> Region {
        match self {
            Self::Jacket => Region::Box {
                x0: 122,
                y0: 193,
                x1: 522,
                y1: 593,
            },
            Self::Judge => Region::Box {
                x0: 959,
                y0: 301,
                x1: 1283,
                y1: 367,
            },
            Self::Line => Region::Box {
                x0: 37,
                y0: 32,
                x1: 75,
                y1: 81,
            },
            Self::Level => Region::Box {
                x0: 395,
                y0: 700,
                x1: 502,
                y1: 762,
            },
            Self::Patch => Region::Box {
                x0: 979,
                y0: 186,
                x1: 1320,
                y1: 251,
            },
            Self::Score => Region::Box {
                x0: 953,
                y0: 418,
                x1: 1316,
                y1: 483,
            },
            Self::NotesArea => Region::Box {
                x0: 874,
                y0: 0,
                x1: 950,
                y1: 0,
            },
            Self::TotalNotes => Region::Band { y0: 589, y1: 614 },
            Self::PerfectHigh => Region::Band { y0: 650, y1: 675 },
            Self::Perfect => Region::Band { y0: 686, y1: 713 },
            Self::Great => Region::Band { y0: 725, y1: 751 },
            Self::Good => Region::Band { y0: 764, y1: 788 },
            Self::Miss => Region::Band { y0: 800, y1: 828 },
            Self::DifficultyColor => Region::Point { x: 300, y: 730 },
        }
    }

    pub fn is_judgement_band(self) -> bool {
        JUDGEMENT_BANDS.contains(&self)
    }

    /// Relative bounding box `(rx0, ry0, rx1, ry1)` for box and band fields.
    ///
    /// Returns `None` for point fields.
    pub fn relative_box(self) -> Option<(f64, f64, f64, f64)> {
        if self.is_judgement_band() {
            let Region::Band { y0, y1 } = self.region() else {
                return None;
            };
            let Region::Box { x0, x1, .. } = Field::NotesArea.region() else {
                return None;
            };
            let (rx0, ry0) = ratio(x0, y0);
            let (rx1, ry1) = ratio(x1, y1);
            return Some((rx0, ry0, rx1, ry1));
        }

        match self.region() {
            Region::Box { x0, y0, x1, y1 } => {
                let (rx0, ry0) = ratio(x0, y0);
                let (rx1, ry1) = ratio(x1, y1);
                Some((rx0, ry0, rx1, ry1))
            }
            Region::Band { .. } | Region::Point { .. } => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jacket => "jacket",
            Self::Judge => "judge",
            Self::Line => "line",
            Self::Level => "level",
            Self::Patch => "patch",
            Self::Score => "score",
            Self::NotesArea => "notes_area",
            Self::TotalNotes => "total_notes",
            Self::PerfectHigh => "perfect_high",
            Self::Perfect => "perfect",
            Self::Great => "great",
            Self::Good => "good",
            Self::Miss => "miss",
            Self::DifficultyColor => "difficulty_color",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_share_notes_area_x() {
        for field in JUDGEMENT_BANDS {
            let (rx0, _, rx1, _) = field.relative_box().unwrap();
            assert_eq!(rx0, 874.0 / 1920.0, "{field}");
            assert_eq!(rx1, 950.0 / 1920.0, "{field}");
        }
    }

    #[test]
    fn test_band_y_is_independent() {
        let (_, ry0, _, ry1) = Field::Great.relative_box().unwrap();
        assert_eq!(ry0, 725.0 / 1080.0);
        assert_eq!(ry1, 751.0 / 1080.0);
    }

    #[test]
    fn test_only_band_fields_are_bands() {
        assert!(Field::Miss.is_judgement_band());
        assert!(Field::TotalNotes.is_judgement_band());
        assert!(!Field::Score.is_judgement_band());
        assert!(!Field::NotesArea.is_judgement_band());
    }

    #[test]
    fn test_point_field_has_no_box() {
        assert_eq!(Field::DifficultyColor.relative_box(), None);
        assert_eq!(
            Field::DifficultyColor.region(),
            Region::Point { x: 300, y: 730 }
        );
    }
}
