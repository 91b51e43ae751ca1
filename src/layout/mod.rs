//! Result-screen layout.
//!
//! This module provides:
//! - Reference-canvas to screenshot coordinate mapping
//! - The region table for every field on the result screen
//! - Cropping and point sampling of those regions

pub mod coords;
pub mod extract;
pub mod roi;

pub use coords::{ratio, scale, REFERENCE_HEIGHT, REFERENCE_WIDTH};
pub use extract::{crop_field, pixel_rgb, sample_field};
pub use roi::{Field, Region, JUDGEMENT_BANDS};
