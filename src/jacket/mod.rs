//! Jacket identification.
//!
//! Hashes the jacket crop of a result screen and finds the closest catalog
//! jacket by Hamming distance.

pub mod matcher;
pub mod phash;

pub use matcher::{JacketIndex, DEFAULT_PHASH_THRESHOLD, NO_MATCH_DISTANCE};
pub use phash::{DctHasher, ImageHasher, PerceptualHash};
