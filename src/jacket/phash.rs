//! Perceptual hashing of jacket images.
//!
//! The hash is the 64-bit DCT hash used by the catalog: grayscale with the
//! ITU-R 601 weights of PIL's `convert("L")`, resize to 32x32, 2-D DCT-II,
//! keep the 8x8 low-frequency block and set each bit where
//! the coefficient is above the block median. Bits are stored row-major with
//! the first coefficient in the most significant bit, which is also the order
//! of the 16-digit hexadecimal text form.

use anyhow::{anyhow, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::f64::consts::PI;
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;
use std::sync::OnceLock;

const HASH_SIZE: usize = 8;
const SAMPLE_SIZE: usize = HASH_SIZE * 4;

const HEX_PATTERN: &str = r"^[0-9a-fA-F]{16}$";

static HEX_REGEX: OnceLock<Regex> = OnceLock::new();

fn hex_regex() -> Result<&'static Regex> {
    if let Some(regex) = HEX_REGEX.get() {
        return Ok(regex);
    }
    let regex = Regex::new(HEX_PATTERN)?;
    Ok(HEX_REGEX.get_or_init(|| regex))
}

/// A 64-bit perceptual hash, compared by Hamming distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PerceptualHash(pub u64);

impl PerceptualHash {
    /// Number of differing bits.
    pub fn distance(self, other: PerceptualHash) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    pub fn to_hex(self) -> String {
        format!("{:016x}", self.0)
    }
}

impl Sub for PerceptualHash {
    type Output = u32;

    fn sub(self, other: PerceptualHash) -> u32 {
        self.distance(other)
    }
}

impl fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for PerceptualHash {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if !hex_regex()?.is_match(text) {
            return Err(anyhow!("Invalid perceptual hash '{}': expected 16 hex digits", s));
        }

        u64::from_str_radix(text, 16)
            .map(PerceptualHash)
            .map_err(|e| anyhow!("Invalid perceptual hash '{}': {}", s, e))
    }
}

impl Serialize for PerceptualHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PerceptualHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Produces a perceptual hash for an image.
pub trait ImageHasher: Send + Sync {
    fn hash(&self, image: &DynamicImage) -> PerceptualHash;
}

/// DCT-based perceptual hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct DctHasher;

impl ImageHasher for DctHasher {
    fn hash(&self, image: &DynamicImage) -> PerceptualHash {
        if image.width() == 0 || image.height() == 0 {
            return PerceptualHash::default();
        }

        let gray = pil_luma(image);
        let small = imageops::resize(
            &gray,
            SAMPLE_SIZE as u32,
            SAMPLE_SIZE as u32,
            FilterType::Lanczos3,
        );
        let pixels: Vec<f64> = small.pixels().map(|p| p[0] as f64).collect();

        let low = low_frequency_dct(&pixels);
        let median = median(&low);

        let bits = low
            .iter()
            .fold(0u64, |acc, &coef| (acc << 1) | u64::from(coef > median));
        PerceptualHash(bits)
    }
}

/// Grayscale conversion matching PIL `convert("L")`: fixed-point
/// `R*299/1000 + G*587/1000 + B*114/1000`, rounded. Alpha is dropped.
pub fn pil_luma(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0.map(u32::from);
        let value = (r * 19595 + g * 38470 + b * 7471 + 0x8000) >> 16;
        Luma([value as u8])
    })
}

/// Top-left `HASH_SIZE` x `HASH_SIZE` block of the unnormalized 2-D DCT-II,
/// row-major (vertical frequency first).
fn low_frequency_dct(pixels: &[f64]) -> Vec<f64> {
    let n = SAMPLE_SIZE as f64;
    let mut basis = [[0.0f64; SAMPLE_SIZE]; HASH_SIZE];
    for (k, row) in basis.iter_mut().enumerate() {
        for (i, value) in row.iter_mut().enumerate() {
            *value = (PI * k as f64 * (2.0 * i as f64 + 1.0) / (2.0 * n)).cos();
        }
    }

    // Transform along columns first, then along rows
    let mut vertical = [[0.0f64; SAMPLE_SIZE]; HASH_SIZE];
    for u in 0..HASH_SIZE {
        for x in 0..SAMPLE_SIZE {
            vertical[u][x] = (0..SAMPLE_SIZE)
                .map(|y| basis[u][y] * pixels[y * SAMPLE_SIZE + x])
                .sum();
        }
    }

    let mut coefficients = Vec::with_capacity(HASH_SIZE * HASH_SIZE);
    for row in &vertical {
        for freq in &basis {
            coefficients.push((0..SAMPLE_SIZE).map(|x| row[x] * freq[x]).sum());
        }
    }
    coefficients
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
