//! Coordinate conversion utilities.
//!
//! Converts pixel coordinates on the 1920x1080 reference canvas to relative
//! coordinates (0.0-1.0), and relative coordinates to absolute pixels on a
//! screenshot of any size.

/// Width of the canvas the region table is measured on.
pub const REFERENCE_WIDTH: f64 = 1920.0;
/// Height of the canvas the region table is measured on.
pub const REFERENCE_HEIGHT: f64 = 1080.0;

/// Converts reference pixel coordinates to relative coordinates.
pub fn ratio(x: u32, y: u32) -> (f64, f64) {
    (x as f64 / REFERENCE_WIDTH, y as f64 / REFERENCE_HEIGHT)
}

/// Scales relative coordinates to absolute pixels on an image of `size`.
///
/// Rounds to the nearest pixel with ties to even. Results are not clamped to
/// the image; cropping and sampling clamp on their side.
pub fn scale(ratio_x: f64, ratio_y: f64, size: (u32, u32)) -> (u32, u32) {
    let (width, height) = size;
    let abs_x = (width as f64 * ratio_x).round_ties_even();
    let abs_y = (height as f64 * ratio_y).round_ties_even();
    // `as` saturates: negative or NaN become 0
    (abs_x as u32, abs_y as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ratio_reference_corners() {
        assert_eq!(ratio(0, 0), (0.0, 0.0));
        assert_eq!(ratio(1920, 1080), (1.0, 1.0));
        assert_eq!(ratio(960, 540), (0.5, 0.5));
    }

    #[test]
    fn test_scale_identity_on_reference_size() {
        let (rx, ry) = ratio(122, 193);
        assert_eq!(scale(rx, ry, (1920, 1080)), (122, 193));
    }

    #[test]
    fn test_scale_to_larger_screenshot() {
        let (rx, ry) = ratio(522, 593);
        // 2560x1440 is exactly 4/3 of the reference
        assert_eq!(scale(rx, ry, (2560, 1440)), (696, 791));
    }

    #[test]
    fn test_scale_ties_round_to_even() {
        // 0.5 * 5 = 2.5 -> 2, 0.5 * 7 = 3.5 -> 4
        assert_eq!(scale(0.5, 0.5, (5, 7)), (2, 4));
    }

    #[test]
    fn test_scale_degenerate_inputs_saturate() {
        assert_eq!(scale(-0.5, f64::NAN, (100, 100)), (0, 0));
        assert_eq!(scale(0.5, 0.5, (1, 1)), (0, 0));
    }

    proptest! {
        #[test]
        fn scaled_point_maps_back_within_one_reference_pixel(
            x in 0u32..=1920,
            y in 0u32..=1080,
            width in 960u32..=7680,
            height in 540u32..=4320,
        ) {
            let (rx, ry) = ratio(x, y);
            let (ax, ay) = scale(rx, ry, (width, height));
            let back_x = ax as f64 * REFERENCE_WIDTH / width as f64;
            let back_y = ay as f64 * REFERENCE_HEIGHT / height as f64;
            prop_assert!((back_x - x as f64).abs() <= 1.0 + 1e-9);
            prop_assert!((back_y - y as f64).abs() <= 1.0 + 1e-9);
        }

        #[test]
        fn scaled_point_is_within_half_a_target_pixel(
            x in 0u32..=1920,
            width in 1u32..=7680,
        ) {
            let (rx, _) = ratio(x, 0);
            let (ax, _) = scale(rx, 0.0, (width, 1));
            prop_assert!((ax as f64 - rx * width as f64).abs() <= 0.5 + 1e-9);
        }
    }
}
