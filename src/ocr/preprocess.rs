use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, RgbImage};

/// Enlarges a crop by an integer factor with Lanczos resampling.
pub fn upscale(img: &RgbImage, factor: u32) -> RgbImage {
    let factor = factor.max(1);
    imageops::resize(
        img,
        img.width() * factor,
        img.height() * factor,
        FilterType::Lanczos3,
    )
}

/// Converts a grayscale image to two levels.
///
/// Pixels brighter than `threshold` become white (255), all others black (0).
pub fn binarize(img: &GrayImage, threshold: u8) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let value = if pixel[0] > threshold { 255u8 } else { 0u8 };
        output.put_pixel(x, y, Luma([value]));
    }

    output
}

/// Prepares an integer field for OCR.
///
/// Upscales, converts to grayscale, optionally inverts (for fields drawn dark
/// on light), then binarizes.
pub fn prepare_integer_crop(img: &RgbImage, factor: u32, threshold: u8, invert: bool) -> GrayImage {
    let upscaled = upscale(img, factor);
    let mut gray = DynamicImage::ImageRgb8(upscaled).to_luma8();
    if invert {
        imageops::invert(&mut gray);
    }
    binarize(&gray, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_upscale_dimensions() {
        let img = RgbImage::new(10, 3);
        assert_eq!(upscale(&img, 4).dimensions(), (40, 12));
        assert_eq!(upscale(&img, 0).dimensions(), (10, 3));
    }

    #[test]
    fn test_binarize_threshold_is_exclusive() {
        let mut img = GrayImage::new(3, 1);
        img.put_pixel(0, 0, Luma([200]));
        img.put_pixel(1, 0, Luma([201]));
        img.put_pixel(2, 0, Luma([10]));

        let result = binarize(&img, 200);

        assert_eq!(result.get_pixel(0, 0)[0], 0, "Threshold value stays black");
        assert_eq!(
            result.get_pixel(1, 0)[0],
            255,
            "Brighter pixel becomes white"
        );
        assert_eq!(result.get_pixel(2, 0)[0], 0, "Dark pixel stays black");
    }

    #[test]
    fn test_prepare_uniform_crops() {
        let white = RgbImage::from_pixel(5, 5, Rgb([250, 250, 250]));
        let black = RgbImage::from_pixel(5, 5, Rgb([5, 5, 5]));

        let plain = prepare_integer_crop(&white, 4, 200, false);
        assert_eq!(plain.dimensions(), (20, 20));
        assert!(plain.pixels().all(|p| p[0] == 255));

        // Inverted before the cut: dark text ends up white
        let inverted = prepare_integer_crop(&black, 4, 200, true);
        assert!(inverted.pixels().all(|p| p[0] == 255));

        let inverted_white = prepare_integer_crop(&white, 4, 200, true);
        assert!(inverted_white.pixels().all(|p| p[0] == 0));
    }
}
