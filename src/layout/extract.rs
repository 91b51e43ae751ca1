use image::{imageops, RgbImage};

use super::coords::{ratio, scale};
use super::roi::{Field, Region};

/// Crops the region of `field` from a screenshot.
///
/// Both corners are scaled independently and the crop covers
/// `[x0, x1) x [y0, y1)`, clamped to the image bounds. Judgement bands take
/// their X range from the notes area. A point field yields its single pixel.
pub fn crop_field(img: &RgbImage, field: Field) -> RgbImage {
    let size = img.dimensions();

    let (x0, y0, x1, y1) = match field.relative_box() {
        Some((rx0, ry0, rx1, ry1)) => {
            let (x0, y0) = scale(rx0, ry0, size);
            let (x1, y1) = scale(rx1, ry1, size);
            (x0, y0, x1, y1)
        }
        None => {
            let (x, y) = point_of(field, size);
            (x, y, x.saturating_add(1), y.saturating_add(1))
        }
    };

    crop_clamped(img, x0, y0, x1, y1)
}

/// Scales the point of `field` onto the screenshot and hands the absolute
/// pixel location to `f`.
pub fn sample_field<T>(
    img: &RgbImage,
    field: Field,
    f: impl FnOnce(&RgbImage, u32, u32) -> T,
) -> T {
    let (x, y) = point_of(field, img.dimensions());
    f(img, x, y)
}

/// Reads one pixel, clamping the location to the image.
///
/// Returns black for an empty image.
pub fn pixel_rgb(img: &RgbImage, x: u32, y: u32) -> [u8; 3] {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return [0, 0, 0];
    }
    img.get_pixel(x.min(w - 1), y.min(h - 1)).0
}

/// Absolute location of a field's reference point (top-left corner for boxes).
fn point_of(field: Field, size: (u32, u32)) -> (u32, u32) {
    let (x, y) = match field.region() {
        Region::Point { x, y } => (x, y),
        Region::Box { x0, y0, .. } => (x0, y0),
        Region::Band { y0, .. } => match Field::NotesArea.region() {
            Region::Box { x0, .. } => (x0, y0),
            _ => (0, y0),
        },
    };
    let (rx, ry) = ratio(x, y);
    scale(rx, ry, size)
}

fn crop_clamped(img: &RgbImage, x0: u32, y0: u32, x1: u32, y1: u32) -> RgbImage {
    let (w, h) = img.dimensions();

    let x0 = x0.min(w);
    let y0 = y0.min(h);
    let width = x1.min(w).saturating_sub(x0);
    let height = y1.min(h).saturating_sub(y0);

    imageops::crop_imm(img, x0, y0, width, height).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 0])
        })
    }

    #[test]
    fn test_crop_box_on_reference_size() {
        let img = gradient(1920, 1080);
        let crop = crop_field(&img, Field::Jacket);

        assert_eq!(crop.dimensions(), (400, 400));
        assert_eq!(crop.get_pixel(0, 0).0, [122, 193, 0]);
    }

    #[test]
    fn test_crop_band_uses_notes_area_x() {
        let img = gradient(1920, 1080);
        let crop = crop_field(&img, Field::PerfectHigh);

        assert_eq!(crop.dimensions(), (950 - 874, 675 - 650));
        assert_eq!(
            crop.get_pixel(0, 0).0,
            [(874 % 256) as u8, (650 % 256) as u8, 0]
        );
    }

    #[test]
    fn test_crop_scales_with_screenshot() {
        let img = gradient(3840, 2160);
        let crop = crop_field(&img, Field::Jacket);

        assert_eq!(crop.dimensions(), (800, 800));
        assert_eq!(
            crop.get_pixel(0, 0).0,
            [(244 % 256) as u8, (386 % 256) as u8, 0]
        );
    }

    #[test]
    fn test_crop_clamps_to_small_image() {
        let img = gradient(100, 100);
        let crop = crop_field(&img, Field::Score);
        assert!(crop.width() <= 100 && crop.height() <= 100);
    }

    #[test]
    fn test_sample_point_field() {
        let img = gradient(1920, 1080);
        let (x, y) = sample_field(&img, Field::DifficultyColor, |_, x, y| (x, y));
        assert_eq!((x, y), (300, 730));

        let rgb = sample_field(&img, Field::DifficultyColor, pixel_rgb);
        assert_eq!(rgb, [(300 % 256) as u8, (730 % 256) as u8, 0]);
    }

    #[test]
    fn test_pixel_rgb_clamps() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(1, 1, Rgb([9, 8, 7]));
        assert_eq!(pixel_rgb(&img, 50, 50), [9, 8, 7]);
        assert_eq!(pixel_rgb(&RgbImage::new(0, 0), 0, 0), [0, 0, 0]);
    }
}
