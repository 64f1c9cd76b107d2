//! Raster sources and the bounds-safe ink sampler.

use image::{DynamicImage, GenericImageView, RgbaImage};

/// A monochrome image the printer can sample.
///
/// Implementors only have to answer for in-bounds coordinates; [`ink`] takes
/// care of everything outside the image.
pub trait Raster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// `true` when the pixel at `(x, y)` is exactly black.
    fn is_black(&self, x: u32, y: u32) -> bool;
}

impl Raster for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn is_black(&self, x: u32, y: u32) -> bool {
        // Alpha is ignored: a transparent black pixel still prints.
        match self.get_pixel_checked(x, y) {
            Some(pixel) => pixel.0[..3].iter().all(|&channel| channel == 0),
            None => false,
        }
    }
}

impl Raster for DynamicImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn is_black(&self, x: u32, y: u32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let pixel = self.get_pixel(x, y);
        pixel.0[..3].iter().all(|&channel| channel == 0)
    }
}

/// Sample the raster at a signed coordinate.
///
/// Returns `false` (no ink) for anything outside the image, including the
/// negative rows Enhanced mode starts on and the rows below the bottom edge
/// that the trailing over-scan pass reads. Never panics.
pub fn ink<R: Raster + ?Sized>(raster: &R, x: i64, y: i64) -> bool {
    let (x, y) = match (u32::try_from(x), u32::try_from(y)) {
        (Ok(x), Ok(y)) => (x, y),
        _ => return false,
    };
    if x >= raster.width() || y >= raster.height() {
        return false;
    }
    raster.is_black(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker() -> RgbaImage {
        RgbaImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    #[test]
    fn test_ink_only_for_exact_black() {
        let img = checker();
        assert!(ink(&img, 0, 0));
        assert!(!ink(&img, 1, 0));
        assert!(!ink(&img, 0, 1));
        assert!(ink(&img, 1, 1));
    }

    #[test]
    fn test_near_black_is_not_ink() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 1, 255]));
        assert!(!ink(&img, 0, 0));
    }

    #[test]
    fn test_alpha_is_ignored() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        assert!(ink(&img, 0, 0));
    }

    #[test]
    fn test_out_of_bounds_is_no_ink() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        assert!(!ink(&img, -1, 0));
        assert!(!ink(&img, 0, -4));
        assert!(!ink(&img, 2, 0));
        assert!(!ink(&img, 0, 2));
        assert!(!ink(&img, i64::MAX, i64::MAX));
    }

    #[test]
    fn test_empty_raster() {
        let img = RgbaImage::new(0, 0);
        assert!(!ink(&img, 0, 0));
    }

    #[test]
    fn test_dynamic_image_matches_rgba() {
        let img = checker();
        let dynamic = DynamicImage::ImageRgba8(img.clone());
        for y in -1..3 {
            for x in -1..3 {
                assert_eq!(ink(&img, x, y), ink(&dynamic, x, y));
            }
        }
    }
}
