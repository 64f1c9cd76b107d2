//! Packs vertically offset samples into printer column bytes.
//!
//! The ImageWriter fires a pin when its bit is **0**, so ink clears a bit and
//! paper sets it. Bits beyond the end of the offset set stay 0.

use crate::raster::{ink, Raster};

/// Encode one column at `x` for a pass based on row `y`.
///
/// Bit `i` is the sample at `y + offsets[i]`. At most eight offsets are used.
pub fn encode_column<R: Raster + ?Sized>(raster: &R, offsets: &[i64], x: i64, y: i64) -> u8 {
    offsets
        .iter()
        .take(8)
        .enumerate()
        .fold(0u8, |byte, (bit, offset)| {
            if ink(raster, x, y + offset) {
                byte
            } else {
                byte | (1 << bit)
            }
        })
}

/// Encode every column of a row, `x` running over `0..=width`.
pub fn encode_row<R: Raster + ?Sized>(raster: &R, offsets: &[i64], width: u32, y: i64) -> Vec<u8> {
    (0..=i64::from(width))
        .map(|x| encode_column(raster, offsets, x, y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_blank_column_sets_used_bits() {
        let img = RgbaImage::from_pixel(4, 16, WHITE);
        assert_eq!(encode_column(&img, &[0, 2, 4, 6, 8, 10, 12, 14], 0, 0), 0xFF);
        assert_eq!(encode_column(&img, &[0, 2, 4, 6, 8, 10], 0, 0), 0x3F);
        assert_eq!(encode_column(&img, &[1, 3], 0, 0), 0x03);
    }

    #[test]
    fn test_solid_column_clears_everything() {
        let img = RgbaImage::from_pixel(4, 16, BLACK);
        assert_eq!(encode_column(&img, &[1, 3, 5, 7, 9, 11, 13, 15], 2, 0), 0x00);
        assert_eq!(encode_column(&img, &[5, 7, 9, 11, 13, 15], 2, -4), 0x00);
    }

    #[test]
    fn test_bit_order_follows_offsets() {
        // Only row 4 is inked.
        let img = RgbaImage::from_fn(1, 8, |_, y| if y == 4 { BLACK } else { WHITE });
        assert_eq!(encode_column(&img, &[0, 1, 2, 3, 4, 5, 6, 7], 0, 0), 0b1110_1111);
        assert_eq!(encode_column(&img, &[0, 2, 4, 6], 0, 0), 0b0000_1011);
        assert_eq!(encode_column(&img, &[0, 2, 4, 6], 0, 2), 0b0000_1101);
    }

    #[test]
    fn test_enhanced_second_sweep_uses_low_bits() {
        let sweep = crate::mode::layout(
            crate::mode::VerticalDpi::Dpi144,
            crate::mode::Quality::Enhanced,
        )
        .sweeps[1]
            .offsets;
        // Row 5 is the first sample of the sweep and lands in bit 0.
        let img = RgbaImage::from_fn(1, 16, |_, y| if y == 5 { BLACK } else { WHITE });
        assert_eq!(encode_column(&img, sweep, 0, 0), 0b0011_1110);

        let blank = RgbaImage::from_pixel(1, 16, WHITE);
        assert_eq!(encode_column(&blank, sweep, 0, 0), 0x3F);
    }

    #[test]
    fn test_rows_above_image_are_blank() {
        let img = RgbaImage::from_pixel(1, 16, BLACK);
        // Offsets 0 and 2 land on rows -4 and -2.
        assert_eq!(encode_column(&img, &[0, 2, 4, 6, 8, 10], 0, -4), 0b0000_0011);
    }

    #[test]
    fn test_row_is_inclusive_of_width() {
        let img = RgbaImage::from_pixel(3, 2, BLACK);
        let row = encode_row(&img, &[0, 1], 3, 0);
        assert_eq!(row, vec![0x00, 0x00, 0x00, 0x03]);
    }
}
