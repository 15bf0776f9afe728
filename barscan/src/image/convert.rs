//! Luminance conversion

use std::borrow::Cow;

use imageproc::image::{DynamicImage, GrayImage, Luma};

use super::ImageFormat;

/// Single-channel luminance copy of `img`. `L8` input is copied untouched.
pub fn to_luma(img: &DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        other => other.to_luma8(),
    }
}

/// Color-inverted copy, for light-on-dark symbols.
pub fn invert(img: &GrayImage) -> GrayImage {
    imageproc::map::map_colors(img, |pixel| Luma([255 - pixel[0]]))
}

/// [`invert`] on a bare luminance buffer.
pub(crate) fn invert_luma(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|v| 255 - v).collect()
}

/// Integer BT.601 weights, rounding to nearest
#[inline(always)]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Drop color channels from a packed buffer. Borrows when already luminance.
pub(super) fn pack_luma(bytes: &[u8], format: ImageFormat) -> Cow<'_, [u8]> {
    let step = format.pixel_size();
    match format {
        ImageFormat::Lum => Cow::Borrowed(bytes),
        ImageFormat::Rgb | ImageFormat::Rgbx => Cow::Owned(
            bytes
                .chunks_exact(step)
                .map(|px| luma(px[0], px[1], px[2]))
                .collect(),
        ),
        ImageFormat::Bgr | ImageFormat::Bgrx => Cow::Owned(
            bytes
                .chunks_exact(step)
                .map(|px| luma(px[2], px[1], px[0]))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::image::{Rgb, RgbImage};

    fn gradient() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(17, 9, |x, y| {
            Rgb([(x * 15) as u8, (y * 28) as u8, ((x + y) * 7) as u8])
        }))
    }

    #[test]
    fn conversion_is_deterministic() {
        let img = gradient();
        let a = to_luma(&img);
        let b = to_luma(&img);
        assert_eq!(a.dimensions(), (17, 9));
        assert_eq!(a.as_raw().len(), 17 * 9);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn luma_input_is_untouched() {
        let gray = GrayImage::from_fn(4, 3, |x, y| Luma([(x * 60 + y) as u8]));
        let converted = to_luma(&DynamicImage::ImageLuma8(gray.clone()));
        assert_eq!(converted.as_raw(), gray.as_raw());
    }

    #[test]
    fn invert_flips_every_pixel() {
        let gray = GrayImage::from_raw(3, 1, vec![0, 100, 255]).unwrap();
        assert_eq!(invert(&gray).into_raw(), vec![255, 155, 0]);
        assert_eq!(invert_luma(gray.as_raw()), vec![255, 155, 0]);
    }

    #[test]
    fn packed_channels_are_reduced() {
        let rgb = [255, 255, 255, 0, 0, 0, 255, 0, 0];
        assert_eq!(pack_luma(&rgb, ImageFormat::Rgb).as_ref(), &[255, 0, 76]);

        let bgrx = [0, 0, 255, 9, 255, 255, 255, 9];
        assert_eq!(pack_luma(&bgrx, ImageFormat::Bgrx).as_ref(), &[76, 255]);

        let lum = [1, 2, 3];
        assert!(matches!(pack_luma(&lum, ImageFormat::Lum), Cow::Borrowed(_)));
    }
}
