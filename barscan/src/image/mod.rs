//! Image loading and the pixel layouts the reader accepts

pub mod convert;
pub mod decode;

use std::borrow::Cow;
use std::fmt;

use imageproc::image::{ColorType, DynamicImage, GenericImageView, GrayImage};

use crate::error::{Error, Result};

/// Packed pixel layout of an [`ImageView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ImageFormat {
    Lum,
    Rgb,
    Rgbx,
    Bgr,
    Bgrx,
}

impl ImageFormat {
    pub fn pixel_size(&self) -> usize {
        match self {
            ImageFormat::Lum => 1,
            ImageFormat::Rgb | ImageFormat::Bgr => 3,
            ImageFormat::Rgbx | ImageFormat::Bgrx => 4,
        }
    }
}

/// Borrowed, tightly packed pixels with their geometry.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    bytes: &'a [u8],
    width: u32,
    height: u32,
    format: ImageFormat,
}

impl<'a> ImageView<'a> {
    pub fn new(bytes: &'a [u8], width: u32, height: u32, format: ImageFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::config(format!(
                "image view must not be empty ({width}x{height})"
            )));
        }

        let expected = width as usize * height as usize * format.pixel_size();
        if bytes.len() != expected {
            return Err(Error::config(format!(
                "image view of {width}x{height} {format:?} needs {expected} bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Self {
            bytes,
            width,
            height,
            format,
        })
    }

    pub fn from_gray(img: &'a GrayImage) -> Result<Self> {
        Self::new(img.as_raw(), img.width(), img.height(), ImageFormat::Lum)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Luminance bytes, `width * height` long.
    pub fn luma(&self) -> Cow<'a, [u8]> {
        convert::pack_luma(self.bytes, self.format)
    }
}

/// What gets printed about an image before its barcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub color: ColorType,
}

impl ImageInfo {
    pub fn of(img: &DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            color: img.color(),
        }
    }
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} {:?}", self.width, self.height, self.color)
    }
}
