//! Hands luminance buffers to the decoding engine and collects its symbols

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use imageproc::image::DynamicImage;
use rxing::{DecodeHintType, DecodeHintValue, DecodingHintDictionary, Exceptions};

use crate::barcode::Barcode;
use crate::error::{Error, Result};
use crate::format::BarcodeFormats;
use crate::image::{convert, ImageView};

// Smaller images trip the engine's detectors and cannot hold any symbol anyway
const MIN_SIDE: u32 = 8;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReaderOptions {
    /// Symbologies to look for, empty for all of them
    pub formats: BarcodeFormats,
    /// Also decode the color-inverted image
    pub try_invert: bool,
    /// Spend more time looking for symbols (rotations, more scan lines)
    pub try_harder: bool,
    /// The image contains exactly one unrotated symbol and nothing else
    pub is_pure: bool,
    pub max_number_of_symbols: u8,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            formats: BarcodeFormats::all(),
            try_invert: true,
            try_harder: true,
            is_pure: false,
            max_number_of_symbols: u8::MAX,
        }
    }
}

impl ReaderOptions {
    pub fn with_formats(mut self, formats: BarcodeFormats) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_try_invert(mut self, try_invert: bool) -> Self {
        self.try_invert = try_invert;
        self
    }

    pub fn with_try_harder(mut self, try_harder: bool) -> Self {
        self.try_harder = try_harder;
        self
    }

    pub fn with_is_pure(mut self, is_pure: bool) -> Self {
        self.is_pure = is_pure;
        self
    }

    pub fn with_max_number_of_symbols(mut self, max: u8) -> Self {
        self.max_number_of_symbols = max;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_number_of_symbols == 0 {
            return Err(Error::config("max_number_of_symbols must be at least 1"));
        }
        Ok(())
    }

    fn hints(&self) -> DecodingHintDictionary {
        let mut hints = DecodingHintDictionary::new();
        if let Some(formats) = self.formats.to_rxing() {
            hints.insert(
                DecodeHintType::POSSIBLE_FORMATS,
                DecodeHintValue::PossibleFormats(formats),
            );
        }
        if self.try_harder {
            hints.insert(DecodeHintType::TRY_HARDER, DecodeHintValue::TryHarder(true));
        }
        if self.is_pure {
            hints.insert(
                DecodeHintType::PURE_BARCODE,
                DecodeHintValue::PureBarcode(true),
            );
        }
        hints
    }
}

/// Decode every symbol in `image`. No symbol found is `Ok(vec![])`.
pub fn read_barcodes(image: ImageView<'_>, options: &ReaderOptions) -> Result<Vec<Barcode>> {
    options.validate()?;

    let (width, height) = (image.width(), image.height());
    let max = options.max_number_of_symbols as usize;

    log::debug!(
        "Reading {width}x{height} {:?} image, formats: {}",
        image.format(),
        options.formats
    );

    if width < MIN_SIDE || height < MIN_SIDE {
        log::info!("Image is too small to hold a barcode ({width}x{height})");
        return Ok(Vec::new());
    }

    let luma = image.luma();
    let inverted = options.try_invert.then(|| convert::invert_luma(&luma));

    let mut barcodes = detect(luma.into_owned(), width, height, options)?;

    if let Some(inverted) = inverted.filter(|_| barcodes.len() < max) {
        for mut barcode in detect(inverted, width, height, options)? {
            if barcodes.iter().any(|b| b.same_symbol(&barcode)) {
                log::debug!("Skipping {} already found before inversion", barcode.format);
                continue;
            }
            barcode.inverted = true;
            barcodes.push(barcode);
        }
    }

    barcodes.truncate(max);
    log::info!("Found {} barcode(s)", barcodes.len());

    Ok(barcodes)
}

/// Convert a decoded image to luminance and read it.
pub fn read_image(img: &DynamicImage, options: &ReaderOptions) -> Result<Vec<Barcode>> {
    let gray = convert::to_luma(img);
    read_barcodes(ImageView::from_gray(&gray)?, options)
}

fn detect(luma: Vec<u8>, width: u32, height: u32, options: &ReaderOptions) -> Result<Vec<Barcode>> {
    let mut hints = options.hints();
    let start = Instant::now();

    let detected = panic::catch_unwind(AssertUnwindSafe(|| {
        rxing::helpers::detect_multiple_in_luma_with_hints(luma, width, height, &mut hints)
    }))
    .map_err(|_| Error::config(format!("barcode engine failed on {width}x{height} image")))?;

    let results = match detected {
        Ok(results) => results,
        // a candidate that fails to decode is still "nothing found"
        Err(
            Exceptions::NotFoundException(_)
            | Exceptions::ChecksumException(_)
            | Exceptions::FormatException(_),
        ) => Vec::new(),
        Err(e) => return Err(Error::config(format!("barcode engine rejected input: {e}"))),
    };

    log::debug!(
        "Engine returned {} result(s) in {:?}",
        results.len(),
        start.elapsed()
    );

    Ok(results.iter().filter_map(Barcode::from_rxing).collect())
}
