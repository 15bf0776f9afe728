//! Image decoding

use std::path::Path;

use imageproc::image::{load_from_memory, DynamicImage, ImageError, ImageReader};

use crate::error::{Error, Result};

/// Load and decode an image file, guessing the codec from its contents.
pub fn open(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    log::debug!("Loading image: {}", path.display());

    let decode_error = |source| Error::Decode {
        path: path.to_path_buf(),
        source,
    };

    ImageReader::open(path)
        .map_err(|e| decode_error(ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_error(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_error)
}

/// Decode image from memory
pub fn decode(data: &[u8]) -> Result<DynamicImage> {
    load_from_memory(data).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_decode_error() {
        let err = open("/definitely/not/here.png").unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().contains("/definitely/not/here.png"));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode(b"not an image at all").unwrap_err();
        assert!(err.is_decode());
    }
}
