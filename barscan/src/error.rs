use std::path::PathBuf;

use imageproc::image::ImageError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The image file could not be read or its contents could not be decoded.
    #[error("failed to load image `{}`", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    /// In-memory image data could not be decoded.
    #[error("failed to decode image data")]
    DecodeBytes(#[from] ImageError),

    /// The reader was handed options or an image view it cannot work with.
    #[error("invalid reader configuration: {0}")]
    Configuration(String),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::DecodeBytes(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}
