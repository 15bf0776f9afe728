pub mod barcode;
pub mod error;
pub mod format;
pub mod image;
pub mod reader;

// Re-export commonly used types
pub use barcode::{Barcode, ContentType, Point};
pub use error::{Error, Result};
pub use format::{BarcodeFormat, BarcodeFormats};
pub use crate::image::{ImageFormat, ImageInfo, ImageView};
pub use reader::{read_barcodes, read_image, ReaderOptions};
