use std::fmt;

use serde::Serialize;

use crate::format::BarcodeFormat;

/// What kind of payload a symbol carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentType {
    Text,
    Binary,
    Mixed,
    GS1,
    ISO15434,
}

// ISO/IEC 15434 message envelope header
const ISO15434_HEADER: &[u8] = b"[)>\x1e";

impl ContentType {
    /// Classify a payload from its bytes and, when known, its symbology identifier.
    pub fn classify(symbology_identifier: Option<&str>, bytes: &[u8]) -> Self {
        if symbology_identifier.is_some_and(is_gs1_identifier) {
            return ContentType::GS1;
        }
        if bytes.starts_with(ISO15434_HEADER) {
            return ContentType::ISO15434;
        }

        let Ok(text) = std::str::from_utf8(bytes) else {
            return ContentType::Binary;
        };

        // tab, lf, cr, EOT, GS, RS are normal in text payloads
        let control = text
            .chars()
            .filter(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r' | '\x04' | '\x1d' | '\x1e'))
            .count();

        match control {
            0 => ContentType::Text,
            n if n * 2 >= text.chars().count() => ContentType::Binary,
            _ => ContentType::Mixed,
        }
    }
}

fn is_gs1_identifier(id: &str) -> bool {
    matches!(
        id,
        "]C1" | "]e0" | "]d2" | "]Q3" | "]Q4" | "]J1" | "]z1" | "]z2"
    )
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A decoded symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Barcode {
    pub format: BarcodeFormat,
    pub content_type: ContentType,
    pub text: String,
    pub bytes: Vec<u8>,
    /// Corner or finder-pattern points, in image coordinates
    pub points: Vec<Point>,
    pub symbology_identifier: Option<String>,
    /// Found on the color-inverted image
    pub inverted: bool,
}

impl Barcode {
    pub(crate) fn from_rxing(result: &rxing::RXingResult) -> Option<Self> {
        use rxing::RXingResultMetadataValue as Meta;

        let Some(format) = BarcodeFormat::from_rxing(result.getBarcodeFormat()) else {
            log::warn!(
                "Dropping symbol of unsupported format {:?}",
                result.getBarcodeFormat()
            );
            return None;
        };

        let mut symbology_identifier = None;
        let mut segments: Option<Vec<u8>> = None;
        for value in result.getRXingResultMetadata().values() {
            match value {
                Meta::SymbologyIdentifier(id) => symbology_identifier = Some(id.clone()),
                Meta::ByteSegments(parts) => segments = Some(parts.concat()),
                _ => {}
            }
        }

        let text = result.getText().to_string();
        let bytes = segments
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| text.as_bytes().to_vec());

        Some(Barcode {
            format,
            content_type: ContentType::classify(symbology_identifier.as_deref(), &bytes),
            points: result
                .getPoints()
                .iter()
                .map(|p| Point { x: p.x, y: p.y })
                .collect(),
            text,
            bytes,
            symbology_identifier,
            inverted: false,
        })
    }

    /// Same symbol, as far as deduplication across passes is concerned.
    pub fn same_symbol(&self, other: &Barcode) -> bool {
        self.format == other.format && self.bytes == other.bytes
    }
}

/// `Format (ContentType): Text / [byte, byte, ...]`
impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {} / [", self.format, self.content_type, self.text)?;
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{byte}")?;
        }
        f.write_str("]")
    }
}
