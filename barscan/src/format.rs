use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoEnumIterator};

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumCount,
    EnumIter,
)]
pub enum BarcodeFormat {
    Aztec,
    Codabar,
    Code39,
    Code93,
    Code128,
    DataBar,
    DataBarExpanded,
    DataMatrix,
    EAN8,
    EAN13,
    ITF,
    MaxiCode,
    PDF417,
    QRCode,
    UPCA,
    UPCE,
    MicroQRCode,
}

impl BarcodeFormat {
    pub fn len() -> usize {
        Self::COUNT
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }

    pub fn name(&self) -> &'static str {
        match self {
            BarcodeFormat::Aztec => "Aztec",
            BarcodeFormat::Codabar => "Codabar",
            BarcodeFormat::Code39 => "Code39",
            BarcodeFormat::Code93 => "Code93",
            BarcodeFormat::Code128 => "Code128",
            BarcodeFormat::DataBar => "DataBar",
            BarcodeFormat::DataBarExpanded => "DataBarExpanded",
            BarcodeFormat::DataMatrix => "DataMatrix",
            BarcodeFormat::EAN8 => "EAN-8",
            BarcodeFormat::EAN13 => "EAN-13",
            BarcodeFormat::ITF => "ITF",
            BarcodeFormat::MaxiCode => "MaxiCode",
            BarcodeFormat::PDF417 => "PDF417",
            BarcodeFormat::QRCode => "QRCode",
            BarcodeFormat::UPCA => "UPC-A",
            BarcodeFormat::UPCE => "UPC-E",
            BarcodeFormat::MicroQRCode => "MicroQRCode",
        }
    }

    /// One-dimensional (linear) symbologies.
    pub fn is_linear(&self) -> bool {
        matches!(
            self,
            BarcodeFormat::Codabar
                | BarcodeFormat::Code39
                | BarcodeFormat::Code93
                | BarcodeFormat::Code128
                | BarcodeFormat::DataBar
                | BarcodeFormat::DataBarExpanded
                | BarcodeFormat::EAN8
                | BarcodeFormat::EAN13
                | BarcodeFormat::ITF
                | BarcodeFormat::UPCA
                | BarcodeFormat::UPCE
        )
    }

    pub(crate) fn to_rxing(self) -> rxing::BarcodeFormat {
        match self {
            BarcodeFormat::Aztec => rxing::BarcodeFormat::AZTEC,
            BarcodeFormat::Codabar => rxing::BarcodeFormat::CODABAR,
            BarcodeFormat::Code39 => rxing::BarcodeFormat::CODE_39,
            BarcodeFormat::Code93 => rxing::BarcodeFormat::CODE_93,
            BarcodeFormat::Code128 => rxing::BarcodeFormat::CODE_128,
            BarcodeFormat::DataBar => rxing::BarcodeFormat::RSS_14,
            BarcodeFormat::DataBarExpanded => rxing::BarcodeFormat::RSS_EXPANDED,
            BarcodeFormat::DataMatrix => rxing::BarcodeFormat::DATA_MATRIX,
            BarcodeFormat::EAN8 => rxing::BarcodeFormat::EAN_8,
            BarcodeFormat::EAN13 => rxing::BarcodeFormat::EAN_13,
            BarcodeFormat::ITF => rxing::BarcodeFormat::ITF,
            BarcodeFormat::MaxiCode => rxing::BarcodeFormat::MAXICODE,
            BarcodeFormat::PDF417 => rxing::BarcodeFormat::PDF_417,
            BarcodeFormat::QRCode => rxing::BarcodeFormat::QR_CODE,
            BarcodeFormat::UPCA => rxing::BarcodeFormat::UPC_A,
            BarcodeFormat::UPCE => rxing::BarcodeFormat::UPC_E,
            BarcodeFormat::MicroQRCode => rxing::BarcodeFormat::MICRO_QR_CODE,
        }
    }

    pub(crate) fn from_rxing(format: &rxing::BarcodeFormat) -> Option<Self> {
        Self::iter().find(|f| f.to_rxing() == *format)
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl TryFrom<&str> for BarcodeFormat {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "rss14" => return Ok(BarcodeFormat::DataBar),
            "rssexpanded" => return Ok(BarcodeFormat::DataBarExpanded),
            _ => {}
        }
        Self::iter()
            .find(|f| normalize(f.name()) == normalized)
            .ok_or_else(|| Error::config(format!("not a valid barcode format: `{s}`")))
    }
}

impl FromStr for BarcodeFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// A set of symbologies to restrict the search to. Empty means all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeFormats(BTreeSet<BarcodeFormat>);

impl BarcodeFormats {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn linear() -> Self {
        BarcodeFormat::iter().filter(|f| f.is_linear()).collect()
    }

    pub fn matrix() -> Self {
        BarcodeFormat::iter().filter(|f| !f.is_linear()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, format: BarcodeFormat) -> bool {
        self.0.is_empty() || self.0.contains(&format)
    }

    pub fn insert(&mut self, format: BarcodeFormat) {
        self.0.insert(format);
    }

    pub fn iter(&self) -> impl Iterator<Item = BarcodeFormat> + '_ {
        self.0.iter().copied()
    }

    /// The engine's hint set, or `None` when every format is allowed.
    pub(crate) fn to_rxing(&self) -> Option<HashSet<rxing::BarcodeFormat>> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0.iter().map(|f| f.to_rxing()).collect())
    }
}

impl FromIterator<BarcodeFormat> for BarcodeFormats {
    fn from_iter<I: IntoIterator<Item = BarcodeFormat>>(iter: I) -> Self {
        BarcodeFormats(iter.into_iter().collect())
    }
}

impl FromStr for BarcodeFormats {
    type Err = Error;

    /// Parses a `,`, `|` or whitespace separated list of format names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut formats = BarcodeFormats::default();
        for token in s
            .split(|c: char| c == ',' || c == '|' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            match normalize(token).as_str() {
                "linearcodes" => formats.0.extend(Self::linear().0),
                "matrixcodes" => formats.0.extend(Self::matrix().0),
                _ => formats.insert(token.parse()?),
            }
        }
        Ok(formats)
    }
}

impl fmt::Display for BarcodeFormats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("All");
        }
        for (i, format) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(format.name())?;
        }
        Ok(())
    }
}
