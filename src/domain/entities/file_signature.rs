//! File signature entity
//!
//! Represents the magic bytes that identify a specific file type, together
//! with the coarse mode and content category reported for it.

use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Whether a signature marks a binary or a textual format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureMode {
    /// Binary content
    Binary,
    /// Text content (byte order marks, XML prologues, scripts, PEM)
    Text,
}

impl SignatureMode {
    /// Returns the short name used in listings
    pub fn name(&self) -> &'static str {
        match self {
            SignatureMode::Binary => "bin",
            SignatureMode::Text => "text",
        }
    }
}

impl fmt::Display for SignatureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a file of a given type is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    /// Native executables, bytecode and scripts
    Executable,
    /// Descriptive data such as XML or key material
    Metadata,
    /// Raw, unstructured data
    RawData,
    /// Media and documents meant for a viewer
    Consumable,
    /// Archives and containers packing several items
    PackedMulti,
    /// Disk and virtual machine images
    Image,
    /// Database files
    Database,
    /// Category could not be determined
    Unknown,
}

impl ContentCategory {
    /// Returns the lowercase name of the category
    pub fn name(&self) -> &'static str {
        match self {
            ContentCategory::Executable => "executable",
            ContentCategory::Metadata => "metadata",
            ContentCategory::RawData => "rawdata",
            ContentCategory::Consumable => "consumable",
            ContentCategory::PackedMulti => "packedmulti",
            ContentCategory::Image => "image",
            ContentCategory::Database => "database",
            ContentCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A file signature containing magic bytes for file identification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSignature {
    /// Binary or text format
    mode: SignatureMode,
    /// Human readable type name, e.g. "PNG image"
    label: Cow<'static, str>,
    /// Content category of the format
    category: ContentCategory,
    /// Magic bytes compared for exact equality
    #[serde(serialize_with = "serialize_hex")]
    pattern: Cow<'static, [u8]>,
    /// Offset from the start where the pattern should be found (usually 0)
    offset: usize,
}

impl FileSignature {
    /// Creates a new signature anchored at the start of the data
    pub fn new(
        mode: SignatureMode,
        label: impl Into<Cow<'static, str>>,
        category: ContentCategory,
        pattern: impl Into<Cow<'static, [u8]>>,
    ) -> Self {
        Self {
            mode,
            label: label.into(),
            category,
            pattern: pattern.into(),
            offset: 0,
        }
    }

    /// Moves the pattern to a fixed byte offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn mode(&self) -> SignatureMode {
        self.mode
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> ContentCategory {
        self.category
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns true for signatures matched at byte zero
    pub fn is_prefix(&self) -> bool {
        self.offset == 0
    }

    /// Checks if the given data carries this signature's pattern at its offset
    ///
    /// Data shorter than `offset + pattern.len()` never matches.
    pub fn matches(&self, data: &[u8]) -> bool {
        if self.pattern.is_empty() {
            return false;
        }
        let end = match self.offset.checked_add(self.pattern.len()) {
            Some(end) => end,
            None => return false,
        };
        data.get(self.offset..end) == Some(&*self.pattern)
    }

    /// Returns the pattern as space separated lowercase hex, e.g. `89 50 4e 47`
    pub fn pattern_hex(&self) -> String {
        spaced_hex(&self.pattern)
    }
}

impl fmt::Display for FileSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.label, self.pattern_hex())
    }
}

/// Formats bytes as space separated lowercase hex pairs
pub fn spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn serialize_hex<S: Serializer>(
    bytes: &Cow<'static, [u8]>,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hex::encode(&**bytes))
}
