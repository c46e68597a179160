//! Classification entities
//!
//! The outputs of the signature matcher and of the UTF-8 text heuristic,
//! and the combined verdict for one sample.

use super::file_signature::{ContentCategory, FileSignature, SignatureMode, serialize_hex};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Mode of a classified sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    Binary,
    Text,
    /// No signature matched and the heuristic has not been applied yet
    Unknown,
}

impl ContentMode {
    pub fn name(&self) -> &'static str {
        match self {
            ContentMode::Binary => "bin",
            ContentMode::Text => "text",
            ContentMode::Unknown => "unknown",
        }
    }
}

impl From<SignatureMode> for ContentMode {
    fn from(mode: SignatureMode) -> Self {
        match mode {
            SignatureMode::Binary => ContentMode::Binary,
            SignatureMode::Text => ContentMode::Text,
        }
    }
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of matching a sample against the signature table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    mode: ContentMode,
    /// Empty when unclassified
    label: Cow<'static, str>,
    category: ContentCategory,
    /// The bytes that matched, empty when unclassified
    #[serde(serialize_with = "serialize_hex")]
    matched_pattern: Cow<'static, [u8]>,
    /// Where in the sample the pattern was found
    offset: usize,
}

impl ClassificationResult {
    /// Creates the result reported when no signature matched
    pub fn unknown() -> Self {
        Self {
            mode: ContentMode::Unknown,
            label: Cow::Borrowed(""),
            category: ContentCategory::Unknown,
            matched_pattern: Cow::Borrowed(&[]),
            offset: 0,
        }
    }

    /// Creates the result for a matching signature
    pub fn from_signature(signature: &FileSignature) -> Self {
        Self {
            mode: signature.mode().into(),
            label: Cow::Owned(signature.label().to_owned()),
            category: signature.category(),
            matched_pattern: Cow::Owned(signature.pattern().to_vec()),
            offset: signature.offset(),
        }
    }

    /// Refines an unmatched result with the text heuristic
    ///
    /// Likely text becomes [`ContentMode::Text`], anything else
    /// [`ContentMode::Binary`]. Label and category stay unknown. Matched
    /// results are returned unchanged.
    pub fn resolve(self, assessment: &Utf8Assessment) -> Self {
        if self.is_match() {
            return self;
        }
        let mode = if assessment.is_likely_text {
            ContentMode::Text
        } else {
            ContentMode::Binary
        };
        Self { mode, ..self }
    }

    pub fn mode(&self) -> ContentMode {
        self.mode
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> ContentCategory {
        self.category
    }

    pub fn matched_pattern(&self) -> &[u8] {
        &self.matched_pattern
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns true when a signature matched
    pub fn is_match(&self) -> bool {
        !self.matched_pattern.is_empty()
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_match() {
            write!(f, "{} ({}, {})", self.label, self.mode, self.category)
        } else {
            write!(f, "unknown ({})", self.mode)
        }
    }
}

/// Output of the UTF-8 text heuristic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Utf8Assessment {
    /// Whether the decoded length passed the text threshold
    pub is_likely_text: bool,
    /// UTF-8 byte length of the valid code points found
    pub decoded_byte_length: usize,
    /// The valid code points, invalid bytes dropped
    pub decoded_text: String,
}

impl Utf8Assessment {
    /// Share of the sample that decoded as valid UTF-8, in percent
    pub fn percent_of(&self, sample_len: usize) -> u8 {
        if sample_len == 0 {
            return 0;
        }
        let pct = self.decoded_byte_length.min(sample_len) * 100 / sample_len;
        pct as u8
    }
}

/// Final verdict for one sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identification {
    /// Matcher result, resolved by the heuristic when nothing matched
    pub classification: ClassificationResult,
    /// Present only when the matcher fell through
    pub assessment: Option<Utf8Assessment>,
}

impl Identification {
    pub fn mode(&self) -> ContentMode {
        self.classification.mode()
    }
}
