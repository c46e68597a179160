//! UTF-8 text heuristic
//!
//! Estimates whether a sample is human readable by keeping only the valid
//! UTF-8 code points and comparing their encoded length to a threshold.

use crate::domain::entities::Utf8Assessment;
use serde::{Deserialize, Serialize};

/// Decoded bytes a sample needs to exceed to count as text
///
/// Calibrated against 100-byte samples, i.e. more than 40% valid UTF-8.
pub const DEFAULT_TEXT_THRESHOLD_BYTES: usize = 40;

/// How much of a sample must decode as UTF-8 for it to count as text
///
/// The default is an absolute byte count that does not scale with the sample
/// length. Samples much larger or smaller than 100 bytes are better served by
/// [`TextThreshold::Proportional`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextThreshold {
    /// Decoded length must exceed this many bytes
    Absolute(usize),
    /// Decoded length must exceed this fraction of the sample length
    Proportional(f64),
}

impl Default for TextThreshold {
    fn default() -> Self {
        TextThreshold::Absolute(DEFAULT_TEXT_THRESHOLD_BYTES)
    }
}

impl TextThreshold {
    /// Returns true when `decoded_len` passes the threshold for a sample of `sample_len` bytes
    pub fn is_met(&self, decoded_len: usize, sample_len: usize) -> bool {
        match *self {
            TextThreshold::Absolute(bytes) => decoded_len > bytes,
            TextThreshold::Proportional(ratio) => decoded_len as f64 > ratio * sample_len as f64,
        }
    }
}

/// Assesses a sample with the default threshold
pub fn assess_utf8(sample: &[u8]) -> Utf8Assessment {
    assess_utf8_with(sample, TextThreshold::default())
}

/// Assesses a sample against `threshold`
///
/// Decoding is strict: overlong forms, surrogate halves and values past
/// U+10FFFF are invalid. Invalid bytes are dropped rather than replaced and
/// decoding resumes right after them.
pub fn assess_utf8_with(sample: &[u8], threshold: TextThreshold) -> Utf8Assessment {
    let mut decoded_text = String::with_capacity(sample.len());
    for chunk in sample.utf8_chunks() {
        decoded_text.push_str(chunk.valid());
    }

    let decoded_byte_length = decoded_text.len();
    Utf8Assessment {
        is_likely_text: threshold.is_met(decoded_byte_length, sample.len()),
        decoded_byte_length,
        decoded_text,
    }
}
