//! Domain entities
//!
//! Core business objects for file type identification: signatures and
//! the classification results produced from them.

mod classification;
mod file_signature;
mod sample;

pub use classification::{ClassificationResult, ContentMode, Identification, Utf8Assessment};
pub use file_signature::{ContentCategory, FileSignature, SignatureMode, spaced_hex};
pub use sample::{DEFAULT_SAMPLE_SIZE, Sample};
