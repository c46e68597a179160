//! Sample source trait
//!
//! Defines the interface for obtaining the leading bytes of a resource.
//! The domain only ever sees the bounded sample, never the resource itself.

use crate::domain::entities::Sample;
use std::io;
use thiserror::Error;

/// Errors that can occur while sampling a resource
///
/// These are transport and size failures. They are never reported as an
/// unknown file type.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Resource {resource} is {size} bytes, over the {limit} byte limit")]
    Oversized {
        resource: String,
        size: u64,
        limit: u64,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl SampleError {
    /// Maps an I/O error raised while opening `resource`
    pub fn from_open(resource: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SampleError::NotFound(resource.to_string()),
            io::ErrorKind::PermissionDenied => SampleError::PermissionDenied(resource.to_string()),
            _ => SampleError::IoError(err),
        }
    }
}

/// Trait for reading a bounded sample from a resource
///
/// Implementations must never return more than `limit` bytes and must not
/// buffer the rest of the resource.
///
/// # Example
///
/// ```
/// use filemage::domain::repositories::SampleSource;
/// use filemage::infrastructure::sampling::ReaderSampler;
///
/// let mut source = ReaderSampler::new("inline", &b"%PDF-1.7 and more"[..]);
/// let sample = source.read_sample(4).unwrap();
/// assert_eq!(sample.as_bytes(), b"%PDF");
/// ```
pub trait SampleSource {
    /// Returns a short description of the resource (path or `-`)
    fn origin(&self) -> &str;

    /// Reads at most `limit` leading bytes
    fn read_sample(&mut self, limit: usize) -> Result<Sample, SampleError>;
}
