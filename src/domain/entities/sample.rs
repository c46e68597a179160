//! Sample entity
//!
//! The bounded prefix of a resource handed to the classifier.

use bytes::Bytes;

/// Default number of leading bytes taken from a resource
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Leading bytes of a resource, at most the sampler's byte budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Where the bytes came from (a path, or `-` for stdin)
    origin: String,
    data: Bytes,
}

impl Sample {
    pub fn new(origin: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            origin: origin.into(),
            data: data.into(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
