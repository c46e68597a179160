//! Generic reader sampler, used for stdin

use super::read_bounded;
use crate::domain::entities::Sample;
use crate::domain::repositories::{SampleError, SampleSource};
use std::io::{self, Read};
use tracing::debug;

/// Samples any [`Read`] implementation
#[derive(Debug)]
pub struct ReaderSampler<R> {
    origin: String,
    reader: R,
}

impl<R: Read> ReaderSampler<R> {
    pub fn new(origin: impl Into<String>, reader: R) -> Self {
        Self {
            origin: origin.into(),
            reader,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl ReaderSampler<io::Stdin> {
    /// Samples standard input, reported as `-`
    pub fn stdin() -> Self {
        Self::new("-", io::stdin())
    }
}

impl<R: Read> SampleSource for ReaderSampler<R> {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn read_sample(&mut self, limit: usize) -> Result<Sample, SampleError> {
        let data = read_bounded(&mut self.reader, limit)?;
        debug!(origin = %self.origin, bytes = data.len(), "sampled reader");
        Ok(Sample::new(self.origin.clone(), data))
    }
}
