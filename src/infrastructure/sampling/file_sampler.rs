//! Local file sampler
//!
//! Opens a file read-only and takes its leading bytes.

use super::read_bounded;
use crate::domain::entities::Sample;
use crate::domain::repositories::{SampleError, SampleSource};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Samples a file on the local filesystem
///
/// # Example
///
/// ```ignore
/// let mut sampler = FileSampler::new("download.bin").with_max_resource_size(Some(1 << 30));
/// let sample = sampler.read_sample(100)?;
/// ```
#[derive(Debug, Clone)]
pub struct FileSampler {
    path: PathBuf,
    origin: String,
    /// Files larger than this are rejected before any byte is read
    max_resource_size: Option<u64>,
}

impl FileSampler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let origin = path.display().to_string();
        Self {
            path,
            origin,
            max_resource_size: None,
        }
    }

    /// Sets the largest file size accepted, `None` for no limit
    pub fn with_max_resource_size(mut self, limit: Option<u64>) -> Self {
        self.max_resource_size = limit;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SampleSource for FileSampler {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn read_sample(&mut self, limit: usize) -> Result<Sample, SampleError> {
        let file = File::open(&self.path).map_err(|e| SampleError::from_open(&self.origin, e))?;

        if let Some(max) = self.max_resource_size {
            let size = file.metadata()?.len();
            if size > max {
                return Err(SampleError::Oversized {
                    resource: self.origin.clone(),
                    size,
                    limit: max,
                });
            }
        }

        let data = read_bounded(file, limit)?;
        debug!(origin = %self.origin, bytes = data.len(), "sampled file");
        Ok(Sample::new(self.origin.clone(), data))
    }
}
