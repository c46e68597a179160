//! Sample sources
//!
//! Bounded readers feeding the classifier. Each one reads at most the
//! requested byte budget and leaves the rest of the resource untouched.

mod file_sampler;
mod reader_sampler;

pub use file_sampler::FileSampler;
pub use reader_sampler::ReaderSampler;

use std::io::{self, Read};

/// Reads at most `limit` bytes from `reader`
pub(crate) fn read_bounded<R: Read>(reader: R, limit: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(limit.min(64 * 1024));
    reader.take(limit as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bounded_caps() {
        let data = vec![7u8; 1000];
        assert_eq!(read_bounded(&data[..], 100).unwrap().len(), 100);
        assert_eq!(read_bounded(&data[..10], 100).unwrap().len(), 10);
        assert!(read_bounded(&data[..], 0).unwrap().is_empty());
    }
}
