//! Repository traits (interfaces)
//!
//! These traits define the contracts for external dependencies.

mod sample_source;

pub use sample_source::{SampleError, SampleSource};
