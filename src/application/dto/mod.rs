//! Data Transfer Objects

mod identification_report;
mod identify_options;

pub use identification_report::{BatchSummary, IdentificationReport, ResourceOutcome};
pub use identify_options::{ConfigError, IdentifyOptions, SignatureSpec};
