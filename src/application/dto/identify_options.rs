//! Identify options DTO
//!
//! Runtime configuration for identification, loadable from a JSON file.
//!
//! ```json
//! {
//!   "sample_size": 100,
//!   "text_threshold": { "proportional": 0.4 },
//!   "max_resource_size": 1073741824,
//!   "extra_signatures": [
//!     { "mode": "binary", "label": "Acme blob", "category": "rawdata", "pattern": "41434d45" }
//!   ]
//! }
//! ```

use crate::domain::entities::{ContentCategory, DEFAULT_SAMPLE_SIZE, FileSignature, SignatureMode};
use crate::domain::services::{Classifier, SignatureError, SignatureRegistry, TextThreshold};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while loading or validating options
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Signature '{label}' has an invalid hex pattern: {source}")]
    InvalidPattern {
        label: String,
        source: hex::FromHexError,
    },

    #[error("Sample size must be at least 1 byte")]
    ZeroSampleSize,

    #[error("Text ratio must be between 0 and 1, got {0}")]
    InvalidRatio(f64),

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// A user supplied signature as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureSpec {
    pub mode: SignatureMode,
    pub label: String,
    pub category: ContentCategory,
    /// Hex encoded magic bytes, e.g. `"89504e47"`
    pub pattern: String,
    #[serde(default)]
    pub offset: usize,
}

impl SignatureSpec {
    /// Decodes the hex pattern into a signature
    pub fn to_signature(&self) -> Result<FileSignature, ConfigError> {
        let pattern =
            hex::decode(self.pattern.trim()).map_err(|source| ConfigError::InvalidPattern {
                label: self.label.clone(),
                source,
            })?;
        if self.offset.checked_add(pattern.len()).is_none() {
            return Err(SignatureError::OffsetOverflow {
                label: self.label.clone(),
                offset: self.offset,
            }
            .into());
        }
        let signature = FileSignature::new(self.mode, self.label.clone(), self.category, pattern);
        Ok(signature.with_offset(self.offset))
    }
}

/// Options for identifying resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentifyOptions {
    /// Leading bytes read from each resource
    pub sample_size: usize,
    /// Threshold for the text heuristic
    pub text_threshold: TextThreshold,
    /// Resources larger than this are rejected (files only)
    pub max_resource_size: Option<u64>,
    /// Signatures matched before the built-in table
    pub extra_signatures: Vec<SignatureSpec>,
}

impl Default for IdentifyOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            text_threshold: TextThreshold::default(),
            max_resource_size: None,
            extra_signatures: Vec::new(),
        }
    }
}

impl IdentifyOptions {
    /// Loads and validates options from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses and validates options from a JSON string
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(raw)?;
        options.validate()?;
        Ok(options)
    }

    /// Sets the sample size
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    /// Sets the text threshold
    pub fn with_threshold(mut self, threshold: TextThreshold) -> Self {
        self.text_threshold = threshold;
        self
    }

    /// Sets the largest accepted resource size
    pub fn with_max_resource_size(mut self, limit: Option<u64>) -> Self {
        self.max_resource_size = limit;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_size == 0 {
            return Err(ConfigError::ZeroSampleSize);
        }
        if let TextThreshold::Proportional(ratio) = self.text_threshold {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(ConfigError::InvalidRatio(ratio));
            }
        }
        for spec in &self.extra_signatures {
            spec.to_signature()?;
        }
        Ok(())
    }

    /// Builds the signature table, built-in unless extra signatures are configured
    pub fn build_registry(&self) -> Result<Arc<SignatureRegistry>, ConfigError> {
        if self.extra_signatures.is_empty() {
            return Ok(SignatureRegistry::builtin_shared());
        }
        let extra = self
            .extra_signatures
            .iter()
            .map(SignatureSpec::to_signature)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Arc::new(SignatureRegistry::extended(extra)?))
    }

    /// Builds a classifier from these options
    pub fn build_classifier(&self) -> Result<Classifier, ConfigError> {
        self.validate()?;
        Ok(Classifier::new(self.build_registry()?, self.text_threshold))
    }
}
