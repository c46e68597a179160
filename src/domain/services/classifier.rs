//! Classifier service
//!
//! Runs the signature matcher and, when nothing matches, refines the unknown
//! result with the UTF-8 heuristic.

use super::signature_registry::SignatureRegistry;
use super::text_heuristic::{TextThreshold, assess_utf8_with};
use crate::domain::entities::{ClassificationResult, Identification};
use std::sync::Arc;

/// Classifies a sample against the built-in table
pub fn classify(sample: &[u8]) -> ClassificationResult {
    SignatureRegistry::builtin().classify(sample)
}

/// Identifies a sample with the built-in table and the default threshold
pub fn identify(sample: &[u8]) -> Identification {
    Classifier::default().identify(sample)
}

/// Signature table plus text threshold
///
/// Cheap to clone and safe to share between threads; the table is never
/// mutated once built.
#[derive(Debug, Clone)]
pub struct Classifier {
    registry: Arc<SignatureRegistry>,
    threshold: TextThreshold,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(SignatureRegistry::builtin_shared(), TextThreshold::default())
    }
}

impl Classifier {
    pub fn new(registry: Arc<SignatureRegistry>, threshold: TextThreshold) -> Self {
        Self {
            registry,
            threshold,
        }
    }

    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    pub fn threshold(&self) -> TextThreshold {
        self.threshold
    }

    /// Matches the sample; on no match, falls back to the text heuristic
    pub fn identify(&self, sample: &[u8]) -> Identification {
        let classification = self.registry.classify(sample);
        if classification.is_match() {
            return Identification {
                classification,
                assessment: None,
            };
        }

        let assessment = assess_utf8_with(sample, self.threshold);
        Identification {
            classification: classification.resolve(&assessment),
            assessment: Some(assessment),
        }
    }
}
