//! Identification report DTO

use crate::domain::entities::{ContentMode, Identification, Sample, spaced_hex};
use crate::domain::repositories::SampleError;
use serde::Serialize;

/// Identification of a single resource
#[derive(Debug, Clone, Serialize)]
pub struct IdentificationReport {
    /// Path of the resource, `-` for stdin
    pub origin: String,
    /// Bytes actually sampled
    pub sample_len: usize,
    /// Hex of the sampled bytes, kept only when no signature matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_head: Option<String>,
    #[serde(flatten)]
    pub identification: Identification,
}

impl IdentificationReport {
    pub fn new(sample: &Sample, identification: Identification) -> Self {
        let sample_head = if identification.classification.is_match() {
            None
        } else {
            Some(spaced_hex(sample.as_bytes()))
        };
        Self {
            origin: sample.origin().to_string(),
            sample_len: sample.len(),
            sample_head,
            identification,
        }
    }

    pub fn mode(&self) -> ContentMode {
        self.identification.mode()
    }

    /// Share of the sample that decoded as UTF-8, if the heuristic ran
    pub fn utf8_percent(&self) -> Option<u8> {
        self.identification
            .assessment
            .as_ref()
            .map(|a| a.percent_of(self.sample_len))
    }
}

/// Outcome for one resource of a batch
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResourceOutcome {
    Identified(IdentificationReport),
    Failed { origin: String, error: String },
}

impl ResourceOutcome {
    pub fn failed(origin: &str, error: &SampleError) -> Self {
        ResourceOutcome::Failed {
            origin: origin.to_string(),
            error: error.to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        match self {
            ResourceOutcome::Identified(report) => &report.origin,
            ResourceOutcome::Failed { origin, .. } => origin,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ResourceOutcome::Failed { .. })
    }
}

/// Tally of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Resources matched by a signature
    pub matched: usize,
    /// Unmatched resources judged to be text
    pub text: usize,
    /// Unmatched resources judged to be binary
    pub binary: usize,
    /// Resources that could not be sampled
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[ResourceOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome {
                ResourceOutcome::Failed { .. } => summary.failed += 1,
                ResourceOutcome::Identified(report) => {
                    if report.identification.classification.is_match() {
                        summary.matched += 1;
                    } else if report.mode() == ContentMode::Text {
                        summary.text += 1;
                    } else {
                        summary.binary += 1;
                    }
                }
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.matched + self.text + self.binary + self.failed
    }
}
