//! Identify resource use case
//!
//! Samples resources and runs the classifier over the samples.

use crate::application::dto::{IdentificationReport, IdentifyOptions, ResourceOutcome};
use crate::domain::repositories::{SampleError, SampleSource};
use crate::domain::services::Classifier;
use crate::infrastructure::sampling::{FileSampler, ReaderSampler};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Path naming standard input
pub const STDIN_PATH: &str = "-";

/// Identify resource use case
///
/// Reads a bounded sample from each resource and classifies it. Sampling
/// failures are returned per resource and never stop a batch.
#[derive(Debug, Clone)]
pub struct IdentifyResourceUseCase {
    classifier: Classifier,
    sample_size: usize,
    max_resource_size: Option<u64>,
}

impl IdentifyResourceUseCase {
    /// Creates a new identify use case
    pub fn new(classifier: Classifier, sample_size: usize) -> Self {
        Self {
            classifier,
            sample_size,
            max_resource_size: None,
        }
    }

    /// Creates the use case described by `options`
    pub fn from_options(options: &IdentifyOptions) -> Result<Self> {
        let classifier = options
            .build_classifier()
            .context("Failed to build classifier")?;

        let span = classifier.registry().max_span();
        if options.sample_size < span {
            warn!(
                sample_size = options.sample_size,
                longest_signature = span,
                "sample size is shorter than some signatures, they can never match"
            );
        }

        Ok(Self {
            classifier,
            sample_size: options.sample_size,
            max_resource_size: options.max_resource_size,
        })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Samples `source` and identifies the sample
    pub fn execute<S: SampleSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<IdentificationReport, SampleError> {
        let sample = source.read_sample(self.sample_size)?;
        let identification = self.classifier.identify(sample.as_bytes());

        debug!(
            origin = sample.origin(),
            mode = %identification.mode(),
            label = identification.classification.label(),
            "identified"
        );

        Ok(IdentificationReport::new(&sample, identification))
    }

    /// Identifies a file, or stdin for `-`
    pub fn execute_path(&self, path: &str) -> Result<IdentificationReport, SampleError> {
        if path == STDIN_PATH {
            return self.execute(&mut ReaderSampler::stdin());
        }
        let mut sampler = FileSampler::new(path).with_max_resource_size(self.max_resource_size);
        self.execute(&mut sampler)
    }

    /// Identifies every path in parallel, keeping input order
    pub fn execute_all(&self, paths: &[String]) -> Vec<ResourceOutcome> {
        self.execute_all_with_stdin(paths, &mut ReaderSampler::stdin())
    }

    /// Like [`Self::execute_all`], reading `-` from `stdin`
    ///
    /// Stdin is sampled once, before the parallel pass, and every `-` entry
    /// reports that same sample.
    pub fn execute_all_with_stdin<S: SampleSource + ?Sized>(
        &self,
        paths: &[String],
        stdin: &mut S,
    ) -> Vec<ResourceOutcome> {
        let start_time = Instant::now();
        info!("Identifying {} resources", paths.len());

        let stdin_outcome = paths
            .iter()
            .any(|p| p == STDIN_PATH)
            .then(|| Self::outcome(STDIN_PATH, self.execute(stdin)));

        let outcomes: Vec<ResourceOutcome> = paths
            .par_iter()
            .map(|path| match &stdin_outcome {
                Some(outcome) if path == STDIN_PATH => outcome.clone(),
                _ => Self::outcome(path, self.execute_path(path)),
            })
            .collect();

        info!(
            "Identification complete: {} resources in {:.3}s",
            outcomes.len(),
            start_time.elapsed().as_secs_f64()
        );

        outcomes
    }

    fn outcome(path: &str, result: Result<IdentificationReport, SampleError>) -> ResourceOutcome {
        match result {
            Ok(report) => ResourceOutcome::Identified(report),
            Err(e) => {
                warn!(origin = %path, error = %e, "sampling failed");
                ResourceOutcome::failed(path, &e)
            }
        }
    }
}
