//! Signature registry service
//!
//! Holds the ordered signature table and matches samples against it.
//! Prefix signatures go through an anchored Aho-Corasick automaton built with
//! leftmost-first semantics, which reports the earliest declared pattern among
//! all patterns matching at byte zero. That is exactly first-match-wins over the
//! declared order. Offset signatures are a separate, linear rule tried only when
//! no prefix signature matched.

use super::builtin_signatures::{offset_signatures, prefix_signatures};
use crate::domain::entities::{ClassificationResult, FileSignature};
use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};
use std::sync::{Arc, LazyLock};
use thiserror::Error;
use tracing::{trace, warn};

static BUILTIN: LazyLock<Arc<SignatureRegistry>> =
    LazyLock::new(|| Arc::new(SignatureRegistry::builtin_table()));

/// Errors raised while assembling a signature table
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature '{label}' has an empty pattern")]
    EmptyPattern { label: String },

    #[error("signature '{later}' is unreachable behind '{earlier}', whose pattern is its prefix")]
    Shadowed { earlier: String, later: String },

    #[error("signature '{label}' ends past the addressable range (offset {offset})")]
    OffsetOverflow { label: String, offset: usize },

    #[error("failed to build pattern matcher: {0}")]
    Matcher(#[from] aho_corasick::BuildError),
}

/// Ordered table of file signatures
///
/// The first signature whose pattern matches wins, so declaration order is
/// priority. Registration rejects any signature that an earlier one would
/// always pre-empt.
///
/// # Example
///
/// ```
/// use filemage::domain::services::SignatureRegistry;
///
/// let result = SignatureRegistry::builtin().classify(b"%PDF-1.7\n");
/// assert_eq!(result.label(), "Adobe PDF .pdf");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    /// Signatures anchored at byte zero, in priority order
    prefix: Vec<FileSignature>,
    /// Signatures at a fixed non-zero offset, in priority order
    offset: Vec<FileSignature>,
    /// Automaton over the prefix patterns, `None` until built
    pattern_matcher: Option<AhoCorasick>,
}

impl SignatureRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide built-in table
    pub fn builtin() -> &'static SignatureRegistry {
        &BUILTIN
    }

    /// Returns a shared handle to the built-in table
    pub fn builtin_shared() -> Arc<SignatureRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Creates a registry from signatures in priority order
    pub fn with_signatures<I>(signatures: I) -> Result<Self, SignatureError>
    where
        I: IntoIterator<Item = FileSignature>,
    {
        let mut registry = Self::new();
        for signature in signatures {
            registry.register(signature)?;
        }
        registry.build_pattern_matcher()?;
        Ok(registry)
    }

    /// Creates a registry where `extra` signatures take priority over the built-in ones
    pub fn extended<I>(extra: I) -> Result<Self, SignatureError>
    where
        I: IntoIterator<Item = FileSignature>,
    {
        let builtin = Self::builtin();
        Self::with_signatures(extra.into_iter().chain(builtin.signatures().cloned()))
    }

    /// Skips registration checks; `test_builtin_passes_registration_checks` covers them.
    fn builtin_table() -> Self {
        let mut registry = Self {
            prefix: prefix_signatures(),
            offset: offset_signatures(),
            pattern_matcher: None,
        };
        if let Err(e) = registry.build_pattern_matcher() {
            warn!(error = %e, "built-in signature table falls back to linear matching");
        }
        registry
    }

    /// Appends a signature with the lowest priority so far
    pub fn register(&mut self, signature: FileSignature) -> Result<(), SignatureError> {
        if signature.pattern().is_empty() {
            return Err(SignatureError::EmptyPattern {
                label: signature.label().to_owned(),
            });
        }
        if signature.offset().checked_add(signature.pattern().len()).is_none() {
            return Err(SignatureError::OffsetOverflow {
                label: signature.label().to_owned(),
                offset: signature.offset(),
            });
        }

        let earlier = self
            .signatures()
            .filter(|s| s.offset() == signature.offset())
            .find(|s| signature.pattern().starts_with(s.pattern()));
        if let Some(earlier) = earlier {
            return Err(SignatureError::Shadowed {
                earlier: earlier.label().to_owned(),
                later: signature.label().to_owned(),
            });
        }

        if signature.is_prefix() {
            self.prefix.push(signature);
            // Invalidate the pattern matcher - needs rebuild
            self.pattern_matcher = None;
        } else {
            self.offset.push(signature);
        }
        Ok(())
    }

    /// Builds the anchored automaton from the prefix signatures
    fn build_pattern_matcher(&mut self) -> Result<(), SignatureError> {
        if self.prefix.is_empty() {
            self.pattern_matcher = None;
            return Ok(());
        }
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .start_kind(StartKind::Anchored)
            .build(self.prefix.iter().map(|s| s.pattern()))?;
        self.pattern_matcher = Some(matcher);
        Ok(())
    }

    /// Classifies a sample by its leading bytes
    ///
    /// Total over all inputs: empty or short samples simply do not match and
    /// yield [`ClassificationResult::unknown`].
    pub fn classify(&self, sample: &[u8]) -> ClassificationResult {
        match self.find_match(sample) {
            Some(signature) => {
                trace!(
                    label = signature.label(),
                    offset = signature.offset(),
                    "signature matched"
                );
                ClassificationResult::from_signature(signature)
            }
            None => ClassificationResult::unknown(),
        }
    }

    /// Returns the highest priority signature matching the sample
    pub fn find_match(&self, sample: &[u8]) -> Option<&FileSignature> {
        self.find_prefix_match(sample)
            .or_else(|| self.offset.iter().find(|s| s.matches(sample)))
    }

    fn find_prefix_match(&self, sample: &[u8]) -> Option<&FileSignature> {
        let matcher = match &self.pattern_matcher {
            Some(m) => m,
            None => return self.find_prefix_match_linear(sample),
        };

        let input = Input::new(sample).anchored(Anchored::Yes);
        match matcher.try_find(input) {
            Ok(found) => found.and_then(|mat| self.prefix.get(mat.pattern().as_usize())),
            Err(_) => self.find_prefix_match_linear(sample),
        }
    }

    /// Linear scan in declared order, used when the automaton is unavailable
    fn find_prefix_match_linear(&self, sample: &[u8]) -> Option<&FileSignature> {
        self.prefix.iter().find(|s| s.matches(sample))
    }

    /// Returns all signatures, prefix signatures first, each group in priority order
    pub fn signatures(&self) -> impl Iterator<Item = &FileSignature> {
        self.prefix.iter().chain(self.offset.iter())
    }

    /// Returns the number of registered signatures
    pub fn signature_count(&self) -> usize {
        self.prefix.len() + self.offset.len()
    }

    /// Returns the longest `offset + pattern` span any signature needs
    pub fn max_span(&self) -> usize {
        self.signatures()
            .map(|s| s.offset().saturating_add(s.pattern().len()))
            .max()
            .unwrap_or(0)
    }
}
