//! Domain services
//!
//! The signature matcher, the UTF-8 text heuristic and the classifier
//! combining the two.

mod builtin_signatures;
mod classifier;
mod signature_registry;
mod text_heuristic;

pub use classifier::{Classifier, classify, identify};
pub use signature_registry::{SignatureError, SignatureRegistry};
pub use text_heuristic::{
    DEFAULT_TEXT_THRESHOLD_BYTES, TextThreshold, assess_utf8, assess_utf8_with,
};
