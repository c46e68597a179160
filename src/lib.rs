pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use domain::entities::{
    ClassificationResult, ContentCategory, ContentMode, FileSignature, Identification, Sample,
    SignatureMode, Utf8Assessment,
};
pub use domain::services::{
    Classifier, SignatureError, SignatureRegistry, TextThreshold, assess_utf8, assess_utf8_with,
    classify, identify,
};
