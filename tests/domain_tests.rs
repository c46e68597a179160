//! Domain layer unit tests
//!
//! Tests for signatures, the signature registry, the text heuristic and the classifier.

use ContentCategory::{Consumable, Executable, PackedMulti};
use SignatureMode::{Binary, Text};
use filemage::domain::entities::{ContentCategory, ContentMode, FileSignature, SignatureMode};
use filemage::domain::services::{
    Classifier, SignatureError, SignatureRegistry, TextThreshold, assess_utf8, assess_utf8_with,
    classify, identify,
};
use rstest::*;
use std::sync::Arc;

const RUNES: &str = "ᚠᛇᚻ᛫ᛒᛦᚦ᛫ᚠᚱᚩᚠᚢᚱ᛫ᚠᛁᚱᚪ᛫ᚷᛖᚻᚹᛦᛚᚳᚢᛗ᛫ᛋᚳᛖᚪᛚ᛫ᚦᛖᚪᚻ᛫ᛗᚪᚾᚾᚪ᛫ᚷᛖᚻᚹᛦᛚᚳ᛫ᛗᛁᚳᛚᚢᚾ᛫ᚻᛦᛏ᛫ᛞᚫᛚᚪᚾ᛫ᚷᛁᚠ᛫ᚻᛖ᛫ᚹᛁᛚᛖ᛫ᚠᚩᚱ᛫ᛞᚱᛁᚻᛏᚾᛖ᛫ᛞᚩᛗᛖᛋ᛫ᚻᛚᛇᛏᚪᚾ᛬";

fn padded(prefix: &[u8], len: usize, fill: u8) -> Vec<u8> {
    let mut data = prefix.to_vec();
    data.resize(len, fill);
    data
}

// ============================================================================
// Fixtures
// ============================================================================

/// 100 bytes that are neither a known signature nor valid UTF-8
#[fixture]
fn binary_noise() -> Vec<u8> {
    // 0xF8..=0xFF never appear in UTF-8
    (0..100u8).map(|i| 0xF8 | (i % 8)).collect()
}

#[fixture]
fn ascii_sentence() -> Vec<u8> {
    padded(b"Hello, world! This sentence is plain ASCII and long enough.", 100, b' ')
}

// ============================================================================
// Built-in table
// ============================================================================

#[rstest]
#[case(b"\x89PNG\r\n\x1a\n", "PNG image", Binary, Consumable)]
#[case(b"%PDF-1.7", "Adobe PDF .pdf", Binary, PackedMulti)]
#[case(b"\x7FELF\x02\x01", "ELF Linux executable", Binary, Executable)]
#[case(b"\xFF\xFEh\x00i\x00", "Little endian UTF-16 encoded text", Text, Consumable)]
#[case(b"\xFF\xD8\xFF\xE0\x00\x10JFIF", "JPEG image .jpg", Binary, Consumable)]
#[case(b"\xFF\xD8\xFF\xE1\x00\x10Exif", "JPEG image, EXIF .jpg", Binary, Consumable)]
fn test_builtin_signatures(
    #[case] prefix: &[u8],
    #[case] label: &str,
    #[case] mode: SignatureMode,
    #[case] category: ContentCategory,
) {
    let sample = padded(prefix, 100, 0x00);
    let result = classify(&sample);
    assert!(result.is_match());
    assert_eq!(result.label(), label);
    assert_eq!(result.mode(), ContentMode::from(mode));
    assert_eq!(result.category(), category);
}

#[rstest]
#[case(b"\x00\x00\x00\x18ftypisom", "MPEG-4 media .mp4 .m4a .mov")]
#[case(b"RIFF\x24\x00\x00\x00WEBPVP8 ", "WebP image .webp")]
#[case(b"RIFF\x24\x00\x00\x00WAVEfmt ", "WAV audio .wav")]
#[case(b"RIFF\x24\x00\x00\x00AVI LIST", "AVI video .avi")]
fn test_offset_signatures(#[case] prefix: &[u8], #[case] label: &str) {
    let result = classify(prefix);
    assert_eq!(result.label(), label);
    assert!(result.offset() > 0);
}

#[rstest]
fn test_every_builtin_entry_is_reachable() {
    let registry = SignatureRegistry::builtin();
    for (position, sig) in registry.signatures().enumerate() {
        let mut sample = vec![0u8; sig.offset()];
        sample.extend_from_slice(sig.pattern());
        assert_eq!(registry.find_match(&sample), Some(sig), "{sig}");

        // Trailing bytes may only let an earlier declared entry win
        sample.resize(registry.max_span().max(sample.len()) + 16, 0x00);
        let winner = registry.find_match(&sample).map(|w| {
            registry
                .signatures()
                .position(|s| s == w)
                .unwrap_or(usize::MAX)
        });
        assert!(winner.is_some_and(|w| w <= position), "{sig}");
    }
}

#[rstest]
fn test_png_with_padding() {
    let mut sample = vec![0x89, 0x50, 0x4E, 0x47];
    sample.extend((0..96u8).map(|i| i.wrapping_mul(37)));
    let result = classify(&sample);
    assert_eq!(result.label(), "PNG image");
    assert_eq!(result.mode(), ContentMode::Binary);
    assert_eq!(result.category(), ContentCategory::Consumable);
    assert_eq!(result.matched_pattern(), &[0x89, 0x50, 0x4E, 0x47]);
}

#[rstest]
#[case(b"")]
#[case(b"\x89")]
#[case(b"\x89PN")]
#[case(b"%PD")]
fn test_short_samples_are_unknown(#[case] sample: &[u8]) {
    let result = classify(sample);
    assert!(!result.is_match());
    assert_eq!(result.mode(), ContentMode::Unknown);
    assert_eq!(result.label(), "");
    assert_eq!(result.category(), ContentCategory::Unknown);
}

#[rstest]
fn test_builtin_table_is_shared() {
    let a = SignatureRegistry::builtin_shared();
    let b = SignatureRegistry::builtin_shared();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(SignatureRegistry::builtin().signature_count() > 80);
}

// ============================================================================
// Custom registries
// ============================================================================

fn raw(label: &'static str, pattern: &'static [u8]) -> FileSignature {
    FileSignature::new(SignatureMode::Binary, label, ContentCategory::RawData, pattern)
}

#[rstest]
fn test_register_rejects_empty_pattern() {
    let mut registry = SignatureRegistry::new();
    let err = registry.register(raw("nothing", b"")).unwrap_err();
    assert!(matches!(err, SignatureError::EmptyPattern { .. }));
}

#[rstest]
fn test_register_rejects_duplicate_pattern() {
    let err = SignatureRegistry::with_signatures([raw("first", b"ABCD"), raw("second", b"ABCD")])
        .unwrap_err();
    assert!(matches!(err, SignatureError::Shadowed { .. }));
}

#[rstest]
fn test_same_pattern_at_other_offset_is_allowed() {
    let registry = SignatureRegistry::with_signatures([
        raw("at zero", b"ABCD"),
        raw("at four", b"ABCD").with_offset(4),
    ])
    .unwrap();
    assert_eq!(registry.classify(b"ABCDxxxx").label(), "at zero");
    assert_eq!(registry.classify(b"xxxxABCD").label(), "at four");
}

#[rstest]
fn test_prefix_rule_beats_offset_rule() {
    let registry = SignatureRegistry::with_signatures([
        raw("offset", b"DATA").with_offset(4),
        raw("prefix", b"HEAD"),
    ])
    .unwrap();
    assert_eq!(registry.classify(b"HEADDATA").label(), "prefix");
}

#[rstest]
fn test_empty_registry_matches_nothing() {
    let registry = SignatureRegistry::new();
    assert!(!registry.classify(b"\x89PNG").is_match());
    assert_eq!(registry.max_span(), 0);
}

#[rstest]
fn test_extended_registry_priority() {
    let registry = SignatureRegistry::extended([raw("Acme", b"ACME")]).unwrap();
    assert_eq!(
        registry.signature_count(),
        SignatureRegistry::builtin().signature_count() + 1
    );
    assert_eq!(registry.classify(b"ACME....").label(), "Acme");
    assert_eq!(registry.classify(b"%PDF-1.4").label(), "Adobe PDF .pdf");
}

// ============================================================================
// Text heuristic
// ============================================================================

#[rstest]
fn test_runes_are_text() {
    let a = assess_utf8(RUNES.as_bytes());
    assert!(a.is_likely_text);
    assert_eq!(a.decoded_byte_length, 327);
    assert_eq!(a.decoded_text, RUNES);
}

#[rstest]
fn test_invalid_bytes_are_dropped() {
    let a = assess_utf8(b"ab\xFFcd\xC0\xAFef");
    assert_eq!(a.decoded_text, "abcdef");
    assert_eq!(a.decoded_byte_length, 6);
    assert!(!a.is_likely_text);
}

#[rstest]
#[case(40, false)]
#[case(41, true)]
fn test_absolute_threshold_is_strict(#[case] len: usize, #[case] expected: bool) {
    let sample = vec![b'a'; len];
    assert_eq!(assess_utf8(&sample).is_likely_text, expected);
}

#[rstest]
#[case(TextThreshold::Proportional(0.5), b"abcdef\xFF\xFF".as_slice(), true)]
#[case(TextThreshold::Proportional(0.5), b"abcd\xFF\xFF\xFF\xFF".as_slice(), false)]
#[case(TextThreshold::Absolute(3), b"abcd".as_slice(), true)]
fn test_configured_threshold(
    #[case] threshold: TextThreshold,
    #[case] sample: &[u8],
    #[case] expected: bool,
) {
    assert_eq!(assess_utf8_with(sample, threshold).is_likely_text, expected);
}

// ============================================================================
// Classifier
// ============================================================================

#[rstest]
fn test_noise_is_binary(binary_noise: Vec<u8>) {
    assert!(!classify(&binary_noise).is_match());
    let assessment = assess_utf8(&binary_noise);
    assert!(!assessment.is_likely_text);

    let id = identify(&binary_noise);
    assert_eq!(id.mode(), ContentMode::Binary);
    assert_eq!(id.classification.category(), ContentCategory::Unknown);
    assert_eq!(id.assessment, Some(assessment));
}

#[rstest]
fn test_ascii_is_text(ascii_sentence: Vec<u8>) {
    assert!(!classify(&ascii_sentence).is_match());
    assert!(assess_utf8(&ascii_sentence).is_likely_text);

    let id = identify(&ascii_sentence);
    assert_eq!(id.mode(), ContentMode::Text);
    assert_eq!(id.classification.label(), "");
}

#[rstest]
fn test_match_skips_heuristic() {
    let id = identify(b"%PDF-1.7 some text that would also pass the heuristic easily");
    assert_eq!(id.classification.label(), "Adobe PDF .pdf");
    assert!(id.assessment.is_none());
}

#[rstest]
fn test_idempotent(ascii_sentence: Vec<u8>, binary_noise: Vec<u8>) {
    for sample in [&ascii_sentence, &binary_noise] {
        assert_eq!(classify(sample), classify(sample));
        assert_eq!(assess_utf8(sample), assess_utf8(sample));
        assert_eq!(identify(sample), identify(sample));
    }
}

#[rstest]
fn test_classifier_threshold() {
    let strict = Classifier::new(
        SignatureRegistry::builtin_shared(),
        TextThreshold::Proportional(0.9),
    );
    let sample = b"mostly text here\xFF\xFF\xFF\xFF";
    assert_eq!(strict.identify(sample).mode(), ContentMode::Binary);
    assert_eq!(
        Classifier::default().identify(sample).mode(),
        ContentMode::Binary
    );

    let lenient = Classifier::new(
        SignatureRegistry::builtin_shared(),
        TextThreshold::Proportional(0.5),
    );
    assert_eq!(lenient.identify(sample).mode(), ContentMode::Text);
}
