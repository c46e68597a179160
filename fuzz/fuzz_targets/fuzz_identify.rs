#![no_main]

use filemage::domain::entities::ContentMode;
use filemage::domain::services::{assess_utf8, classify, identify};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let result = classify(data);
    if result.is_match() {
        let end = result.offset() + result.matched_pattern().len();
        assert_eq!(&data[result.offset()..end], result.matched_pattern());
    }

    let assessment = assess_utf8(data);
    assert!(assessment.decoded_byte_length <= data.len());

    assert_ne!(identify(data).mode(), ContentMode::Unknown);
});
