#![no_main]

use filemage::application::dto::IdentifyOptions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(options) = IdentifyOptions::from_json_str(raw) {
            let _ = options.build_classifier();
        }
    }
});
