#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let out = jsonc_norm::normalize(data).expect("normalizing to a Vec cannot fail");
    assert!(out.len() <= data.len());

    // Strict JSON has nothing to strip.
    if serde_json::from_slice::<serde_json::Value>(data).is_ok() {
        assert_eq!(out, data);
    }
});
