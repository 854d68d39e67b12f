#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(time) = recur::TimeOfDay::parse(s) {
            let displayed = time.to_string();
            let reparsed = recur::TimeOfDay::parse(&displayed)
                .expect("display output must be parseable");
            assert_eq!(time, reparsed, "roundtrip failed");
        }
    }
});
