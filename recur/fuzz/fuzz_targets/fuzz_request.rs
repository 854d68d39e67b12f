#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Expansion should never panic, only return Ok or Err
        if let Ok(events) = recur::create_event_dates_from_json(s) {
            for pair in events.windows(2) {
                assert!(pair[0].start_date() <= pair[1].start_date(), "unsorted output");
            }
        }
    }
});
