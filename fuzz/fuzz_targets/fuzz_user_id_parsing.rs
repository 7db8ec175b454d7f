//! Fuzz target for `UserId` parsing.
//!
//! Malformed input must fail cleanly; valid input must round-trip.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_user_id_parsing -- -max_total_time=600

#![no_main]

use libfuzzer_sys::fuzz_target;
use tribble_core::UserId;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(id) = s.parse::<UserId>() {
        let formatted = id.to_string();
        assert_eq!(formatted.parse::<UserId>().unwrap(), id);
        assert_eq!(s.trim().parse::<i64>().unwrap(), id.get());
    }
});
