//! Fuzz target for token validation.
//!
//! Arbitrary strings presented as tokens must be rejected without panicking.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_token_validation -- -max_total_time=600

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;
use tribble_auth::{SigningSecret, TokenValidator};

fn validator() -> &'static TokenValidator {
    static VALIDATOR: OnceLock<TokenValidator> = OnceLock::new();
    VALIDATOR.get_or_init(|| TokenValidator::new(&SigningSecret::new("fuzz-secret").unwrap()))
}

fuzz_target!(|data: &[u8]| {
    let Ok(token) = std::str::from_utf8(data) else {
        return;
    };

    // Forging an HS256 signature by chance is not a realistic outcome.
    assert!(validator().validate(token).is_err());
    assert!(validator().validate_access(token).is_err());
    assert!(validator().validate_refresh(token).is_err());
});
