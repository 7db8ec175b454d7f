//! Fuzz target for issue/validate round trips.
//!
//! Any principal survives issue then validate unchanged, and the refresh
//! token of the pair is never accepted as an access token.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_token_roundtrip -- -max_total_time=600

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tribble_auth::{SigningSecret, TokenIssuer, TokenValidator};
use tribble_core::{Principal, UserId};

#[derive(Arbitrary, Debug)]
struct PrincipalInput {
    id: i64,
    identifier: String,
}

fuzz_target!(|input: PrincipalInput| {
    if input.identifier.len() > 256 {
        return;
    }

    let secret = SigningSecret::new("fuzz-secret").unwrap();
    let issuer = TokenIssuer::new(&secret);
    let validator = TokenValidator::new(&secret);

    let principal = Principal::new(UserId::new(input.id), input.identifier);
    let pair = issuer.issue(&principal).unwrap();

    assert_eq!(validator.validate_access(&pair.access).unwrap(), principal);
    assert!(validator.validate_access(&pair.refresh).is_err());
    assert!(validator.validate_refresh(&pair.refresh).is_ok());
});
