//! Fuzz target for password hashing.
//!
//! Checks that every hashed password verifies against its own hash and
//! that a different candidate never does.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_password_hash -- -max_total_time=600

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;
use tribble_auth::CredentialStore;

fn store() -> &'static CredentialStore {
    static STORE: OnceLock<CredentialStore> = OnceLock::new();
    // Cheap parameters: the property does not depend on cost.
    STORE.get_or_init(|| CredentialStore::with_params(1024, 1, 1).unwrap())
}

fuzz_target!(|data: &[u8]| {
    let Ok(password) = std::str::from_utf8(data) else {
        return;
    };
    // Login bodies cap passwords at 1024 characters.
    if password.len() > 1024 {
        return;
    }

    let hash = store().hash(password).unwrap();
    assert!(store().verify(&hash, password));

    let other = format!("{password}x");
    assert!(!store().verify(&hash, &other));

    // Arbitrary input as a stored hash must never panic.
    let _ = store().verify(password, "candidate");
});
