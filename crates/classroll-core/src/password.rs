//! Password hashing, verification and strength rules.
//!
//! Hashes are bcrypt with the library's default cost; the salt is generated
//! per hash, so hashing the same password twice yields different strings.

use std::sync::OnceLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| {
        hash("classroll-timing-equalizer", DEFAULT_COST).unwrap_or_default()
    })
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

/// Returns `true` only when `password` matches `hashed`.
///
/// An unparseable hash is reported as a mismatch after running a full bcrypt
/// verification against a dummy hash, so it costs the same as a wrong password.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    match verify(password, hashed) {
        Ok(valid) => valid,
        Err(_) => {
            verify_password_dummy(password);
            false
        }
    }
}

/// Burns one bcrypt verification. Used when there is no stored hash to check
/// against (e.g. login with an unknown email).
pub fn verify_password_dummy(password: &str) {
    let _ = verify(password, dummy_hash());
}

/// At least 8 characters with an uppercase letter, a lowercase letter, a
/// digit and a symbol (anything that is not a letter or digit).
pub fn is_strong_password(password: &str) -> bool {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return false;
    }

    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(char::is_numeric);
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric());

    has_upper && has_lower && has_digit && has_symbol
}

pub fn check_password_strength(password: &str) -> Result<(), AppError> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(AppError::weak_password())
    }
}
