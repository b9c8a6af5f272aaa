//! Argon2id password hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordError(String);

/// Hash compared against when a login names an unknown account, so both
/// paths pay for one Argon2 verification.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("hack4change-dummy-password").ok());

/// Hashes a plaintext password using Argon2id with a random salt.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError(e.to_string()))
}

/// Verifies a plaintext password against a stored PHC hash string.
///
/// A mismatch is `false`, never an error. A stored hash that cannot be parsed
/// is also `false` and gets logged.
pub fn verify_password(hash: &str, plaintext: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            return false;
        }
    };

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => true,
        Err(argon2::password_hash::Error::Password) => false,
        Err(e) => {
            tracing::warn!("Password verification failed: {}", e);
            false
        }
    }
}

/// Burns one verification against a throwaway hash.
pub fn verify_dummy(plaintext: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(hash, plaintext);
    }
}

/// [`hash_password`] on the blocking pool, off the async workers.
pub async fn hash_password_blocking(plaintext: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&plaintext))
        .await
        .map_err(|e| PasswordError(e.to_string()))?
}

/// [`verify_password`] on the blocking pool. Without a stored hash this
/// burns a dummy verification and returns `false`.
pub async fn verify_password_blocking(hash: Option<String>, plaintext: String) -> bool {
    let outcome = tokio::task::spawn_blocking(move || match hash {
        Some(hash) => verify_password(&hash, &plaintext),
        None => {
            verify_dummy(&plaintext);
            false
        }
    })
    .await;

    match outcome {
        Ok(verified) => verified,
        Err(e) => {
            tracing::error!("Password verification task failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_matches() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&hash, "correct horse battery"));
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(!verify_password(&hash, "Correct horse battery"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("hunter22hunter").unwrap();
        let b = hash_password("hunter22hunter").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("plaintext-not-a-hash", "plaintext-not-a-hash"));
        assert!(!verify_password("", ""));
    }

    #[tokio::test]
    async fn blocking_pool_variants_agree_with_inline_ones() {
        let hash = hash_password_blocking("correct horse battery".to_string()).await.unwrap();
        assert!(verify_password(&hash, "correct horse battery"));

        assert!(verify_password_blocking(Some(hash.clone()), "correct horse battery".to_string()).await);
        assert!(!verify_password_blocking(Some(hash), "wrong".to_string()).await);
        assert!(!verify_password_blocking(None, "correct horse battery".to_string()).await);
    }
}
