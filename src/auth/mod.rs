//! Credential service: password hashing and session tokens.

pub mod password;
pub mod token;

pub use password::{
    hash_password, hash_password_blocking, verify_password, verify_password_blocking, PasswordError,
};
pub use token::{Claims, TokenError, TokenService, MAX_VALIDITY_HOURS};
