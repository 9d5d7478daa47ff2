//! Memory-hard password hashing using Argon2.
//!
//! Default scheme for newly stored credentials. The resulting PHC
//! string embeds algorithm, parameters and salt, so nothing besides the
//! string itself needs to be persisted.
//!
//! The iterated-digest scheme in [`crate::iterated_hash`] remains
//! available for credentials hashed before this scheme existed; see
//! [`crate::scheme::HashScheme`] for how the two coexist.
//!
//! # Examples
//!
//! ```rust
//! use jukestack_auth::secret_hash::{generate_secret_hash, is_secret_valid};
//!
//! let hash = generate_secret_hash("user_password_123").unwrap();
//! assert!(is_secret_valid("user_password_123", &hash).unwrap());
//! assert!(!is_secret_valid("wrong_password", &hash).unwrap());
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

/// Hashes a password with Argon2id and a fresh random salt.
///
/// Returns a PHC string safe to store as-is.
pub fn generate_secret_hash(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(pw.as_bytes(), &salt)?.to_string())
}

/// Verifies a password against a stored PHC string.
///
/// Salt and parameters are recovered from the string; a mismatch is
/// `Ok(false)`, only a malformed hash is an error.
pub fn is_secret_valid(pw: &str, hash: &str) -> Result<bool> {
    let hash = PasswordHashString::new(hash)?;

    Ok(Argon2::default()
        .verify_password(pw.as_bytes(), &hash.password_hash())
        .is_ok())
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}
