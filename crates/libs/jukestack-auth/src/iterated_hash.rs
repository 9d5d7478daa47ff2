//! Salted, iterated digest hashing for stored credentials and tokens.
//!
//! Passwords are hashed as `SHA-512(password ‖ salt)` with the digest
//! re-applied to its own output until the configured iteration count is
//! reached. Session tokens use the same stretching with SHA-256 and no
//! salt, because a 256-bit random token gains nothing from salting.
//!
//! This scheme exists for compatibility with credentials already at
//! rest; new credentials should prefer [`crate::secret_hash`]. The
//! iteration count is a deliberate cost factor and must come from
//! configuration, never be hardcoded low.
//!
//! # Examples
//!
//! ```rust
//! use jukestack_auth::iterated_hash::IteratedHasher;
//!
//! let hasher = IteratedHasher::new(16, 3);
//! let salt = hasher.generate_salt();
//! let hash = hasher.hash_password(b"correct horse", &salt);
//!
//! assert_eq!(salt.len(), 16);
//! assert_eq!(hash.len(), 64);
//! assert_eq!(hash, hasher.hash_password(b"correct horse", &salt));
//! ```

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256, Sha512};

/// Byte length of a password digest (SHA-512).
pub const PASSWORD_DIGEST_LEN: usize = 64;

/// Byte length of a token digest (SHA-256).
pub const TOKEN_DIGEST_LEN: usize = 32;

/// Iterated-digest hasher with a fixed salt length and iteration count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IteratedHasher {
    salt_length: usize,
    iterations: u32,
}

impl IteratedHasher {
    /// Creates a hasher with the given salt length (bytes) and total
    /// iteration count. The count must be at least 1.
    pub const fn new(salt_length: usize, iterations: u32) -> Self {
        Self {
            salt_length,
            iterations,
        }
    }

    /// Generates a fresh random salt from the OS entropy source.
    ///
    /// A new salt is drawn for every credential-set event; salts are
    /// never reused across hash operations.
    pub fn generate_salt(&self) -> Vec<u8> {
        let mut salt = vec![0u8; self.salt_length];
        OsRng.fill_bytes(&mut salt);
        salt
    }

    /// Hashes a password with the given salt.
    ///
    /// Deterministic for identical inputs: the salted input is digested
    /// once, then the digest is re-applied `iterations - 1` more times.
    /// The result is [`PASSWORD_DIGEST_LEN`] bytes.
    pub fn hash_password(&self, password: &[u8], salt: &[u8]) -> Vec<u8> {
        let mut input = Vec::with_capacity(password.len() + salt.len());
        input.extend_from_slice(password);
        input.extend_from_slice(salt);

        let mut hash = Sha512::digest(&input);
        for _ in 1..self.iterations {
            hash = Sha512::digest(&hash);
        }
        hash.to_vec()
    }

    /// Hashes a session or verification token.
    ///
    /// Unsalted: tokens are high-entropy random material, so the digest
    /// only has to be one-way, not precomputation-resistant. The result
    /// is [`TOKEN_DIGEST_LEN`] bytes.
    pub fn hash_session_token(&self, token: &[u8]) -> Vec<u8> {
        let mut hash = Sha256::digest(token);
        for _ in 1..self.iterations {
            hash = Sha256::digest(&hash);
        }
        hash.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_deterministic() {
        let hasher = IteratedHasher::new(16, 3);
        let salt = hasher.generate_salt();

        let first = hasher.hash_password(b"correct horse", &salt);
        let second = hasher.hash_password(b"correct horse", &salt);
        assert_eq!(first, second);
    }

    #[test]
    fn fresh_salts_yield_distinct_hashes() {
        let hasher = IteratedHasher::new(16, 3);

        let salt_a = hasher.generate_salt();
        let salt_b = hasher.generate_salt();
        assert_ne!(salt_a, salt_b);

        let hash_a = hasher.hash_password(b"correct horse", &salt_a);
        let hash_b = hasher.hash_password(b"correct horse", &salt_b);
        assert_ne!(hash_a, hash_b);

        assert_eq!(hex::encode(hash_a).len(), 128);
        assert_eq!(hex::encode(hash_b).len(), 128);
    }

    #[test]
    fn different_passwords_yield_distinct_hashes() {
        let hasher = IteratedHasher::new(16, 3);
        let salt = hasher.generate_salt();

        let a = hasher.hash_password(b"correct horse", &salt);
        let b = hasher.hash_password(b"battery staple", &salt);
        assert_ne!(a, b);
    }

    #[test]
    fn iteration_count_changes_output() {
        let salt = [7u8; 16];
        let once = IteratedHasher::new(16, 1).hash_password(b"pw", &salt);
        let thrice = IteratedHasher::new(16, 3).hash_password(b"pw", &salt);
        assert_ne!(once, thrice);

        // One iteration is a plain digest of password ‖ salt.
        let mut input = b"pw".to_vec();
        input.extend_from_slice(&salt);
        assert_eq!(once, Sha512::digest(&input).to_vec());
    }

    #[test]
    fn token_hash_is_256_bit_and_unsalted() {
        let hasher = IteratedHasher::new(16, 3);
        let token = [42u8; 32];

        let hash = hasher.hash_session_token(&token);
        assert_eq!(hash.len(), TOKEN_DIGEST_LEN);
        assert_eq!(hash, hasher.hash_session_token(&token));
    }
}
