//! Versioning for the password hashing schemes at rest.
//!
//! Stored credentials record which scheme produced them, so the scheme
//! can be hardened without invalidating existing hashes. Verification
//! dispatches on the stored version; new hashes always use the current
//! default.

use crate::prelude::*;

/// The hashing scheme a stored credential was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashScheme {
    /// Iterated SHA-512 over password ‖ salt, hex-encoded hash and salt.
    Sha512Iterated,
    /// Argon2id PHC string; the salt column is unused.
    Argon2id,
}

impl HashScheme {
    /// The scheme used for newly stored credentials.
    pub const CURRENT: HashScheme = HashScheme::Argon2id;

    /// Stable version number persisted alongside the hash.
    pub const fn version(self) -> i32 {
        match self {
            HashScheme::Sha512Iterated => 1,
            HashScheme::Argon2id => 2,
        }
    }

    /// Resolves a persisted version number back to a scheme.
    pub fn from_version(version: i32) -> Result<Self> {
        match version {
            1 => Ok(HashScheme::Sha512Iterated),
            2 => Ok(HashScheme::Argon2id),
            other => Err(Error::UnknownScheme(other)),
        }
    }
}
