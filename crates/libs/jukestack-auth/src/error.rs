//! Hashing error types.

/// Secret hashing errors.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// Password hashing or PHC string parsing failed.
    #[error("Error hashing password {0}")]
    PasswordHash(argon2::password_hash::Error),

    /// A stored credential carries a scheme version this build does not know.
    #[error("Unknown hash scheme version {0}")]
    UnknownScheme(i32),
}
