//! Authentication error taxonomy.
//!
//! Authentication failures are specific variants the boundary layer can
//! map to responses; infrastructure failures surface as the opaque
//! [`StoreError`](crate::store::StoreError) so the two are never
//! conflated. Legitimate "not found" outcomes (an unknown verification
//! token) are `Ok(false)`, not errors.

use crate::store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No session token was presented.
    #[error("No session token presented")]
    MissingToken,

    /// The presented token matches no unexpired session.
    #[error("Invalid or expired session token")]
    InvalidOrExpired,

    /// The session is valid but the account's email is unverified.
    #[error("Email not verified")]
    EmailNotVerified,

    /// Login attempted with an empty secret.
    #[error("Missing Credentials")]
    MissingCredentials,

    /// Unknown account or failed password verification.
    #[error("Wrong Credentials")]
    WrongCredentials,

    /// Secret hashing failed.
    #[error(transparent)]
    Hash(#[from] jukestack_auth::error::Error),

    /// The credential store is unreachable or a query failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
