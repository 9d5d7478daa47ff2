//! Abstract credential store consumed by the authority.
//!
//! The store is a dumb relational oracle over three record families:
//! credentials, sessions and verification tokens. It applies no
//! validity-window or token-shape logic; those decisions belong to
//! [`AuthManager`](crate::manager::AuthManager). Implementations map
//! their own failures into the opaque [`StoreError`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque infrastructure failure from the credential store.
///
/// Deliberately carries no typed detail: the boundary layer only needs
/// to distinguish "store broken" from "authentication failed".
#[derive(thiserror::Error, Debug, Clone)]
#[error("credential store unavailable: {0}")]
pub struct StoreError(String);

impl StoreError {
    /// Wraps an underlying persistence failure.
    pub fn new(source: impl std::fmt::Display) -> Self {
        Self(source.to_string())
    }
}

/// Store result type.
pub type StoreResult<T> = core::result::Result<T, StoreError>;

/// A stored account credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Normalized account email.
    pub email: String,
    /// Encoded password hash (hex or PHC string, per `hash_version`).
    pub pw_hash: String,
    /// Hex-encoded salt; empty for schemes that embed their salt.
    pub pw_salt: String,
    /// Hashing scheme version that produced `pw_hash`.
    pub hash_version: i32,
    /// Whether the account's email has been verified.
    pub email_verified: bool,
}

/// A credential to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCredentialRecord {
    pub email: String,
    pub pw_hash: String,
    pub pw_salt: String,
    pub hash_version: i32,
}

/// A session to persist. Only the token digest is ever stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSessionRecord {
    pub owner_email: String,
    /// Hex-encoded digest of the session token.
    pub token_hash: String,
    pub origin_ip: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Joined session lookup result: the session row plus the owning
/// account's verified flag, read in a single query so the flag cannot
/// race a concurrent account change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLookup {
    pub owner_email: String,
    pub expires_at: DateTime<Utc>,
    pub email_verified: bool,
}

/// A verification token to persist, stored as issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVerificationRecord {
    pub owner_email: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

/// A stored verification token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub owner_email: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    /// Set once the token has been used successfully.
    pub consumed_at: Option<DateTime<Utc>>,
}

/// Persistence operations required by the authentication authority.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Persists a new account credential.
    async fn insert_credential(&self, credential: NewCredentialRecord) -> StoreResult<()>;

    /// Looks up a credential by normalized email.
    async fn find_credential(&self, email: &str) -> StoreResult<Option<CredentialRecord>>;

    /// Sets the account's verified flag, returning the affected row count.
    async fn mark_email_verified(&self, email: &str) -> StoreResult<usize>;

    /// Persists a new session row.
    async fn insert_session(&self, session: NewSessionRecord) -> StoreResult<()>;

    /// Looks up a session by token digest, joined with the owning
    /// account's verified flag.
    async fn find_session_by_token_hash(
        &self,
        token_hash: &str,
    ) -> StoreResult<Option<SessionLookup>>;

    /// Moves the matching session's expiry to the given instant.
    /// Rows are never deleted.
    async fn expire_session(&self, token_hash: &str, expires_at: DateTime<Utc>)
        -> StoreResult<()>;

    /// Persists a new verification token.
    async fn insert_verification(&self, verification: NewVerificationRecord) -> StoreResult<()>;

    /// Looks up a verification token by value.
    async fn find_verification_by_token(
        &self,
        token: &str,
    ) -> StoreResult<Option<VerificationRecord>>;

    /// Marks a verification token as consumed at the given instant.
    async fn consume_verification(&self, token: &str, consumed_at: DateTime<Utc>)
        -> StoreResult<()>;
}
