//! `AuthStore` implementation over the PostgreSQL pool.
//!
//! Maps model rows to the authority's record types and Diesel failures
//! to the opaque store error. Query failures are logged here with
//! enough context to diagnose; the authority only sees that the store
//! was unavailable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::error;

use jukestack_models::db::connection::DbConnection;
use jukestack_models::session::auth_session::{AuthSession, NewAuthSession};
use jukestack_models::session::email_verification::{EmailVerification, NewEmailVerification};
use jukestack_models::user::juke_user::{JukeUser, NewJukeUser};
use jukestack_session::store::{
    AuthStore, CredentialRecord, NewCredentialRecord, NewSessionRecord, NewVerificationRecord,
    SessionLookup, StoreError, StoreResult, VerificationRecord,
};

/// Credential store backed by the relational database.
#[derive(Debug, Clone)]
pub struct DbAuthStore {
    conn: DbConnection,
}

impl DbAuthStore {
    /// Wraps an established connection pool.
    pub fn new(conn: DbConnection) -> Self {
        Self { conn }
    }
}

fn store_err(context: &str, err: jukestack_models::error::Error) -> StoreError {
    error!("{context}: {err}");
    StoreError::new(err)
}

#[async_trait]
impl AuthStore for DbAuthStore {
    async fn insert_credential(&self, credential: NewCredentialRecord) -> StoreResult<()> {
        JukeUser::create(
            &self.conn,
            NewJukeUser {
                email: credential.email,
                pw_hash: credential.pw_hash,
                pw_salt: credential.pw_salt,
                hash_version: credential.hash_version,
            },
        )
        .map_err(|err| store_err("Error while storing credential", err))?;
        Ok(())
    }

    async fn find_credential(&self, email: &str) -> StoreResult<Option<CredentialRecord>> {
        let user = JukeUser::fetch_by_email(&self.conn, email)
            .map_err(|err| store_err("Error while fetching credential", err))?;
        Ok(user.map(|user| CredentialRecord {
            email: user.email,
            pw_hash: user.pw_hash,
            pw_salt: user.pw_salt,
            hash_version: user.hash_version,
            email_verified: user.email_verified,
        }))
    }

    async fn mark_email_verified(&self, email: &str) -> StoreResult<usize> {
        JukeUser::set_email_verified(&self.conn, email)
            .map_err(|err| store_err("Error while marking email verified", err))
    }

    async fn insert_session(&self, session: NewSessionRecord) -> StoreResult<()> {
        AuthSession::create(
            &self.conn,
            NewAuthSession {
                user_email: session.owner_email,
                token_hash: session.token_hash,
                user_ip: session.origin_ip,
                user_agent: session.user_agent,
                created_at: session.created_at,
                expires_at: session.expires_at,
            },
        )
        .map_err(|err| store_err("Error while creating session", err))?;
        Ok(())
    }

    async fn find_session_by_token_hash(
        &self,
        token_hash: &str,
    ) -> StoreResult<Option<SessionLookup>> {
        let row = AuthSession::fetch_with_user_by_token_hash(&self.conn, token_hash)
            .map_err(|err| store_err("Error while validating session", err))?;
        Ok(row.map(|(session, user)| SessionLookup {
            owner_email: session.user_email,
            expires_at: session.expires_at,
            email_verified: user.email_verified,
        }))
    }

    async fn expire_session(
        &self,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        AuthSession::expire_by_token_hash(&self.conn, token_hash, expires_at)
            .map_err(|err| store_err("Error while invalidating session", err))?;
        Ok(())
    }

    async fn insert_verification(&self, verification: NewVerificationRecord) -> StoreResult<()> {
        EmailVerification::create(
            &self.conn,
            NewEmailVerification {
                user_email: verification.owner_email,
                token: verification.token,
                created_at: verification.created_at,
            },
        )
        .map_err(|err| store_err("Error while generating email verify token", err))?;
        Ok(())
    }

    async fn find_verification_by_token(
        &self,
        token: &str,
    ) -> StoreResult<Option<VerificationRecord>> {
        let row = EmailVerification::fetch_by_token(&self.conn, token)
            .map_err(|err| store_err("Error while verifying email", err))?;
        Ok(row.map(|verification| VerificationRecord {
            owner_email: verification.user_email,
            token: verification.token,
            created_at: verification.created_at,
            consumed_at: verification.consumed_at,
        }))
    }

    async fn consume_verification(
        &self,
        token: &str,
        consumed_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        EmailVerification::consume(&self.conn, token, consumed_at)
            .map_err(|err| store_err("Error while consuming verify token", err))?;
        Ok(())
    }
}
