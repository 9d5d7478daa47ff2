//! The authentication authority.
//!
//! Orchestrates the hashing primitives and the credential store to
//! expose the full credential and session lifecycle to route handlers.
//! Raw session tokens exist outside volatile memory exactly once: at
//! creation, on their way to the caller. Everything persisted is a
//! digest, except verification tokens, which are single-use and
//! short-lived.

use chrono::{TimeDelta, Utc};
use jukestack_auth::compare::timing_safe_compare;
use jukestack_auth::iterated_hash::IteratedHasher;
use jukestack_auth::scheme::HashScheme;
use jukestack_auth::secret_hash::{generate_secret_hash, is_secret_valid};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::{debug, error};

use crate::config::AuthConfig;
use crate::prelude::*;
use crate::store::{
    AuthStore, CredentialRecord, NewCredentialRecord, NewSessionRecord, NewVerificationRecord,
};

/// Verification tokens carry 128 bits of entropy.
const VERIFY_TOKEN_LENGTH: usize = 16;

/// Validity window for email-verification tokens.
const VERIFICATION_WINDOW_HOURS: i64 = 24;

/// Normalizes an account identifier: trimmed, lowercased.
///
/// Applied at every authority entry point that accepts an email, so the
/// store only ever sees one spelling per account.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A freshly hashed secret ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSecret {
    /// Encoded hash (hex or PHC string, per `scheme`).
    pub hash: String,
    /// Hex-encoded salt; empty for schemes that embed their salt.
    pub salt: String,
    /// Scheme that produced the hash.
    pub scheme: HashScheme,
}

/// The credential & session authority.
///
/// Holds the injected store and the hashing configuration. All
/// operations are independent asynchronous units of work; concurrent
/// calls on different sessions impose no ordering on each other, and
/// races on a single row are resolved by the store's own single-row
/// atomicity.
pub struct AuthManager<S: AuthStore> {
    store: S,
    hasher: IteratedHasher,
    config: AuthConfig,
}

impl<S: AuthStore> AuthManager<S> {
    /// Creates an authority over the given store.
    pub fn new(store: S, config: AuthConfig) -> Self {
        let hasher = IteratedHasher::new(config.salt_length, config.hash_iterations);
        Self {
            store,
            hasher,
            config,
        }
    }

    /// The configuration this authority was built with.
    ///
    /// The HTTP layer reads `secure_cookie` and the session duration
    /// from here when it builds the cookie.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Hashes a password with a fresh salt using the iterated scheme.
    ///
    /// Pure: never touches the store. Returns `(salt_hex, hash_hex)`.
    pub fn hash_password(&self, password: &str) -> (String, String) {
        let salt = self.hasher.generate_salt();
        let hash = self.hasher.hash_password(password.as_bytes(), &salt);
        (hex::encode(salt), hex::encode(hash))
    }

    /// Verifies a password against a stored iterated-scheme hash and salt.
    ///
    /// Recomputes the hash and compares in constant time; never
    /// short-circuits on an early byte mismatch.
    pub fn verify_password(&self, password: &str, stored_hash: &[u8], stored_salt: &[u8]) -> bool {
        let computed = self.hasher.hash_password(password.as_bytes(), stored_salt);
        timing_safe_compare(&computed, stored_hash)
    }

    /// Hashes a password with the current default scheme for storage.
    pub fn hash_credential(&self, password: &str) -> Result<StoredSecret> {
        Ok(StoredSecret {
            hash: generate_secret_hash(password)?,
            salt: String::new(),
            scheme: HashScheme::CURRENT,
        })
    }

    /// Verifies a password against a stored credential, dispatching on
    /// the scheme version the credential was hashed with.
    pub fn verify_credential(&self, password: &str, credential: &CredentialRecord) -> Result<bool> {
        match HashScheme::from_version(credential.hash_version)? {
            HashScheme::Sha512Iterated => {
                let (Ok(stored_hash), Ok(stored_salt)) =
                    (hex::decode(&credential.pw_hash), hex::decode(&credential.pw_salt))
                else {
                    error!("Stored credential for {} is not valid hex", credential.email);
                    return Ok(false);
                };
                Ok(self.verify_password(password, &stored_hash, &stored_salt))
            }
            HashScheme::Argon2id => Ok(is_secret_valid(password, &credential.pw_hash)?),
        }
    }

    /// Hashes and persists a credential for a new account.
    pub async fn store_credential(&self, email: &str, password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(Error::MissingCredentials);
        }
        let secret = self.hash_credential(password)?;
        self.store
            .insert_credential(NewCredentialRecord {
                email: normalize_email(email),
                pw_hash: secret.hash,
                pw_salt: secret.salt,
                hash_version: secret.scheme.version(),
            })
            .await?;
        Ok(())
    }

    /// Authenticates login credentials and opens a session.
    ///
    /// Returns the raw session token on success. Unknown accounts and
    /// failed verification both surface as `WrongCredentials`.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        origin_ip: &str,
        user_agent: &str,
    ) -> Result<String> {
        if password.is_empty() {
            return Err(Error::MissingCredentials);
        }
        let email = normalize_email(email);
        let Some(credential) = self.store.find_credential(&email).await? else {
            return Err(Error::WrongCredentials);
        };
        if !self.verify_credential(password, &credential)? {
            return Err(Error::WrongCredentials);
        }
        self.generate_session(&email, origin_ip, user_agent).await
    }

    /// Opens a session for the given account.
    ///
    /// Persists the token digest with `expires_at = now + duration` and
    /// returns the raw token hex for delivery to the client. This is
    /// the only moment the raw token exists outside volatile memory.
    pub async fn generate_session(
        &self,
        owner_email: &str,
        origin_ip: &str,
        user_agent: &str,
    ) -> Result<String> {
        let mut token = vec![0u8; self.config.session_token_length];
        OsRng.fill_bytes(&mut token);
        let token_hash = self.hasher.hash_session_token(&token);

        let now = Utc::now();
        self.store
            .insert_session(NewSessionRecord {
                owner_email: normalize_email(owner_email),
                token_hash: hex::encode(token_hash),
                origin_ip: origin_ip.to_string(),
                user_agent: user_agent.to_string(),
                created_at: now,
                expires_at: now + self.config.session_duration(),
            })
            .await
            .map_err(|err| {
                error!("Error while creating session: {err}");
                err
            })?;

        Ok(hex::encode(token))
    }

    /// Resolves a presented session token to its owning account.
    ///
    /// A session is valid iff its expiry lies strictly in the future.
    /// With `require_verified_email` the owning account's verified flag
    /// is checked from the same joined lookup as the session itself.
    pub async fn validate_session(
        &self,
        token: Option<&str>,
        require_verified_email: bool,
    ) -> Result<String> {
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(Error::MissingToken),
        };
        // Malformed tokens are rejected before any store access.
        let Ok(token_bytes) = hex::decode(token) else {
            return Err(Error::InvalidOrExpired);
        };
        let token_hash = hex::encode(self.hasher.hash_session_token(&token_bytes));

        let session = self
            .store
            .find_session_by_token_hash(&token_hash)
            .await
            .map_err(|err| {
                error!("Error while validating session: {err}");
                err
            })?
            .ok_or(Error::InvalidOrExpired)?;

        if session.expires_at <= Utc::now() {
            return Err(Error::InvalidOrExpired);
        }
        if require_verified_email && !session.email_verified {
            return Err(Error::EmailNotVerified);
        }
        Ok(session.owner_email)
    }

    /// Logically expires the session matching the presented token.
    ///
    /// Best effort: logout is advisory, the client discards its token
    /// regardless, so store failures are logged and swallowed.
    pub async fn invalidate_session(&self, token: &str) {
        let Ok(token_bytes) = hex::decode(token) else {
            debug!("Ignoring logout with malformed session token");
            return;
        };
        let token_hash = hex::encode(self.hasher.hash_session_token(&token_bytes));

        let expired_at = Utc::now() - TimeDelta::seconds(1);
        if let Err(err) = self.store.expire_session(&token_hash, expired_at).await {
            error!("Error while invalidating session: {err}");
        }
    }

    /// Mints and persists an email-verification token.
    ///
    /// Returns the token hex for embedding in an outbound verification
    /// link. Stored as issued; the 24-hour window is enforced at
    /// verification time.
    pub async fn generate_and_save_email_verify_token(&self, owner_email: &str) -> Result<String> {
        let mut token = [0u8; VERIFY_TOKEN_LENGTH];
        OsRng.fill_bytes(&mut token);
        let token_hex = hex::encode(token);

        self.store
            .insert_verification(NewVerificationRecord {
                owner_email: normalize_email(owner_email),
                token: token_hex.clone(),
                created_at: Utc::now(),
            })
            .await
            .map_err(|err| {
                error!("Error while generating email verify token: {err}");
                err
            })?;

        Ok(token_hex)
    }

    /// Consumes a verification token and flips the account's verified flag.
    ///
    /// Returns `Ok(false)` for unknown, stale, or already-consumed
    /// tokens and for accounts that vanished; none of these are errors.
    /// A successful verification marks the token consumed so it cannot
    /// be replayed.
    pub async fn verify_email(&self, token: &str) -> Result<bool> {
        let now = Utc::now();
        let Some(record) = self.store.find_verification_by_token(token).await? else {
            return Ok(false);
        };
        if record.consumed_at.is_some() {
            return Ok(false);
        }
        if record.created_at <= now - TimeDelta::hours(VERIFICATION_WINDOW_HOURS) {
            return Ok(false);
        }

        let affected = self.store.mark_email_verified(&record.owner_email).await?;
        if affected == 0 {
            return Ok(false);
        }

        self.store.consume_verification(token, now).await?;
        Ok(true)
    }
}
