#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jukestack_session::config::AuthConfig;
use jukestack_session::manager::AuthManager;
use jukestack_session::store::{
    AuthStore, CredentialRecord, NewCredentialRecord, NewSessionRecord, NewVerificationRecord,
    SessionLookup, StoreError, StoreResult, VerificationRecord,
};

#[derive(Default)]
struct Inner {
    credentials: HashMap<String, CredentialRecord>,
    sessions: HashMap<String, NewSessionRecord>,
    verifications: Vec<VerificationRecord>,
}

/// In-memory store standing in for the relational adapter.
///
/// Clones share state, so tests can keep a handle for inspection after
/// handing one to the manager. `set_unavailable` injects infrastructure
/// failures.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, broken: bool) {
        self.unavailable.store(broken, Ordering::SeqCst);
    }

    fn guard(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::new("injected outage"));
        }
        Ok(self.inner.lock().expect("store mutex poisoned"))
    }

    pub fn is_verified(&self, email: &str) -> bool {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .credentials
            .get(email)
            .map(|credential| credential.email_verified)
            .unwrap_or(false)
    }

    pub fn remove_credential(&self, email: &str) {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .credentials
            .remove(email);
    }

    pub fn backdate_verification(&self, token: &str, created_at: DateTime<Utc>) {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        for verification in &mut inner.verifications {
            if verification.token == token {
                verification.created_at = created_at;
            }
        }
    }
}

#[async_trait]
impl AuthStore for MemoryStore {
    async fn insert_credential(&self, credential: NewCredentialRecord) -> StoreResult<()> {
        let mut inner = self.guard()?;
        inner.credentials.insert(
            credential.email.clone(),
            CredentialRecord {
                email: credential.email,
                pw_hash: credential.pw_hash,
                pw_salt: credential.pw_salt,
                hash_version: credential.hash_version,
                email_verified: false,
            },
        );
        Ok(())
    }

    async fn find_credential(&self, email: &str) -> StoreResult<Option<CredentialRecord>> {
        Ok(self.guard()?.credentials.get(email).cloned())
    }

    async fn mark_email_verified(&self, email: &str) -> StoreResult<usize> {
        let mut inner = self.guard()?;
        match inner.credentials.get_mut(email) {
            Some(credential) => {
                credential.email_verified = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn insert_session(&self, session: NewSessionRecord) -> StoreResult<()> {
        let mut inner = self.guard()?;
        inner.sessions.insert(session.token_hash.clone(), session);
        Ok(())
    }

    async fn find_session_by_token_hash(
        &self,
        token_hash: &str,
    ) -> StoreResult<Option<SessionLookup>> {
        let inner = self.guard()?;
        let Some(session) = inner.sessions.get(token_hash) else {
            return Ok(None);
        };
        // Inner join with the owning account, like the relational store.
        let Some(credential) = inner.credentials.get(&session.owner_email) else {
            return Ok(None);
        };
        Ok(Some(SessionLookup {
            owner_email: session.owner_email.clone(),
            expires_at: session.expires_at,
            email_verified: credential.email_verified,
        }))
    }

    async fn expire_session(
        &self,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.guard()?;
        if let Some(session) = inner.sessions.get_mut(token_hash) {
            session.expires_at = expires_at;
        }
        Ok(())
    }

    async fn insert_verification(&self, verification: NewVerificationRecord) -> StoreResult<()> {
        let mut inner = self.guard()?;
        inner.verifications.push(VerificationRecord {
            owner_email: verification.owner_email,
            token: verification.token,
            created_at: verification.created_at,
            consumed_at: None,
        });
        Ok(())
    }

    async fn find_verification_by_token(
        &self,
        token: &str,
    ) -> StoreResult<Option<VerificationRecord>> {
        Ok(self
            .guard()?
            .verifications
            .iter()
            .find(|verification| verification.token == token)
            .cloned())
    }

    async fn consume_verification(
        &self,
        token: &str,
        consumed_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.guard()?;
        for verification in &mut inner.verifications {
            if verification.token == token {
                verification.consumed_at = Some(consumed_at);
            }
        }
        Ok(())
    }
}

/// Low iteration count so tests stay fast; production defaults are much higher.
pub fn test_config() -> AuthConfig {
    AuthConfig {
        hash_iterations: 3,
        ..AuthConfig::default()
    }
}

pub fn test_manager() -> (AuthManager<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    let manager = AuthManager::new(store.clone(), test_config());
    (manager, store)
}

/// Registers an account and returns its normalized email.
pub async fn seed_account(manager: &AuthManager<MemoryStore>, email: &str, password: &str) -> String {
    manager
        .store_credential(email, password)
        .await
        .expect("failed to seed account");
    jukestack_session::manager::normalize_email(email)
}
