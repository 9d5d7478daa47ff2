use std::error::Error;

use jukestack_session::config::AuthConfig;
use jukestack_session::error::Error as AuthError;
use jukestack_session::manager::AuthManager;

mod common;
use common::{MemoryStore, seed_account, test_manager};

#[tokio::test]
async fn fresh_session_validates_to_its_owner() -> Result<(), Box<dyn Error>> {
    let (manager, _store) = test_manager();
    let email = seed_account(&manager, "alice@example.com", "hunter2 but longer").await;

    let token = manager.generate_session(&email, "203.0.113.7", "jukebox/1.0").await?;
    let owner = manager.validate_session(Some(&token), false).await?;
    assert_eq!(owner, email);
    Ok(())
}

#[tokio::test]
async fn missing_token_is_rejected_without_store_access() {
    let (manager, store) = test_manager();
    store.set_unavailable(true);

    let err = manager.validate_session(None, false).await.unwrap_err();
    assert!(matches!(err, AuthError::MissingToken));

    let err = manager.validate_session(Some(""), false).await.unwrap_err();
    assert!(matches!(err, AuthError::MissingToken));

    // Malformed hex is also decided before the store is consulted.
    let err = manager
        .validate_session(Some("not-hex!"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOrExpired));
}

#[tokio::test]
async fn unknown_token_is_invalid() {
    let (manager, _store) = test_manager();
    let err = manager
        .validate_session(Some(&"ab".repeat(32)), false)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOrExpired));
}

#[tokio::test]
async fn session_expires_once_its_deadline_passes() -> Result<(), Box<dyn Error>> {
    let store = MemoryStore::new();
    let config = AuthConfig {
        hash_iterations: 3,
        session_duration_secs: 0,
        ..AuthConfig::default()
    };
    let manager = AuthManager::new(store.clone(), config);
    let email = seed_account(&manager, "bob@example.com", "hunter2 but longer").await;

    let token = manager.generate_session(&email, "203.0.113.7", "jukebox/1.0").await?;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let err = manager.validate_session(Some(&token), false).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidOrExpired));
    Ok(())
}

#[tokio::test]
async fn invalidated_session_stops_validating_immediately() -> Result<(), Box<dyn Error>> {
    let (manager, _store) = test_manager();
    let email = seed_account(&manager, "carol@example.com", "hunter2 but longer").await;

    let token = manager.generate_session(&email, "203.0.113.7", "jukebox/1.0").await?;
    manager.validate_session(Some(&token), false).await?;

    manager.invalidate_session(&token).await;

    let err = manager.validate_session(Some(&token), false).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidOrExpired));
    Ok(())
}

#[tokio::test]
async fn logout_swallows_store_failures_and_bad_tokens() {
    let (manager, store) = test_manager();

    // Neither a malformed token nor a broken store may surface an error.
    manager.invalidate_session("not-hex!").await;
    store.set_unavailable(true);
    manager.invalidate_session(&"ab".repeat(32)).await;
}

#[tokio::test]
async fn verified_email_requirement_is_enforced() -> Result<(), Box<dyn Error>> {
    let (manager, store) = test_manager();
    let email = seed_account(&manager, "dave@example.com", "hunter2 but longer").await;

    let token = manager.generate_session(&email, "203.0.113.7", "jukebox/1.0").await?;

    let err = manager.validate_session(Some(&token), true).await.unwrap_err();
    assert!(matches!(err, AuthError::EmailNotVerified));

    // The plain validation still succeeds for the same session.
    manager.validate_session(Some(&token), false).await?;

    let verify_token = manager.generate_and_save_email_verify_token(&email).await?;
    assert!(manager.verify_email(&verify_token).await?);
    assert!(store.is_verified(&email));

    let owner = manager.validate_session(Some(&token), true).await?;
    assert_eq!(owner, email);
    Ok(())
}

#[tokio::test]
async fn store_outage_surfaces_as_store_error() {
    let (manager, store) = test_manager();
    store.set_unavailable(true);

    let err = manager
        .generate_session("eve@example.com", "203.0.113.7", "jukebox/1.0")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Store(_)));
}

#[tokio::test]
async fn raw_token_is_never_stored() -> Result<(), Box<dyn Error>> {
    let (manager, _store) = test_manager();
    let email = seed_account(&manager, "frank@example.com", "hunter2 but longer").await;

    let token = manager.generate_session(&email, "203.0.113.7", "jukebox/1.0").await?;
    assert_eq!(token.len(), 64); // 32 random bytes, hex-encoded

    // Presenting the stored digest instead of the raw token must fail:
    // the store only ever saw the hash.
    let hashed_lookup = manager.validate_session(Some(&token), false).await;
    assert!(hashed_lookup.is_ok());

    let err = manager
        .validate_session(Some(&hex::encode(token.as_bytes())), false)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidOrExpired));
    Ok(())
}
