//! Authority configuration.
//!
//! Plain serde struct, parseable from TOML. Defaults are hardened: the
//! iteration count in particular is far above what legacy deployments
//! ran with and should only be lowered in tests.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Default salt length in bytes.
pub const DEFAULT_SALT_LENGTH: usize = 16;
/// Default digest iteration count for the iterated hashing scheme.
pub const DEFAULT_HASH_ITERATIONS: u32 = 100_000;
/// Default session token length in bytes (256 bits of entropy).
pub const DEFAULT_SESSION_TOKEN_LENGTH: usize = 32;
/// Default session lifetime in seconds (30 minutes).
pub const DEFAULT_SESSION_DURATION_SECS: i64 = 30 * 60;

/// Configuration for the authentication authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Salt length in bytes for the iterated hashing scheme.
    pub salt_length: usize,
    /// Total digest iterations for the iterated hashing scheme.
    pub hash_iterations: u32,
    /// Session token length in bytes.
    pub session_token_length: usize,
    /// Session lifetime in seconds.
    pub session_duration_secs: i64,
    /// Advisory flag for the HTTP layer's session cookie; the core
    /// never reads it.
    pub secure_cookie: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            salt_length: DEFAULT_SALT_LENGTH,
            hash_iterations: DEFAULT_HASH_ITERATIONS,
            session_token_length: DEFAULT_SESSION_TOKEN_LENGTH,
            session_duration_secs: DEFAULT_SESSION_DURATION_SECS,
            secure_cookie: true,
        }
    }
}

impl AuthConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml(value: &str) -> core::result::Result<Self, toml::de::Error> {
        toml::from_str(value)
    }

    /// Session lifetime as a duration.
    pub fn session_duration(&self) -> TimeDelta {
        TimeDelta::seconds(self.session_duration_secs)
    }
}
