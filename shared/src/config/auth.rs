//! Session token configuration

use serde::{Deserialize, Serialize};

/// Default access token lifetime (15 minutes)
const DEFAULT_ACCESS_TOKEN_DURATION: i64 = 900;

/// Default lifetime of a token issued by refresh (15 minutes)
const DEFAULT_REFRESH_TOKEN_DURATION: i64 = 900;

/// Configuration for the symmetric session token engine
///
/// The symmetric key is hex encoded and must decode to exactly 32 bytes.
/// It is read once at startup and never rotated while the process runs.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Hex-encoded 256-bit symmetric key
    pub symmetric_key: String,

    /// Lifetime of tokens issued at login, in seconds
    #[serde(default = "default_access_token_duration")]
    pub access_token_duration: i64,

    /// Lifetime of tokens issued by refresh, in seconds
    #[serde(default = "default_refresh_token_duration")]
    pub refresh_token_duration: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            symmetric_key: String::new(),
            access_token_duration: DEFAULT_ACCESS_TOKEN_DURATION,
            refresh_token_duration: DEFAULT_REFRESH_TOKEN_DURATION,
        }
    }
}

impl TokenConfig {
    /// Create a new token configuration with the given hex key
    pub fn new(symmetric_key: impl Into<String>) -> Self {
        Self {
            symmetric_key: symmetric_key.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let symmetric_key = std::env::var("TOKEN_SYMMETRIC_KEY").unwrap_or_default();
        let access_token_duration = std::env::var("ACCESS_TOKEN_DURATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ACCESS_TOKEN_DURATION);
        let refresh_token_duration = std::env::var("REFRESH_TOKEN_DURATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REFRESH_TOKEN_DURATION);

        Self {
            symmetric_key,
            access_token_duration,
            refresh_token_duration,
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_duration_minutes(mut self, minutes: i64) -> Self {
        self.access_token_duration = minutes * 60;
        self
    }

    /// Set refresh lifetime in minutes
    pub fn with_refresh_duration_minutes(mut self, minutes: i64) -> Self {
        self.refresh_token_duration = minutes * 60;
        self
    }

    /// Whether a key has been supplied at all
    pub fn has_key(&self) -> bool {
        !self.symmetric_key.trim().is_empty()
    }
}

// The key never shows up in logs.
impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("symmetric_key", &if self.has_key() { "<redacted>" } else { "<missing>" })
            .field("access_token_duration", &self.access_token_duration)
            .field("refresh_token_duration", &self.refresh_token_duration)
            .finish()
    }
}

fn default_access_token_duration() -> i64 {
    DEFAULT_ACCESS_TOKEN_DURATION
}

fn default_refresh_token_duration() -> i64 {
    DEFAULT_REFRESH_TOKEN_DURATION
}
