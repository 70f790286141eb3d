//! Configuration for the authentication service

use chrono::Duration;
use ww_shared::TokenConfig;

use crate::errors::TokenError;
use crate::services::token::duration_from_secs;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Lifetime of tokens issued at login
    pub access_token_duration: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            access_token_duration: Duration::minutes(15),
        }
    }
}

impl TryFrom<&TokenConfig> for AuthServiceConfig {
    type Error = TokenError;

    fn try_from(config: &TokenConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            access_token_duration: duration_from_secs(config.access_token_duration)?,
        })
    }
}
