//! Main authentication service implementation

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::{Account, SessionClaim};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::record::RecordStore;
use crate::services::context::RequestContext;
use crate::services::token::TokenMaker;

use super::config::AuthServiceConfig;
use super::hasher::PasswordHasher;

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub access_token: String,
    pub claim: SessionClaim,
    pub account: Account,
}

/// Password login, hashing and token refresh
pub struct AuthService<S: RecordStore, H: PasswordHasher> {
    store: Arc<S>,
    hasher: Arc<H>,
    tokens: Arc<dyn TokenMaker>,
    config: AuthServiceConfig,
}

impl<S: RecordStore, H: PasswordHasher> AuthService<S, H> {
    /// Creates a new authentication service
    ///
    /// # Arguments
    ///
    /// * `store` - Record store used to look up accounts and roles
    /// * `hasher` - Password hashing implementation
    /// * `tokens` - Token engine that issues access tokens
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<S>,
        hasher: Arc<H>,
        tokens: Arc<dyn TokenMaker>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            config,
        }
    }

    /// Hash a password on the blocking pool
    pub async fn hash_password(&self, password: String) -> DomainResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }

    /// Verify a password on the blocking pool
    pub async fn verify_password(&self, password: String, hash: String) -> DomainResult<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password verification task failed: {}", e)))?
    }

    /// Authenticate by email and password and issue an access token
    ///
    /// Unknown emails and wrong passwords fail identically with
    /// `Unauthorized`.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: String,
    ) -> DomainResult<LoginOutcome> {
        let account = ctx
            .run(self.store.find_account_by_email(email))
            .await?
            .ok_or_else(|| {
                debug!("Login attempt for unknown email");
                unauthorized()
            })?;

        let matches = self
            .verify_password(password, account.password_hash.clone())
            .await?;
        if !matches {
            debug!(account_id = %account.id, "Login attempt with wrong password");
            return Err(unauthorized());
        }

        let role = ctx.run(self.store.get_role(account.id)).await?;
        let (access_token, claim) =
            self.tokens
                .create_token(account.id, role.role_id, self.config.access_token_duration)?;

        info!(account_id = %account.id, role_id = role.role_id, "Account logged in");
        Ok(LoginOutcome {
            access_token,
            claim,
            account,
        })
    }

    /// Exchange a valid token for a new one
    pub fn refresh(&self, token: &str) -> DomainResult<(String, SessionClaim)> {
        Ok(self.tokens.refresh_token(token)?)
    }
}

fn unauthorized() -> DomainError {
    DomainError::Unauthorized {
        message: INVALID_CREDENTIALS.to_string(),
    }
}
