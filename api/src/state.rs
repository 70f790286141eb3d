//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use ww_core::repositories::RecordStore;
use ww_core::services::{
    AccountTxService, AuthService, AuthServiceConfig, PasswordHasher, RequestContext, TokenMaker,
};

/// Services shared by every worker
pub struct AppState<S, H>
where
    S: RecordStore,
    H: PasswordHasher,
{
    pub store: Arc<S>,
    pub accounts: Arc<AccountTxService<S>>,
    pub auth: Arc<AuthService<S, H>>,
    pub tokens: Arc<dyn TokenMaker>,
    pub request_timeout: Duration,
}

impl<S, H> AppState<S, H>
where
    S: RecordStore,
    H: PasswordHasher,
{
    /// Wire the services around one store, hasher and token engine
    pub fn new(
        store: Arc<S>,
        hasher: Arc<H>,
        tokens: Arc<dyn TokenMaker>,
        auth_config: AuthServiceConfig,
        request_timeout: Duration,
    ) -> Self {
        Self {
            accounts: Arc::new(AccountTxService::new(Arc::clone(&store))),
            auth: Arc::new(AuthService::new(
                Arc::clone(&store),
                hasher,
                Arc::clone(&tokens),
                auth_config,
            )),
            store,
            tokens,
            request_timeout,
        }
    }

    /// Context bounding store work for one request
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}
