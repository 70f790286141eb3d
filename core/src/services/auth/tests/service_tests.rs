//! Unit tests for authentication service

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::{ROLE_ADMIN, ROLE_USER};
use crate::domain::value_objects::{NewAccount, NewRole};
use crate::errors::{DomainError, TokenError};
use crate::repositories::record::InMemoryRecordStore;
use crate::services::account::{AccountTransactions, AccountTxService};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::context::RequestContext;
use crate::services::token::{LocalTokenMaker, SymmetricKey, TokenMaker};
use crate::utils::random::{random_email, random_password, random_profile, random_username};

use super::mocks::PlainHasher;

struct Fixture {
    auth: AuthService<InMemoryRecordStore, PlainHasher>,
    accounts: AccountTxService<InMemoryRecordStore>,
    tokens: Arc<LocalTokenMaker>,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryRecordStore::new());
    let tokens = Arc::new(LocalTokenMaker::new(&SymmetricKey::generate(), Duration::minutes(15)));
    let auth = AuthService::new(
        store.clone(),
        Arc::new(PlainHasher),
        tokens.clone(),
        AuthServiceConfig {
            access_token_duration: Duration::minutes(5),
        },
    );

    Fixture {
        auth,
        accounts: AccountTxService::new(store),
        tokens,
    }
}

async fn register(fx: &Fixture, password: &str, role_id: i32) -> NewAccount {
    let params = NewAccount {
        username: random_username(),
        email: random_email(),
        password_hash: fx.auth.hash_password(password.to_string()).await.unwrap(),
    };
    fx.accounts
        .create_with_profile_and_role(
            &RequestContext::background(),
            params.clone(),
            random_profile(),
            NewRole { role_id },
        )
        .await
        .unwrap();
    params
}

#[tokio::test]
async fn test_login_issues_token_with_role() {
    let fx = fixture();
    let password = random_password();
    let params = register(&fx, &password, ROLE_ADMIN).await;

    let outcome = fx
        .auth
        .login(&RequestContext::background(), &params.email, password)
        .await
        .unwrap();

    assert_eq!(outcome.account.email, params.email);
    assert_eq!(outcome.claim.role_id, ROLE_ADMIN);
    assert_eq!(outcome.claim.expires_at - outcome.claim.issued_at, Duration::minutes(5));

    let verified = fx.tokens.verify_token(&outcome.access_token).unwrap();
    assert_eq!(verified.account_id, outcome.account.id);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let fx = fixture();
    let params = register(&fx, "correct-horse", ROLE_USER).await;

    let err = fx
        .auth
        .login(&RequestContext::background(), &params.email, "battery-staple".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_login_unknown_email_is_unauthorized() {
    let fx = fixture();

    let err = fx
        .auth
        .login(&RequestContext::background(), "nobody@nowhere.io", "whatever1".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Unauthorized { .. }));
    assert_eq!(err.to_string(), "Unauthorized: invalid email or password");
}

#[tokio::test]
async fn test_refresh_keeps_subject() {
    let fx = fixture();
    let password = random_password();
    let params = register(&fx, &password, ROLE_USER).await;
    let outcome = fx
        .auth
        .login(&RequestContext::background(), &params.email, password)
        .await
        .unwrap();

    let (_, refreshed) = fx.auth.refresh(&outcome.access_token).unwrap();
    assert_eq!(refreshed.account_id, outcome.account.id);
    assert_ne!(refreshed.id, outcome.claim.id);
}

#[tokio::test]
async fn test_refresh_garbage_is_token_error() {
    let fx = fixture();
    let err = fx.auth.refresh("v4.local.nope").unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}
