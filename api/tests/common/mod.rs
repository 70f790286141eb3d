//! Shared setup for the HTTP tests: in-memory store, fast bcrypt and a
//! freshly generated token key per test.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use serde_json::{json, Value};
use uuid::Uuid;
use ww_api::AppState;
use ww_core::domain::value_objects::{AccountTxResult, NewAccount, NewRole};
use ww_core::repositories::InMemoryRecordStore;
use ww_core::services::{
    AccountTransactions, AuthServiceConfig, LocalTokenMaker, RequestContext, SymmetricKey,
    TokenMaker,
};
use ww_core::utils::random::{random_email, random_password, random_profile, random_username};
use ww_infra::BcryptPasswordHasher;

pub type TestState = AppState<InMemoryRecordStore, BcryptPasswordHasher>;

pub fn test_state() -> web::Data<TestState> {
    let store = Arc::new(InMemoryRecordStore::new());
    let tokens: Arc<dyn TokenMaker> = Arc::new(LocalTokenMaker::new(
        &SymmetricKey::generate(),
        chrono::Duration::minutes(15),
    ));

    web::Data::new(AppState::new(
        store,
        Arc::new(BcryptPasswordHasher::with_cost(4)),
        tokens,
        AuthServiceConfig::default(),
        Duration::from_secs(5),
    ))
}

/// Valid registration body with a fresh username and email
pub fn registration_body() -> Value {
    json!({
        "username": random_username(),
        "email": random_email(),
        "password": random_password(),
        "first_name": "Ada",
        "last_name": "Orca",
        "business_name": "Pod Ltd",
        "street_address": "1 Harbour Rd",
        "city": "Victoria",
        "state": "BC",
        "zip": "V8W",
        "country_code": "CA"
    })
}

/// An account stored directly through the engine, with its plain password
pub struct SeededAccount {
    pub result: AccountTxResult,
    pub password: String,
}

impl SeededAccount {
    pub fn id(&self) -> Uuid {
        self.result.account.id
    }

    pub fn email(&self) -> &str {
        &self.result.account.email
    }
}

pub async fn seed_account(state: &TestState, role_id: i32) -> SeededAccount {
    let password = random_password();
    let password_hash = state.auth.hash_password(password.clone()).await.unwrap();

    let result = state
        .accounts
        .create_with_profile_and_role(
            &RequestContext::background(),
            NewAccount {
                username: random_username(),
                email: random_email(),
                password_hash,
            },
            random_profile(),
            NewRole { role_id },
        )
        .await
        .unwrap();

    SeededAccount { result, password }
}

pub fn token_for(state: &TestState, account_id: Uuid, role_id: i32) -> String {
    state
        .tokens
        .create_token(account_id, role_id, chrono::Duration::minutes(15))
        .unwrap()
        .0
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
