//! Unit tests for the AES-GCM token maker

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64, Engine};
use chrono::{Duration, Utc};
use uuid::Uuid;
use ww_shared::TokenConfig;

use crate::domain::entities::{ROLE_ADMIN, ROLE_USER};
use crate::errors::TokenError;
use crate::services::token::{LocalTokenMaker, SymmetricKey, TokenMaker, TOKEN_HEADER};

fn maker() -> LocalTokenMaker {
    LocalTokenMaker::new(&SymmetricKey::generate(), Duration::minutes(15))
}

#[test]
fn test_round_trip_preserves_claims() {
    let maker = maker();
    let account_id = Uuid::new_v4();
    let duration = Duration::minutes(1);
    let before = Utc::now();

    let (token, issued) = maker.create_token(account_id, ROLE_USER, duration).unwrap();
    let claim = maker.verify_token(&token).unwrap();

    assert_eq!(claim, issued);
    assert_eq!(claim.account_id, account_id);
    assert_eq!(claim.role_id, ROLE_USER);
    assert!(claim.issued_at >= before);
    assert!(claim.issued_at - before < Duration::seconds(1));
    assert_eq!(claim.expires_at, claim.issued_at + duration);
}

#[test]
fn test_token_carries_header() {
    let (token, _) = maker()
        .create_token(Uuid::new_v4(), ROLE_USER, Duration::minutes(1))
        .unwrap();
    assert!(token.starts_with(TOKEN_HEADER));
    assert!(!token.contains('='));
}

#[test]
fn test_zero_duration_is_expired() {
    let maker = maker();
    let (token, _) = maker.create_token(Uuid::new_v4(), ROLE_USER, Duration::zero()).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(2));

    assert_eq!(maker.verify_token(&token).unwrap_err(), TokenError::ExpiredToken);
}

#[test]
fn test_negative_duration_is_expired() {
    let maker = maker();
    let (token, _) = maker
        .create_token(Uuid::new_v4(), ROLE_ADMIN, -Duration::minutes(1))
        .unwrap();

    assert_eq!(maker.verify_token(&token).unwrap_err(), TokenError::ExpiredToken);
}

#[test]
fn test_refresh_issues_new_claim_for_same_subject() {
    let maker = maker();
    let account_id = Uuid::new_v4();
    let (token, original) = maker.create_token(account_id, ROLE_ADMIN, Duration::minutes(1)).unwrap();

    let (refreshed_token, refreshed) = maker.refresh_token(&token).unwrap();

    assert_ne!(refreshed_token, token);
    assert_ne!(refreshed.id, original.id);
    assert_eq!(refreshed.account_id, account_id);
    assert_eq!(refreshed.role_id, ROLE_ADMIN);
    assert_eq!(refreshed.expires_at - refreshed.issued_at, Duration::minutes(15));
    assert_eq!(maker.verify_token(&refreshed_token).unwrap(), refreshed);
}

#[test]
fn test_expired_token_cannot_be_refreshed() {
    let maker = maker();
    let (token, _) = maker
        .create_token(Uuid::new_v4(), ROLE_USER, -Duration::seconds(1))
        .unwrap();

    assert_eq!(maker.refresh_token(&token).unwrap_err(), TokenError::ExpiredToken);
}

#[test]
fn test_token_from_other_key_is_invalid() {
    let (token, _) = maker()
        .create_token(Uuid::new_v4(), ROLE_USER, Duration::minutes(1))
        .unwrap();

    assert_eq!(maker().verify_token(&token).unwrap_err(), TokenError::InvalidToken);
}

#[test]
fn test_malformed_tokens_are_invalid() {
    let maker = maker();
    let cases = [
        String::new(),
        "garbage".to_string(),
        TOKEN_HEADER.to_string(),
        format!("{}!!!not-base64!!!", TOKEN_HEADER),
        format!("{}{}", TOKEN_HEADER, BASE64.encode([0u8; 8])),
        format!("v2.local.{}", BASE64.encode([0u8; 64])),
    ];

    for token in cases {
        assert_eq!(
            maker.verify_token(&token).unwrap_err(),
            TokenError::InvalidToken,
            "{:?}",
            token
        );
    }
}

#[test]
fn test_tampered_ciphertext_is_invalid() {
    let maker = maker();
    let (token, _) = maker
        .create_token(Uuid::new_v4(), ROLE_USER, Duration::minutes(1))
        .unwrap();

    let mut body = BASE64.decode(token.trim_start_matches(TOKEN_HEADER)).unwrap();
    let last = body.len() - 1;
    body[last] ^= 0x01;
    let tampered = format!("{}{}", TOKEN_HEADER, BASE64.encode(body));

    assert_eq!(maker.verify_token(&tampered).unwrap_err(), TokenError::InvalidToken);
}

#[test]
fn test_header_swap_is_rejected() {
    let maker = maker();
    let (token, _) = maker
        .create_token(Uuid::new_v4(), ROLE_USER, Duration::minutes(1))
        .unwrap();

    // Same body under a different header must not verify
    let body = token.trim_start_matches(TOKEN_HEADER);
    assert_eq!(
        maker.verify_token(&format!("v4.public.{}", body)).unwrap_err(),
        TokenError::InvalidToken
    );
}

#[test]
fn test_from_config_requires_key() {
    let err = LocalTokenMaker::from_config(&TokenConfig::default()).err().unwrap();
    assert_eq!(err, TokenError::MissingKey);

    let err = LocalTokenMaker::from_config(&TokenConfig::new("abcd")).err().unwrap();
    assert!(matches!(err, TokenError::InvalidKey { .. }));

    let key = SymmetricKey::generate();
    let maker = LocalTokenMaker::from_config(&TokenConfig::new(key.to_hex())).unwrap();
    assert_eq!(maker.refresh_duration(), Duration::seconds(900));
}

#[test]
fn test_create_token_with_unrepresentable_duration_fails() {
    let maker = maker();
    let err = maker
        .create_token(Uuid::new_v4(), ROLE_USER, Duration::days(365 * 300_000))
        .unwrap_err();
    assert!(matches!(err, TokenError::GenerationFailed { .. }));
}

#[test]
fn test_from_config_rejects_out_of_range_refresh_duration() {
    let key = SymmetricKey::generate();
    let mut config = TokenConfig::new(key.to_hex());
    config.refresh_token_duration = i64::MAX;

    let err = LocalTokenMaker::from_config(&config).err().unwrap();
    assert_eq!(err, TokenError::InvalidDuration { seconds: i64::MAX });
}
