//! Bearer-token authentication middleware for protecting API endpoints.
//!
//! The middleware reads `Authorization: Bearer <token>`, verifies the token
//! with the configured [`TokenMaker`] and stores the recovered
//! [`SessionClaim`] in the request extensions. Requests without a usable
//! token are answered with 401 and never reach the wrapped service.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    ops::Deref,
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::debug;
use ww_core::domain::entities::SessionClaim;
use ww_core::services::TokenMaker;

use crate::handlers::error::ApiError;

/// Bearer authentication middleware factory
#[derive(Clone)]
pub struct BearerAuth {
    tokens: Arc<dyn TokenMaker>,
}

impl BearerAuth {
    /// Creates the gate around an explicitly configured token engine
    pub fn new(tokens: Arc<dyn TokenMaker>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

/// Message of every gate rejection; clients cannot tell the causes apart
const REJECTED: &str = "Missing, invalid or expired credentials";

/// Bearer authentication middleware service
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<dyn TokenMaker>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let tokens = Arc::clone(&self.tokens);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    debug!(path = %req.path(), "Missing or malformed Authorization header");
                    return Ok(reject(req, ApiError::unauthorized(REJECTED)));
                }
            };

            let claim = match tokens.verify_token(&token) {
                Ok(claim) => claim,
                Err(e) => {
                    debug!(path = %req.path(), error = ?e, "Rejected bearer token");
                    return Ok(reject(req, ApiError::unauthorized(REJECTED)));
                }
            };

            debug!(account_id = %claim.account_id, role_id = claim.role_id, "Request authenticated");
            req.extensions_mut().insert(claim);

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn reject<B>(req: ServiceRequest, error: ApiError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(error.error_response()).map_into_right_body()
}

/// Extracts the token from `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively; any other scheme, or an empty
/// token, is treated as absent.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// Typed access to the claim the gate attached to a request
pub trait SessionExt {
    fn session_claim(&self) -> Option<SessionClaim>;
}

impl SessionExt for HttpRequest {
    fn session_claim(&self) -> Option<SessionClaim> {
        self.extensions().get::<SessionClaim>().cloned()
    }
}

impl SessionExt for ServiceRequest {
    fn session_claim(&self) -> Option<SessionClaim> {
        self.extensions().get::<SessionClaim>().cloned()
    }
}

/// Extractor for the authenticated session
///
/// Fails with 401 when the route is not behind [`BearerAuth`].
#[derive(Debug, Clone)]
pub struct AuthSession(pub SessionClaim);

impl Deref for AuthSession {
    type Target = SessionClaim;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthSession {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .session_claim()
            .map(AuthSession)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[::core::prelude::v1::test]
    fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_lowercase = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_lowercase), Some("test_token_123".to_string()));

        let req_no_scheme = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_scheme), None);

        let req_basic = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_basic), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
