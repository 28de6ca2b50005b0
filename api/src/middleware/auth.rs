//! Bearer token authentication middleware for protecting API endpoints.
//!
//! Each request goes through one decision: extract the Bearer token, reject
//! it if revoked, verify it, then attach the identity to the request and hand
//! it on unchanged. Rejections are 401 responses carrying one of three
//! messages, see [`AuthRejection`].

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use tg_core::{
    domain::entities::token::{Claims, IdentityContext, IdentityInput},
    errors::DomainError,
    repositories::RevocationRegistry,
    services::token::TokenService,
};
use tg_shared::extract_bearer_token;

use crate::handlers::error::AuthRejection;

/// Token service as stored in application data
pub type SharedTokenService = Arc<dyn TokenServiceWrapper>;

/// Identity attached to an authenticated request
#[derive(Debug, Clone, Serialize)]
pub struct AuthContext {
    pub subject: String,
    pub role: Option<String>,
    pub email: Option<String>,
    /// The presented token, kept so handlers can revoke it
    #[serde(skip)]
    pub token: String,
}

impl AuthContext {
    pub fn from_claims(claims: Claims, token: impl Into<String>) -> Self {
        Self {
            subject: claims.sub,
            role: claims.role,
            email: claims.email,
            token: token.into(),
        }
    }

    pub fn identity(&self) -> IdentityContext {
        IdentityContext {
            subject: self.subject.clone(),
            role: self.role.clone(),
            email: self.email.clone(),
        }
    }
}

/// Runs the authentication decision for one `Authorization` header value
///
/// A revocation backend failure rejects the request as invalid rather than
/// letting it through.
pub async fn authenticate(
    tokens: &dyn TokenServiceWrapper,
    authorization: Option<&str>,
) -> Result<AuthContext, AuthRejection> {
    let token = extract_bearer_token(authorization).ok_or(AuthRejection::TokenMissing)?;

    match tokens.is_revoked(token).await {
        Ok(false) => {}
        Ok(true) => return Err(AuthRejection::TokenRevoked),
        Err(e) => {
            log::error!("Revocation check failed, rejecting request: {}", e);
            return Err(AuthRejection::TokenInvalid);
        }
    }

    let claims = tokens
        .verify(token)
        .map_err(|_| AuthRejection::TokenInvalid)?;

    Ok(AuthContext::from_claims(claims, token))
}

/// JWT authentication middleware factory
///
/// Expects a [`SharedTokenService`] registered as `web::Data`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let tokens = match req.app_data::<web::Data<SharedTokenService>>() {
                Some(tokens) => tokens.clone(),
                None => {
                    log::error!("Token service missing from application data");
                    return Err(ErrorInternalServerError("Authentication not configured"));
                }
            };

            let authorization = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            let context = match authenticate(tokens.get_ref().as_ref(), authorization).await {
                Ok(context) => context,
                Err(rejection) => {
                    log::debug!("Rejected {} {}: {}", req.method(), req.path(), rejection);
                    return Err(Error::from(rejection));
                }
            };

            req.extensions_mut().insert(context);

            service.call(req).await
        })
    }
}

/// Object-safe facade over [`TokenService`] so handlers and the middleware
/// do not depend on the registry backend
#[async_trait]
pub trait TokenServiceWrapper: Send + Sync {
    fn issue(&self, input: &IdentityInput) -> Result<String, DomainError>;

    fn verify(&self, token: &str) -> Result<Claims, DomainError>;

    async fn refresh(&self, token: &str) -> Result<String, DomainError>;

    async fn revoke(&self, token: &str) -> Result<(), DomainError>;

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError>;

    /// Reachability of the revocation store
    async fn health_check(&self) -> Result<(), DomainError>;

    /// Configured lifetime of issued tokens, in seconds
    fn token_lifetime(&self) -> i64;
}

#[async_trait]
impl<R: RevocationRegistry + 'static> TokenServiceWrapper for TokenService<R> {
    fn issue(&self, input: &IdentityInput) -> Result<String, DomainError> {
        TokenService::issue(self, input)
    }

    fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        TokenService::verify(self, token)
    }

    async fn refresh(&self, token: &str) -> Result<String, DomainError> {
        TokenService::refresh(self, token).await
    }

    async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        TokenService::revoke(self, token).await
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        TokenService::is_revoked(self, token).await
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        TokenService::health_check(self).await
    }

    fn token_lifetime(&self) -> i64 {
        self.config().token_lifetime_seconds
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| Error::from(AuthRejection::TokenMissing));

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
