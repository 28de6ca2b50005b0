//! Main token service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tg_shared::config::auth::MAX_TOKEN_LIFETIME_SECONDS;
use tracing::{debug, info, warn};

use crate::domain::entities::token::{Claims, IdentityInput};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationRegistry;

use super::config::TokenServiceConfig;

/// Service for issuing, verifying, refreshing and revoking tokens
///
/// Issuance and verification are pure apart from reading the clock. The only
/// shared mutable state is the revocation registry, which the service reaches
/// through an `Arc` so the same registry can be handed to the request
/// pipeline and the cleanup task.
pub struct TokenService<R: RevocationRegistry> {
    registry: Arc<R>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: RevocationRegistry> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `registry` - Revocation registry consulted on refresh and written on revoke
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or `DomainError::Config` when the algorithm is not
    /// an HMAC variant, the secret is empty or the lifetime is not positive
    pub fn new(registry: Arc<R>, config: TokenServiceConfig) -> Result<Self, DomainError> {
        if !config.is_symmetric() {
            return Err(DomainError::Config {
                message: format!("{:?} is not a symmetric signing algorithm", config.algorithm),
            });
        }
        if config.secret.is_empty() {
            return Err(DomainError::Config {
                message: "Signing secret must not be empty".to_string(),
            });
        }
        if config.token_lifetime_seconds <= 0
            || config.token_lifetime_seconds > MAX_TOKEN_LIFETIME_SECONDS
        {
            return Err(DomainError::Config {
                message: format!(
                    "Token lifetime must be between 1 and {} seconds",
                    MAX_TOKEN_LIFETIME_SECONDS
                ),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        // `sub` is required by `Claims` itself; jsonwebtoken only recognises string subjects
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            registry,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Shared handle to the revocation registry
    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a token for `input`, valid from now for the configured lifetime
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed token
    /// * `Err(DomainError::Validation)` - `input.id` is empty
    /// * `Err(DomainError::Encoding)` - The signer failed
    pub fn issue(&self, input: &IdentityInput) -> Result<String, DomainError> {
        self.issue_at(input, Utc::now())
    }

    /// Issues a token as if created at `issued_at`
    pub fn issue_at(
        &self,
        input: &IdentityInput,
        issued_at: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        if input.id.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Identity id must not be empty".to_string(),
            });
        }

        let claims = Claims::new(input, issued_at, self.config.token_lifetime_seconds);
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|e| DomainError::Encoding {
            message: e.to_string(),
        })
    }

    /// Verifies signature and expiry and returns the claims
    ///
    /// Does not consult the revocation registry. Every failure is reported as
    /// `DomainError::InvalidToken`; the inner `TokenError` is for logging.
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        self.decode_claims(token).map_err(|cause| {
            debug!(cause = %cause, "Token verification failed");
            DomainError::InvalidToken(cause)
        })
    }

    /// Decoded claims of a valid token
    ///
    /// Same checks and failures as [`TokenService::verify`].
    pub fn get_identity(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify(token)
    }

    /// Non-throwing form of [`TokenService::verify`]
    pub fn is_valid(&self, token: &str) -> bool {
        self.decode_claims(token).is_ok()
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::from(&e))?
            .claims;

        // jsonwebtoken accepts exp == now; a token is dead from its exp onwards
        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }
        if claims.sub.is_empty() || claims.exp <= claims.iat {
            return Err(TokenError::InvalidClaims);
        }

        Ok(claims)
    }

    /// Re-issues a valid token with the same identity and a fresh expiry
    ///
    /// The registry is consulted first, so a revoked token cannot be traded
    /// for a new one. The presented token stays valid until it expires or is
    /// revoked.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The new token
    /// * `Err(DomainError::Refresh)` - Wrapping the revocation, verification or encoding failure
    pub async fn refresh(&self, token: &str) -> Result<String, DomainError> {
        let wrap = |e: DomainError| DomainError::Refresh(Box::new(e));

        if self.registry.is_revoked(token).await.map_err(wrap)? {
            warn!("Refused to refresh a revoked token");
            return Err(wrap(DomainError::InvalidToken(TokenError::Revoked)));
        }

        let claims = self.verify(token).map_err(wrap)?;
        let refreshed = self.issue(&claims.to_input()).map_err(wrap)?;

        debug!(subject = %claims.sub, "Token refreshed");
        Ok(refreshed)
    }

    /// Adds a token to the revocation registry
    ///
    /// The entry is kept until the token's own expiry. A token that does not
    /// verify (forged, malformed or already expired) is still recorded, with
    /// an expiry one lifetime from now.
    pub async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        let now = Utc::now().timestamp();
        let expires_at = match self.decode_claims(token) {
            Ok(claims) => claims.exp,
            Err(_) => now.saturating_add(self.config.token_lifetime_seconds),
        };

        self.registry.revoke(token, expires_at).await?;
        info!(expires_at, "Token revoked");
        Ok(())
    }

    /// Whether the token is in the revocation registry
    pub async fn is_revoked(&self, token: &str) -> Result<bool, DomainError> {
        self.registry.is_revoked(token).await
    }

    /// Whether the revocation registry's store is reachable
    pub async fn health_check(&self) -> Result<(), DomainError> {
        self.registry.health_check().await
    }
}
