//! OIDC session validator backed by the provider's published JWKS.
//!
//! Validates bearer JWTs by:
//!
//! 1. Fetching (and caching) the JWKS from `<issuer>/.well-known/jwks.json`
//! 2. Verifying the signature with the key named by the token's `kid`
//! 3. Checking issuer, audience and expiry
//! 4. Mapping `sub`, `email` and `name`/`preferred_username` to an
//!    [`AuthenticatedUser`]

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::{JwkSet, KeyAlgorithm};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Header, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

const DEFAULT_JWKS_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
pub struct OidcConfig {
    /// Issuer URL; also the base for JWKS discovery.
    pub issuer_url: String,

    /// Audience tokens must be minted for.
    pub audience: String,

    pub jwks_cache_ttl: Duration,
}

impl OidcConfig {
    pub fn new(issuer_url: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            audience: audience.into(),
            jwks_cache_ttl: DEFAULT_JWKS_TTL,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.jwks_cache_ttl = ttl;
        self
    }

    fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    preferred_username: Option<String>,
}

impl Claims {
    fn into_user(self) -> Result<AuthenticatedUser, AuthError> {
        let id = UserId::new(&self.sub).map_err(|_| {
            tracing::warn!("Token subject is blank");
            AuthError::InvalidToken
        })?;

        let email = self.email.filter(|e| !e.trim().is_empty());
        let display_name = self.name.or(self.preferred_username);

        Ok(AuthenticatedUser::new(id, email, display_name))
    }
}

struct CachedJwks {
    jwks: JwkSet,
    fetched_at: Instant,
}

pub struct OidcSessionValidator {
    config: OidcConfig,
    http_client: reqwest::Client,
    cache: Arc<RwLock<Option<CachedJwks>>>,
}

impl OidcSessionValidator {
    /// Keys are fetched lazily on first validation.
    pub fn new(config: OidcConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::service_unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            cache: Arc::new(RwLock::new(None)),
        })
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let url = self.config.jwks_url();
        tracing::debug!(url = %url, "Fetching JWKS");

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!(error = %e, "JWKS request failed");
            AuthError::service_unavailable(format!("Failed to fetch JWKS: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "JWKS endpoint returned error");
            return Err(AuthError::service_unavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        response.json::<JwkSet>().await.map_err(|e| {
            tracing::error!(error = %e, "JWKS body was not a key set");
            AuthError::service_unavailable(format!("Failed to parse JWKS: {}", e))
        })
    }

    async fn jwks(&self) -> Result<JwkSet, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() <= self.config.jwks_cache_ttl {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;
        *self.cache.write().await = Some(CachedJwks {
            jwks: jwks.clone(),
            fetched_at: Instant::now(),
        });
        Ok(jwks)
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&self.config.issuer_url]);
        validation.set_audience(&[&self.config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation
    }
}

/// Picks the verification key and algorithm for a token header.
fn decoding_key_for(header: &Header, jwks: &JwkSet) -> Result<(DecodingKey, Algorithm), AuthError> {
    let kid = header.kid.as_deref().ok_or_else(|| {
        tracing::warn!("JWT has no kid header");
        AuthError::InvalidToken
    })?;

    let jwk = jwks.find(kid).ok_or_else(|| {
        tracing::warn!(kid, "No JWKS key matches kid");
        AuthError::InvalidToken
    })?;

    let algorithm = match jwk.common.key_algorithm {
        None | Some(KeyAlgorithm::RS256) => Algorithm::RS256,
        Some(KeyAlgorithm::RS384) => Algorithm::RS384,
        Some(KeyAlgorithm::RS512) => Algorithm::RS512,
        Some(KeyAlgorithm::ES256) => Algorithm::ES256,
        Some(KeyAlgorithm::ES384) => Algorithm::ES384,
        Some(other) => {
            tracing::warn!(?other, "Unsupported JWK algorithm");
            return Err(AuthError::InvalidToken);
        }
    };

    let key = DecodingKey::from_jwk(jwk).map_err(|e| {
        tracing::warn!(error = %e, "Unusable JWK");
        AuthError::InvalidToken
    })?;

    Ok((key, algorithm))
}

#[async_trait]
impl SessionValidator for OidcSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        let jwks = self.jwks().await?;
        let (key, algorithm) = decoding_key_for(&header, &jwks)?;

        let data = decode::<Claims>(token, &key, &self.validation(algorithm)).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => {
                    tracing::warn!(error = %e, "Token rejected");
                    AuthError::InvalidToken
                }
            }
        })?;

        data.claims.into_user()
    }
}

impl std::fmt::Debug for OidcSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcSessionValidator")
            .field("issuer_url", &self.config.issuer_url)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}
