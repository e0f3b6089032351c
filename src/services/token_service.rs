//! Token service - Issues and validates signed, time-bounded identity tokens.
//!
//! Tokens are HS256 JWTs carrying an opaque string subject. Callers that need
//! a numeric account id parse the subject themselves and treat a parse
//! failure as an authentication error.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{TokenConfig, TOKEN_TYPE_BEARER};
use crate::errors::AppResult;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// Token returned after successful authentication
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IssuedToken {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Token issuing and validation.
pub trait TokenService: Send + Sync {
    /// Issue a token for `subject`, valid from now until now + validity.
    fn issue(&self, subject: &str) -> AppResult<IssuedToken>;

    /// Verify signature, algorithm and time bounds; return the claims.
    fn validate(&self, token: &str) -> AppResult<Claims>;
}

/// HMAC-signed JWT implementation of `TokenService`.
pub struct JwtTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokens {
    /// Create a token service using wall-clock time.
    pub fn new(config: &TokenConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a token service with an explicit clock.
    pub fn with_clock(config: &TokenConfig, clock: Arc<dyn Clock>) -> Self {
        // Only the HMAC family is accepted; any other header algorithm is
        // rejected before the signature is checked.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_required_spec_claims(&["sub", "exp", "nbf"]);
        // Time bounds are checked below against `clock`.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_bytes()),
            validation,
            validity: config.validity(),
            clock,
        }
    }
}

impl TokenService for JwtTokens {
    fn issue(&self, subject: &str) -> AppResult<IssuedToken> {
        let now = self.clock.now();
        let expires_at = now + self.validity;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        tracing::debug!(subject, "Token issued");

        Ok(IssuedToken {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.validity.num_seconds(),
        })
    }

    fn validate(&self, token: &str) -> AppResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        let now = self.clock.now().timestamp();
        if now < claims.nbf {
            return Err(jsonwebtoken::errors::Error::from(ErrorKind::ImmatureSignature).into());
        }
        // Exactly at `exp` the token is already invalid
        if now >= claims.exp {
            return Err(jsonwebtoken::errors::Error::from(ErrorKind::ExpiredSignature).into());
        }

        Ok(claims)
    }
}
