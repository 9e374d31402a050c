//! Nonce issuing and validation
//!
//! A nonce proves a fetch request originated from a legitimately served
//! listing page. Nonces are short-lived HS256 tokens bound to a fixed
//! context string; validation checks signature, expiry, and context, and
//! never touches the post store on failure.

use crate::error::{Error, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Context string every load-more nonce is bound to
pub const NONCE_CONTEXT: &str = "loadmore_ajax_nonce";

/// Default nonce lifetime in seconds (12 hours)
pub const DEFAULT_NONCE_TTL_SECS: i64 = 12 * 60 * 60;

/// Claims carried inside a nonce token
#[derive(Debug, Serialize, Deserialize)]
struct NonceClaims {
    /// Bound context, must equal [`NONCE_CONTEXT`]
    ctx: String,
    /// Issued-at (unix seconds)
    iat: i64,
    /// Expiry (unix seconds)
    exp: i64,
}

/// Issues and validates per-page security tokens
#[derive(Clone)]
pub struct NonceService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl NonceService {
    /// Create a service from a shared secret
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, DEFAULT_NONCE_TTL_SECS)
    }

    /// Create a service with a custom token lifetime
    pub fn with_ttl(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a fresh nonce bound to the load-more context
    pub fn issue(&self) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = NonceClaims {
            ctx: NONCE_CONTEXT.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| Error::invalid_token(format!("failed to issue nonce: {e}")))
    }

    /// Validate a nonce against the expected context
    pub fn validate(&self, token: &str) -> bool {
        self.verify(token).is_ok()
    }

    /// Validate a nonce, returning the rejection reason on failure
    pub fn verify(&self, token: &str) -> Result<()> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<NonceClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| Error::invalid_token(e.to_string()))?;

        if data.claims.ctx != NONCE_CONTEXT {
            return Err(Error::invalid_token(format!(
                "unexpected context '{}'",
                data.claims.ctx
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for NonceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
