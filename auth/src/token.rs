use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Lifetime of issued tokens. Matches the session lifetime so both
/// credential types expire on the same schedule.
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Error type for token operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// No signing secret configured. Surfaced at startup, never per-request.
    #[error("token signing secret is not configured")]
    MissingSecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Verification is binary: forged, malformed and expired tokens all
    /// collapse into this variant.
    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Claims embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, decimal string per JWT convention
    pub sub: String,
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    fn new(user_id: i64, username: &str, issued_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp(),
        }
    }

    /// Parse the subject back into a user id.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Stateless signer and verifier for bearer tokens.
///
/// Uses HS256 with a server-held secret. Validity is determined purely by
/// signature and embedded expiry; there is no server-side revocation.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create a token issuer from the configured secret.
    ///
    /// The secret is validated here, once, so a misconfigured deployment
    /// fails at startup instead of on the first login.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
        })
    }

    /// Issue a signed token for the given user, expiring in 7 days.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, username, Utc::now())
    }

    fn issue_at(
        &self,
        user_id: i64,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(user_id, username, now);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch, malformed token, or past expiry
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(self.algorithm);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::InvalidToken)
    }
}
