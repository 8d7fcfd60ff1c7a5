use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a token was refused.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("malformed token: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),
    #[error("token expired")]
    Expired,
    #[error("token signature does not match")]
    SignatureMismatch,
    #[error("token rejected: {0}")]
    Rejected(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for VerificationError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::SignatureMismatch,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::Malformed(e),
            _ => Self::Rejected(e),
        }
    }
}

/// Decoded token claims, kept as an opaque map.
///
/// Middleware puts this into request extensions; downstream stages read
/// individual claims (`role_name`) without verifying again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenPayload(Map<String, Value>);

impl TokenPayload {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// `role_name` claim, only when it is a string.
    pub fn role_name(&self) -> Option<&str> {
        self.claim("role_name").and_then(Value::as_str)
    }
}

/// Turns a raw access token into its decoded claims.
///
/// The access gate only sees this trait, so tests can wrap or replace the
/// HMAC verifier.
pub trait VerifyToken: Send + Sync + 'static {
    fn verify(&self, token: &str) -> Result<TokenPayload, VerificationError>;
}

/// HMAC (HS256/384/512) token verifier.
///
/// - The secret is injected at construction and never printed.
/// - `exp`/`nbf` are checked when present but not required.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }
}

impl VerifyToken for TokenVerifier {
    fn verify(&self, token: &str) -> Result<TokenPayload, VerificationError> {
        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        Ok(TokenPayload(data.claims))
    }
}
