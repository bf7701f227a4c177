//! RS256 access tokens.
//!
//! A [`TokenService`] owns the process-wide RSA key pair: the private key
//! signs tokens at login and the public key verifies them on every
//! authenticated request. Tokens carry the user id and the set of
//! [`Permission`]s granted, and always expire [`TOKEN_TTL_SECS`] after issue.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Lifetime of an issued token (30 minutes).
pub const TOKEN_TTL_SECS: i64 = 30 * 60;

/// Authorization scheme expected in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing authorization header")]
    MissingAuthorization,

    #[error("Authorization header must use the Bearer scheme")]
    MalformedAuthorization,

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Failed to read key file {path}: {reason}")]
    KeyFile { path: String, reason: String },
}

/// A capability granted by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    GetProfile,
    UpdateProfile,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::GetProfile => "get_profile",
            Permission::UpdateProfile => "update_profile",
        }
    }

    /// Every permission; a successful login grants all of them.
    pub fn all() -> BTreeSet<Permission> {
        BTreeSet::from([Permission::GetProfile, Permission::UpdateProfile])
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JWT token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub permissions: BTreeSet<Permission>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Source of the current time for token issue and expiry checks.
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

/// Issues and verifies RS256-signed access tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::RS256)
            .field("ttl_secs", &TOKEN_TTL_SECS)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl TokenService {
    /// Creates a TokenService from an RSA key pair in PEM format (PKCS#1 or PKCS#8).
    pub fn from_pem(private_key_pem: &str, public_key_pem: &str) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid private key: {}", e)))?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            clock: Arc::new(SystemClock),
        })
    }

    /// Loads the key pair from PEM files on disk.
    pub fn from_files(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
    ) -> Result<Self, JwtError> {
        let private_key = read_key(private_key_path.as_ref())?;
        let public_key = read_key(public_key_path.as_ref())?;
        Self::from_pem(&private_key, &public_key)
    }

    /// Replaces the clock used for `iat`/`exp` and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Signs a token for `user_id` carrying `permissions`.
    pub fn issue(
        &self,
        user_id: i64,
        permissions: BTreeSet<Permission>,
    ) -> Result<String, JwtError> {
        let iat = self.clock.now().timestamp();
        let claims = Claims {
            user_id,
            permissions,
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Verifies a raw token and returns its claims.
    ///
    /// The signature must be RS256 from our key pair and the token must not
    /// have reached its `exp` according to the service clock.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::RS256);
        // Expiry is checked against the injected clock below, without leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        if token_data.claims.exp <= self.clock.now().timestamp() {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }

    /// Verifies the value of an `Authorization` header (`Bearer <token>`).
    pub fn verify_bearer(&self, header: Option<&str>) -> Result<Claims, JwtError> {
        let token = parse_bearer(header)?;
        self.verify(token)
    }
}

/// Extracts the token from an `Authorization` header value.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, JwtError> {
    let header = header.ok_or(JwtError::MissingAuthorization)?;
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(JwtError::MalformedAuthorization)
}

/// Formats a token as an `Authorization` header value.
pub fn bearer(token: &str) -> String {
    format!("{}{}", BEARER_PREFIX, token)
}

fn read_key(path: &Path) -> Result<String, JwtError> {
    std::fs::read_to_string(path).map_err(|e| JwtError::KeyFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
