use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};

/// Why a token was rejected.
///
/// Every decode/verification failure collapses into one of these variants;
/// nothing from the underlying library crosses this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    /// Not three well-formed dot-delimited segments.
    Malformed,
    /// Recomputed HMAC does not match the signature segment.
    BadSignature,
    /// `exp` is present and earlier than the supplied clock.
    Expired,
    /// Any other decode failure (bad base64/JSON, wrong algorithm, missing `sub`, ...).
    Invalid,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed token"),
            Self::BadSignature => write!(f, "signature mismatch"),
            Self::Expired => write!(f, "token expired"),
            Self::Invalid => write!(f, "invalid token"),
        }
    }
}

impl StdError for VerifyError {}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match e.kind() {
            ErrorKind::InvalidToken => Self::Malformed,
            ErrorKind::InvalidSignature => Self::BadSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid,
        }
    }
}

/// Access token (JWT) claims.
///
/// - `sub` is required; an undecodable or subject-less payload is `Invalid`.
/// - `exp` is optional; when absent the token does not expire.
/// - `roles` is optional; when absent the bearer holds no roles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,

    #[serde(default)]
    pub exp: Option<u64>,

    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

/// HS256 access-token verifier around the process-wide shared secret.
///
/// - Built once at startup from config; read-only afterwards.
/// - Key material is intentionally not printable via Debug.
/// - `verify_at` is a pure function of (token, secret, now): the library's
///   own clock check is disabled and expiry is compared against the caller's
///   instant, so results are deterministic under test.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let decoding_key = DecodingKey::from_secret(secret);

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against an explicit instant.
        validation.validate_exp = false;
        validation.required_spec_claims.remove("exp");
        // No issuer/audience contract with the external token issuer.
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify and decode a token against the real clock.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, VerifyError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify and decode a token as of `now`.
    ///
    /// Checks, in order: structure, signature (HMAC over header.payload with
    /// the configured secret, algorithm pinned to HS256), payload decoding,
    /// then expiry against `now`.
    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessTokenClaims, VerifyError> {
        let data = jsonwebtoken::decode::<AccessTokenClaims>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        let claims = data.claims;

        if let Some(exp) = claims.exp
            && (exp as i64) < now.timestamp()
        {
            return Err(VerifyError::Expired);
        }

        Ok(claims)
    }
}
