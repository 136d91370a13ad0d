use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::{error::Error as StdError, fmt};
use uuid::Uuid;

use crate::services::auth::claims::AccessTokenClaims;
use crate::services::auth::signing_key::SigningKey;

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug)]
pub enum VerifyError {
    Jwt(jsonwebtoken::errors::Error),
    EmptyClaim(&'static str),
    InvalidSubUuid,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
            Self::InvalidSubUuid => write!(f, "invalid 'sub' (expected UUID)"),
        }
    }
}

impl StdError for VerifyError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// What the middleware keeps from a token once it has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub user_id: Uuid,
    pub expires_at: Option<i64>,
}

/// HS256 access-token verifier.
///
/// Pure CPU work against the signing key; no I/O, safe to share across requests.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(key: &SigningKey, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is checked when present but not demanded
        validation.set_required_spec_claims(&["sub"]);
        validation.leeway = leeway_seconds;

        Self {
            decoding_key: key.decoding_key(),
            validation,
        }
    }

    // Signature, algorithm and `exp` (if any).
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify, then check `sub` and lift it into a `Uuid`.
    ///
    /// This is the entry point for the middleware.
    pub fn verify_verified(&self, token: &str) -> Result<VerifiedAccessToken, VerifyError> {
        let claims = self.verify(token)?;

        let sub = claims.sub.trim();
        if sub.is_empty() {
            return Err(VerifyError::EmptyClaim("sub"));
        }
        let user_id = Uuid::parse_str(sub).map_err(|_| VerifyError::InvalidSubUuid)?;

        Ok(VerifiedAccessToken {
            user_id,
            expires_at: claims.exp,
        })
    }
}
