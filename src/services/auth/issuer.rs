use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tracing::error;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::auth::claims::AccessTokenClaims;
use crate::services::auth::signing_key::SigningKey;

/// Signs access tokens at login. Issuance only: no refresh, no revocation.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl_seconds: i64,
}

impl TokenIssuer {
    /// `ttl_seconds == 0` issues tokens without `exp`. Lifetimes past `i64::MAX`
    /// are clamped.
    pub fn new(key: &SigningKey, ttl_seconds: u64) -> Self {
        Self {
            encoding_key: key.encoding_key(),
            ttl_seconds: i64::try_from(ttl_seconds).unwrap_or(i64::MAX),
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp();
        let exp = (self.ttl_seconds > 0).then(|| now.saturating_add(self.ttl_seconds));

        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            iat: Some(now),
            exp,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}
