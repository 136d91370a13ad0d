use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::AuthCtx;

/// Extractor for handlers that need the caller identity.
///
/// Expects the access middleware to have inserted `AuthCtx` already; when it
/// is missing the route was mounted without verification, and the request is
/// answered as if no token had been sent.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .copied()
            .map(AuthCtxExtractor)
            .ok_or_else(|| {
                tracing::warn!("AuthCtx missing; route is not behind the access middleware");
                AppError::MissingCredential
            })
    }
}
