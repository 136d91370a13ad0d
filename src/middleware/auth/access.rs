//! Access token verification → `AuthCtx` in request extensions.
//!
//! First pipeline stage. Reads `Authorization`, verifies the JWT against the
//! process signing key and records the subject for the stages behind it.
//! Every verification failure is answered with the same 401 so a caller
//! cannot tell an expired token from a forged one.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::TokenVerifier;

/// Require a verified bearer token on every route of `router`.
///
/// Applied with `route_layer`, so unmatched paths still fall through to 404.
pub fn apply<S>(router: Router<S>, verifier: Arc<TokenVerifier>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(verifier, access_middleware))
}

async fn access_middleware(
    State(verifier): State<Arc<TokenVerifier>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match bearer_token(req.headers()) {
        Ok(token) => token,
        Err(err) => {
            tracing::info!(error = %err, "request rejected before verification");
            return Err(err);
        }
    };

    let verified = match verifier.verify_verified(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::info!(error = %err, "access token verification failed");
            return Err(AppError::InvalidCredential);
        }
    };

    tracing::debug!(
        user_id = %verified.user_id,
        expires_at = ?verified.expires_at,
        "access token verified"
    );

    // middleware → extractor / role gate
    req.extensions_mut().insert(AuthCtx::new(verified.user_id));

    Ok(next.run(req).await)
}

/// Pull the credential out of `Authorization`.
///
/// Both `Bearer <token>` and a bare `<token>` are accepted. An absent header or
/// one that is empty once the scheme is removed counts as no token at all.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(AppError::MissingCredential);
    };
    let raw = value
        .to_str()
        .map_err(|_| AppError::InvalidCredential)?
        .trim();

    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    };

    if token.is_empty() {
        return Err(AppError::MissingCredential);
    }
    Ok(token)
}
