//! Two-stage request gate.
//!
//! - [`access`]: bearer token → `AuthCtx` (401 on failure)
//! - [`role`]: `AuthCtx` + route mask → admit / 404 / 403 / 500
//!
//! Stages are plain axum middleware, so a router picks verification only,
//! verification + role check, or nothing at all.

pub mod access;
pub mod role;

use std::sync::Arc;

use axum::Router;

use crate::repos::RoleStore;
use crate::services::auth::{PermissionMask, TokenVerifier};

/// Routes that only need a verified caller.
pub fn verified<S>(router: Router<S>, verifier: Arc<TokenVerifier>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    access::apply(router, verifier)
}

/// Routes that need a verified caller whose role covers `required`.
///
/// The last layer added runs first, so the role gate goes on before the access
/// layer to end up behind it.
pub fn authorized<S>(
    router: Router<S>,
    verifier: Arc<TokenVerifier>,
    roles: Arc<dyn RoleStore>,
    required: PermissionMask,
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    access::apply(role::apply(router, roles, required), verifier)
}
