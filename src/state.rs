/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 * - cheap to Clone: everything heavy sits behind Arc or is a pool handle
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::repos::RoleStore;
use crate::services::auth::{PermissionMask, TokenIssuer, TokenVerifier};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub verifier: Arc<TokenVerifier>,
    pub issuer: Arc<TokenIssuer>,
    pub roles: Arc<dyn RoleStore>,
    pub permissions: RoutePermissions,
}

/// Masks demanded by protected routes, fixed when the router is built.
#[derive(Clone, Copy, Debug)]
pub struct RoutePermissions {
    pub admin: PermissionMask,
}

impl AppState {
    pub fn new(
        db: PgPool,
        verifier: Arc<TokenVerifier>,
        issuer: Arc<TokenIssuer>,
        roles: Arc<dyn RoleStore>,
        permissions: RoutePermissions,
    ) -> Self {
        Self {
            db,
            verifier,
            issuer,
            roles,
            permissions,
        }
    }
}
