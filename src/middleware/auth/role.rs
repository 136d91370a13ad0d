//! Role gate: admit only callers whose role bitmask covers the route's mask.
//!
//! Second pipeline stage; must sit behind [`super::access`]. The role is read
//! from the store on every request, so a role change takes effect on the
//! caller's next request.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};
use uuid::Uuid;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::repos::RoleStore;
use crate::services::auth::{PermissionMask, is_admitted};

/// State for one mounted gate: where roles come from and what this route demands.
#[derive(Clone)]
pub struct RoleGate {
    roles: Arc<dyn RoleStore>,
    required: PermissionMask,
}

impl RoleGate {
    pub fn new(roles: Arc<dyn RoleStore>, required: PermissionMask) -> Self {
        Self { roles, required }
    }

    /// One store read, then the bitmask decision.
    pub async fn authorize(&self, user_id: Uuid) -> Result<(), AppError> {
        let role = match self.roles.find_role(user_id).await {
            Ok(Some(role)) => role,
            Ok(None) => {
                tracing::info!(%user_id, "role check for unknown user");
                return Err(AppError::IdentityNotFound);
            }
            Err(err) => {
                tracing::error!(%user_id, error = ?err, "role lookup failed");
                return Err(AppError::AuthorizationUnavailable);
            }
        };

        let role = PermissionMask::try_from(role).map_err(|err| {
            tracing::error!(%user_id, error = %err, "stored role is out of range");
            AppError::AuthorizationUnavailable
        })?;

        if is_admitted(role, self.required) {
            Ok(())
        } else {
            tracing::info!(
                %user_id,
                role = %role,
                required = %self.required,
                "role does not cover required permissions"
            );
            Err(AppError::Forbidden)
        }
    }
}

impl std::fmt::Debug for RoleGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleGate")
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Gate every route of `router` on `required`.
///
/// Does not verify tokens itself; wrap the result with the access middleware
/// (see [`super::authorized`]).
pub fn apply<S>(router: Router<S>, roles: Arc<dyn RoleStore>, required: PermissionMask) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        RoleGate::new(roles, required),
        role_middleware,
    ))
}

async fn role_middleware(
    State(gate): State<RoleGate>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(ctx) = req.extensions().get::<AuthCtx>().copied() else {
        tracing::warn!("role gate reached without AuthCtx; access middleware not applied");
        return Err(AppError::MissingCredential);
    };

    gate.authorize(ctx.user_id).await?;

    Ok(next.run(req).await)
}
