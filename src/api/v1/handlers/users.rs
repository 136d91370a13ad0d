/*
 * Responsibility
 * - registration / login / current user / role assignment
 * - login is the only place tokens are issued
 */
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::users::{
            LoginRequest, LoginResponse, RegisterRequest, UpdateRoleRequest, UserResponse,
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    repos::user_repo,
    services::password,
    state::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(req) = payload?;
    req.validate().map_err(AppError::bad_request)?;

    let hashed = password::hash_password(req.password).await?;
    let row = user_repo::create(&state.db, req.username.trim(), &hashed, req.email.as_deref())
        .await?;
    tracing::info!(user_id = %row.id, "user registered");

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload?;

    // Unknown user and wrong password answer the same way.
    let Some(user) = user_repo::find_by_username(&state.db, req.username.trim()).await? else {
        return Err(AppError::InvalidLogin);
    };
    if !password::verify_password(req.password, user.password_hash).await? {
        tracing::info!(user_id = %user.id, "login with wrong password");
        return Err(AppError::InvalidLogin);
    }

    let token = state.issuer.issue(user.id)?;

    Ok(Json(LoginResponse { token }))
}

pub async fn me(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<UserResponse>, AppError> {
    let row = user_repo::get(&state.db, ctx.user_id)
        .await?
        .ok_or(AppError::not_found("User"))?;

    Ok(Json(row.into()))
}

pub async fn update_role(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Path(user_id) = path?;
    let Json(req) = payload?;
    req.validate().map_err(AppError::bad_request)?;

    let row = user_repo::update_role(&state.db, user_id, req.role)
        .await?
        .ok_or(AppError::not_found("User"))?;
    tracing::info!(
        %user_id,
        role = req.role,
        changed_by = %ctx.user_id,
        "user role updated"
    );

    Ok(Json(row.into()))
}
