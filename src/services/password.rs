/*
 * Responsibility
 * - bcrypt hashing for registration, verification for login
 * - runs on the blocking pool; bcrypt is deliberately slow
 */
use bcrypt::{DEFAULT_COST, hash, verify};
use tracing::error;

use crate::error::AppError;

pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|e| {
            error!(error = %e, "password hashing task failed");
            AppError::Internal
        })?
        .map_err(|e| {
            error!(error = %e, "failed to hash password");
            AppError::Internal
        })
}

pub async fn verify_password(password: String, hashed: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify(password, &hashed))
        .await
        .map_err(|e| {
            error!(error = %e, "password verification task failed");
            AppError::Internal
        })?
        .map_err(|e| {
            error!(error = %e, "failed to verify password");
            AppError::Internal
        })
}
