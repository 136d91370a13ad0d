/*
 * Responsibility
 * - the one AppError used by handlers and the auth middleware
 * - IntoResponse (HTTP status + `{"error": "..."}` body)
 * - conversions from repo / JSON-body / path errors
 *
 * The auth variants' messages are part of the public contract; clients match on them.
 */
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No token provided")]
    MissingCredential,
    #[error("Invalid token")]
    InvalidCredential,
    #[error("User not found")]
    IdentityNotFound,
    #[error("Forbidden")]
    Forbidden,
    #[error("Internal server error")]
    AuthorizationUnavailable,

    #[error("{0}")]
    BadRequest(String),
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("Invalid credentials")]
    InvalidLogin,
    #[error("{0}")]
    Conflict(&'static str),
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential | AppError::InvalidCredential | AppError::InvalidLogin => {
                StatusCode::UNAUTHORIZED
            }
            AppError::IdentityNotFound | AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::AuthorizationUnavailable | AppError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::Conflict("Username already exists"),
            RepoError::Db(err) => {
                tracing::error!(error = %err, "database error");
                AppError::Internal
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn auth_failures_render_exact_bodies() {
        let cases = [
            (AppError::MissingCredential, 401, r#"{"error":"No token provided"}"#),
            (AppError::InvalidCredential, 401, r#"{"error":"Invalid token"}"#),
            (AppError::IdentityNotFound, 404, r#"{"error":"User not found"}"#),
            (AppError::Forbidden, 403, r#"{"error":"Forbidden"}"#),
            (
                AppError::AuthorizationUnavailable,
                500,
                r#"{"error":"Internal server error"}"#,
            ),
        ];

        for (err, status, body) in cases {
            let (got_status, got_body) = render(err).await;
            assert_eq!(got_status.as_u16(), status);
            assert_eq!(got_body, body);
        }
    }

    #[tokio::test]
    async fn database_errors_do_not_leak_detail() {
        let (status, body) = render(RepoError::Db(sqlx::Error::PoolTimedOut).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Internal server error"}"#);
    }

    #[test]
    fn not_found_names_the_resource() {
        assert_eq!(AppError::not_found("Book").to_string(), "Book not found");
    }
}
