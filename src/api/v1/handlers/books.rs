/*
 * Responsibility
 * - /books CRUD handlers
 * - reads are public; writes are mounted behind the admin role gate (see routes.rs)
 */
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    api::v1::dto::books::{BookRequest, BookResponse},
    error::AppError,
    repos::book_repo,
    state::AppState,
};

pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookResponse>>, AppError> {
    let rows = book_repo::list(&state.db).await?;

    Ok(Json(rows.into_iter().map(BookResponse::from).collect()))
}

pub async fn get_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BookResponse>, AppError> {
    let Path(book_id) = path?;
    let row = book_repo::get(&state.db, book_id)
        .await?
        .ok_or(AppError::not_found("Book"))?;

    Ok(Json(row.into()))
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    let Json(req) = payload?;
    req.validate().map_err(AppError::bad_request)?;

    let row = book_repo::create(&state.db, req.fields()).await?;
    tracing::info!(book_id = row.id, "book created");

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn update_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<Json<BookResponse>, AppError> {
    let Path(book_id) = path?;
    let Json(req) = payload?;
    req.validate().map_err(AppError::bad_request)?;

    let row = book_repo::update(&state.db, book_id, req.fields())
        .await?
        .ok_or(AppError::not_found("Book"))?;

    Ok(Json(row.into()))
}

pub async fn delete_book(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(book_id) = path?;
    if book_repo::delete(&state.db, book_id).await? {
        tracing::info!(book_id, "book deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Book"))
    }
}
