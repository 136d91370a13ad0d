/*
 * Responsibility
 * - v1 URL layout
 * - which routes are public, which need a verified caller, which also need the admin mask
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::api::v1::handlers::{
    books::{create_book, delete_book, get_book, list_books, update_book},
    health::health,
    users::{login, me, register, update_role},
};
use crate::middleware::auth;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/books", get(list_books))
        .route("/books/{book_id}", get(get_book))
        .route("/users/register", post(register))
        .route("/users/login", post(login));

    let signed_in = auth::verified(
        Router::new().route("/users/me", get(me)),
        state.verifier.clone(),
    );

    let admin = auth::authorized(
        Router::new()
            .route("/books", post(create_book))
            .route("/books/{book_id}", put(update_book).delete(delete_book))
            .route("/users/{user_id}/role", put(update_role)),
        state.verifier.clone(),
        state.roles.clone(),
        state.permissions.admin,
    );

    // Same path, different methods: merge combines the method routers and keeps
    // the fallback of the router merged in last. The public one goes last so an
    // unsupported method on a shared path is a 405, not an auth failure.
    admin.merge(signed_in).merge(public)
}
