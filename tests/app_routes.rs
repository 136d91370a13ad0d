//! Full v1 router wired exactly as in production, minus a live database.
//!
//! The pool is lazy. Every request here is settled by the auth stages or by an
//! extractor rejection before a handler could touch it, except the one public
//! read below, which expects its query to fail.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::Router;
use axum::http::{Method, Request, StatusCode, header};
use bookshelf_api::app::build_router;
use bookshelf_api::services::auth::TokenIssuer;
use bookshelf_api::state::{AppState, RoutePermissions};
use common::{
    MemoryRoleStore, ROLE_ADMIN, bearer, issue_token, read_body, signing_key, test_config, verifier,
};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

fn setup_test_app(store: Arc<MemoryRoleStore>) -> Router {
    let config = test_config();
    let db = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy(&config.database_url)
        .unwrap();

    let state = AppState::new(
        db,
        verifier(),
        Arc::new(TokenIssuer::new(&signing_key(), config.access_token_ttl_seconds)),
        store,
        RoutePermissions {
            admin: config.role_admin,
        },
    );
    build_router(state, &config)
}

fn request(method: Method, uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder
        .body(Body::from(r#"{"title":"Dune","author":"Frank Herbert","role":1}"#))
        .unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let app = setup_test_app(MemoryRoleStore::new());

    let response = app
        .oneshot(request(Method::GET, "/api/v1/health", None))
        .await
        .unwrap();

    let (status, body) = read_body(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn request_id_is_generated_and_echoed() {
    let app = setup_test_app(MemoryRoleStore::new());

    let response = app
        .oneshot(request(Method::GET, "/api/v1/health", None))
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn mutating_routes_require_a_token() {
    let app = setup_test_app(MemoryRoleStore::new());
    let user_id = Uuid::new_v4();

    let routes = [
        (Method::POST, "/api/v1/books".to_string()),
        (Method::PUT, "/api/v1/books/1".to_string()),
        (Method::DELETE, "/api/v1/books/1".to_string()),
        (Method::PUT, format!("/api/v1/users/{user_id}/role")),
        (Method::GET, "/api/v1/users/me".to_string()),
    ];

    for (method, uri) in routes {
        let response = app
            .clone()
            .oneshot(request(method.clone(), &uri, None))
            .await
            .unwrap();
        let (status, body) = read_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body, r#"{"error":"No token provided"}"#);
    }
}

#[tokio::test]
async fn forged_token_is_invalid() {
    let app = setup_test_app(MemoryRoleStore::new());

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/v1/books",
            Some(&bearer("eyJhbGciOiJIUzI1NiJ9.e30.c2lnbmF0dXJl")),
        ))
        .await
        .unwrap();

    let (status, body) = read_body(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Invalid token"}"#);
}

#[tokio::test]
async fn admin_routes_check_the_configured_mask() {
    let store = MemoryRoleStore::new();
    let app = setup_test_app(store.clone());

    let reader = Uuid::new_v4();
    store.set_role(reader, 0b10).await;
    let ghost = Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(request(
            Method::DELETE,
            "/api/v1/books/1",
            Some(&bearer(&issue_token(reader))),
        ))
        .await
        .unwrap();
    let (status, body) = read_body(response).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, r#"{"error":"Forbidden"}"#);

    let response = app
        .clone()
        .oneshot(request(
            Method::PUT,
            &format!("/api/v1/users/{reader}/role"),
            Some(&bearer(&issue_token(ghost))),
        ))
        .await
        .unwrap();
    let (status, body) = read_body(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, r#"{"error":"User not found"}"#);
}

#[tokio::test]
async fn public_reads_are_not_gated() {
    let store = MemoryRoleStore::new();
    let app = setup_test_app(store.clone());

    // `/books/{id}` shares its path with the gated PUT/DELETE; a GET must not
    // reach the auth stages. The lazy pool fails the query, which is a 500
    // from the handler rather than a 401 from the gate.
    let response = app
        .oneshot(request(Method::GET, "/api/v1/books/1", None))
        .await
        .unwrap();

    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(store.lookups(), 0);
}

#[tokio::test]
async fn unparsable_path_ids_answer_with_json() {
    let store = MemoryRoleStore::new();
    let app = setup_test_app(store.clone());
    let admin = Uuid::new_v4();
    store.set_role(admin, ROLE_ADMIN as i32).await;
    let token = bearer(&issue_token(admin));

    let cases = [
        (Method::PUT, "/api/v1/books/abc", Some(token.as_str())),
        (Method::DELETE, "/api/v1/books/abc", Some(token.as_str())),
        (Method::PUT, "/api/v1/users/abc/role", Some(token.as_str())),
        (Method::GET, "/api/v1/books/abc", None),
    ];

    for (method, uri, authorization) in cases {
        let response = app
            .clone()
            .oneshot(request(method.clone(), uri, authorization))
            .await
            .unwrap();
        let (status, body) = read_body(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let message = json["error"].as_str().unwrap();
        assert!(message.starts_with("Invalid URL"), "{message}");
    }
}

#[tokio::test]
async fn unsupported_methods_on_shared_paths_are_not_gated() {
    let store = MemoryRoleStore::new();
    let app = setup_test_app(store.clone());

    for uri in ["/api/v1/books", "/api/v1/books/1", "/api/v1/health"] {
        let response = app
            .clone()
            .oneshot(request(Method::PATCH, uri, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
    }
    assert_eq!(store.lookups(), 0);
}

#[tokio::test]
async fn malformed_login_body_is_a_json_400() {
    let app = setup_test_app(MemoryRoleStore::new());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/users/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"username\":"))
                .unwrap(),
        )
        .await
        .unwrap();

    let (status, body) = read_body(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].is_string());
}
