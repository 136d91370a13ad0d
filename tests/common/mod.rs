#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use bookshelf_api::config::{AppEnv, Config};
use bookshelf_api::repos::{RoleStore, error::RepoError};
use bookshelf_api::services::auth::{PermissionMask, SigningKey, TokenIssuer, TokenVerifier};
use http_body_util::BodyExt;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";
pub const ROLE_ADMIN: u32 = 0b01;

pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        database_url: "postgres://postgres@localhost/bookshelf_unused".to_string(),
        database_max_connections: 1,
        cors_allowed_origins: Vec::new(),
        request_timeout_seconds: 5,
        jwt_secret: TEST_SECRET.to_string(),
        access_token_ttl_seconds: 3600,
        access_token_leeway_seconds: 0,
        role_admin: PermissionMask::new(ROLE_ADMIN),
    }
}

/// In-memory user-record store with a lookup counter and a switchable outage.
#[derive(Default)]
pub struct MemoryRoleStore {
    roles: RwLock<HashMap<Uuid, i32>>,
    lookups: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryRoleStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn set_role(&self, user_id: Uuid, role: i32) {
        self.roles.write().await.insert(user_id, role);
    }

    pub async fn remove(&self, user_id: Uuid) {
        self.roles.write().await.remove(&user_id);
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn find_role(&self, user_id: Uuid) -> Result<Option<i32>, RepoError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.roles.read().await.get(&user_id).copied())
    }
}

pub fn signing_key() -> SigningKey {
    SigningKey::new(TEST_SECRET).unwrap()
}

pub fn verifier() -> Arc<TokenVerifier> {
    Arc::new(TokenVerifier::new(&signing_key(), 0))
}

pub fn issue_token(user_id: Uuid) -> String {
    TokenIssuer::new(&signing_key(), 3600).issue(user_id).unwrap()
}

pub fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn read_body(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
