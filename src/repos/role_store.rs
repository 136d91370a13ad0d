//! Role lookup used by the role gate.
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::{error::RepoError, user_repo};

/// Read-only view of the user records: one role bitmask per subject.
///
/// Returns:
/// - `Ok(Some(role))` => subject exists
/// - `Ok(None)`       => no such subject
/// - `Err(_)`         => store failure (caller must fail closed)
///
/// Implementations are called once per authorized request and must not cache.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn find_role(&self, user_id: Uuid) -> Result<Option<i32>, RepoError>;
}

/// Postgres-backed store; concurrency is bounded by the pool.
#[derive(Clone, Debug)]
pub struct PgRoleStore {
    db: PgPool,
}

impl PgRoleStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn find_role(&self, user_id: Uuid) -> Result<Option<i32>, RepoError> {
        user_repo::find_role(&self.db, user_id).await
    }
}
