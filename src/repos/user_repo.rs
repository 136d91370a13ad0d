/*
 * Responsibility
 * - users table via SQLx
 * - the password hash leaves this module only inside UserRow; DTOs drop it
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub email: Option<String>,
    pub role: i32,
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    username: &str,
    password_hash: &str,
    email: Option<&str>,
) -> Result<UserRow, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, password, email)
        VALUES ($1, $2, $3)
        RETURNING id, username, password, email, role, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(email)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, password, email, role, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, password, email, role, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn find_role(db: &PgPool, user_id: Uuid) -> Result<Option<i32>, RepoError> {
    let role = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT role
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(role)
}

pub async fn update_role(
    db: &PgPool,
    user_id: Uuid,
    role: i32,
) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET role = $2
        WHERE id = $1
        RETURNING id, username, password, email, role, created_at
        "#,
    )
    .bind(user_id)
    .bind(role)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
