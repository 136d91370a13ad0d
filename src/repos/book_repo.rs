use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_date: Option<NaiveDate>,
    pub genres: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Column values for insert/update.
#[derive(Debug)]
pub struct BookFields<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub publication_date: Option<NaiveDate>,
    pub genres: &'a [String],
}

pub async fn list(db: &PgPool) -> Result<Vec<BookRow>, RepoError> {
    let rows = sqlx::query_as::<_, BookRow>(
        r#"
        SELECT id, title, author, publication_date, genres, created_at
        FROM books
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, book_id: i64) -> Result<Option<BookRow>, RepoError> {
    let row = sqlx::query_as::<_, BookRow>(
        r#"
        SELECT id, title, author, publication_date, genres, created_at
        FROM books
        WHERE id = $1
        "#,
    )
    .bind(book_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(db: &PgPool, fields: BookFields<'_>) -> Result<BookRow, RepoError> {
    let row = sqlx::query_as::<_, BookRow>(
        r#"
        INSERT INTO books (title, author, publication_date, genres)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, author, publication_date, genres, created_at
        "#,
    )
    .bind(fields.title)
    .bind(fields.author)
    .bind(fields.publication_date)
    .bind(fields.genres)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    book_id: i64,
    fields: BookFields<'_>,
) -> Result<Option<BookRow>, RepoError> {
    let row = sqlx::query_as::<_, BookRow>(
        r#"
        UPDATE books
        SET title = $2, author = $3, publication_date = $4, genres = $5
        WHERE id = $1
        RETURNING id, title, author, publication_date, genres, created_at
        "#,
    )
    .bind(book_id)
    .bind(fields.title)
    .bind(fields.author)
    .bind(fields.publication_date)
    .bind(fields.genres)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, book_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM books
        WHERE id = $1
        "#,
    )
    .bind(book_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
