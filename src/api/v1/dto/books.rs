/*
 * Responsibility
 * - request/response DTOs for /books
 * - field names follow the existing clients (camelCase)
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repos::book_repo::{BookFields, BookRow};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub publication_date: Option<NaiveDate>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl BookRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.author.trim().is_empty() {
            return Err("author is required");
        }
        if self.genres.iter().any(|g| g.trim().is_empty()) {
            return Err("genres cannot contain empty values");
        }
        Ok(())
    }

    pub fn fields(&self) -> BookFields<'_> {
        BookFields {
            title: self.title.trim(),
            author: self.author.trim(),
            publication_date: self.publication_date,
            genres: &self.genres,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_date: Option<NaiveDate>,
    pub genres: Vec<String>,
}

impl From<BookRow> for BookResponse {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            publication_date: row.publication_date,
            genres: row.genres,
        }
    }
}
