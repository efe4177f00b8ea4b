/// Book models
///
/// A book is an uploaded PDF owned by the authenticated user. It may be
/// assigned to one category; `category_id` is null for uncategorized books.
/// Referential integrity between books and categories is enforced by the
/// backend only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book as returned by the `/books` endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Backend identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Original file name of the upload
    #[serde(default)]
    pub filename: Option<String>,

    /// ISO timestamp of the upload, as sent by the server
    pub upload_date: String,

    /// Category the book belongs to, if any
    #[serde(default)]
    pub category_id: Option<String>,
}

impl Book {
    /// Parsed upload timestamp
    pub fn uploaded_at(&self) -> Option<DateTime<Utc>> {
        super::parse_timestamp(&self.upload_date)
    }

    /// Whether the book belongs to the given category (`None` = uncategorized)
    pub fn is_in_category(&self, category_id: Option<&str>) -> bool {
        self.category_id.as_deref() == category_id
    }
}

/// Text extracted server-side from a book's PDF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookText {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// Body of `PUT /books/{id}/category`
///
/// `category_id: None` serializes as `null`, which clears the category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCategoryUpdate {
    pub category_id: Option<String>,
}
