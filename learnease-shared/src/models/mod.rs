/// Wire models for the Learn-Ease API
///
/// Every entity is owned by the backend; the client only ever holds the
/// copies returned by the API for as long as a page needs them.
///
/// # Models
///
/// - `user`: Accounts, login tokens, profile and password payloads
/// - `book`: Uploaded PDF books and their extracted text
/// - `category`: User-defined labels grouping books
/// - `ai`: Ephemeral AI artifacts (summary, flashcards, study notes)
///
/// # Example
///
/// ```
/// use learnease_shared::models::book::Book;
///
/// let json = r#"{"id":"b1","title":"Calculus","filename":"calc.pdf","upload_date":"2024-05-01T10:00:00"}"#;
/// let book: Book = serde_json::from_str(json).unwrap();
/// assert!(book.category_id.is_none());
/// ```

pub mod ai;
pub mod book;
pub mod category;
pub mod user;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses a backend timestamp.
///
/// The backend emits naive UTC ISO strings (`2024-05-01T10:00:00.123456`),
/// but RFC 3339 strings with an offset are accepted too.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
