/// Endpoint wrappers
///
/// Each module adds methods to [`ApiClient`](crate::client::ApiClient) for
/// one backend router.
///
/// # Endpoints
///
/// | Module | Method | Path |
/// |--------|--------|------|
/// | `auth` | POST | `/auth/signup`, `/auth/login` |
/// | `auth` | GET, PUT | `/users/me` |
/// | `auth` | POST | `/users/me/change-password` |
/// | `books` | GET | `/books`, `/books/{id}`, `/books/{id}/pdf`, `/books/{id}/extracted-text` |
/// | `books` | POST | `/books/upload` (multipart) |
/// | `books` | PUT, DELETE | `/books/{id}/category`, `/books/{id}` |
/// | `categories` | GET, POST | `/categories` |
/// | `categories` | PUT, DELETE | `/categories/{id}` |
/// | `ai` | POST | `/ai/summarize-text`, `/ai/generate-flashcards`, `/ai/generate-study-notes` |

pub mod ai;
pub mod auth;
pub mod books;
pub mod categories;
