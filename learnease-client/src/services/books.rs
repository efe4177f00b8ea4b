/// Book endpoints
///
/// Books are PDFs owned by the authenticated user. Uploads are multipart;
/// the PDF itself is fetched as raw bytes, so its failures are mapped from
/// the status code instead of a JSON body:
///
/// | Status | Error |
/// |--------|-------|
/// | 404 | `PDF not found.` |
/// | 401, 403 | `Unauthorized to access PDF.` |
/// | other | `Failed to fetch PDF. Status: <code>` |

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use bytes::Bytes;
use learnease_shared::models::book::{Book, BookCategoryUpdate, BookText};
use learnease_shared::validation::{check_pdf_content_type, PDF_CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use std::path::Path;
use tracing::info;

/// A file selected for upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, deriving its MIME type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self::new(file_name, content_type_for(path), bytes))
    }
}

/// MIME type for a path, by extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("pdf") => PDF_CONTENT_TYPE,
        Some("txt") => "text/plain",
        Some("epub") => "application/epub+zip",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

impl ApiClient {
    /// Lists the authenticated user's books
    pub async fn list_books(&self) -> ClientResult<Vec<Book>> {
        let builder = self.authorized(Method::GET, &["books"]).await?;
        self.send_json(
            builder,
            "Failed to fetch your books. The backend service may not be ready.",
        )
        .await
    }

    /// Uploads a PDF
    ///
    /// `title` and `category_id` are sent only when present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFileType` before any request when the
    /// file is not a PDF.
    pub async fn upload_book(
        &self,
        file: UploadFile,
        title: Option<&str>,
        category_id: Option<&str>,
    ) -> ClientResult<Book> {
        check_pdf_content_type(&file.content_type)?;

        let builder = self.authorized(Method::POST, &["books", "upload"]).await?;

        let size = file.bytes.len();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;

        let mut form = Form::new().part("file", part);
        if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
            form = form.text("title", title.to_string());
        }
        if let Some(category_id) = category_id.filter(|c| !c.is_empty()) {
            form = form.text("category_id", category_id.to_string());
        }

        let book: Book = self
            .send_json(
                builder.multipart(form),
                "Failed to upload the book. The backend service may not be ready.",
            )
            .await?;

        info!(book_id = %book.id, file = %file.file_name, size, "Book uploaded");
        Ok(book)
    }

    /// Fetches a book's metadata
    pub async fn book_details(&self, book_id: &str) -> ClientResult<Book> {
        let builder = self.authorized(Method::GET, &["books", book_id]).await?;
        self.send_json(builder, "Failed to fetch book details.").await
    }

    /// Fetches the raw PDF bytes
    pub async fn book_pdf(&self, book_id: &str) -> ClientResult<Bytes> {
        let builder = self
            .authorized(Method::GET, &["books", book_id, "pdf"])
            .await?;
        let response = self.execute(builder).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                StatusCode::NOT_FOUND => ClientError::PdfNotFound,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::PdfUnauthorized,
                other => ClientError::PdfFetchFailed(other),
            });
        }

        Ok(response.bytes().await?)
    }

    /// Fetches the text the backend extracted from the PDF
    pub async fn book_extracted_text(&self, book_id: &str) -> ClientResult<BookText> {
        let builder = self
            .authorized(Method::GET, &["books", book_id, "extracted-text"])
            .await?;
        self.send_json(builder, "Failed to fetch extracted text.").await
    }

    /// Assigns a book to a category, or clears it with `None`
    pub async fn update_book_category(
        &self,
        book_id: &str,
        category_id: Option<&str>,
    ) -> ClientResult<Book> {
        let body = BookCategoryUpdate {
            category_id: category_id.map(str::to_string),
        };
        let builder = self
            .authorized(Method::PUT, &["books", book_id, "category"])
            .await?
            .json(&body);

        self.send_json(builder, "Failed to update book category.").await
    }

    /// Deletes a book; 204 is success
    pub async fn delete_book(&self, book_id: &str) -> ClientResult<()> {
        let builder = self.authorized(Method::DELETE, &["books", book_id]).await?;
        self.send_empty(builder, "Failed to delete book.").await?;
        info!(book_id, "Book deleted");
        Ok(())
    }
}
