/// Dashboard controller
///
/// Lists the user's books and categories, filters books by category, and
/// handles upload, category reassignment and deletion. Books and categories
/// are loaded concurrently; the page settles only when both have returned.

use super::{login_route_for, session_guard, RequestState, Route};
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::services::books::UploadFile;
use learnease_shared::models::book::Book;
use learnease_shared::models::category::{sort_by_name, Category};
use learnease_shared::validation::check_pdf_content_type;
use tracing::{info, warn};

/// Which books are shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Uncategorized,
    Category(String),
}

impl CategoryFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Uncategorized => book.is_in_category(None),
            CategoryFilter::Category(id) => book.is_in_category(Some(id.as_str())),
        }
    }
}

/// Upload form fields
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<UploadFile>,
    pub title: String,
    pub category_id: Option<String>,
}

#[derive(Debug)]
pub struct DashboardPage {
    client: ApiClient,
    pub books: Vec<Book>,
    pub categories: Vec<Category>,
    pub filter: CategoryFilter,
    pub state: RequestState<()>,

    pub upload: UploadForm,
    pub upload_state: RequestState<Book>,

    pub category_state: RequestState<Book>,

    /// Book awaiting delete confirmation
    pub pending_delete: Option<Book>,
    pub delete_state: RequestState<()>,
}

impl DashboardPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            books: Vec::new(),
            categories: Vec::new(),
            filter: CategoryFilter::default(),
            state: RequestState::default(),
            upload: UploadForm::default(),
            upload_state: RequestState::default(),
            category_state: RequestState::default(),
            pending_delete: None,
            delete_state: RequestState::default(),
        }
    }

    /// Loads books and categories
    ///
    /// Returns the login route when no token is stored or the token was
    /// rejected.
    pub async fn load(&mut self) -> Option<Route> {
        if let Some(route) = session_guard(&self.client, None).await {
            return Some(route);
        }

        self.state.begin();
        let result = tokio::try_join!(self.client.list_books(), self.client.list_categories());

        match result {
            Ok((books, mut categories)) => {
                sort_by_name(&mut categories);
                info!(books = books.len(), categories = categories.len(), "Dashboard loaded");
                self.books = books;
                self.categories = categories;
                self.state.succeed(());
                None
            }
            Err(e) => self.failed(e, Target::Load),
        }
    }

    /// Books matching the current filter
    pub fn visible_books(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| self.filter.matches(b)).collect()
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Name of a book's category, if it has one that is loaded
    pub fn category_name(&self, book: &Book) -> Option<&str> {
        let id = book.category_id.as_deref()?;
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Picks the file to upload; non-PDFs are rejected immediately
    pub fn select_file(&mut self, file: UploadFile) -> bool {
        self.upload_state.error = None;
        match check_pdf_content_type(&file.content_type) {
            Ok(()) => {
                self.upload.file = Some(file);
                true
            }
            Err(e) => {
                self.upload.file = None;
                self.upload_state.fail(e);
                false
            }
        }
    }

    /// Uploads the selected file and adds it to the list
    pub async fn upload(&mut self) -> Option<Route> {
        let Some(file) = self.upload.file.clone() else {
            self.upload_state.fail("Please select a PDF file to upload.");
            return None;
        };

        self.upload_state.begin();
        let result = self
            .client
            .upload_book(
                file,
                Some(self.upload.title.as_str()),
                self.upload.category_id.as_deref(),
            )
            .await;

        match result {
            Ok(book) => {
                self.books.insert(0, book.clone());
                self.upload = UploadForm::default();
                self.upload_state.succeed(book);
                None
            }
            Err(e) => self.failed(e, Target::Upload),
        }
    }

    /// Moves a book into a category, or out of any with `None`
    pub async fn assign_category(&mut self, book_id: &str, category_id: Option<&str>) -> Option<Route> {
        self.category_state.begin();

        match self.client.update_book_category(book_id, category_id).await {
            Ok(updated) => {
                if let Some(book) = self.books.iter_mut().find(|b| b.id == updated.id) {
                    *book = updated.clone();
                }
                self.category_state.succeed(updated);
                None
            }
            Err(e) => self.failed(e, Target::Category),
        }
    }

    /// Opens the delete confirmation for a book
    pub fn request_delete(&mut self, book_id: &str) -> bool {
        self.delete_state.reset();
        self.pending_delete = self.books.iter().find(|b| b.id == book_id).cloned();
        self.pending_delete.is_some()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.delete_state.reset();
    }

    /// Deletes the book awaiting confirmation
    pub async fn confirm_delete(&mut self) -> Option<Route> {
        let book = self.pending_delete.clone()?;

        self.delete_state.begin();
        match self.client.delete_book(&book.id).await {
            Ok(()) => {
                self.books.retain(|b| b.id != book.id);
                self.pending_delete = None;
                self.delete_state.succeed(());
                None
            }
            Err(e) => self.failed(e, Target::Delete),
        }
    }

    pub fn open_book(&self, book_id: &str) -> Route {
        Route::Book(book_id.to_string())
    }

    /// Clears the stored token and returns to the login page
    pub async fn logout(&mut self) -> Route {
        if let Err(e) = self.client.session().teardown().await {
            warn!(error = %e, "Failed to clear session");
        }
        self.books.clear();
        self.categories.clear();
        info!("Logged out");
        Route::login()
    }

    fn failed(&mut self, error: ClientError, target: Target) -> Option<Route> {
        let route = login_route_for(&error);
        match target {
            Target::Load => self.state.fail(&error),
            Target::Upload => self.upload_state.fail(&error),
            Target::Category => self.category_state.fail(&error),
            Target::Delete => self.delete_state.fail(&error),
        }
        route
    }
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Load,
    Upload,
    Category,
    Delete,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, category: Option<&str>) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Book {}", id),
            filename: None,
            upload_date: "2024-05-01T10:00:00".to_string(),
            category_id: category.map(str::to_string),
        }
    }

    #[test]
    fn test_category_filter() {
        let uncategorized = book("1", None);
        let math = book("2", Some("math"));

        assert!(CategoryFilter::All.matches(&uncategorized));
        assert!(CategoryFilter::All.matches(&math));
        assert!(CategoryFilter::Uncategorized.matches(&uncategorized));
        assert!(!CategoryFilter::Uncategorized.matches(&math));
        assert!(CategoryFilter::Category("math".into()).matches(&math));
        assert!(!CategoryFilter::Category("math".into()).matches(&uncategorized));
    }
}
