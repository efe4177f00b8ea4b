/// Book viewer controller
///
/// Shows one book's PDF and runs the AI actions on text the user selects.
///
/// # Document lifecycle
///
/// The downloaded PDF is written to a temporary file owned by a
/// [`PdfDocument`]. The file is removed when the document is dropped, which
/// happens when the page is dropped, when loading fails, or when a different
/// book is loaded.
///
/// # Selection flow
///
/// ```text
/// right-click with selection -> context menu { x, y, selected_text }
///   ├─> Summarize       -> summary modal      (own loading/error/result)
///   ├─> Flashcards      -> flashcards modal   (own loading/error/result)
///   └─> Study notes     -> study notes modal  (own loading/error/result)
/// ```
///
/// The three flows are independent: one can be loading while another shows
/// an error.

use super::{login_route_for, session_guard, RequestState, Route};
use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use learnease_shared::models::ai::Flashcard;
use learnease_shared::models::book::{Book, BookText};
use learnease_shared::validation::validate_selection;
use lazy_static::lazy_static;
use regex::bytes::Regex;
use std::future::Future;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub const LOGIN_MESSAGE: &str = "Please log in to view books";

lazy_static! {
    /// Page objects in a PDF body; `/Pages` tree nodes do not match
    static ref PAGE_OBJECT: Regex = Regex::new(r"/Type\s*/Page\b").unwrap();
}

/// Counts page objects in raw PDF bytes
///
/// Returns 0 when no page object is found (compressed object streams).
pub fn count_pages(bytes: &[u8]) -> usize {
    PAGE_OBJECT.find_iter(bytes).count()
}

/// A downloaded PDF backed by a temporary file
#[derive(Debug)]
pub struct PdfDocument {
    book_id: String,
    file: NamedTempFile,
    len: usize,
    num_pages: usize,
}

impl PdfDocument {
    /// Writes the bytes to a fresh temporary file
    pub fn from_bytes(book_id: &str, bytes: &[u8]) -> ClientResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("learnease-")
            .suffix(".pdf")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;

        let num_pages = count_pages(bytes);
        debug!(book_id, path = %file.path().display(), num_pages, "PDF materialized");

        Ok(Self {
            book_id: book_id.to_string(),
            file,
            len: bytes.len(),
            num_pages,
        })
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    /// Location of the temporary file; valid while the document lives
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Detected page count, at least 1
    pub fn num_pages(&self) -> usize {
        self.num_pages.max(1)
    }

    /// Copies the PDF to a permanent location
    pub fn save_to(&self, dest: impl AsRef<Path>) -> ClientResult<u64> {
        Ok(std::fs::copy(self.file.path(), dest)?)
    }
}

/// Right-click menu over a text selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub x: i32,
    pub y: i32,
    pub selected_text: String,
}

/// One AI action: modal visibility plus its request state
#[derive(Debug, Clone)]
pub struct ArtifactFlow<T> {
    pub open: bool,
    pub state: RequestState<T>,
}

impl<T> Default for ArtifactFlow<T> {
    fn default() -> Self {
        Self {
            open: false,
            state: RequestState::default(),
        }
    }
}

impl<T> ArtifactFlow<T> {
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn result(&self) -> Option<&T> {
        self.state.data.as_ref()
    }
}

async fn run_flow<T>(
    flow: &mut ArtifactFlow<T>,
    request: impl Future<Output = ClientResult<T>>,
) -> Option<Route> {
    flow.open = true;
    flow.state.data = None;
    flow.state.begin();

    match request.await {
        Ok(artifact) => {
            flow.state.succeed(artifact);
            None
        }
        Err(e) => {
            let route = login_route_for(&e);
            flow.state.fail(&e);
            route
        }
    }
}

#[derive(Debug)]
pub struct BookViewerPage {
    client: ApiClient,
    pub book: Option<Book>,
    pub document: Option<PdfDocument>,
    pub state: RequestState<()>,
    current_page: usize,

    pub extracted_text: RequestState<BookText>,

    pub context_menu: Option<ContextMenu>,
    /// Last non-empty selection, kept after the menu closes
    pub selected_text: String,

    pub summary: ArtifactFlow<String>,
    pub flashcards: ArtifactFlow<Vec<Flashcard>>,
    pub study_notes: ArtifactFlow<String>,
}

impl BookViewerPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            book: None,
            document: None,
            state: RequestState::default(),
            current_page: 1,
            extracted_text: RequestState::default(),
            context_menu: None,
            selected_text: String::new(),
            summary: ArtifactFlow::default(),
            flashcards: ArtifactFlow::default(),
            study_notes: ArtifactFlow::default(),
        }
    }

    /// Loads the book's details, then its PDF
    ///
    /// Any failure is stored as `Failed to load book: <reason>` and leaves
    /// no document behind.
    pub async fn load(&mut self, book_id: &str) -> Option<Route> {
        if let Some(route) = session_guard(&self.client, Some(LOGIN_MESSAGE)).await {
            return Some(route);
        }

        if self.document.as_ref().map(PdfDocument::book_id) != Some(book_id) {
            self.release();
        }

        self.state.begin();
        match self.fetch(book_id).await {
            Ok((book, document)) => {
                info!(book_id, pages = document.num_pages(), bytes = document.len(), "Book opened");
                self.book = Some(book);
                self.document = Some(document);
                self.current_page = 1;
                self.state.succeed(());
                None
            }
            Err(e) => {
                let route = login_route_for(&e);
                self.release();
                self.state.fail(format!("Failed to load book: {}", e));
                route
            }
        }
    }

    async fn fetch(&self, book_id: &str) -> ClientResult<(Book, PdfDocument)> {
        let book = self.client.book_details(book_id).await?;
        let bytes = self.client.book_pdf(book_id).await?;
        let document = PdfDocument::from_bytes(book_id, &bytes)?;
        Ok((book, document))
    }

    /// Drops the current document and everything tied to it
    fn release(&mut self) {
        self.document = None;
        self.book = None;
        self.extracted_text.reset();
        self.context_menu = None;
        self.selected_text.clear();
        self.summary.close();
        self.flashcards.close();
        self.study_notes.close();
        self.current_page = 1;
    }

    /// Fetches the server-side extracted text of the loaded book
    pub async fn load_extracted_text(&mut self) -> Option<Route> {
        let book_id = self.book.as_ref()?.id.clone();

        self.extracted_text.begin();
        match self.client.book_extracted_text(&book_id).await {
            Ok(text) => {
                self.extracted_text.succeed(text);
                None
            }
            Err(e) => {
                let route = login_route_for(&e);
                self.extracted_text.fail(&e);
                route
            }
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn num_pages(&self) -> usize {
        self.document.as_ref().map_or(1, PdfDocument::num_pages)
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page + 1);
    }

    /// Moves to a page, clamped to `[1, num_pages]`
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.num_pages());
    }

    /// Opens the context menu at a position
    ///
    /// Opens only when the selection has non-whitespace content; otherwise
    /// any open menu is closed and `false` is returned.
    pub fn open_context_menu(&mut self, x: i32, y: i32, selection: &str) -> bool {
        match validate_selection(selection) {
            Ok(text) => {
                self.selected_text = text.clone();
                self.context_menu = Some(ContextMenu {
                    x,
                    y,
                    selected_text: text,
                });
                true
            }
            Err(_) => {
                self.context_menu = None;
                false
            }
        }
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Text for an AI action: the open menu's selection, else the last one
    fn take_selection(&mut self) -> String {
        self.context_menu
            .take()
            .map(|menu| menu.selected_text)
            .unwrap_or_else(|| self.selected_text.clone())
    }

    fn reject_empty<T>(flow: &mut ArtifactFlow<T>, text: &str) -> bool {
        if let Err(e) = validate_selection(text) {
            flow.open = true;
            flow.state.fail(ClientError::from(e));
            return true;
        }
        false
    }

    pub async fn summarize_selection(&mut self) -> Option<Route> {
        let text = self.take_selection();
        if Self::reject_empty(&mut self.summary, &text) {
            return None;
        }
        run_flow(&mut self.summary, self.client.summarize(&text)).await
    }

    pub async fn flashcards_from_selection(&mut self) -> Option<Route> {
        let text = self.take_selection();
        if Self::reject_empty(&mut self.flashcards, &text) {
            return None;
        }
        run_flow(&mut self.flashcards, self.client.generate_flashcards(&text)).await
    }

    pub async fn study_notes_from_selection(&mut self) -> Option<Route> {
        let text = self.take_selection();
        if Self::reject_empty(&mut self.study_notes, &text) {
            return None;
        }
        run_flow(&mut self.study_notes, self.client.generate_study_notes(&text)).await
    }

    pub fn back_to_dashboard(&self) -> Route {
        Route::Dashboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use learnease_shared::auth::session::Session;
    use std::sync::Arc;

    const TWO_PAGE_PDF: &[u8] = b"%PDF-1.4\n\
        1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n\
        2 0 obj << /Type /Pages /Kids [3 0 R 4 0 R] /Count 2 >> endobj\n\
        3 0 obj << /Type /Page /Parent 2 0 R >> endobj\n\
        4 0 obj << /Type/Page /Parent 2 0 R >> endobj\n\
        %%EOF";

    fn page() -> BookViewerPage {
        let config = ClientConfig::new("http://localhost:8000", 5, "session.json").unwrap();
        let client = ApiClient::new(config, Arc::new(Session::in_memory())).unwrap();
        BookViewerPage::new(client)
    }

    #[test]
    fn test_count_pages_skips_page_tree() {
        assert_eq!(count_pages(TWO_PAGE_PDF), 2);
        assert_eq!(count_pages(b"not a pdf"), 0);
    }

    #[test]
    fn test_document_file_removed_on_drop() {
        let document = PdfDocument::from_bytes("b1", TWO_PAGE_PDF).unwrap();
        let path = document.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(document.num_pages(), 2);
        assert_eq!(document.len(), TWO_PAGE_PDF.len());

        drop(document);
        assert!(!path.exists());
    }

    #[test]
    fn test_page_navigation_is_clamped() {
        let mut page = page();
        page.document = Some(PdfDocument::from_bytes("b1", TWO_PAGE_PDF).unwrap());

        page.prev_page();
        assert_eq!(page.current_page(), 1);
        page.next_page();
        page.next_page();
        assert_eq!(page.current_page(), 2);
        page.go_to_page(0);
        assert_eq!(page.current_page(), 1);
        page.go_to_page(99);
        assert_eq!(page.current_page(), 2);
    }

    #[test]
    fn test_context_menu_requires_selection() {
        let mut page = page();

        assert!(!page.open_context_menu(10, 20, "   \n"));
        assert!(page.context_menu.is_none());

        assert!(page.open_context_menu(10, 20, "  Newton's second law  "));
        assert_eq!(
            page.context_menu,
            Some(ContextMenu {
                x: 10,
                y: 20,
                selected_text: "Newton's second law".to_string()
            })
        );

        assert!(!page.open_context_menu(30, 40, ""));
        assert!(page.context_menu.is_none());
        assert_eq!(page.selected_text, "Newton's second law");
    }

    #[tokio::test]
    async fn test_empty_selection_opens_flow_with_error() {
        let mut page = page();
        assert_eq!(page.summarize_selection().await, None);
        assert!(page.summary.open);
        assert_eq!(
            page.summary.state.error.as_deref(),
            Some("Please select some text first.")
        );
        assert!(!page.flashcards.open);
        assert!(!page.study_notes.open);
    }

    #[tokio::test]
    async fn test_load_without_token_redirects() {
        let mut page = page();
        assert_eq!(
            page.load("b1").await,
            Some(Route::login_with_message(LOGIN_MESSAGE))
        );
        assert!(!page.state.is_loading);
    }
}
