/// Headless page controllers
///
/// Each controller owns one page's local state (form fields, loading and
/// error flags, modal visibility) and exposes the page's user actions as
/// async methods. Rendering is left to the caller; navigation is returned
/// as a [`Route`].
///
/// Every action follows the same shape:
///
/// ```text
/// clear previous error -> set loading -> call ApiClient -> store data or message -> clear loading
/// ```
///
/// Controllers that need a session check it on `load()` and return
/// `Route::Login` with a message instead of issuing any request.

pub mod dashboard;
pub mod login;
pub mod settings;
pub mod signup;
pub mod viewer;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use settings::SettingsPage;
pub use signup::SignupPage;
pub use viewer::BookViewerPage;

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use reqwest::Url;
use std::fmt;
use tracing::debug;

/// Where the user should go next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login {
        message: Option<String>,
        signup_success: bool,
    },
    Signup,
    Dashboard,
    Settings,
    Book(String),
}

impl Route {
    /// Plain login route
    pub fn login() -> Self {
        Route::Login {
            message: None,
            signup_success: false,
        }
    }

    /// Login route carrying a message for the user
    pub fn login_with_message(message: impl Into<String>) -> Self {
        Route::Login {
            message: Some(message.into()),
            signup_success: false,
        }
    }

    /// Browser-style path, used for display and logging
    ///
    /// Path segments and query values are percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Route::Login {
                signup_success: true,
                ..
            } => encode_path(&["login"], Some(("signupSuccess", "true"))),
            Route::Login {
                message: Some(message),
                ..
            } => encode_path(&["login"], Some(("message", message))),
            Route::Login { .. } => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Book(id) => encode_path(&["books", id], None),
        }
    }
}

fn encode_path(segments: &[&str], query: Option<(&str, &str)>) -> String {
    let mut url = match Url::parse("http://localhost/") {
        Ok(url) => url,
        Err(_) => return format!("/{}", segments.join("/")),
    };

    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    if let Some((key, value)) = query {
        url.query_pairs_mut().append_pair(key, value);
    }

    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Loading/error/data triple tracked for one request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    pub is_loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            error: None,
            data: None,
        }
    }
}

impl<T> RequestState<T> {
    /// Clears the previous error and marks the request as in flight
    pub fn begin(&mut self) {
        self.error = None;
        self.is_loading = true;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.is_loading = false;
    }

    /// Records the error's message; previous data is kept
    pub fn fail(&mut self, error: impl fmt::Display) {
        self.error = Some(error.to_string());
        self.is_loading = false;
    }

    /// Settles the request from a result, returning whether it succeeded
    pub fn settle(&mut self, result: ClientResult<T>) -> bool {
        match result {
            Ok(data) => {
                self.succeed(data);
                true
            }
            Err(e) => {
                self.fail(&e);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Returns the login route when no token is stored
pub(crate) async fn session_guard(client: &ApiClient, message: Option<&str>) -> Option<Route> {
    if client.session().is_authenticated().await {
        return None;
    }

    debug!(?message, "No stored token, redirecting to login");
    Some(match message {
        Some(message) => Route::login_with_message(message),
        None => Route::login(),
    })
}

/// Login route for errors that mean the session is gone
pub(crate) fn login_route_for(error: &ClientError) -> Option<Route> {
    error
        .requires_login()
        .then(|| Route::login_with_message(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnease_shared::auth::session::SessionError;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::login().path(), "/login");
        assert_eq!(
            Route::Login {
                message: None,
                signup_success: true
            }
            .path(),
            "/login?signupSuccess=true"
        );
        assert_eq!(
            Route::login_with_message("Please log in to view books").to_string(),
            "/login?message=Please+log+in+to+view+books"
        );
        assert_eq!(Route::Book("b1".into()).path(), "/books/b1");
    }

    #[test]
    fn test_route_paths_are_encoded() {
        assert_eq!(
            Route::login_with_message("a&b=c?d#e").path(),
            "/login?message=a%26b%3Dc%3Fd%23e"
        );
        assert_eq!(Route::Book("x/y z".into()).path(), "/books/x%2Fy%20z");
    }

    #[test]
    fn test_request_state_lifecycle() {
        let mut state: RequestState<u32> = RequestState::default();
        state.fail("boom");
        assert_eq!(state.error.as_deref(), Some("boom"));

        state.begin();
        assert!(state.is_loading);
        assert!(state.error.is_none());

        state.succeed(3);
        assert!(!state.is_loading);
        assert_eq!(state.data, Some(3));
    }

    #[test]
    fn test_settle_keeps_previous_data_on_error() {
        let mut state = RequestState::default();
        assert!(state.settle(Ok(1)));

        state.begin();
        let failed = state.settle(Err(ClientError::PdfNotFound));
        assert!(!failed);
        assert_eq!(state.data, Some(1));
        assert_eq!(state.error.as_deref(), Some("PDF not found."));
    }

    #[test]
    fn test_login_route_for_missing_token() {
        let err = ClientError::from(SessionError::MissingToken);
        assert_eq!(
            login_route_for(&err),
            Some(Route::login_with_message(
                "Authentication token not found. Please log in again."
            ))
        );
        assert_eq!(login_route_for(&ClientError::PdfNotFound), None);
    }
}
