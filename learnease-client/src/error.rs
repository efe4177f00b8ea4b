/// Error handling for the Learn-Ease client
///
/// Every client call returns `ClientResult<T>`. Failures fall into four
/// groups:
///
/// 1. **Missing token**: raised locally before any request
///    (`ClientError::Session`)
/// 2. **HTTP failures**: normalized from the response body's `detail` field
///    (`ClientError::Api`)
/// 3. **Binary endpoint failures**: mapped from the status code alone
///    (`PdfNotFound`, `PdfUnauthorized`, `PdfFetchFailed`)
/// 4. **Local validation**: raised before any request
///    (`ClientError::Validation`)
///
/// `Display` is the message shown to the user, so pages can render
/// `err.to_string()` inline.
///
/// # Detail normalization
///
/// The backend reports errors as `{"detail": ...}` where `detail` is a
/// string, an object with `msg`, or a list of such objects (validation
/// errors). [`detail_message`] reduces all of these to one line:
///
/// ```
/// use learnease_client::error::detail_message;
///
/// assert_eq!(detail_message(br#"{"detail":"Book not found"}"#, "fallback"), "Book not found");
/// assert_eq!(
///     detail_message(br#"{"detail":[{"msg":"field required"},{"msg":"too short"}]}"#, "fallback"),
///     "field required"
/// );
/// assert_eq!(detail_message(b"<html>502</html>", "fallback"), "fallback");
/// ```

use learnease_shared::auth::session::SessionError;
use learnease_shared::validation::ValidationError;
use reqwest::StatusCode;
use serde_json::Value;

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Unified client error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Form or input rejected before sending
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No token stored, or the token store failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Non-2xx response with a normalized message
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// `GET /books/{id}/pdf` returned 404
    #[error("PDF not found.")]
    PdfNotFound,

    /// `GET /books/{id}/pdf` returned 401 or 403
    #[error("Unauthorized to access PDF.")]
    PdfUnauthorized,

    /// `GET /books/{id}/pdf` failed with any other status
    #[error("Failed to fetch PDF. Status: {}", .0.as_u16())]
    PdfFetchFailed(StatusCode),

    /// Connection, timeout or protocol failure
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A request URL could not be built from the base URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// A 2xx body did not match the expected shape
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// Local file access (uploads, downloads)
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status, when the error came from a response
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::PdfNotFound => Some(StatusCode::NOT_FOUND),
            ClientError::PdfUnauthorized => None,
            ClientError::PdfFetchFailed(status) => Some(*status),
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// True when the stored token is missing or was rejected
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::Session(SessionError::MissingToken) | ClientError::PdfUnauthorized
        ) || self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// True when nothing was sent to the server
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::Session(_) | ClientError::Io(_)
        )
    }
}

/// Converts a failed response into a `ClientError::Api`
///
/// The body is read once; if it is not JSON or has no usable `detail`,
/// `default_message` is used.
pub async fn error_from_response(response: reqwest::Response, default_message: &str) -> ClientError {
    let status = response.status();

    let message = match response.bytes().await {
        Ok(body) => detail_message(&body, default_message),
        Err(e) => {
            tracing::debug!(error = %e, "Failed to read error response body");
            default_message.to_string()
        }
    };

    tracing::debug!(status = status.as_u16(), message = %message, "API request failed");
    ClientError::Api { status, message }
}

/// Extracts a human-readable message from an error body
pub fn detail_message(body: &[u8], default_message: &str) -> String {
    let parsed: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Error body is not JSON");
            return default_message.to_string();
        }
    };

    tracing::debug!(body = %parsed, "Received error data");

    match parsed.get("detail") {
        None => default_message.to_string(),
        Some(detail) if is_blank(detail) => default_message.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .first()
            .and_then(msg_field)
            .unwrap_or_else(|| Value::Array(items.clone()).to_string()),
        Some(obj @ Value::Object(_)) => msg_field(obj).unwrap_or_else(|| obj.to_string()),
        Some(other) => other.to_string(),
    }
}

/// `null`, `false`, `0` and `""` carry no message
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn msg_field(value: &Value) -> Option<String> {
    value.get("msg").and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "Something went wrong.";

    #[test]
    fn test_string_detail_verbatim() {
        assert_eq!(
            detail_message(br#"{"detail":"Incorrect email or password"}"#, DEFAULT),
            "Incorrect email or password"
        );
    }

    #[test]
    fn test_array_detail_uses_first_msg() {
        let body = br#"{"detail":[{"loc":["body","age"],"msg":"Input should be greater than 0"},{"msg":"second"}]}"#;
        assert_eq!(detail_message(body, DEFAULT), "Input should be greater than 0");
    }

    #[test]
    fn test_array_detail_without_msg_is_stringified() {
        assert_eq!(detail_message(br#"{"detail":[1,2]}"#, DEFAULT), "[1,2]");
        assert_eq!(detail_message(br#"{"detail":[]}"#, DEFAULT), "[]");
    }

    #[test]
    fn test_object_detail() {
        assert_eq!(
            detail_message(br#"{"detail":{"msg":"Category exists"}}"#, DEFAULT),
            "Category exists"
        );
        assert_eq!(
            detail_message(br#"{"detail":{"code":42}}"#, DEFAULT),
            r#"{"code":42}"#
        );
    }

    #[test]
    fn test_missing_or_empty_detail_uses_default() {
        assert_eq!(detail_message(br#"{"error":"x"}"#, DEFAULT), DEFAULT);
        assert_eq!(detail_message(br#"{"detail":null}"#, DEFAULT), DEFAULT);
        assert_eq!(detail_message(br#"{"detail":""}"#, DEFAULT), DEFAULT);
        assert_eq!(detail_message(b"", DEFAULT), DEFAULT);
        assert_eq!(detail_message(b"Internal Server Error", DEFAULT), DEFAULT);
    }

    #[test]
    fn test_falsy_detail_uses_default() {
        assert_eq!(detail_message(br#"{"detail":false}"#, DEFAULT), DEFAULT);
        assert_eq!(detail_message(br#"{"detail":0}"#, DEFAULT), DEFAULT);
        assert_eq!(detail_message(br#"{"detail":0.0}"#, DEFAULT), DEFAULT);
        assert_eq!(detail_message(br#"{"detail":true}"#, DEFAULT), "true");
        assert_eq!(detail_message(br#"{"detail":404}"#, DEFAULT), "404");
    }

    #[test]
    fn test_display_is_user_message() {
        let err = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            message: "Book not found".to_string(),
        };
        assert_eq!(err.to_string(), "Book not found");

        assert_eq!(ClientError::PdfNotFound.to_string(), "PDF not found.");
        assert_eq!(
            ClientError::PdfUnauthorized.to_string(),
            "Unauthorized to access PDF."
        );
        assert_eq!(
            ClientError::PdfFetchFailed(StatusCode::BAD_GATEWAY).to_string(),
            "Failed to fetch PDF. Status: 502"
        );
    }

    #[test]
    fn test_missing_token_message_and_flags() {
        let err = ClientError::from(SessionError::MissingToken);
        assert_eq!(
            err.to_string(),
            "Authentication token not found. Please log in again."
        );
        assert!(err.requires_login());
        assert!(err.is_local());
    }

    #[test]
    fn test_unauthorized_api_error_requires_login() {
        let err = ClientError::Api {
            status: StatusCode::UNAUTHORIZED,
            message: "Could not validate credentials".to_string(),
        };
        assert!(err.requires_login());
        assert!(!err.is_local());
    }
}
