/// HTTP client for the Learn-Ease backend
///
/// `ApiClient` wraps a `reqwest::Client`, the parsed backend URL and the
/// shared [`Session`]. The service modules (`services::auth`,
/// `services::books`, ...) add one method per endpoint on top of the helpers
/// defined here.
///
/// Every call is a single request: no retries, no backoff, no caching.
///
/// # Request flow
///
/// ```text
/// service method
///   ├─> authorized(): fails with MissingToken before any I/O if no token
///   ├─> execute(): sends the request, logs method/path/status
///   └─> decode(): JSON body on 2xx, error_from_response() otherwise
/// ```
///
/// # Example
///
/// ```no_run
/// use learnease_client::{client::ApiClient, config::ClientConfig};
/// use learnease_shared::auth::session::{FileSessionStore, Session};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::from_env()?;
/// let store = Arc::new(FileSessionStore::new(&config.session.token_path));
/// let session = Arc::new(Session::init(store).await?);
///
/// let client = ApiClient::new(config, session)?;
/// let books = client.list_books().await?;
/// println!("{} books", books.len());
/// # Ok(())
/// # }
/// ```

use crate::config::ClientConfig;
use crate::error::{error_from_response, ClientError, ClientResult};
use learnease_shared::auth::session::Session;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Learn-Ease API client
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    session: Arc<Session>,
    base: Url,
}

impl ApiClient {
    /// Creates a client for the configured backend
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig, session: Arc<Session>) -> ClientResult<Self> {
        let base = Url::parse(&config.api.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.api.base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .user_agent(concat!("learnease-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            session,
            base,
        })
    }

    /// Shared session context
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Builds `base/segment/segment...`, escaping each segment
    pub(crate) fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Unauthenticated request
    pub(crate) fn public(&self, method: Method, segments: &[&str]) -> ClientResult<RequestBuilder> {
        Ok(self.http.request(method, self.url(segments)?))
    }

    /// Request carrying `Authorization: Bearer <token>`
    ///
    /// # Errors
    ///
    /// Fails with `SessionError::MissingToken` before anything is sent when
    /// no token is stored.
    pub(crate) async fn authorized(
        &self,
        method: Method,
        segments: &[&str],
    ) -> ClientResult<RequestBuilder> {
        let token = self.session.require_token().await?;
        Ok(self.public(method, segments)?.bearer_auth(token))
    }

    /// Sends a request and returns the raw response, whatever its status
    pub(crate) async fn execute(&self, request: RequestBuilder) -> ClientResult<Response> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await.map_err(|e| {
            warn!(%method, %path, error = %e, "Request failed to complete");
            ClientError::from(e)
        })?;

        debug!(%method, %path, status = response.status().as_u16(), "Response received");
        Ok(response)
    }

    /// Sends a request and decodes a JSON body on success
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        default_message: &str,
    ) -> ClientResult<T> {
        let response = self.execute(request).await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, default_message).await);
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Sends a request whose success carries no body (typically 204)
    pub(crate) async fn send_empty(
        &self,
        request: RequestBuilder,
        default_message: &str,
    ) -> ClientResult<()> {
        let response = self.execute(request).await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, default_message).await);
        }

        Ok(())
    }
}
