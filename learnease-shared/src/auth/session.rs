/// Session context
///
/// The only client state that outlives a page is a single bearer token,
/// persisted under the key `authToken`. [`Session`] owns that token for the
/// lifetime of the application: it is initialized from a [`SessionStore`],
/// updated after login and torn down on logout.
///
/// The token is opaque. Its presence is never validated locally; an expired
/// or revoked token only surfaces as a failed request.
///
/// # Example
///
/// ```no_run
/// use learnease_shared::auth::session::{FileSessionStore, Session};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(FileSessionStore::new("/tmp/learnease/session.json"));
/// let session = Session::init(store).await?;
///
/// if !session.is_authenticated().await {
///     println!("please log in");
/// }
///
/// session.store_token("eyJ...".to_string()).await?;
/// session.teardown().await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "authToken";

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A protected action was attempted without a stored token
    #[error("Authentication token not found. Please log in again.")]
    MissingToken,

    /// The backing store could not be read or written
    #[error("Session storage error: {0}")]
    Storage(String),
}

/// Persistent backing for the session token
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the stored token, if any
    async fn load(&self) -> Result<Option<String>, SessionError>;

    /// Persists a token, replacing any previous one
    async fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Removes the stored token
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Stores the token in a small JSON file: `{"authToken": "..."}`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<String>, SessionError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cannot read session file, starting logged out");
                return Ok(None);
            }
        };

        // A corrupted file behaves like an empty one: the user logs in again.
        let entries: Map<String, Value> = match serde_json::from_slice(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                return Ok(None);
            }
        };

        Ok(entries
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| SessionError::Storage(e.to_string()))?;
            }
        }

        let mut entries = Map::new();
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        let raw = serde_json::to_vec_pretty(&entries)
            .map_err(|e| SessionError::Storage(e.to_string()))?;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&self.path)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;

        // `mode` only applies on creation; tighten a pre-existing file before writing.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| SessionError::Storage(e.to_string()))?;
        }

        file.write_all(&raw)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;

        debug!(path = %self.path.display(), "Session token saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(e.to_string())),
        }
    }
}

/// Keeps the token in memory only (tests, one-shot scripts)
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.lock().await.clone())
    }

    async fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.token.lock().await = None;
        Ok(())
    }
}

/// Application-wide session context
///
/// Shared behind an `Arc` by the API client and every page controller.
pub struct Session {
    store: Arc<dyn SessionStore>,
    token: RwLock<Option<String>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Initializes the session from its store
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the store fails to load. The file
    /// store never does: an unreadable file starts the session logged out.
    pub async fn init(store: Arc<dyn SessionStore>) -> Result<Self, SessionError> {
        let token = store.load().await?.filter(|t| !t.is_empty());
        debug!(authenticated = token.is_some(), "Session initialized");

        Ok(Self {
            store,
            token: RwLock::new(token),
        })
    }

    /// Creates an empty session backed by memory
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemorySessionStore::new()),
            token: RwLock::new(None),
        }
    }

    /// Current token, if one is stored
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Current token, or `SessionError::MissingToken`
    pub async fn require_token(&self) -> Result<String, SessionError> {
        self.token().await.ok_or(SessionError::MissingToken)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Stores a freshly issued token in memory and in the backing store
    pub async fn store_token(&self, token: String) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }

        self.store.save(&token).await?;
        *self.token.write().await = Some(token);
        Ok(())
    }

    /// Ends the session, clearing the token everywhere
    pub async fn teardown(&self) -> Result<(), SessionError> {
        *self.token.write().await = None;
        self.store.clear().await?;
        debug!("Session torn down");
        Ok(())
    }
}
