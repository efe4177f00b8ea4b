/// Account endpoints
///
/// - `POST /auth/signup` - Create an account
/// - `POST /auth/login` - Exchange credentials for a bearer token
/// - `GET /users/me` - Current profile
/// - `PUT /users/me` - Partial profile update
/// - `POST /users/me/change-password` - Change password (204 on success)

use crate::client::ApiClient;
use crate::error::ClientResult;
use learnease_shared::models::user::{
    LoginRequest, PasswordChange, SignupRequest, TokenResponse, User, UserUpdate,
};
use learnease_shared::validation::ValidationError;
use reqwest::Method;
use tracing::info;

impl ApiClient {
    /// Creates an account
    ///
    /// No token is required. The backend answers 201 with the new user.
    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<User> {
        let builder = self
            .public(Method::POST, &["auth", "signup"])?
            .json(request);

        let user: User = self.send_json(builder, "Signup failed.").await?;
        info!(user_id = %user.id, "Account created");
        Ok(user)
    }

    /// Logs in and returns the issued token
    ///
    /// The token is not stored here; the caller decides whether to persist
    /// it (see `Session::store_token`).
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<TokenResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let builder = self.public(Method::POST, &["auth", "login"])?.json(&body);

        self.send_json(builder, "Login failed.").await
    }

    /// Fetches the authenticated user's profile
    pub async fn fetch_profile(&self) -> ClientResult<User> {
        let builder = self.authorized(Method::GET, &["users", "me"]).await?;
        self.send_json(builder, "Failed to fetch user profile.").await
    }

    /// Sends only the fields present in `update`
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NothingChanged` without a request when the
    /// update is empty.
    pub async fn update_profile(&self, update: &UserUpdate) -> ClientResult<User> {
        if update.is_empty() {
            return Err(ValidationError::NothingChanged.into());
        }

        let builder = self
            .authorized(Method::PUT, &["users", "me"])
            .await?
            .json(update);

        self.send_json(builder, "Failed to update user profile.").await
    }

    /// Changes the password; any 2xx (normally 204) is success
    pub async fn change_password(&self, change: &PasswordChange) -> ClientResult<()> {
        let builder = self
            .authorized(Method::POST, &["users", "me", "change-password"])
            .await?
            .json(change);

        self.send_empty(builder, "Failed to change password.").await?;
        info!("Password changed");
        Ok(())
    }
}
