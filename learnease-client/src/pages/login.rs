/// Login page controller

use super::{RequestState, Route};
use crate::client::ApiClient;
use crate::error::ClientError;
use tracing::info;

pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful! Please log in.";

#[derive(Debug)]
pub struct LoginPage {
    client: ApiClient,
    pub email: String,
    pub password: String,
    /// Banner shown above the form (after signup, or a redirect reason)
    pub success_message: Option<String>,
    pub state: RequestState<()>,
}

impl LoginPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            email: String::new(),
            password: String::new(),
            success_message: None,
            state: RequestState::default(),
        }
    }

    /// Opens the page for a login route, picking up its banner
    pub fn open(client: ApiClient, route: &Route) -> Self {
        let mut page = Self::new(client);
        if let Route::Login {
            message,
            signup_success,
        } = route
        {
            page.success_message = if *signup_success {
                Some(SIGNUP_SUCCESS_MESSAGE.to_string())
            } else {
                message.clone()
            };
        }
        page
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Exchanges the credentials for a token and stores it
    ///
    /// Returns `Some(Route::Dashboard)` on success; on failure the message is
    /// left in `state.error` and `None` is returned.
    pub async fn submit(&mut self) -> Option<Route> {
        self.state.begin();

        let result = async {
            let token = self.client.login(&self.email, &self.password).await?;
            self.client
                .session()
                .store_token(token.access_token)
                .await?;
            Ok::<(), ClientError>(())
        }
        .await;

        if self.state.settle(result) {
            info!(email = %self.email, "Logged in");
            self.password.clear();
            Some(Route::Dashboard)
        } else {
            None
        }
    }
}
