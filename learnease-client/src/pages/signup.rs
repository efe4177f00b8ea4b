/// Signup page controller
///
/// The form is validated locally before anything is sent. The password
/// indicator in [`SignupPage::requirements`] is recomputed from the current
/// field on every call, so a front end can render it after each keystroke.

use super::{RequestState, Route};
use crate::client::ApiClient;
use learnease_shared::auth::password::PasswordRequirements;
use learnease_shared::models::user::User;
use learnease_shared::validation::{validate_signup, SignupForm};
use tracing::info;

#[derive(Debug)]
pub struct SignupPage {
    client: ApiClient,
    pub form: SignupForm,
    pub state: RequestState<User>,
}

impl SignupPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            form: SignupForm::default(),
            state: RequestState::default(),
        }
    }

    pub fn requirements(&self) -> PasswordRequirements {
        PasswordRequirements::check(&self.form.password)
    }

    /// True once every password rule holds and the confirmation matches
    pub fn can_submit(&self) -> bool {
        self.form.can_submit()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Validates and creates the account
    ///
    /// Validation failures are stored in `state.error` without a request.
    /// Success routes to the login page with the signup banner.
    pub async fn submit(&mut self) -> Option<Route> {
        self.state.error = None;

        let request = match validate_signup(&self.form) {
            Ok(request) => request,
            Err(e) => {
                self.state.fail(e);
                return None;
            }
        };

        self.state.begin();
        let result = self.client.signup(&request).await;

        if self.state.settle(result) {
            info!(email = %request.email, "Signup complete");
            Some(Route::Login {
                message: None,
                signup_success: true,
            })
        } else {
            None
        }
    }
}
