/// Settings page controller
///
/// Three independent sections:
///
/// - **Categories**: sorted list with create, rename and delete, each
///   behind its own modal with its own loading and error state
/// - **Profile**: load, edit, and save only the fields that changed
/// - **Password**: change with the same five requirements as signup
///
/// A failure in one section never touches another section's state.

use super::{login_route_for, session_guard, RequestState, Route};
use crate::client::ApiClient;
use crate::error::ClientError;
use learnease_shared::auth::password::PasswordRequirements;
use learnease_shared::models::category::{sort_by_name, Category};
use learnease_shared::models::user::User;
use learnease_shared::validation::{profile_changes, validate_password_change, ProfileForm};
use tracing::info;

pub const LOGIN_MESSAGE: &str = "Please log in to access settings.";
pub const PROFILE_SAVED_MESSAGE: &str = "Profile updated successfully.";
pub const PASSWORD_CHANGED_MESSAGE: &str = "Password changed successfully.";

/// State of one category modal
#[derive(Debug, Clone, Default)]
pub struct CategoryModal {
    pub open: bool,
    /// Category being renamed or deleted; `None` when creating
    pub target: Option<Category>,
    /// Name field (create and rename)
    pub name: String,
    pub state: RequestState<()>,
}

impl CategoryModal {
    fn show(&mut self, target: Option<Category>, name: String) {
        *self = Self {
            open: true,
            target,
            name,
            state: RequestState::default(),
        };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    fn target_id(&self) -> Option<String> {
        self.target.as_ref().map(|c| c.id.clone())
    }
}

/// Password change fields
#[derive(Debug, Clone, Default)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

#[derive(Debug)]
pub struct SettingsPage {
    client: ApiClient,

    pub categories: Vec<Category>,
    pub categories_state: RequestState<()>,
    pub create_modal: CategoryModal,
    pub rename_modal: CategoryModal,
    pub delete_modal: CategoryModal,

    pub profile_form: ProfileForm,
    pub profile_state: RequestState<User>,
    pub profile_message: Option<String>,

    pub password_form: PasswordForm,
    pub password_state: RequestState<()>,
    pub password_message: Option<String>,
}

impl SettingsPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            categories: Vec::new(),
            categories_state: RequestState::default(),
            create_modal: CategoryModal::default(),
            rename_modal: CategoryModal::default(),
            delete_modal: CategoryModal::default(),
            profile_form: ProfileForm::default(),
            profile_state: RequestState::default(),
            profile_message: None,
            password_form: PasswordForm::default(),
            password_state: RequestState::default(),
            password_message: None,
        }
    }

    /// Loads categories and the profile concurrently
    ///
    /// Each section settles on its own; a failed profile fetch still shows
    /// the categories.
    pub async fn load(&mut self) -> Option<Route> {
        if let Some(route) = session_guard(&self.client, Some(LOGIN_MESSAGE)).await {
            return Some(route);
        }

        self.categories_state.begin();
        self.profile_state.begin();

        let (categories, profile) =
            tokio::join!(self.client.list_categories(), self.client.fetch_profile());

        let mut route = None;

        match categories {
            Ok(mut categories) => {
                sort_by_name(&mut categories);
                self.categories = categories;
                self.categories_state.succeed(());
            }
            Err(e) => {
                route = login_route_for(&e);
                self.categories_state.fail(&e);
            }
        }

        match profile {
            Ok(user) => {
                self.profile_form = ProfileForm::from_user(&user);
                self.profile_state.succeed(user);
            }
            Err(e) => {
                route = route.or_else(|| login_route_for(&e));
                self.profile_state.fail(&e);
            }
        }

        route
    }

    pub fn profile(&self) -> Option<&User> {
        self.profile_state.data.as_ref()
    }

    pub fn open_create(&mut self) {
        self.create_modal.show(None, String::new());
    }

    /// Creates a category from the create modal's name field
    ///
    /// On success the modal closes and the list stays sorted.
    pub async fn create_category(&mut self) -> Option<Route> {
        self.create_modal.state.begin();

        match self.client.create_category(&self.create_modal.name).await {
            Ok(category) => {
                info!(category_id = %category.id, "Category added");
                self.categories.push(category);
                sort_by_name(&mut self.categories);
                self.create_modal.close();
                None
            }
            Err(e) => fail_modal(&mut self.create_modal, e),
        }
    }

    pub fn open_rename(&mut self, category: &Category) {
        self.rename_modal
            .show(Some(category.clone()), category.name.clone());
    }

    pub async fn rename_category(&mut self) -> Option<Route> {
        let id = self.rename_modal.target_id()?;
        self.rename_modal.state.begin();

        match self
            .client
            .rename_category(&id, &self.rename_modal.name)
            .await
        {
            Ok(renamed) => {
                if let Some(existing) = self.categories.iter_mut().find(|c| c.id == renamed.id) {
                    *existing = renamed;
                }
                sort_by_name(&mut self.categories);
                self.rename_modal.close();
                None
            }
            Err(e) => fail_modal(&mut self.rename_modal, e),
        }
    }

    pub fn open_delete(&mut self, category: &Category) {
        self.delete_modal.show(Some(category.clone()), String::new());
    }

    pub async fn confirm_delete_category(&mut self) -> Option<Route> {
        let id = self.delete_modal.target_id()?;
        self.delete_modal.state.begin();

        match self.client.delete_category(&id).await {
            Ok(()) => {
                self.categories.retain(|c| c.id != id);
                self.delete_modal.close();
                None
            }
            Err(e) => fail_modal(&mut self.delete_modal, e),
        }
    }

    /// Saves the fields that differ from the loaded profile
    pub async fn save_profile(&mut self) -> Option<Route> {
        self.profile_message = None;

        let Some(current) = self.profile_state.data.clone() else {
            self.profile_state.fail("Profile has not been loaded yet.");
            return None;
        };

        let update = match profile_changes(&current, &self.profile_form) {
            Ok(update) => update,
            Err(e) => {
                self.profile_state.fail(e);
                return None;
            }
        };

        self.profile_state.begin();
        match self.client.update_profile(&update).await {
            Ok(user) => {
                self.profile_form = ProfileForm::from_user(&user);
                self.profile_state.succeed(user);
                self.profile_message = Some(PROFILE_SAVED_MESSAGE.to_string());
                None
            }
            Err(e) => {
                let route = login_route_for(&e);
                self.profile_state.fail(&e);
                route
            }
        }
    }

    /// Live indicator for the new password field
    pub fn password_requirements(&self) -> PasswordRequirements {
        PasswordRequirements::check(&self.password_form.new_password)
    }

    pub async fn change_password(&mut self) -> Option<Route> {
        self.password_message = None;

        let form = &self.password_form;
        let change = match validate_password_change(
            &form.current_password,
            &form.new_password,
            &form.confirm_new_password,
        ) {
            Ok(change) => change,
            Err(e) => {
                self.password_state.fail(e);
                return None;
            }
        };

        self.password_state.begin();
        match self.client.change_password(&change).await {
            Ok(()) => {
                self.password_form = PasswordForm::default();
                self.password_state.succeed(());
                self.password_message = Some(PASSWORD_CHANGED_MESSAGE.to_string());
                None
            }
            Err(e) => {
                let route = login_route_for(&e);
                self.password_state.fail(&e);
                route
            }
        }
    }
}

fn fail_modal(modal: &mut CategoryModal, error: ClientError) -> Option<Route> {
    let route = login_route_for(&error);
    modal.state.fail(&error);
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            user_id: "u1".to_string(),
            created_at: "2024-05-01T10:00:00".to_string(),
        }
    }

    #[test]
    fn test_modal_show_resets_state() {
        let mut modal = CategoryModal::default();
        modal.state.fail("old error");

        modal.show(Some(category("c1", "Physics")), "Physics".to_string());
        assert!(modal.open);
        assert!(modal.state.error.is_none());
        assert_eq!(modal.target_id().as_deref(), Some("c1"));

        modal.close();
        assert!(!modal.open);
        assert!(modal.target.is_none());
    }
}
