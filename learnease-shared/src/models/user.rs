/// User account models
///
/// Users are created via signup and mutated through the profile and
/// password endpoints. The client never sees a password hash; it only sends
/// plaintext passwords over the wire on signup, login and password change.
///
/// # Wire format
///
/// ```json
/// {
///   "id": "665f1c...",
///   "firstname": "Ada",
///   "lastname": "Lovelace",
///   "email": "ada@example.com",
///   "age": 21,
///   "university_name": "UCL",
///   "image": null,
///   "verified": false
/// }
/// ```

use serde::{Deserialize, Serialize};

/// A user account as returned by `/auth/signup` and `/users/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier (opaque string)
    pub id: String,

    /// First name
    pub firstname: String,

    /// Last name
    pub lastname: String,

    /// Email address, also the login name
    pub email: String,

    /// Age in years
    #[serde(default)]
    pub age: Option<i32>,

    /// University the student attends
    #[serde(default)]
    pub university_name: Option<String>,

    /// Profile picture URL
    #[serde(default)]
    pub image: Option<String>,

    /// Whether the email address has been verified
    #[serde(default)]
    pub verified: bool,
}

impl User {
    /// Returns "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Body of `POST /auth/signup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub age: i32,
    pub university_name: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque bearer token
    pub access_token: String,

    /// Token type, always "bearer" in practice
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body of `PUT /users/me`
///
/// All fields are optional. Only `Some` fields are serialized, so a partial
/// update sends exactly the fields the user changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl UserUpdate {
    /// True when no field would be sent
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.lastname.is_none()
            && self.age.is_none()
            && self.university_name.is_none()
            && self.image.is_none()
    }
}

/// Body of `POST /users/me/change-password`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_nullable_fields_default() {
        let json = r#"{"id":"u1","firstname":"Ada","lastname":"Lovelace","email":"ada@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.age, None);
        assert_eq!(user.university_name, None);
        assert_eq!(user.image, None);
        assert!(!user.verified);
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_partial_update_skips_unchanged_fields() {
        let update = UserUpdate {
            lastname: Some("Byron".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({ "lastname": "Byron" }));
        assert!(!update.is_empty());
        assert!(UserUpdate::default().is_empty());
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.token_type, "bearer");
    }
}
