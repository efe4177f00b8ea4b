/// Client-side validation
///
/// Everything in this module runs before a request is built. A failure here
/// never reaches the network; the page shows the message inline and the
/// user can correct the form and retry.
///
/// # Example
///
/// ```
/// use learnease_shared::validation::{validate_signup, SignupForm, ValidationError};
///
/// let form = SignupForm {
///     password: "Str0ng!Pass".to_string(),
///     confirm_password: "Different1!".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(validate_signup(&form), Err(ValidationError::PasswordMismatch));
/// ```

use crate::auth::password::PasswordRequirements;
use crate::models::category::CategoryName;
use crate::models::user::{PasswordChange, SignupRequest, User, UserUpdate};
use validator::Validate;

/// Content type accepted for book uploads
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Longest category name the backend accepts
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

/// Oldest accepted age (inclusive); the youngest is 1
pub const MAX_AGE: i32 = 120;

/// Local validation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Passwords do not match!")]
    PasswordMismatch,

    #[error("All fields are required.")]
    MissingFields,

    #[error("Please enter a valid age between 1 and 120.")]
    InvalidAge,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Password does not meet all requirements.")]
    WeakPassword,

    #[error("First and last name cannot be empty.")]
    EmptyName,

    #[error("No changes to save.")]
    NothingChanged,

    #[error("Invalid file type. Please upload a PDF.")]
    InvalidFileType,

    #[error("Category name cannot be empty.")]
    EmptyCategoryName,

    #[error("Category name must be at most 100 characters.")]
    CategoryNameTooLong,

    #[error("Please select some text first.")]
    EmptySelection,
}

/// Raw signup form input, exactly as typed
#[derive(Debug, Clone, Default, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1))]
    pub firstname: String,

    #[validate(length(min = 1))]
    pub lastname: String,

    #[validate(length(min = 1), email)]
    pub email: String,

    /// Free text; must parse to an integer in (0, 120]
    #[validate(length(min = 1))]
    pub age: String,

    #[validate(length(min = 1))]
    pub university_name: String,

    #[validate(length(min = 1))]
    pub password: String,

    pub confirm_password: String,
}

impl SignupForm {
    fn trimmed(&self) -> Self {
        Self {
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            email: self.email.trim().to_string(),
            age: self.age.trim().to_string(),
            university_name: self.university_name.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }

    /// True when every password rule holds and the confirmation matches
    pub fn can_submit(&self) -> bool {
        PasswordRequirements::check(&self.password).all_met()
            && self.password == self.confirm_password
    }
}

/// Validates a signup form and builds the request body
///
/// Checks run in this order: confirmation match, required fields, age,
/// email format, password requirements.
pub fn validate_signup(form: &SignupForm) -> Result<SignupRequest, ValidationError> {
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    let form = form.trimmed();
    let mut email_invalid = false;

    if let Err(errors) = form.validate() {
        for error in errors.field_errors().values().flat_map(|errs| errs.iter()) {
            match error.code.as_ref() {
                "length" => return Err(ValidationError::MissingFields),
                "email" => email_invalid = true,
                _ => {}
            }
        }
    }

    let age = parse_age(&form.age)?;

    if email_invalid {
        return Err(ValidationError::InvalidEmail);
    }

    if !PasswordRequirements::check(&form.password).all_met() {
        return Err(ValidationError::WeakPassword);
    }

    Ok(SignupRequest {
        email: form.email,
        password: form.password,
        firstname: form.firstname,
        lastname: form.lastname,
        age,
        university_name: form.university_name,
    })
}

/// Parses an age typed as text
///
/// Accepts integers in (0, 120] only.
pub fn parse_age(raw: &str) -> Result<i32, ValidationError> {
    let age: i32 = raw.trim().parse().map_err(|_| ValidationError::InvalidAge)?;

    if age <= 0 || age > MAX_AGE {
        return Err(ValidationError::InvalidAge);
    }

    Ok(age)
}

/// Editable profile fields on the settings page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub firstname: String,
    pub lastname: String,
    /// Free text; empty leaves the stored age untouched
    pub age: String,
    pub university_name: String,
    pub image: String,
}

impl ProfileForm {
    /// Pre-fills the form from the stored profile
    pub fn from_user(user: &User) -> Self {
        Self {
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            age: user.age.map(|a| a.to_string()).unwrap_or_default(),
            university_name: user.university_name.clone().unwrap_or_default(),
            image: user.image.clone().unwrap_or_default(),
        }
    }
}

/// Computes the partial update for a profile edit
///
/// Only fields that differ from `current` are included.
///
/// # Errors
///
/// - `EmptyName` if a name was blanked
/// - `InvalidAge` if the age is not in range
/// - `NothingChanged` if the form matches the stored profile
pub fn profile_changes(current: &User, form: &ProfileForm) -> Result<UserUpdate, ValidationError> {
    let firstname = form.firstname.trim();
    let lastname = form.lastname.trim();

    if firstname.is_empty() || lastname.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let mut update = UserUpdate::default();

    if firstname != current.firstname {
        update.firstname = Some(firstname.to_string());
    }
    if lastname != current.lastname {
        update.lastname = Some(lastname.to_string());
    }

    if !form.age.trim().is_empty() {
        let age = parse_age(&form.age)?;
        if Some(age) != current.age {
            update.age = Some(age);
        }
    }

    let university = form.university_name.trim();
    if !university.is_empty() && Some(university) != current.university_name.as_deref() {
        update.university_name = Some(university.to_string());
    }

    let image = form.image.trim();
    if !image.is_empty() && Some(image) != current.image.as_deref() {
        update.image = Some(image.to_string());
    }

    if update.is_empty() {
        return Err(ValidationError::NothingChanged);
    }

    Ok(update)
}

/// Validates a password change and builds the request body
pub fn validate_password_change(
    current_password: &str,
    new_password: &str,
    confirm_new_password: &str,
) -> Result<PasswordChange, ValidationError> {
    if current_password.is_empty() || new_password.is_empty() || confirm_new_password.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if new_password != confirm_new_password {
        return Err(ValidationError::PasswordMismatch);
    }

    if !PasswordRequirements::check(new_password).all_met() {
        return Err(ValidationError::WeakPassword);
    }

    Ok(PasswordChange {
        current_password: current_password.to_string(),
        new_password: new_password.to_string(),
        confirm_new_password: confirm_new_password.to_string(),
    })
}

/// Validates a category name for create or rename
///
/// The name is trimmed before it is checked and sent.
pub fn validate_category_name(name: &str) -> Result<CategoryName, ValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(ValidationError::CategoryNameTooLong);
    }

    Ok(CategoryName {
        name: name.to_string(),
    })
}

/// Rejects uploads whose MIME type is not PDF
pub fn check_pdf_content_type(content_type: &str) -> Result<(), ValidationError> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence != PDF_CONTENT_TYPE {
        return Err(ValidationError::InvalidFileType);
    }

    Ok(())
}

/// Normalizes a text selection for the AI actions
pub fn validate_selection(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            age: "21".to_string(),
            university_name: "UCL".to_string(),
            password: "Str0ng!Pass".to_string(),
            confirm_password: "Str0ng!Pass".to_string(),
        }
    }

    fn user() -> User {
        User {
            id: "u1".to_string(),
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            age: Some(21),
            university_name: Some("UCL".to_string()),
            image: None,
            verified: true,
        }
    }

    #[test]
    fn test_valid_signup_builds_request() {
        let request = validate_signup(&valid_form()).unwrap();
        assert_eq!(request.age, 21);
        assert_eq!(request.university_name, "UCL");
    }

    #[test]
    fn test_signup_password_mismatch_checked_first() {
        let form = SignupForm {
            firstname: String::new(),
            confirm_password: "other".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_signup(&form), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_signup_missing_fields() {
        for blank in ["firstname", "lastname", "email", "age", "university_name"] {
            let mut form = valid_form();
            match blank {
                "firstname" => form.firstname = "   ".to_string(),
                "lastname" => form.lastname.clear(),
                "email" => form.email.clear(),
                "age" => form.age.clear(),
                _ => form.university_name.clear(),
            }
            assert_eq!(
                validate_signup(&form),
                Err(ValidationError::MissingFields),
                "blank {} should be rejected",
                blank
            );
        }
    }

    #[test]
    fn test_signup_age_range() {
        for age in ["0", "-3", "121", "abc", "12.5"] {
            let form = SignupForm {
                age: age.to_string(),
                ..valid_form()
            };
            assert_eq!(validate_signup(&form), Err(ValidationError::InvalidAge), "age {}", age);
        }

        for age in ["1", "120", " 35 "] {
            let form = SignupForm {
                age: age.to_string(),
                ..valid_form()
            };
            assert!(validate_signup(&form).is_ok(), "age {}", age);
        }
    }

    #[test]
    fn test_signup_invalid_email() {
        let form = SignupForm {
            email: "not-an-email".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_signup(&form), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_signup_weak_password() {
        let form = SignupForm {
            password: "weakpass".to_string(),
            confirm_password: "weakpass".to_string(),
            ..valid_form()
        };
        assert!(!form.can_submit());
        assert_eq!(validate_signup(&form), Err(ValidationError::WeakPassword));
    }

    #[test]
    fn test_can_submit_requires_matching_confirmation() {
        let mut form = valid_form();
        assert!(form.can_submit());
        form.confirm_password.push('x');
        assert!(!form.can_submit());
    }

    #[test]
    fn test_profile_changes_only_changed_fields() {
        let form = ProfileForm {
            university_name: "Oxford".to_string(),
            ..ProfileForm::from_user(&user())
        };

        let update = profile_changes(&user(), &form).unwrap();
        assert_eq!(update.university_name.as_deref(), Some("Oxford"));
        assert!(update.firstname.is_none());
        assert!(update.lastname.is_none());
        assert!(update.age.is_none());
    }

    #[test]
    fn test_profile_changes_rejects_noop_and_bad_input() {
        let form = ProfileForm::from_user(&user());
        assert_eq!(profile_changes(&user(), &form), Err(ValidationError::NothingChanged));

        let form = ProfileForm {
            age: "200".to_string(),
            ..ProfileForm::from_user(&user())
        };
        assert_eq!(profile_changes(&user(), &form), Err(ValidationError::InvalidAge));

        let form = ProfileForm {
            firstname: " ".to_string(),
            ..ProfileForm::from_user(&user())
        };
        assert_eq!(profile_changes(&user(), &form), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_password_change_rules() {
        assert_eq!(
            validate_password_change("", "Str0ng!Pass", "Str0ng!Pass"),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_password_change("old", "Str0ng!Pass", "Str0ng!Pas"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_password_change("old", "weak", "weak"),
            Err(ValidationError::WeakPassword)
        );
        assert!(validate_password_change("old", "Str0ng!Pass", "Str0ng!Pass").is_ok());
    }

    #[test]
    fn test_category_name() {
        assert_eq!(
            validate_category_name("  "),
            Err(ValidationError::EmptyCategoryName)
        );
        assert_eq!(validate_category_name(" Biology ").unwrap().name, "Biology");
        assert_eq!(
            validate_category_name(&"x".repeat(101)),
            Err(ValidationError::CategoryNameTooLong)
        );
    }

    #[test]
    fn test_pdf_content_type() {
        assert!(check_pdf_content_type("application/pdf").is_ok());
        assert!(check_pdf_content_type("Application/PDF; charset=binary").is_ok());

        let err = check_pdf_content_type("text/plain").unwrap_err();
        assert_eq!(err.to_string(), "Invalid file type. Please upload a PDF.");
    }

    #[test]
    fn test_selection() {
        assert_eq!(validate_selection("  photosynthesis  ").unwrap(), "photosynthesis");
        assert_eq!(validate_selection("\n\t"), Err(ValidationError::EmptySelection));
    }
}
