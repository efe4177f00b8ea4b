/// Authentication utilities for the Learn-Ease client
///
/// # Modules
///
/// - [`password`]: Password-creation requirement checks
/// - [`session`]: Session context holding the bearer token, with init/teardown
///
/// # Example
///
/// ```
/// use learnease_shared::auth::password::PasswordRequirements;
///
/// let reqs = PasswordRequirements::check("MyP@ssw0rd");
/// assert!(reqs.all_met());
/// ```

pub mod password;
pub mod session;
