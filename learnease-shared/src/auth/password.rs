/// Password-creation requirements
///
/// New passwords (signup and password change) must satisfy five rules. Each
/// rule is checked independently so a form can show a live indicator per
/// rule while the user types:
///
/// | Rule | Pattern |
/// |------|---------|
/// | length | `.{8,}` |
/// | uppercase | `[A-Z]` |
/// | lowercase | `[a-z]` |
/// | number | `[0-9]` |
/// | special | `[^A-Za-z0-9]` |
///
/// # Example
///
/// ```
/// use learnease_shared::auth::password::PasswordRequirements;
///
/// let reqs = PasswordRequirements::check("lowercase1!");
/// assert!(!reqs.uppercase);
/// assert!(reqs.lowercase && reqs.number && reqs.special && reqs.length);
/// assert_eq!(reqs.unmet(), vec!["One uppercase letter"]);
/// ```

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref LENGTH_RE: Regex = Regex::new(r".{8,}").unwrap();
    static ref UPPERCASE_RE: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref LOWERCASE_RE: Regex = Regex::new(r"[a-z]").unwrap();
    static ref NUMBER_RE: Regex = Regex::new(r"[0-9]").unwrap();
    static ref SPECIAL_RE: Regex = Regex::new(r"[^A-Za-z0-9]").unwrap();
}

/// Per-rule indicator for a candidate password
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PasswordRequirements {
    /// At least 8 characters
    pub length: bool,

    /// Contains an ASCII uppercase letter
    pub uppercase: bool,

    /// Contains an ASCII lowercase letter
    pub lowercase: bool,

    /// Contains a digit
    pub number: bool,

    /// Contains a character that is neither a letter nor a digit
    pub special: bool,
}

impl PasswordRequirements {
    /// Evaluates all five rules against `password`
    pub fn check(password: &str) -> Self {
        Self {
            length: LENGTH_RE.is_match(password),
            uppercase: UPPERCASE_RE.is_match(password),
            lowercase: LOWERCASE_RE.is_match(password),
            number: NUMBER_RE.is_match(password),
            special: SPECIAL_RE.is_match(password),
        }
    }

    /// True when every rule holds
    pub fn all_met(&self) -> bool {
        self.length && self.uppercase && self.lowercase && self.number && self.special
    }

    /// Human-readable labels with their status, in display order
    pub fn labels(&self) -> [(&'static str, bool); 5] {
        [
            ("At least 8 characters", self.length),
            ("One uppercase letter", self.uppercase),
            ("One lowercase letter", self.lowercase),
            ("One number", self.number),
            ("One special character", self.special),
        ]
    }

    /// Labels of the rules that are not yet satisfied
    pub fn unmet(&self) -> Vec<&'static str> {
        self.labels()
            .into_iter()
            .filter(|(_, met)| !met)
            .map(|(label, _)| label)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_meets_nothing() {
        let reqs = PasswordRequirements::check("");
        assert_eq!(reqs, PasswordRequirements::default());
        assert_eq!(reqs.unmet().len(), 5);
    }

    #[test]
    fn test_rules_are_independent() {
        let reqs = PasswordRequirements::check("ABCDEFGH");
        assert!(reqs.length);
        assert!(reqs.uppercase);
        assert!(!reqs.lowercase);
        assert!(!reqs.number);
        assert!(!reqs.special);

        let reqs = PasswordRequirements::check("a1!");
        assert!(!reqs.length);
        assert!(!reqs.uppercase);
        assert!(reqs.lowercase);
        assert!(reqs.number);
        assert!(reqs.special);
    }

    #[test]
    fn test_uppercase_is_ascii_only() {
        // `[A-Z]` does not match accented capitals
        assert!(!PasswordRequirements::check("Éclair").uppercase);
        assert!(PasswordRequirements::check("xYz").uppercase);
    }

    #[test]
    fn test_space_counts_as_special() {
        assert!(PasswordRequirements::check("has space").special);
    }

    #[test]
    fn test_length_counts_within_a_line() {
        // Eight characters on any one line satisfy the rule; `.` stops at newlines
        assert!(PasswordRequirements::check("Abcdefg1!\nx").length);
        assert!(!PasswordRequirements::check("Abc1\nDefg").length);
    }

    #[test]
    fn test_all_met() {
        let reqs = PasswordRequirements::check("Str0ng!Pass");
        assert!(reqs.all_met());
        assert!(reqs.unmet().is_empty());
    }
}
