//! New-Account Validation
//!
//! Store-side validation of a registration request. Every store
//! implementation reports the same descriptions in the same order:
//! email shape first, then each password policy violation.

use platform::password::ClearTextPassword;

use crate::domain::value_object::email::Email;

/// Collect every validation failure for a new account, in report order
///
/// Returns an empty list when the request is acceptable. The descriptions
/// are user-facing and surfaced to the caller verbatim.
pub fn validate_new_account(email: &str, password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if let Err(err) = Email::new(email) {
        errors.push(err.message().to_string());
    }

    for violation in ClearTextPassword::policy_violations(password) {
        errors.push(violation.to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptable_account_has_no_errors() {
        assert!(validate_new_account("alice@example.com", "correct horse battery").is_empty());
    }

    #[test]
    fn test_email_errors_come_first() {
        let errors = validate_new_account("not-an-email", "abc");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "Invalid email format");
        assert_eq!(errors[1], "Password must be at least 8 characters (got 3)");
    }

    #[test]
    fn test_multiple_password_violations_keep_policy_order() {
        let errors = validate_new_account("alice@example.com", "1234");
        assert_eq!(
            errors,
            [
                "Password must be at least 8 characters (got 4)",
                "Password is too common or follows a predictable pattern",
            ]
        );
    }
}
