//! User Account Entity
//!
//! Core account entity containing non-sensitive user data.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId};

/// User account entity
///
/// Contains the public account record. Sensitive auth data is in the
/// Credentials entity. Created exactly once at registration; the identity
/// is immutable afterwards.
#[derive(Debug, Clone)]
pub struct UserAccount {
    /// Internal UUID identifier (opaque string form for callers)
    pub user_id: UserId,
    /// Email address (unique, the login handle), stored normalized
    pub email: String,
    /// Display/user name; equals the email at registration
    pub user_name: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Create a new account record for registration
    ///
    /// Fresh UUID, normalized email, user name set to the email, both
    /// timestamps set to now. Validation happens at store-create time.
    pub fn new(email: impl AsRef<str>) -> Self {
        let email = Email::normalize(email.as_ref());
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name: email.clone(),
            email,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_normalizes_email() {
        let user = UserAccount::new("  Alice@Example.COM ");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.user_name, "alice@example.com");
    }

    #[test]
    fn test_new_account_has_fresh_identity() {
        let a = UserAccount::new("alice@example.com");
        let b = UserAccount::new("alice@example.com");
        assert_ne!(a.user_id, b.user_id);
        assert_eq!(a.created_at, a.updated_at);
    }
}
