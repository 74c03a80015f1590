//! Credentials Entity
//!
//! Authentication credentials for a user account.
//! Separated from UserAccount to isolate sensitive data.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::user_id::UserId;

/// Credentials entity
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Reference to UserAccount
    pub user_id: UserId,
    /// Hashed password (PHC string, Argon2id)
    pub password_hash: HashedPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Credentials {
    /// Create new credentials
    pub fn new(user_id: UserId, password_hash: HashedPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
