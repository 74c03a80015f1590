//! User Store Trait
//!
//! Interface for account persistence and credential checking.
//! Implementation is in the infrastructure layer.
//!
//! Error contract for the mutation methods:
//! - `create` fails with `IdentityError::Validation` when the email or
//!   password is rejected (ordered, user-facing descriptions), or with
//!   `IdentityError::EmailTaken` when the unique index catches a
//!   concurrent duplicate that passed the caller's existence pre-check.
//! - `add_to_role` fails with `IdentityError::Validation` when the role
//!   cannot be attached (e.g. the role does not exist). Assignment is
//!   idempotent: attaching an already-attached role succeeds.

use crate::domain::entity::user::UserAccount;
use crate::domain::value_object::{role::RoleName, user_id::UserId};
use crate::error::IdentityResult;

/// User store trait
#[trait_variant::make(UserStore: Send)]
pub trait LocalUserStore {
    /// Find an account by normalized email
    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<UserAccount>>;

    /// Create an account with the given password
    ///
    /// The store owns validation and password hashing.
    async fn create(&self, user: &UserAccount, password: &str) -> IdentityResult<()>;

    /// Attach a role to an account
    async fn add_to_role(&self, user_id: &UserId, role: &RoleName) -> IdentityResult<()>;

    /// Roles currently attached to an account
    async fn roles_for_user(&self, user_id: &UserId) -> IdentityResult<Vec<RoleName>>;

    /// Verify a plaintext password against the stored credential
    async fn check_password(&self, user_id: &UserId, password: &str) -> IdentityResult<bool>;
}
