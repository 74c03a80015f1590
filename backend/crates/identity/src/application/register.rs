//! Register Use Case
//!
//! Creates a new user account and issues its first token.
//!
//! One consolidated operation: every expected failure (duplicate email,
//! store validation, role assignment) comes back as a rejected
//! [`AuthenticationResult`]; only infrastructure failures propagate as
//! errors. The handler layer translates the tagged result to transport.

use std::sync::Arc;

use crate::application::token::TokenIssuer;
use crate::domain::entity::authentication::AuthenticationResult;
use crate::domain::entity::user::UserAccount;
use crate::domain::store::UserStore;
use crate::domain::value_object::{email::Email, role::RoleName};
use crate::error::{IdentityError, IdentityResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<S, T>
where
    S: UserStore,
    T: TokenIssuer,
{
    store: Arc<S>,
    issuer: Arc<T>,
}

impl<S, T> RegisterUseCase<S, T>
where
    S: UserStore,
    T: TokenIssuer,
{
    pub fn new(store: Arc<S>, issuer: Arc<T>) -> Self {
        Self { store, issuer }
    }

    pub async fn execute(&self, input: RegisterInput) -> IdentityResult<AuthenticationResult> {
        let email = Email::normalize(&input.email);

        // Existence pre-check; the unique index backs this up under races
        if self.store.find_by_email(&email).await?.is_some() {
            return Ok(AuthenticationResult::rejection(
                IdentityError::EmailTaken.to_string(),
            ));
        }

        let user = UserAccount::new(&email);

        match self.store.create(&user, &input.password).await {
            Ok(()) => {}
            Err(IdentityError::Validation(errors)) => {
                return Ok(AuthenticationResult::rejected(errors));
            }
            // A concurrent registration won the race between the existence
            // check and the insert; report it exactly like the pre-check.
            Err(IdentityError::EmailTaken) => {
                return Ok(AuthenticationResult::rejection(
                    IdentityError::EmailTaken.to_string(),
                ));
            }
            Err(other) => return Err(other),
        }

        // The account stays persisted if this fails; assignment is
        // idempotent and can be repaired by a later attempt.
        if let Err(err) = self.store.add_to_role(&user.user_id, &RoleName::user()).await {
            return match err {
                IdentityError::Validation(errors) => {
                    tracing::warn!(
                        user_id = %user.user_id,
                        "Default role assignment failed; account left without role"
                    );
                    Ok(AuthenticationResult::rejected(errors))
                }
                other => Err(other),
            };
        }

        let roles = self.store.roles_for_user(&user.user_id).await?;
        let token = self.issuer.issue(&user, &roles).await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(AuthenticationResult::success(token))
    }
}
