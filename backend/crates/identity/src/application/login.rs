//! Login Use Case
//!
//! Authenticates an account and issues a token.
//!
//! Checks are strictly sequential and short-circuit on the first failure:
//! an unknown email never reaches password verification.

use std::sync::Arc;

use crate::application::token::TokenIssuer;
use crate::domain::entity::authentication::AuthenticationResult;
use crate::domain::store::UserStore;
use crate::domain::value_object::email::Email;
use crate::error::{IdentityError, IdentityResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<S, T>
where
    S: UserStore,
    T: TokenIssuer,
{
    store: Arc<S>,
    issuer: Arc<T>,
}

impl<S, T> LoginUseCase<S, T>
where
    S: UserStore,
    T: TokenIssuer,
{
    pub fn new(store: Arc<S>, issuer: Arc<T>) -> Self {
        Self { store, issuer }
    }

    pub async fn execute(&self, input: LoginInput) -> IdentityResult<AuthenticationResult> {
        let email = Email::normalize(&input.email);

        let user = match self.store.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login attempt for unknown email");
                return Ok(AuthenticationResult::rejection(
                    IdentityError::UserNotFound.to_string(),
                ));
            }
        };

        let password_valid = self
            .store
            .check_password(&user.user_id, &input.password)
            .await?;

        if !password_valid {
            tracing::warn!(user_id = %user.user_id, "Invalid login attempt");
            return Ok(AuthenticationResult::rejection(
                IdentityError::InvalidCredentials.to_string(),
            ));
        }

        let roles = self.store.roles_for_user(&user.user_id).await?;
        let token = self.issuer.issue(&user, &roles).await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(AuthenticationResult::success(token))
    }
}
