//! HTTP Handlers
//!
//! The thin translation layer between the tagged [`AuthenticationResult`]
//! and the wire: a token payload on success, a 400 with the ordered error
//! list on rejection. Unexpected errors bubble out as `IdentityError` and
//! render through the centralized response mapping.

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::token::TokenIssuer;
use crate::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use crate::domain::entity::authentication::AuthenticationResult;
use crate::domain::store::UserStore;
use crate::error::IdentityResult;
use crate::presentation::dto::{
    AuthFailedResponse, AuthSuccessResponse, LoginRequest, RegisterRequest, UserInfoResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for identity handlers
pub struct IdentityAppState<S, T>
where
    S: UserStore + Send + Sync + 'static,
    T: TokenIssuer + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub issuer: Arc<T>,
}

impl<S, T> Clone for IdentityAppState<S, T>
where
    S: UserStore + Send + Sync + 'static,
    T: TokenIssuer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            issuer: self.issuer.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/identity/register
pub async fn register<S, T>(
    State(state): State<IdentityAppState<S, T>>,
    Json(req): Json<RegisterRequest>,
) -> IdentityResult<Response>
where
    S: UserStore + Send + Sync + 'static,
    T: TokenIssuer + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.store.clone(), state.issuer.clone());

    let result = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(to_response(result))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/identity/login
pub async fn login<S, T>(
    State(state): State<IdentityAppState<S, T>>,
    Json(req): Json<LoginRequest>,
) -> IdentityResult<Response>
where
    S: UserStore + Send + Sync + 'static,
    T: TokenIssuer + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.store.clone(), state.issuer.clone());

    let result = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(to_response(result))
}

// ============================================================================
// Current user
// ============================================================================

/// GET /api/identity/me
pub async fn current_user(Extension(user): Extension<CurrentUser>) -> Json<UserInfoResponse> {
    Json(UserInfoResponse {
        user_id: user.user_id,
        email: user.email,
        roles: user.roles,
    })
}

// ============================================================================
// Helper Functions
// ============================================================================

fn to_response(result: AuthenticationResult) -> Response {
    match result {
        AuthenticationResult::Authenticated(token) => (
            StatusCode::OK,
            Json(AuthSuccessResponse {
                expires_at_ms: token.expires_at.timestamp_millis(),
                token: token.token,
            }),
        )
            .into_response(),
        AuthenticationResult::Rejected(errors) => (
            StatusCode::BAD_REQUEST,
            Json(AuthFailedResponse { errors }),
        )
            .into_response(),
    }
}
