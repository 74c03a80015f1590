//! Identity Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::token::JwtTokenIssuer;
use crate::infra::postgres::PgUserStore;
use crate::presentation::handlers::{self, IdentityAppState};
use crate::presentation::middleware;

/// Create the identity router with the PostgreSQL store
pub fn identity_router(store: PgUserStore, issuer: JwtTokenIssuer) -> Router {
    let issuer = Arc::new(issuer);
    let state = IdentityAppState {
        store: Arc::new(store),
        issuer: issuer.clone(),
    };

    let protected = Router::new()
        .route("/me", get(handlers::current_user))
        .layer(axum::middleware::from_fn(move |req, next| {
            middleware::require_bearer_token(issuer.clone(), req, next)
        }));

    Router::new()
        .route(
            "/register",
            post(handlers::register::<PgUserStore, JwtTokenIssuer>),
        )
        .route(
            "/login",
            post(handlers::login::<PgUserStore, JwtTokenIssuer>),
        )
        .merge(protected)
        .with_state(state)
}
