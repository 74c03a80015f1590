//! Identity (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, the user store trait
//! - `application/` - Use cases, token issuance, configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User registration with email + password
//! - Login issuing signed bearer tokens (JWT, HS256)
//! - Role tags attached per user ("User" assigned at registration)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Expected authentication failures are returned as values with
//!   plain-language error lists; only unexpected failures become 500s
//! - Tokens carry subject, email, roles, issuer, and expiry claims

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::TokenConfig;
pub use application::token::JwtTokenIssuer;
pub use error::{IdentityError, IdentityResult};
pub use infra::postgres::PgUserStore;
pub use presentation::router::identity_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserStore as IdentityStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
