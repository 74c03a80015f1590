//! Identity Middleware
//!
//! Middleware for requiring a valid bearer token on protected routes.

use axum::body::Body;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::token::JwtTokenIssuer;
use crate::error::IdentityError;

/// Authenticated caller extracted from a verified token
///
/// Inserted into request extensions for downstream handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: String,
    pub roles: Vec<String>,
}

/// Middleware that requires a valid `Authorization: Bearer` token
pub async fn require_bearer_token(
    issuer: Arc<JwtTokenIssuer>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = match bearer_token(req.headers()) {
        Some(token) => token,
        None => return Err(IdentityError::TokenRejected.into_response()),
    };

    let claims = match issuer.verify(&token) {
        Ok(claims) => claims,
        Err(e) => return Err(e.into_response()),
    };

    req.extensions_mut().insert(CurrentUser {
        user_id: claims.sub,
        email: claims.email,
        roles: claims.roles,
    });

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(
            bearer_token(&headers_with("Bearer abc.def.ghi")),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
