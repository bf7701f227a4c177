//! Bearer token authentication for user routes.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::jwt::{Claims, JwtError, Permission};
use std::collections::BTreeSet;

use crate::app::AppState;
use crate::error::ApiError;

/// Verified identity placed in request extensions by [`require_user_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAuth {
    pub user_id: i64,
    pub permissions: BTreeSet<Permission>,
}

impl UserAuth {
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Fails with 403 when `permission` was not granted to the token.
    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        if self.has(permission) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "token does not grant the {} permission",
                permission
            )))
        }
    }
}

impl From<Claims> for UserAuth {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            permissions: claims.permissions,
        }
    }
}

/// Client-facing message for a rejected token.
fn rejection_message(err: &JwtError) -> &'static str {
    match err {
        JwtError::MissingAuthorization => "missing authorization header",
        JwtError::MalformedAuthorization => "authorization header must be a bearer token",
        JwtError::TokenExpired => "token has expired",
        _ => "invalid token",
    }
}

/// Rejects the request with 401 unless it carries a valid bearer token.
/// On success the [`UserAuth`] is stored in request extensions.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.tokens.verify_bearer(header) {
        Ok(claims) => {
            req.extensions_mut().insert(UserAuth::from(claims));
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("Token rejected: {}", e);
            ApiError::Unauthorized(rejection_message(&e).to_string()).into_response()
        }
    }
}
