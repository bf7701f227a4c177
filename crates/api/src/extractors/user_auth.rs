//! Extractor for the identity verified by the auth middleware.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;

/// The [`UserAuth`] inserted by `require_user_auth`.
///
/// Rejects with 403 when the route was not wrapped by the middleware, so a
/// handler never runs without an identity.
#[derive(Debug, Clone)]
pub struct Identity(pub UserAuth);

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserAuth>()
            .cloned()
            .map(Identity)
            .ok_or_else(|| ApiError::Forbidden("missing identity".to_string()))
    }
}
