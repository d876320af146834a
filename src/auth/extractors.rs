use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::{
    auth::jwt::JwtKeys,
    error::{ApiError, AuthError},
};

/// Resolved caller identity for protected routes. A handler takes this
/// extractor to declare the route protected; the id lives only in the
/// handler's arguments, never in shared state.
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::Missing)?;

        // exact "Bearer <token>" shape, anything else counts as missing
        let token = header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Missing)?;

        let claims = keys.verify(token).map_err(|e| {
            warn!(reason = %e, "bearer token rejected");
            e
        })?;

        let user_id = claims.identity.parse::<i64>().map_err(|_| {
            warn!(identity = %claims.identity, "non-numeric identity claim");
            AuthError::Invalid
        })?;

        Ok(AuthUser(user_id))
    }
}
