use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::{
    auth::{claims::Claims, jwt::JwtKeys},
    error::ApiError,
    state::AppState,
    users::repo_types::{Role, User},
};

/// Verified bearer claims. Also stored in the request extensions.
pub struct AuthClaims(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AuthClaims(claims.clone()));
        }

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .filter(|v| !v.as_bytes().iter().all(u8::is_ascii_whitespace))
            .ok_or(ApiError::AuthMissing)?;

        // "<scheme> <token>" split on single spaces; the scheme is not inspected
        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.split(' ').nth(1))
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::AuthInvalid)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            ApiError::AuthInvalid
        })?;

        parts.extensions.insert(claims.clone());
        Ok(AuthClaims(claims))
    }
}

/// Caller whose stored role is `admin`, re-read from the store on every request.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthClaims(claims) = AuthClaims::from_request_parts(parts, state).await?;

        let Some(email) = claims.email() else {
            warn!("token carries no email claim");
            return Err(ApiError::AuthzDenied);
        };

        match state.users.find_by_email(email).await? {
            Some(user) if user.role == Role::Admin => Ok(AdminUser(user)),
            _ => {
                warn!(%email, "admin access denied");
                Err(ApiError::AuthzDenied)
            }
        }
    }
}
