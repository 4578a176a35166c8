use crate::error::ServiceError;
use crate::models::User;
use crate::AppState;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use super::db::get_user_from_token;

/// Extractor for handlers that require an authenticated caller.
pub struct AuthUser(pub User);

/// Extractor for handlers open to anonymous callers but whose behavior
/// depends on the caller's role. A missing Authorization header yields
/// `None`; a present but invalid token is rejected outright so a caller
/// with a stale session isn't silently downgraded to anonymous.
pub struct MaybeUser(pub Option<User>);

fn bearer_token(parts: &Parts) -> Result<Option<&str>, ServiceError> {
    let Some(header_value) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = header_value
        .to_str()
        .map_err(|_| ServiceError::AuthRequired("invalid Authorization header"))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(ServiceError::AuthRequired("invalid Authorization header format"))?;

    Ok(Some(token))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or(ServiceError::AuthRequired("authentication required"))?;
        let user = get_user_from_token(state, token)
            .ok_or(ServiceError::AuthRequired("invalid or expired token"))?;
        Ok(AuthUser(user))
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            None => Ok(MaybeUser(None)),
            Some(token) => {
                let user = get_user_from_token(state, token)
                    .ok_or(ServiceError::AuthRequired("invalid or expired token"))?;
                Ok(MaybeUser(Some(user)))
            }
        }
    }
}
