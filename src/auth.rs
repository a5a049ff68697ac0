use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::JwtConfig, error::AppError, routes::AppState};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    sub: String,
}

/// Issue a bearer token for `sub`. Login lives elsewhere; this is for
/// operators and tests.
pub fn generate_token(config: &JwtConfig, sub: impl Into<String>) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + config.expiration_days * 24 * 60 * 60,
        iat: now,
        iss: config.issuer.to_owned(),
        sub: sub.into(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Returns the `sub` claim of a valid token.
pub fn validate_token(config: &JwtConfig, token: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims.sub)
}

/// The signed-in user a request acts for, taken from `Authorization: Bearer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer(pub String);

fn bearer(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer(parts).ok_or(AppError::Unauthenticated)?;

        let sub = validate_token(&state.config.jwt, token).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            AppError::Unauthenticated
        })?;

        Ok(Viewer(sub))
    }
}

/// A missing header is an anonymous viewer; a bad token is still a 401.
impl OptionalFromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(None);
        }

        <Viewer as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}
