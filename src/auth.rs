use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{error::AppError, startup::AppState};

// each variant's display string is sent to the client verbatim
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingToken,

    #[error("Authorization header must start with \"Bearer\".")]
    UnsupportedTokenType,

    #[error("Unable to parse authentication token.")]
    InvalidToken,

    #[error("Permissions not included in token.")]
    MalformedClaims,

    #[error("Permission not found.")]
    PermissionDenied,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedClaims => StatusCode::BAD_REQUEST,
            Self::MissingToken
            | Self::UnsupportedTokenType
            | Self::InvalidToken
            | Self::PermissionDenied => StatusCode::UNAUTHORIZED,
        }
    }
}

// the permissions claim is optional: a token issued without any scopes
// simply doesn't carry it
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: String,
    exp: usize,
    iat: usize,
    jti: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    pub fn new(sub: &str, permissions: Option<Vec<String>>, exp_at: DateTime<Utc>) -> Self {
        let now = Utc::now();

        Self {
            sub: sub.to_string(),
            exp: exp_at.timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4(),
            permissions,
        }
    }

    pub fn issue(&self, secret: &str) -> Result<String, AppError> {
        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        let header = Header::default();
        let token =
            jsonwebtoken::encode(&header, self, &encoding_key).context("Failed to issue jwt")?;

        Ok(token)
    }

    pub fn require(&self, permission: &str) -> Result<(), AuthError> {
        check_permission(permission, self)
    }
}

// A claim set without a "permissions" entry is malformed (the token was not
// issued with scopes at all); a list merely lacking the required permission
// is a plain denial.
pub fn check_permission(required_permission: &str, claims: &Claims) -> Result<(), AuthError> {
    let Some(permissions) = claims.permissions.as_deref() else {
        return Err(AuthError::MalformedClaims);
    };

    if !permissions.iter().any(|p| p == required_permission) {
        return Err(AuthError::PermissionDenied);
    }

    Ok(())
}

impl FromRequestParts<Arc<AppState>> for Claims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> core::result::Result<Self, Self::Rejection> {
        let jwt_secret = &state.auth.jwt_secret;

        // get the Authorization header
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        if !auth_header.starts_with("Bearer ") {
            // unsupported token type
            return Err(AuthError::UnsupportedTokenType.into());
        }

        let token = &auth_header[7..]; // Strip "Bearer "

        let token_data = jsonwebtoken::decode::<Self>(
            token,
            &DecodingKey::from_secret(jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }
}
