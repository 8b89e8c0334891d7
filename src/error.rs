use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::auth::AuthError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found")]
    NotFound,

    #[error("Method not allowed on this route")]
    MethodNotAllowed,

    #[error("{0}")]
    BadRequest(String),

    #[error("Database constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Database unavailable")]
    DatabaseUnavailable(#[source] sqlx::Error),

    #[error("Database error")]
    Database(#[source] sqlx::Error),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

// Splits the raw sqlx error into the cases callers respond to differently: a
// constraint raised by a mutation (client's fault, 422), a connection-level
// failure (ours, 500), and everything else.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Self::NotFound,

            sqlx::Error::Database(db_err) => {
                // class 23xxx is integrity constraint violation
                if db_err.code().is_some_and(|code| code.starts_with("23")) {
                    Self::ConstraintViolation(db_err.to_string())
                } else {
                    Self::Database(sqlx::Error::Database(db_err))
                }
            }

            e @ (sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)) => Self::DatabaseUnavailable(e),

            other => Self::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Resource Not Found".to_string()),

            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed".to_string(),
            ),

            Self::BadRequest(reason) => {
                // client mistake, not worth more than a debug line
                tracing::debug!("Rejecting malformed request: {reason}");
                (StatusCode::BAD_REQUEST, reason.clone())
            }

            Self::ConstraintViolation(detail) => {
                tracing::info!("Mutation rejected by database constraint: {detail}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Unprocessable Entity".to_string(),
                )
            }

            Self::DatabaseUnavailable(e) => {
                tracing::error!("Database unreachable: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }

            Self::Database(e) => {
                tracing::error!("Unexpected database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }

            // the auth error's own status and description go out verbatim
            Self::Auth(e) => (e.status_code(), e.to_string()),

            Self::Internal(e) => {
                tracing::error!("{e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({
                "success": false,
                "error": status.as_u16(),
                "message": message,
            })),
        )
            .into_response()
    }
}

pub type Result<T> = core::result::Result<T, AppError>;
