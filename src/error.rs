use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jointravel_shared::reaction::ErrorBody;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<jointravel_shared::Error> for AppError {
    fn from(err: jointravel_shared::Error) -> Self {
        match err {
            jointravel_shared::Error::Validate(errors) => AppError::Validation(errors.to_string()),
            jointravel_shared::Error::Unknown(e) => AppError::Internal(format!("{e:#}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "Please sign in to react to reviews.".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        (status_code, Json(ErrorBody::new(message))).into_response()
    }
}
