use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::{
    responses::{FieldErrorResponse, LockedResponse},
    validation::ValidationError,
};

/// Failures of store operations. None of them leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("missing or unknown token")]
    Unauthenticated,

    /// The caller is not the author of the message.
    #[error("not the author of the message")]
    Forbidden,

    #[error("message not found")]
    NotFound,

    /// Deletion refused while the message still carries a charge.
    #[error("message is locked with charge {charge}")]
    Locked { charge: u8 },
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Locked { .. } => StatusCode::LOCKED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Validation(err) => (status, Json(FieldErrorResponse::from(err))).into_response(),
            Self::Locked { charge } => (status, Json(LockedResponse { charge })).into_response(),
            _ => status.into_response(),
        }
    }
}
