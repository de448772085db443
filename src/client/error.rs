use reqwest::StatusCode;
use thiserror::Error;

use crate::responses::{FieldErrorResponse, LockedResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("not authorized")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("message is locked with charge {charge}")]
    Locked { charge: u8 },

    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Maps a non-success response onto the server's error taxonomy.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        match response.status() {
            StatusCode::UNAUTHORIZED => ClientError::Unauthenticated,
            StatusCode::FORBIDDEN => ClientError::Forbidden,
            StatusCode::NOT_FOUND => ClientError::NotFound,
            StatusCode::UNPROCESSABLE_ENTITY => match response.json::<FieldErrorResponse>().await {
                Ok(body) => ClientError::Validation {
                    field: body.field,
                    message: body.message,
                },
                Err(err) => ClientError::Transport(err),
            },
            StatusCode::LOCKED => match response.json::<LockedResponse>().await {
                Ok(body) => ClientError::Locked {
                    charge: body.charge,
                },
                Err(err) => ClientError::Transport(err),
            },
            status => ClientError::UnexpectedStatus(status.as_u16()),
        }
    }
}
