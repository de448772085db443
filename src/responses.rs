use serde::{Deserialize, Serialize};

use crate::{models::User, validation::ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub name: String,
    pub token: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            token: user.token,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeResponse {
    pub charge: u8,
}

/// Body of a 423 answer to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedResponse {
    pub charge: u8,
}

/// Body of a 422 answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorResponse {
    pub field: String,
    pub message: String,
}

impl From<ValidationError> for FieldErrorResponse {
    fn from(err: ValidationError) -> Self {
        FieldErrorResponse {
            field: err.field.to_string(),
            message: err.reason.to_string(),
        }
    }
}
