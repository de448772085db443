use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::{
    auth::{AppState, AuthenticatedUser},
    errors::ApiError,
    models::Message,
    requests::{parse_id, AuthorizeRequest, JsonBody, MessageIdRequest, MessageRequest},
    responses::{ChargeResponse, UserResponse},
};

/// Path ids that are not canonical positive integers never match a message.
fn path_id(raw: &str) -> Result<u64, ApiError> {
    parse_id(raw).ok_or(ApiError::NotFound)
}

pub async fn index() -> StatusCode {
    StatusCode::OK
}

pub async fn authorize(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AuthorizeRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.store().authorize(request.name())?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn me(AuthenticatedUser { user }: AuthenticatedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

pub async fn get_messages(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Json<Vec<Message>> {
    Json(state.store().list_messages())
}

pub async fn create_message(
    State(state): State<AppState>,
    AuthenticatedUser { user }: AuthenticatedUser,
    JsonBody(request): JsonBody<MessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let message = state
        .store()
        .create_message(&user, request.subject(), request.text())?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn get_message(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let message = state.store().get_message(path_id(&id)?)?;
    Ok(Json(message))
}

pub async fn update_message(
    State(state): State<AppState>,
    AuthenticatedUser { user }: AuthenticatedUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<MessageRequest>,
) -> Result<Json<Message>, ApiError> {
    let message = state.store().update_message(
        path_id(&id)?,
        &user,
        request.subject(),
        request.text(),
    )?;
    Ok(Json(message))
}

pub async fn delete_message(
    State(state): State<AppState>,
    AuthenticatedUser { user }: AuthenticatedUser,
    JsonBody(request): JsonBody<MessageIdRequest>,
) -> Result<StatusCode, ApiError> {
    let id = request.id().ok_or(ApiError::NotFound)?;
    state.store().delete_message(id, &user)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn charge_increase(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    JsonBody(request): JsonBody<MessageIdRequest>,
) -> Result<Json<ChargeResponse>, ApiError> {
    let id = request.id().ok_or(ApiError::NotFound)?;
    let charge = state.store().increase_charge(id)?;
    Ok(Json(ChargeResponse { charge }))
}

pub async fn charge_decrease(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    JsonBody(request): JsonBody<MessageIdRequest>,
) -> Result<Json<ChargeResponse>, ApiError> {
    let id = request.id().ok_or(ApiError::NotFound)?;
    let charge = state.store().decrease_charge(id)?;
    Ok(Json(ChargeResponse { charge }))
}
