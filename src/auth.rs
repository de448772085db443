use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{errors::ApiError, models::User, store::Store};

/// Header carrying the credential issued by `/authorize`.
pub const TOKEN_HEADER: &str = "token";

#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the store for the duration of one operation.
    pub fn store(&self) -> MutexGuard<'_, Store> {
        // Every operation validates before mutating, so a poisoned store is
        // still consistent.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let app_state = AppState::from_ref(state);
        let user = app_state
            .store()
            .resolve_user(token)
            .cloned()
            .ok_or(ApiError::Unauthenticated)?;

        Ok(AuthenticatedUser { user })
    }
}
