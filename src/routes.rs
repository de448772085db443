use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{auth::AppState, handlers};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/authorize", post(handlers::authorize))
        .route("/me", get(handlers::me))
        .route(
            "/messages",
            get(handlers::get_messages).post(handlers::create_message),
        )
        .route(
            "/messages/{id}",
            get(handlers::get_message).put(handlers::update_message),
        )
        .route("/message/delete", post(handlers::delete_message))
        .route("/message/charge_increase", post(handlers::charge_increase))
        .route("/message/charge_decrease", post(handlers::charge_decrease))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
