use message_board::{auth::AppState, config::Config, routes, store::Store};
use tokio::signal;
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    fmt::init();

    let config = Config::from_env();
    let app_address = config.address();

    let app_state = AppState::new(Store::default());

    let app = routes::create_router(app_state);
    let listener = tokio::net::TcpListener::bind(&app_address)
        .await
        .expect("Failed to bind address");

    tracing::info!("Server running on http://{app_address}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler");
            tracing::info!("Shutting down...");
        })
        .await
        .expect("server error");
}
