use std::sync::Arc;

use tokio::net::TcpListener;
use user_api_backend::{build_app, logging, AppState, Config, SqliteUserRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check config.toml or the USER_API__SECTION__KEY environment variables.",
            e
        )
    })?;

    logging::init(&config.logging.level);

    tracing::info!("Starting User API");

    let repository = Arc::new(SqliteUserRepository::open(&config.database.url)?);
    let state = Arc::new(AppState::new(config.clone(), repository));

    let app = build_app(state);

    // Start server
    let addr = config.bind_address();
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
