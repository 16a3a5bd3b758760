pub mod audit;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
pub mod test_util;
pub mod validation;

pub use config::Config;
pub use error::Error;
pub use models::user::{NewUser, User, UserFields};
pub use service::UserService;
pub use store::{SqliteUserRepository, StoreError, UserRepository};
pub use validation::{FieldErrors, UserForm};

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// User operations over the configured store.
    pub user_service: UserService,
}

impl AppState {
    pub fn new(config: Config, repository: Arc<dyn UserRepository>) -> Self {
        Self {
            config,
            user_service: UserService::new(repository),
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = match config.cors.allowed_origins() {
        None => AllowOrigin::from(Any),
        Some(origins) => {
            let values: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", o);
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full HTTP application.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::users::router(state))
        .fallback(routes::route_not_found)
        .layer(middleware::from_fn(logging::request_logger))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
