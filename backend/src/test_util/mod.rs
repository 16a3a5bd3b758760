use std::sync::Arc;

use crate::config::{Config, CorsConfig, DatabaseConfig, LoggingConfig, ServerConfig};
use crate::store::{SqliteUserRepository, StoreError};
use crate::AppState;

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        },
        database: DatabaseConfig {
            url: ":memory:".to_string(),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        cors: CorsConfig {
            origins: "*".to_string(),
        },
    }
}

/// State backed by a fresh in-memory store.
pub fn create_test_state() -> Result<Arc<AppState>, StoreError> {
    let config = test_config();
    let repository = Arc::new(SqliteUserRepository::open(&config.database.url)?);

    Ok(Arc::new(AppState::new(config, repository)))
}
