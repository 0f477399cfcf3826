//! Shared helper functions for CLI commands

use edufeedback_core::{error::Result, AppConfig, ConnectionMode, LibsqlStorage};
use std::path::Path;
use tracing::debug;

/// Database path from the CLI flag, falling back to configuration
pub fn get_db_path(cli_path: Option<String>, config: &AppConfig) -> String {
    cli_path.unwrap_or_else(|| config.database_path())
}

/// Load layered configuration
pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let config = AppConfig::load(config_path)?;
    debug!("Configuration loaded (listen: {})", config.listen_addr());
    Ok(config)
}

/// Open the local database, running migrations
pub async fn open_storage(db_path: &str, create_if_missing: bool) -> Result<LibsqlStorage> {
    debug!("Database path: {}", db_path);
    LibsqlStorage::new_with_validation(ConnectionMode::Local(db_path.to_string()), create_if_missing)
        .await
}
