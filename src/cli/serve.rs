//! HTTP server command

use edufeedback_core::{
    api::{AppState, FeedbackServer, SessionSigner},
    error::{FeedbackError, Result},
    AppConfig, FeedbackService,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use super::helpers::open_storage;

/// Handle serve command
pub async fn handle(addr: Option<String>, config: AppConfig, db_path: String) -> Result<()> {
    let addr_str = addr.unwrap_or_else(|| config.listen_addr());
    let addr: SocketAddr = addr_str
        .parse()
        .map_err(|e| FeedbackError::InvalidValue(format!("Invalid address '{}': {}", addr_str, e)))?;

    let storage = open_storage(&db_path, true).await?;
    info!("Using database {}", db_path);

    let service = FeedbackService::new(Arc::new(storage));
    let signer = SessionSigner::new(config.session_key(), config.session_ttl_secs);
    let state = AppState::new(service, signer, &config.admin_password);

    FeedbackServer::new(addr, state).serve().await?;
    Ok(())
}
