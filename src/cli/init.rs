//! Database initialization command

use edufeedback_core::error::Result;
use tracing::debug;

use super::helpers::open_storage;

/// Handle database initialization command
pub async fn handle(database: Option<String>, db_path: String) -> Result<()> {
    debug!("Initializing database...");

    let db_path = database.unwrap_or(db_path);

    // Creates the file and runs migrations
    let _storage = open_storage(&db_path, true).await?;

    println!("Database initialized: {}", db_path);
    Ok(())
}
