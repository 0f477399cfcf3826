//! Service configuration
//!
//! Layered with the `config` crate, later sources winning:
//! 1. Built-in defaults
//! 2. Optional TOML file (`feedback.toml` unless `--config` is given)
//! 3. `FEEDBACK_*` environment variables (e.g. `FEEDBACK_ADMIN_PASSWORD`)
//! 4. `PORT`, for hosting platforms that assign one
//!
//! CLI flags are applied on top by the caller.

use crate::error::{FeedbackError, Result};
use rand::RngCore;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file read when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "feedback.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "FEEDBACK";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 8 * 60 * 60;

/// Get the default database path under the platform data directory
pub fn get_default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("edufeedback")
        .join("feedback.db")
}

/// Resolved service settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// SQLite file; the platform default when unset
    #[serde(default)]
    pub database_path: Option<String>,
    pub bind_addr: String,
    pub port: u16,
    pub admin_password: String,
    /// Key for signing admin session cookies
    #[serde(default)]
    pub session_secret: Option<String>,
    pub session_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            session_secret: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl AppConfig {
    /// Load from defaults, the config file and the environment
    ///
    /// An explicitly given file must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (file, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        debug!("Loading configuration (file: {}, required: {})", file.display(), required);

        let settings = config::Config::builder()
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .set_default("port", DEFAULT_PORT as i64)?
            .set_default("admin_password", DEFAULT_ADMIN_PASSWORD)?
            .set_default("session_ttl_secs", DEFAULT_SESSION_TTL_SECS as i64)?
            .add_source(config::File::from(file).required(required))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| FeedbackError::InvalidValue(format!("PORT is not a valid port: {}", port)))?;
        }

        if config.admin_password == DEFAULT_ADMIN_PASSWORD {
            warn!("Using the default admin password; set FEEDBACK_ADMIN_PASSWORD");
        }

        Ok(config)
    }

    /// Database path, falling back to the platform default
    pub fn database_path(&self) -> String {
        self.database_path
            .clone()
            .unwrap_or_else(|| get_default_db_path().to_string_lossy().to_string())
    }

    /// `host:port` to listen on
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Session signing key; random per process when none is configured
    pub fn session_key(&self) -> Vec<u8> {
        match &self.session_secret {
            Some(secret) if !secret.is_empty() => secret.as_bytes().to_vec(),
            _ => {
                warn!("No session secret configured; admin sessions will not survive a restart");
                let mut key = vec![0u8; 32];
                rand::thread_rng().fill_bytes(&mut key);
                key
            }
        }
    }
}
