//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup, plus
//! one JSON registry file describing the study's users. The `.env` file is
//! used for local development.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// The reserved admin username. Its password is the configured admin
/// secret, never an entry in the credential table.
pub const ADMIN_USERNAME: &str = "admin";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
    #[error("Failed to load the users file {0}: {1}")]
    UsersFile(String, String),
}

/// The static user registry: credential table, identity-to-dataset tables,
/// and the expert role set. Defined entirely in configuration; users are
/// never created or destroyed at runtime.
#[derive(Clone, Debug, Deserialize)]
pub struct UserRegistry {
    /// username -> password, equality-checked at login.
    pub credentials: BTreeMap<String, String>,
    /// Explicit identity -> dataset filename table, one entry per known
    /// user. Not derived from the identity string.
    pub datasets: BTreeMap<String, String>,
    /// Identity -> justification dataset filename; gates the
    /// justification stage.
    #[serde(default)]
    pub justification_datasets: BTreeMap<String, String>,
    /// Identities routed to the arbitration stage.
    #[serde(default)]
    pub experts: BTreeSet<String>,
}

/// Holds all configuration loaded at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub admin_secret: String,
    /// Base directory for the per-user dataset JSON files.
    pub data_dir: PathBuf,
    /// Base directory for the per-user store files, created on demand.
    pub store_dir: PathBuf,
    pub users: UserRegistry,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for
    /// development, but this is skipped in test environments to ensure
    /// tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let admin_secret = std::env::var("ADMIN_SECRET")
            .map_err(|_| ConfigError::MissingVar("ADMIN_SECRET".to_string()))?;

        let users_file = std::env::var("USERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./config/users.json"));
        let users = Self::load_users(&users_file)?;

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let store_dir = std::env::var("STORE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./user_dbs"));

        Ok(Self {
            bind_address,
            log_level,
            admin_secret,
            data_dir,
            store_dir,
            users,
        })
    }

    fn load_users(path: &PathBuf) -> Result<UserRegistry, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::UsersFile(display.clone(), e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::UsersFile(display, e.to_string()))
    }
}
