//! Application settings loaded from config.toml
//!
//! The `[receipts]` table says where uploaded receipt files are written and the
//! base URL they are served from. `[[employees]]` entries map Discord user ids
//! to the email and user type of the session opened for them.

use crate::core::session::{Session, UserType};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Receipt storage settings
    #[serde(default)]
    pub receipts: ReceiptsConfig,
    /// Known employees and administrators
    #[serde(default)]
    pub employees: Vec<EmployeeConfig>,
}

/// Where receipts are stored and served from
#[derive(Debug, Deserialize, Clone)]
pub struct ReceiptsConfig {
    /// Directory receipt bytes are written to
    #[serde(default = "default_receipts_directory")]
    pub directory: PathBuf,
    /// Base URL prepended to stored receipt names
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

impl Default for ReceiptsConfig {
    fn default() -> Self {
        Self {
            directory: default_receipts_directory(),
            public_url: default_public_url(),
        }
    }
}

fn default_receipts_directory() -> PathBuf {
    PathBuf::from("data/receipts")
}

fn default_public_url() -> String {
    "http://localhost:5678/public".to_string()
}

/// A single employee directory entry
#[derive(Debug, Deserialize, Clone)]
pub struct EmployeeConfig {
    /// Discord user id of the employee
    pub discord_id: String,
    /// Email identifying the employee's bills
    pub email: String,
    /// `Employee` or `Admin`
    #[serde(rename = "type", default)]
    pub user_type: UserType,
}

impl AppConfig {
    /// Opens a session for the given Discord user, if they are in the directory.
    #[must_use]
    pub fn session_for(&self, discord_id: &str) -> Option<Session> {
        self.employees
            .iter()
            .find(|employee| employee.discord_id == discord_id)
            .map(|employee| Session::new(employee.user_type, employee.email.clone()))
    }
}

/// Loads the application configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - An employee entry is missing `discord_id` or `email`
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    Ok(toml::from_str(&contents)?)
}

/// Loads the application configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<AppConfig> {
    load_config("config.toml")
}
