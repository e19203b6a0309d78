//! Layered server settings.
//!
//! # Responsibility
//! - Merge built-in defaults, an optional TOML file and `MYDAILY__*`
//!   environment variables into one typed `Settings` value.
//!
//! # Invariants
//! - Every key has a default, so an empty environment yields a runnable server.
//! - `server.environment` is either `development` or `production`.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::net::SocketAddr;

pub const DEFAULT_CONFIG_FILE: &str = "mydaily.toml";
pub const ENV_PREFIX: &str = "MYDAILY";
pub const DEFAULT_PRODUCTION_ORIGIN: &str = "https://front-mydaily.vercel.app";

/// Deployment flavor; decides the cross-origin policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployEnvironment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub bind: String,
    pub environment: DeployEnvironment,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        self.bind
            .parse()
            .map_err(|err| format!("invalid server.bind `{}`: {err}", self.bind))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    pub production_origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
    pub cors: CorsSettings,
}

impl Settings {
    /// Loads settings from `config_file` (optional) and the environment.
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let (file_name, required) = match config_file {
            Some(path) => (path, true),
            None => (DEFAULT_CONFIG_FILE, false),
        };

        Config::builder()
            .set_default("server.bind", "0.0.0.0:3000")?
            .set_default("server.environment", "development")?
            .set_default("database.path", "mydaily.sqlite3")?
            .set_default("log.level", mydaily_core::default_log_level())?
            .set_default(
                "cors.production_origin",
                DEFAULT_PRODUCTION_ORIGIN,
            )?
            .add_source(
                File::with_name(file_name)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }
}
