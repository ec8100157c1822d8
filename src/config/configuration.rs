use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URI: &str = "mongodb://127.0.0.1:27017";
pub const DEFAULT_DATABASE_NAME: &str = "farm2customer";
pub const DEFAULT_ORDER_STATUS: &str = "Pending";

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub backend: String,
    pub uri: String,
    pub name: String,
    pub server_selection_timeout_ms: u64,
}

impl DatabaseSettings {
    pub fn backend(&self) -> Result<DatabaseBackend, ConfigError> {
        match self.backend.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(DatabaseBackend::Mongo),
            "memory" => Ok(DatabaseBackend::Memory),
            other => Err(ConfigError::Message(format!(
                "unknown database backend `{}`, expected `mongo` or `memory`",
                other
            ))),
        }
    }

    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_millis(self.server_selection_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsSettings {
    pub order_status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub defaults: DefaultsSettings,
}

impl Settings {
    /// Built-in defaults, overridden by an optional `config` file in the
    /// working directory. Environment variables are not consulted.
    pub fn new() -> Result<Self, ConfigError> {
        let mut s = Self::defaults()?;
        s.merge(config::File::with_name("config").required(false))?;
        s.try_into()
    }

    fn defaults() -> Result<Config, ConfigError> {
        let mut s = Config::default();
        s.set_default("application.host", "0.0.0.0")?;
        s.set_default("application.port", DEFAULT_PORT as i64)?;
        s.set_default("database.backend", "mongo")?;
        s.set_default("database.uri", DEFAULT_DATABASE_URI)?;
        s.set_default("database.name", DEFAULT_DATABASE_NAME)?;
        s.set_default("database.server_selection_timeout_ms", 30_000_i64)?;
        s.set_default("defaults.order_status", DEFAULT_ORDER_STATUS)?;
        Ok(s)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }
}
