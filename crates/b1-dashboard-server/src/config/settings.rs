use anyhow::Result;
use config::{Config, Environment as EnvSource, File};
use serde::{Deserialize, Serialize};

use crate::models::Environment;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub service_layer: ServiceLayerConfig,
    pub credentials: CredentialsConfig,
    pub session: SessionConfig,
    pub databases: Vec<DatabaseEntry>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceLayerConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    /// SAP instances commonly run with self-signed certificates.
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CredentialsConfig {
    pub default_user: String,
    pub default_password: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    pub default_timeout_minutes: i64,
    pub sweep_interval_seconds: u64,
}

/// One selectable company database from the startup configuration.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseEntry {
    pub database: String,
    pub name: String,
    pub engine: String,
}

impl DatabaseEntry {
    /// Environment tag derived from the database engine type.
    pub fn environment(&self) -> &'static str {
        Environment::classify_engine(&self.engine)
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/settings").required(true))
            .add_source(
                EnvSource::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}
