use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub hasher: HasherConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Shared signing secret; length is validated when the token codec is
    /// built at startup, and a violation is fatal.
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_access_ttl_minutes")]
    pub access_ttl_minutes: i64,
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: i64,
}

impl JwtConfig {
    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_ttl_minutes)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_ttl_days)
    }
}

/// Argon2 cost parameters. Defaults match the argon2 crate defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct HasherConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_ttl_minutes() -> i64 {
    30
}

fn default_refresh_ttl_days() -> i64 {
    7
}

fn default_memory_kib() -> u32 {
    19_456
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
