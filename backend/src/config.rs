//! Configuration management

use anyhow::{bail, Result};

/// Default server host binding.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default database location, next to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:students-data.db";

/// Default CORS allowed origin for local frontend development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// `*` allows any origin; an empty list (or a blank variable) allows none
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            cors_allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env`, the environment and defaults
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            host: lookup("STUDENT_RECORDS_HOST").unwrap_or(defaults.host),
            port: lookup("STUDENT_RECORDS_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_allowed_origins),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("STUDENT_RECORDS_HOST cannot be empty");
        }
        if self.database_url.trim().is_empty() {
            bail!("DATABASE_URL cannot be empty");
        }
        if self.port == 0 {
            bail!("STUDENT_RECORDS_PORT must be non-zero");
        }
        Ok(())
    }

    /// Host and port for `TcpListener::bind`. The host may be a name such as
    /// `localhost`; it is resolved when binding.
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
