use std::env;
use std::fmt;
use std::time::Duration;

use chrono::Utc;
use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::jwt::DEFAULT_TOKEN_LIFETIME;

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_lifetime_seconds")]
    pub default_lifetime_seconds: u64,
}

fn default_lifetime_seconds() -> u64 {
    DEFAULT_TOKEN_LIFETIME.as_secs()
}

impl JwtConfig {
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub fn default_lifetime(&self) -> Duration {
        Duration::from_secs(self.default_lifetime_seconds)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("default_lifetime_seconds", &self.default_lifetime_seconds)
            .finish()
    }
}

impl AuthConfig {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (CHIRPY_JWT__SECRET, CHIRPY_JWT__DEFAULT_LIFETIME_SECONDS)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
                .add_source(
                    Environment::with_prefix("CHIRPY")
                        .prefix_separator("_")
                        .separator("__"),
                ),
        )
    }

    /// Build and validate configuration from prepared sources.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: AuthConfig = builder.build()?.try_deserialize()?;

        if config.jwt.secret.is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must not be empty".to_string(),
            ));
        }

        let lifetime = config.jwt.default_lifetime_seconds;
        if lifetime == 0 {
            return Err(ConfigError::Message(
                "jwt.default_lifetime_seconds must be greater than zero".to_string(),
            ));
        }

        let representable = chrono::Duration::from_std(config.jwt.default_lifetime())
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .is_some();
        if !representable {
            return Err(ConfigError::Message(format!(
                "jwt.default_lifetime_seconds {} is out of range",
                lifetime
            )));
        }

        Ok(config)
    }
}
