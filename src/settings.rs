use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub source_url: Url,
    pub source_token: String,
    pub auth_token: String,
    pub debug: bool,
    pub enable_swagger: bool,
    pub demo_classes: bool,
    pub cache_ttl_secs: u64,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // APP_SOURCE_URL, APP_AUTH_TOKEN, ...
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .set_default("source_url", "http://localhost:54321/functions/v1/classes")?
            .set_default("source_token", "")?
            .set_default("auth_token", "default-token-change-me")?
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("demo_classes", true)?
            .set_default("cache_ttl_secs", 60)?
            .set_default("port", 8080)?
            .build()?;

        config.try_deserialize()
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Settings {
            source_url: Url::parse("https://example.com/classes").unwrap(),
            source_token: "source-token".to_string(),
            auth_token: "secret".to_string(),
            debug: false,
            enable_swagger: true,
            demo_classes: false,
            cache_ttl_secs: 0,
            port: 8080,
        }
    }
}
