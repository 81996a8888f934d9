use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Client configuration, resolved once at startup.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Base URL of the prediction service (e.g. "http://localhost:5000/api")
    pub api_base_url: String,
    /// Per-request timeout enforced by the HTTP client
    pub request_timeout_secs: u64,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

/// Load configuration from defaults, `medipredict.toml` and `MEDIPREDICT_*` variables
pub fn load_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = config::Config::builder()
        .set_default("api_base_url", DEFAULT_API_BASE_URL)?
        .set_default("request_timeout_secs", 30i64)?
        .set_default("log_level", "info")?
        .add_source(config::File::with_name("medipredict").required(false))
        .add_source(config::Environment::with_prefix("MEDIPREDICT"))
        .build()
        .context("Failed to read configuration")?;

    config
        .try_deserialize::<AppConfig>()
        .context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = config::Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)
            .unwrap()
            .set_default("request_timeout_secs", 30i64)
            .unwrap()
            .set_default("log_level", "info")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>()
            .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.log_level, "info");
    }
}
