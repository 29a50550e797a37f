use anyhow::{Context, Result};
use config::{Config, Environment, File};
use core_logic::config::{ProxyConfig, SweepConfig};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1/";

#[derive(Debug, Deserialize, Clone)]
pub struct TwitterConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_backoff_minutes")]
    pub backoff_minutes: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_page_size() -> u32 {
    core_logic::MAX_PAGE_SIZE
}

fn default_backoff_minutes() -> u64 {
    16
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            page_size: default_page_size(),
            backoff_minutes: default_backoff_minutes(),
            request_timeout_secs: default_request_timeout_secs(),
            proxy: None,
        }
    }
}

impl TwitterConfig {
    /// Loads the optional TOML file, then `SWEEPER_*` environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix("SWEEPER"))
            .build()
            .context("Failed to read configuration")?;

        let config: TwitterConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.sweep_config().validate()?;
        Ok(config)
    }

    pub fn sweep_config(&self) -> SweepConfig {
        let backoff = Duration::from_secs(self.backoff_minutes.saturating_mul(60));
        SweepConfig::new(self.page_size, backoff)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_api_limits() {
        let config = TwitterConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.sweep_config().page_size, 200);
        assert_eq!(config.sweep_config().backoff, Duration::from_secs(16 * 60));
    }

    #[test]
    fn test_huge_backoff_saturates() {
        let config = TwitterConfig {
            backoff_minutes: u64::MAX,
            ..TwitterConfig::default()
        };
        assert_eq!(config.sweep_config().backoff, Duration::from_secs(u64::MAX));
        assert!(config.sweep_config().validate().is_ok());
    }

    #[test]
    fn test_load_reports_bad_value() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "backoff_minutes = \"soon\"").unwrap();

        let err = TwitterConfig::load(file.path().to_str()).unwrap_err();
        assert!(format!("{:#}", err).starts_with("Invalid configuration"));
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "page_size = 50\nbackoff_minutes = 5\n\n[proxy]\nurl = \"http://127.0.0.1:8080\""
        )
        .unwrap();

        let config = TwitterConfig::load(file.path().to_str()).unwrap();

        assert_eq!(config.page_size, 50);
        assert_eq!(config.backoff_minutes, 5);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.proxy.unwrap().url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_load_rejects_oversized_page() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "page_size = 1000").unwrap();

        assert!(TwitterConfig::load(file.path().to_str()).is_err());
    }
}
