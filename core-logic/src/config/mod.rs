use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest page the list endpoints accept.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Fixed wait applied once every client in a pass has been rate limited.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(16 * 60);

/// Tunables for the sweep engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub page_size: u32,
    #[serde(with = "duration_secs")]
    pub backoff: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl SweepConfig {
    pub fn new(page_size: u32, backoff: Duration) -> Self {
        Self { page_size, backoff }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                reason: format!("must be between 1 and {}", MAX_PAGE_SIZE),
            });
        }
        if self.backoff.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "backoff".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
