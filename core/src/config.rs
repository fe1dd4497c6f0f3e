//! Client configuration and transport pool settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeout used when `Config::timeout` is zero.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// Idle connections kept across all hosts.
pub const MAX_IDLE_CONNECTIONS: usize = 100;

/// Idle connections kept per host.
pub const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// How long an idle pooled connection is kept before being closed.
pub const IDLE_CONNECTION_TIMEOUT: Duration = Duration::from_secs(90);

/// Options recognised by `Client`.
///
/// Can be changed between calls through `Client::config_mut`; the next call
/// picks up the new values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Whole-request timeout. Zero means `DEFAULT_TIMEOUT`.
    #[serde(rename = "timeout_ms", with = "duration_ms", default)]
    pub timeout: Duration,
    /// Record a request/response dump after every successful exchange.
    #[serde(default)]
    pub debug: bool,
}

impl Config {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The timeout actually applied to a send.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
