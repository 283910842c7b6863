//! Client configuration.
//!
//! One `ClientConfig` is applied to the shared transport when it is built;
//! there is no per-call override.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Timeout applied to every request when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(40);

const TIMEOUT_ENV: &str = "NETCALL_TIMEOUT_SECS";
const STRICT_ENV: &str = "NETCALL_STRICT_DECODING";

/// How a typed call treats a body that does not decode into the target type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Report success with no value.
    #[default]
    Lenient,
    /// Report a `DATA_NOT_DECODED` failure.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(rename = "timeout_secs", with = "duration_secs")]
    pub timeout: Duration,
    pub decode_policy: DecodePolicy,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            decode_policy: DecodePolicy::Lenient,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Defaults overridden by `NETCALL_TIMEOUT_SECS` and
    /// `NETCALL_STRICT_DECODING`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: TIMEOUT_ENV,
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(STRICT_ENV) {
            let normalized = raw.trim().to_ascii_lowercase();
            config.decode_policy = match normalized.as_str() {
                "1" | "true" | "yes" => DecodePolicy::Strict,
                "0" | "false" | "no" | "" => DecodePolicy::Lenient,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: STRICT_ENV,
                        value: raw,
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
