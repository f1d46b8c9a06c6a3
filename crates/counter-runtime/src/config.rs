//! Runtime configuration from environment variables.
//!
//! ## Environment Variables
//!
//! - `COUNTER_PROGRAM_ID`: deployment id, 64 hex chars (default: all zero)
//! - `COUNTER_NAMESPACE`: record namespace tag (default: `counter`)
//! - `COUNTER_LOG_LEVEL` or `RUST_LOG`: log filter (default: info)
//! - `COUNTER_JSON_LOGS`: JSON formatted logs (default: false)
//! - `COUNTER_ALLOW_DEV_PROGRAM_ID`: accept the all-zero program id (default: false)

use counter_accounts::{CounterConfig, CounterError};
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("COUNTER_PROGRAM_ID must be 32 bytes of hex: {0}")]
    InvalidProgramId(String),

    #[error(
        "Program id is the all-zero development value. \
         Set COUNTER_PROGRAM_ID or COUNTER_ALLOW_DEV_PROGRAM_ID=true."
    )]
    InsecureProgramId,

    #[error("Invalid counter configuration: {0}")]
    Counter(#[from] CounterError),
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Counter core configuration.
    pub counter: CounterConfig,
    /// Log filter directive.
    pub log_level: String,
    /// Emit logs as JSON.
    pub json_logs: bool,
    /// Accept the all-zero program id.
    pub allow_dev_program_id: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            counter: CounterConfig::default(),
            log_level: "info".to_string(),
            json_logs: false,
            allow_dev_program_id: false,
        }
    }
}

fn flag(value: Option<String>) -> Option<bool> {
    value.map(|v| v.to_lowercase() == "true" || v == "1")
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(program_id) = lookup("COUNTER_PROGRAM_ID") {
            let bytes = hex::decode(program_id.trim())
                .map_err(|e| ConfigError::InvalidProgramId(e.to_string()))?;
            config.counter.program_id = bytes.as_slice().try_into().map_err(|_| {
                ConfigError::InvalidProgramId(format!("got {} bytes", bytes.len()))
            })?;
        }

        if let Some(namespace) = lookup("COUNTER_NAMESPACE") {
            config.counter.namespace = namespace.into_bytes();
        }

        if let Some(level) = lookup("COUNTER_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.log_level = level;
        }

        if let Some(json) = flag(lookup("COUNTER_JSON_LOGS")) {
            config.json_logs = json;
        }

        if let Some(allow) = flag(lookup("COUNTER_ALLOW_DEV_PROGRAM_ID")) {
            config.allow_dev_program_id = allow;
        }

        Ok(config)
    }

    /// Validate configuration before serving requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.counter.validate()?;
        if self.counter.program_id == [0u8; 32] && !self.allow_dev_program_id {
            return Err(ConfigError::InsecureProgramId);
        }
        Ok(())
    }
}
