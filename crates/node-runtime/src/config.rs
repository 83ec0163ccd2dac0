//! # Node Configuration
//!
//! Defaults for every runtime parameter, overridable from `DP_*` environment
//! variables.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DP_DATA_DIR` | `storage.data_dir` |
//! | `DP_MAX_ENTRIES` | `storage.max_entries` |
//! | `DP_MIN_DISK_SPACE_PERCENT` | `storage.min_disk_space_percent` |
//! | `DP_SHUTDOWN_TIMEOUT_SECS` | `storage.shutdown_timeout_secs` |
//! | `DP_CHANNEL_CAPACITY` | `sequencer.channel_capacity` |
//! | `DP_MAX_BATCH_SIZE` | `sequencer.max_batch_size` |
//! | `DP_ADMIN_PUBKEY` | `sequencer.admin` (compressed hex) |
//! | `DP_REGISTRATION_POLICY` | `sequencer.registry.policy` |
//! | `DP_MAX_TOKENS` | `sequencer.registry.max_tokens` |

use dp_01_state_store::StoreConfig;
use dp_03_token_registry::RegistrationPolicy;
use dp_05_sequencer::SequencerConfig;
use shared_crypto::PublicKey;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    pub storage: StorageConfig,
    pub sequencer: SequencerConfig,
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding store snapshots.
    pub data_dir: PathBuf,
    /// Entry bound of the authenticated store.
    pub max_entries: usize,
    /// Minimum free disk space percentage before snapshot writes are refused.
    pub min_disk_space_percent: u8,
    /// How long shutdown waits for queued requests to drain.
    pub shutdown_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            max_entries: StoreConfig::default().max_entries,
            min_disk_space_percent: 5,
            shutdown_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("DP_ADMIN_PUBKEY is not a compressed secp256k1 key: {0}")]
    InvalidAdminKey(String),
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DP_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(max) = parse(&lookup, "DP_MAX_ENTRIES")? {
            self.storage.max_entries = max;
        }
        if let Some(percent) = parse::<u8, _>(&lookup, "DP_MIN_DISK_SPACE_PERCENT")? {
            if percent > 100 {
                return Err(ConfigError::InvalidValue {
                    var: "DP_MIN_DISK_SPACE_PERCENT",
                    value: percent.to_string(),
                });
            }
            self.storage.min_disk_space_percent = percent;
        }
        if let Some(secs) = parse(&lookup, "DP_SHUTDOWN_TIMEOUT_SECS")? {
            self.storage.shutdown_timeout_secs = secs;
        }

        if let Some(capacity) = parse(&lookup, "DP_CHANNEL_CAPACITY")? {
            self.sequencer.channel_capacity = capacity;
        }
        if let Some(size) = parse(&lookup, "DP_MAX_BATCH_SIZE")? {
            self.sequencer.max_batch_size = size;
        }
        if let Some(hex_key) = lookup("DP_ADMIN_PUBKEY") {
            let admin = PublicKey::from_hex(&hex_key)
                .map_err(|e| ConfigError::InvalidAdminKey(e.to_string()))?;
            self.sequencer.admin = Some(admin);
        }
        if let Some(policy) = lookup("DP_REGISTRATION_POLICY") {
            self.sequencer.registry.policy = parse_policy(&policy)?;
        }
        if let Some(max) = parse(&lookup, "DP_MAX_TOKENS")? {
            self.sequencer.registry.max_tokens = Some(max);
        }

        Ok(self)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            max_entries: self.storage.max_entries,
        }
    }
}

fn parse<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

fn parse_policy(value: &str) -> Result<RegistrationPolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "unchecked" => Ok(RegistrationPolicy::Unchecked),
        "idempotent" => Ok(RegistrationPolicy::Idempotent),
        "reject" => Ok(RegistrationPolicy::Reject),
        _ => Err(ConfigError::InvalidValue {
            var: "DP_REGISTRATION_POLICY",
            value: value.to_string(),
        }),
    }
}
