//! AION Configuration Module
//!
//! Configuration types for the AION ledger execution layer: network
//! selection, node endpoint, operator identity and retry settings. The
//! types here are plain serde data; file reading and flag merging happen
//! at the binary boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aion_core::{AccountId, RetryPolicy, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS};

/// Default per-request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Default mainnet JSON-RPC endpoint.
pub const MAINNET_ENDPOINT: &str = "https://mainnet.aionledger.network:50211";

/// Default testnet JSON-RPC endpoint.
pub const TESTNET_ENDPOINT: &str = "https://testnet.aionledger.network:50211";

/// Default previewnet JSON-RPC endpoint.
pub const PREVIEWNET_ENDPOINT: &str = "https://previewnet.aionledger.network:50211";

/// Default endpoint for a locally running node.
pub const LOCAL_ENDPOINT: &str = "http://127.0.0.1:50211";

/// Target network for ledger operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    /// Production network
    Mainnet,
    /// Public test network
    #[default]
    Testnet,
    /// Preview network for unreleased features
    Previewnet,
    /// Locally running node
    Local,
}

impl NetworkKind {
    /// Default JSON-RPC endpoint for this network.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            NetworkKind::Mainnet => MAINNET_ENDPOINT,
            NetworkKind::Testnet => TESTNET_ENDPOINT,
            NetworkKind::Previewnet => PREVIEWNET_ENDPOINT,
            NetworkKind::Local => LOCAL_ENDPOINT,
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkKind::Mainnet => write!(f, "mainnet"),
            NetworkKind::Testnet => write!(f, "testnet"),
            NetworkKind::Previewnet => write!(f, "previewnet"),
            NetworkKind::Local => write!(f, "local"),
        }
    }
}

impl FromStr for NetworkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(NetworkKind::Mainnet),
            "testnet" | "test" => Ok(NetworkKind::Testnet),
            "previewnet" | "preview" => Ok(NetworkKind::Previewnet),
            "local" | "localhost" => Ok(NetworkKind::Local),
            _ => Err(format!("Unknown network: {}", s)),
        }
    }
}

/// Operator identity configuration.
///
/// Only the account is configured here; keys stay with the caller-side
/// transaction builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Operator account in `shard.realm.num` form
    pub account: String,
}

/// Retry bounds, mirroring [`RetryPolicy`] for TOML embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts including the first
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds
    pub base_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
        }
    }
}

impl From<RetrySettings> for RetryPolicy {
    fn from(settings: RetrySettings) -> Self {
        RetryPolicy::new(settings.max_attempts, settings.base_delay_ms)
    }
}

/// Configuration error raised by [`ExecutorConfig::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A field holds a value that cannot be used
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Top-level configuration for the execution layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Target network
    pub network: NetworkKind,
    /// Explicit endpoint override; the network default applies when unset
    pub endpoint: Option<String>,
    /// Operator identity
    pub operator: Option<OperatorConfig>,
    /// Retry bounds
    pub retry: RetrySettings,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: Option<u64>,
    /// Basic auth user for the RPC endpoint
    pub rpc_user: Option<String>,
    /// Basic auth password for the RPC endpoint
    pub rpc_pass: Option<String>,
}

impl ExecutorConfig {
    /// The endpoint to connect to: the explicit override or the network
    /// default.
    pub fn resolved_endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.network.default_endpoint())
    }

    /// Per-request timeout in milliseconds.
    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
    }

    /// Parses the configured operator account, if any.
    pub fn operator_account(&self) -> Result<Option<AccountId>, ConfigError> {
        match &self.operator {
            None => Ok(None),
            Some(op) => op
                .account
                .parse::<AccountId>()
                .map(Some)
                .map_err(|reason| ConfigError::InvalidValue {
                    field: "operator.account",
                    reason,
                }),
        }
    }

    /// Checks the configuration for values that would fail at first use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field: "endpoint",
                    reason: format!("'{}' is not an http(s) URL", endpoint),
                });
            }
        }
        if self.request_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be greater than zero".into(),
            });
        }
        if self.rpc_user.is_some() != self.rpc_pass.is_some() {
            return Err(ConfigError::InvalidValue {
                field: "rpc_user",
                reason: "rpc_user and rpc_pass must be set together".into(),
            });
        }
        self.operator_account()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ExecutorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.network, NetworkKind::Testnet);
        assert_eq!(config.resolved_endpoint(), TESTNET_ENDPOINT);
        assert_eq!(config.request_timeout_ms(), DEFAULT_REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn network_kind_round_trip() {
        for name in ["mainnet", "testnet", "previewnet", "local"] {
            let kind: NetworkKind = name.parse().unwrap();
            assert_eq!(kind.to_string(), name);
        }
        assert!("stagenet".parse::<NetworkKind>().is_err());
    }

    #[test]
    fn endpoint_override_wins() {
        let config = ExecutorConfig {
            endpoint: Some("http://10.0.0.5:50211".into()),
            ..Default::default()
        };
        assert_eq!(config.resolved_endpoint(), "http://10.0.0.5:50211");
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let config = ExecutorConfig {
            endpoint: Some("ftp://node.example".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unpaired_auth() {
        let config = ExecutorConfig {
            rpc_user: Some("ops".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_operator() {
        let config = ExecutorConfig {
            operator: Some(OperatorConfig {
                account: "not-an-account".into(),
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_toml_document() {
        let config: ExecutorConfig = toml::from_str(
            r#"
            network = "previewnet"
            endpoint = "https://preview.example:50211"

            [operator]
            account = "0.0.1001"

            [retry]
            max_attempts = 5
            base_delay_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.network, NetworkKind::Previewnet);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(
            config.operator_account().unwrap(),
            Some(aion_core::AccountId::new(0, 0, 1001))
        );
        let policy: RetryPolicy = config.retry.into();
        assert_eq!(policy.max_attempts(), 5);
    }

    #[test]
    fn retry_settings_default_when_omitted() {
        let config: ExecutorConfig = toml::from_str("network = \"testnet\"").unwrap();
        assert_eq!(config.retry, RetrySettings::default());
    }
}
