//! # AION: Resilient Ledger Execution Layer in Rust
//!
//! A resilient execution layer for operations against Hedera-style
//! distributed ledgers: bounded-retry submission, authoritative receipt
//! confirmation, read-only queries and composite pre-flight health checks.
//!
//! This library re-exports the workspace crates:
//!
//! - [`aion_core`] - Ledger types, error taxonomy, retry policy and the
//!   `LedgerClient` interface
//! - [`aion_config`] - Configuration types and network defaults
//! - [`aion_rpc_client`] - JSON-RPC client implementation
//! - [`aion_executor`] - The retrying operation executor and health check
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use aion_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExecutorConfig::default();
//!     let client = Arc::new(RpcLedgerClient::from_config(&config)?);
//!     let executor = LedgerExecutor::new(client, config.retry.into());
//!
//!     let health = executor.health_check().await;
//!     if !health.healthy {
//!         return Err(format!("node not ready, score {}/3", health.score).into());
//!     }
//!
//!     let balance = executor
//!         .execute_query(
//!             Operation::new("operator balance"),
//!             LedgerQuery::new("getbalance").with_param("0.0.1001"),
//!         )
//!         .await?;
//!     println!("{}", balance.into_inner());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Re-export all public APIs from the workspace crates
pub use aion_config as config;
pub use aion_core as core;
pub use aion_executor as executor;
pub use aion_rpc_client as rpc_client;

/// Common imports for working with the execution layer
pub mod prelude {
    pub use crate::config::{ExecutorConfig, NetworkKind};
    pub use crate::core::{
        AccountId, LedgerClient, LedgerError, LedgerQuery, Receipt, ReceiptStatus, RetryPolicy,
        SignedTransaction, TransactionId,
    };
    pub use crate::executor::{
        HealthCheckResult, LedgerExecutor, Operation, OperationFailure, TransactionSuccess,
    };
    pub use crate::rpc_client::RpcLedgerClient;
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
