//! # AION Core
//!
//! Core functionality for the AION ledger execution layer.
//!
//! This crate provides the fundamental types and traits shared by every other
//! crate in the workspace:
//!
//! - **Type System**: `AccountId`, `TransactionId`, `SignedTransaction`,
//!   `Receipt` and the other ledger primitives
//! - **Error Handling**: the `LedgerError` taxonomy with structural
//!   retryable/terminal classification
//! - **Retry Policy**: bounded, fixed-delay retry configuration
//! - **Client Interface**: the narrow `LedgerClient` trait the executor
//!   depends on, decoupled from any concrete ledger SDK
//!
//! ## Example
//!
//! ```rust
//! use aion_core::{AccountId, RetryPolicy};
//!
//! let operator: AccountId = "0.0.1001".parse().unwrap();
//! let policy = RetryPolicy::new(3, 2000);
//! assert_eq!(policy.max_attempts(), 3);
//! assert_eq!(operator.to_string(), "0.0.1001");
//! ```

#![warn(missing_docs)]

/// The narrow asynchronous client interface the executor depends on
pub mod client;
/// Core error types and retryable/terminal classification
pub mod error;
/// Bounded fixed-delay retry configuration
pub mod retry;
/// Ledger primitive types
pub mod types;

pub use client::LedgerClient;
pub use error::{LedgerError, LedgerResult};
pub use retry::{RetryPolicy, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_ATTEMPTS};
pub use types::{
    AccountBalance, AccountId, AccountInfo, LedgerQuery, NodeInfo, QueryResponse, Receipt,
    ReceiptStatus, SignedTransaction, SubmitAck, TransactionId,
};
