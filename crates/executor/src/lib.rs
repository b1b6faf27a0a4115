//! AION Executor
//!
//! Bounded-retry execution of ledger operations plus pre-flight health
//! gating. The executor wraps a single submit-and-confirm or query call
//! against a [`aion_core::LedgerClient`], retries transient failures up to a
//! configured bound with a fixed delay, and short-circuits on errors that a
//! retry can never fix.
//!
//! Retry attempts resubmit: callers must either rebuild transactions to be
//! naturally idempotent or accept at-least-once semantics. The executor does
//! not deduplicate.

pub mod executor;
pub mod health;

pub use executor::{LedgerExecutor, Operation, OperationFailure, TransactionSuccess};
pub use health::{perform_health_check, HealthCheckResult, HEALTH_PROBES};
