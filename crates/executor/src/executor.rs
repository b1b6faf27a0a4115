//! Bounded-retry execution of ledger operations.

use std::future::Future;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, warn};
use uuid::Uuid;

use aion_core::{
    LedgerClient, LedgerError, LedgerQuery, LedgerResult, QueryResponse, Receipt, RetryPolicy,
    SignedTransaction, SubmitAck,
};

/// One unit of ledger work: a human-readable label plus an optional
/// metadata bag carried into the logs for correlation.
#[derive(Debug, Clone, Default)]
pub struct Operation {
    label: String,
    metadata: Map<String, Value>,
}

impl Operation {
    /// Creates an operation with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            metadata: Map::new(),
        }
    }

    /// Attaches a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The operation label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The metadata bag.
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

/// Successful submit-and-confirm outcome.
#[derive(Debug, Clone)]
pub struct TransactionSuccess {
    /// The node's acknowledgement of the accepted submission
    pub ack: SubmitAck,
    /// The authoritative receipt with a success status
    pub receipt: Receipt,
    /// Attempts consumed, including the successful one
    pub attempts: u32,
}

/// An operation that did not complete within its retry budget, or hit a
/// terminal error.
///
/// The caller decides whether this aborts the surrounding workflow or is
/// merely recorded.
#[derive(Debug, Clone, Error)]
#[error("operation '{label}' failed after {attempts_made} attempt(s)")]
pub struct OperationFailure {
    /// Label of the failed operation
    pub label: String,
    /// Attempts made before giving up
    pub attempts_made: u32,
    /// The last underlying error
    #[source]
    pub last_error: LedgerError,
}

/// Executes ledger operations with bounded, fixed-delay retry.
///
/// The client handle and retry policy are injected at construction; the
/// executor holds no other state and imposes no cross-operation ordering.
pub struct LedgerExecutor<C> {
    client: Arc<C>,
    policy: RetryPolicy,
}

impl<C: LedgerClient> LedgerExecutor<C> {
    /// Creates an executor over `client` with the given retry policy.
    pub fn new(client: Arc<C>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// The retry policy in effect.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// The underlying client handle.
    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Submits a transaction and waits for its receipt, retrying transient
    /// failures.
    ///
    /// `build` is invoked once per attempt so time-sensitive fields (ids,
    /// signatures, amounts derived from current state) are fresh on every
    /// try, never just the first. Every retry is a new submission.
    pub async fn execute_transaction<F, Fut>(
        &self,
        operation: Operation,
        build: F,
    ) -> Result<TransactionSuccess, OperationFailure>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = LedgerResult<SignedTransaction>>,
    {
        let client = &self.client;
        let ((ack, receipt), attempts) = self
            .run_with_retry(&operation, || {
                let built = build();
                async move {
                    let transaction = built.await?;
                    let ack = client.submit(transaction).await?;
                    let receipt = client.transaction_receipt(&ack.transaction_id).await?;
                    if receipt.status.is_success() {
                        Ok((ack, receipt))
                    } else {
                        Err(LedgerError::FailedReceipt {
                            transaction_id: receipt.transaction_id,
                            status: receipt.status,
                        })
                    }
                }
            })
            .await?;
        Ok(TransactionSuccess {
            ack,
            receipt,
            attempts,
        })
    }

    /// Runs a read-only query, retrying transient failures.
    ///
    /// Queries have no side effects, so the same query value is reused
    /// verbatim on every attempt.
    pub async fn execute_query(
        &self,
        operation: Operation,
        query: LedgerQuery,
    ) -> Result<QueryResponse, OperationFailure> {
        let client = &self.client;
        let (response, _attempts) = self
            .run_with_retry(&operation, || {
                let query = query.clone();
                async move { client.query(query).await }
            })
            .await?;
        Ok(response)
    }

    /// Runs the composite pre-flight health check against the client.
    pub async fn health_check(&self) -> crate::health::HealthCheckResult {
        crate::health::perform_health_check(self.client.as_ref()).await
    }

    /// The retry loop shared by submits and queries.
    ///
    /// ATTEMPT(n) -> success => DONE(Success)
    /// ATTEMPT(n) -> terminal error => DONE(Failure)
    /// ATTEMPT(n) -> retryable, n < max => WAIT(base_delay) -> ATTEMPT(n+1)
    /// ATTEMPT(n) -> retryable, n == max => DONE(Failure)
    async fn run_with_retry<T, F, Fut>(
        &self,
        operation: &Operation,
        attempt_fn: F,
    ) -> Result<(T, u32), OperationFailure>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = LedgerResult<T>>,
    {
        let correlation = Uuid::new_v4();
        let max_attempts = self.policy.max_attempts();
        if !operation.metadata.is_empty() {
            debug!(
                "[{}] starting '{}' metadata={}",
                correlation,
                operation.label,
                serde_json::Value::Object(operation.metadata.clone())
            );
        }

        let mut attempt = 1u32;
        loop {
            match attempt_fn().await {
                Ok(value) => {
                    debug!(
                        "[{}] '{}' succeeded on attempt {}/{}",
                        correlation, operation.label, attempt, max_attempts
                    );
                    return Ok((value, attempt));
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    warn!(
                        "[{}] attempt {}/{} for '{}' failed: {}; retrying in {}ms",
                        correlation,
                        attempt,
                        max_attempts,
                        operation.label,
                        e,
                        self.policy.base_delay_ms()
                    );
                    sleep(self.policy.base_delay()).await;
                    attempt += 1;
                }
                Err(e) => {
                    if e.is_retryable() {
                        error!(
                            "[{}] '{}' exhausted {} attempt(s): {}",
                            correlation, operation.label, attempt, e
                        );
                    } else {
                        error!(
                            "[{}] '{}' hit a terminal error on attempt {}: {}",
                            correlation, operation.label, attempt, e
                        );
                    }
                    return Err(OperationFailure {
                        label: operation.label.clone(),
                        attempts_made: attempt,
                        last_error: e,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_builder_collects_metadata() {
        let op = Operation::new("mint batch")
            .with_metadata("token", "0.0.5005")
            .with_metadata("amount", 250);
        assert_eq!(op.label(), "mint batch");
        assert_eq!(op.metadata()["token"], "0.0.5005");
        assert_eq!(op.metadata()["amount"], 250);
    }

    #[test]
    fn failure_display_reports_attempts() {
        let failure = OperationFailure {
            label: "submit message".into(),
            attempts_made: 3,
            last_error: LedgerError::Busy("throttled".into()),
        };
        let text = failure.to_string();
        assert!(text.contains("submit message"));
        assert!(text.contains("3 attempt(s)"));
    }
}
