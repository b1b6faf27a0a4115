//! Error taxonomy for ledger operations.
//!
//! Whether a failure is worth retrying is a structural property of the error
//! value, never inferred from message text. The executor consults
//! [`LedgerError::is_retryable`] and nothing else.

use thiserror::Error;

use crate::types::{ReceiptStatus, TransactionId};

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failure of a single ledger operation.
///
/// Transient conditions (network blips, overloaded nodes, receipts that have
/// not materialized yet) are retryable; everything that indicates the request
/// as built can never succeed is terminal and short-circuits the retry loop.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// Network-level failure reaching the node
    #[error("transport failure: {0}")]
    Transport(String),

    /// The request did not complete within the client timeout
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// The node reported itself temporarily overloaded
    #[error("node busy: {0}")]
    Busy(String),

    /// No receipt is available yet for the transaction
    #[error("receipt not yet available for {0}")]
    ReceiptPending(TransactionId),

    /// The receipt reported a non-success consensus status
    #[error("transaction {transaction_id} failed with status {status}")]
    FailedReceipt {
        /// Transaction the receipt belongs to
        transaction_id: TransactionId,
        /// Reported consensus status
        status: ReceiptStatus,
    },

    /// The request was malformed or structurally invalid
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The payer account cannot cover the operation
    #[error("insufficient payer balance: {0}")]
    InsufficientBalance(String),

    /// The transaction id was already executed on the network
    #[error("duplicate transaction {0}")]
    DuplicateTransaction(TransactionId),

    /// Missing or rejected authorization
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// An application-level RPC error with no narrower mapping
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message from the node
        message: String,
    },

    /// The node returned a response the client could not interpret
    #[error("protocol violation: {0}")]
    Protocol(String),
}

impl LedgerError {
    /// Whether a fresh attempt could still succeed.
    ///
    /// Unrecognized RPC errors are deliberately terminal: retrying them
    /// burns attempt budget and, for submissions, risks duplicate side
    /// effects.
    pub fn is_retryable(&self) -> bool {
        match self {
            LedgerError::Transport(_)
            | LedgerError::Timeout(_)
            | LedgerError::Busy(_)
            | LedgerError::ReceiptPending(_) => true,
            LedgerError::FailedReceipt { status, .. } => status.is_retryable(),
            LedgerError::InvalidRequest(_)
            | LedgerError::InsufficientBalance(_)
            | LedgerError::DuplicateTransaction(_)
            | LedgerError::Unauthorized(_)
            | LedgerError::Rpc { .. }
            | LedgerError::Protocol(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountId;

    fn tx_id() -> TransactionId {
        TransactionId::new(AccountId::new(0, 0, 1001), 1_700_000_000, 0)
    }

    #[test]
    fn transient_errors_are_retryable() {
        assert!(LedgerError::Transport("connection reset".into()).is_retryable());
        assert!(LedgerError::Timeout(30_000).is_retryable());
        assert!(LedgerError::Busy("throttled".into()).is_retryable());
        assert!(LedgerError::ReceiptPending(tx_id()).is_retryable());
    }

    #[test]
    fn terminal_errors_are_not_retryable() {
        assert!(!LedgerError::InvalidRequest("bad shape".into()).is_retryable());
        assert!(!LedgerError::InsufficientBalance("0.0.1001".into()).is_retryable());
        assert!(!LedgerError::DuplicateTransaction(tx_id()).is_retryable());
        assert!(!LedgerError::Unauthorized("key mismatch".into()).is_retryable());
        assert!(!LedgerError::Rpc { code: -32050, message: "odd".into() }.is_retryable());
        assert!(!LedgerError::Protocol("truncated body".into()).is_retryable());
    }

    #[test]
    fn failed_receipt_follows_status_classification() {
        let retryable = LedgerError::FailedReceipt {
            transaction_id: tx_id(),
            status: ReceiptStatus::Busy,
        };
        let terminal = LedgerError::FailedReceipt {
            transaction_id: tx_id(),
            status: ReceiptStatus::InsufficientPayerBalance,
        };
        assert!(retryable.is_retryable());
        assert!(!terminal.is_retryable());
    }
}
