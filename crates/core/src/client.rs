//! The narrow client interface against a remote ledger.
//!
//! Implementations are handed to the executor fully configured (endpoint,
//! operator identity, credentials). The handle is shared read-only; nothing
//! here takes `&mut self`, and no method retries on its own. Bounded retry
//! belongs to the executor.

use async_trait::async_trait;

use crate::error::LedgerResult;
use crate::types::{
    AccountBalance, AccountId, AccountInfo, LedgerQuery, NodeInfo, QueryResponse, Receipt,
    SignedTransaction, SubmitAck, TransactionId,
};

/// Submit, confirm and query operations against a remote ledger node.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// The operator identity this client was configured with, if any.
    ///
    /// Local accessor only; resolving the identity on-network is
    /// [`account_info`](Self::account_info).
    fn operator_account(&self) -> Option<AccountId>;

    /// Basic connectivity probe.
    async fn ping(&self) -> LedgerResult<NodeInfo>;

    /// Resolves an account on the network.
    async fn account_info(&self, account: AccountId) -> LedgerResult<AccountInfo>;

    /// Queries an account balance.
    async fn account_balance(&self, account: AccountId) -> LedgerResult<AccountBalance>;

    /// Submits a signed transaction; returns the node's acknowledgement.
    ///
    /// Acceptance is not consensus: pair with
    /// [`transaction_receipt`](Self::transaction_receipt) for the
    /// authoritative outcome.
    async fn submit(&self, transaction: SignedTransaction) -> LedgerResult<SubmitAck>;

    /// Fetches the authoritative receipt for a submitted transaction.
    async fn transaction_receipt(&self, id: &TransactionId) -> LedgerResult<Receipt>;

    /// Runs a read-only query.
    async fn query(&self, query: LedgerQuery) -> LedgerResult<QueryResponse>;
}
