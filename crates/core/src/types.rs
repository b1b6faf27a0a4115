//! Ledger primitive types.
//!
//! Account and transaction identifiers use the canonical `shard.realm.num`
//! textual form on the wire, so both serialize as strings.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Account identity on the ledger, `shard.realm.num` (e.g. `0.0.1001`).
///
/// Used for the operator identity, payer accounts and balance queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId {
    /// Shard number
    pub shard: u64,
    /// Realm number
    pub realm: u64,
    /// Account number within the realm
    pub num: u64,
}

impl AccountId {
    /// Creates an account id from its three components.
    pub fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

impl FromStr for AccountId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let mut next = |name: &str| {
            parts
                .next()
                .ok_or_else(|| format!("account id '{}': missing {}", s, name))?
                .parse::<u64>()
                .map_err(|_| format!("account id '{}': invalid {}", s, name))
        };
        let shard = next("shard")?;
        let realm = next("realm")?;
        let num = next("num")?;
        if parts.next().is_some() {
            return Err(format!("account id '{}': trailing components", s));
        }
        Ok(Self { shard, realm, num })
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Transaction identity: payer account plus the valid-start instant,
/// `0.0.1001@1700000000.000000042` on the wire.
///
/// The valid-start instant makes every rebuilt transaction distinct, which is
/// what keeps retry attempts from colliding with an earlier submission that
/// actually reached consensus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId {
    /// Paying account
    pub account: AccountId,
    /// Valid-start seconds since the epoch
    pub valid_start_secs: i64,
    /// Valid-start sub-second nanoseconds
    pub valid_start_nanos: u32,
}

impl TransactionId {
    /// Creates a transaction id from explicit components.
    pub fn new(account: AccountId, valid_start_secs: i64, valid_start_nanos: u32) -> Self {
        Self {
            account,
            valid_start_secs,
            valid_start_nanos,
        }
    }

    /// Generates a fresh transaction id for `account` with the current time
    /// as the valid-start instant.
    pub fn generate(account: AccountId) -> Self {
        let now = chrono::Utc::now();
        Self {
            account,
            valid_start_secs: now.timestamp(),
            valid_start_nanos: now.timestamp_subsec_nanos(),
        }
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}.{:09}",
            self.account, self.valid_start_secs, self.valid_start_nanos
        )
    }
}

impl FromStr for TransactionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (account, instant) = s
            .split_once('@')
            .ok_or_else(|| format!("transaction id '{}': missing '@'", s))?;
        let account: AccountId = account.parse()?;
        let (secs, nanos) = instant
            .split_once('.')
            .ok_or_else(|| format!("transaction id '{}': missing nanos", s))?;
        let valid_start_secs = secs
            .parse::<i64>()
            .map_err(|_| format!("transaction id '{}': invalid seconds", s))?;
        if nanos.len() != 9 {
            return Err(format!("transaction id '{}': nanos must be 9 digits", s));
        }
        let valid_start_nanos = nanos
            .parse::<u32>()
            .map_err(|_| format!("transaction id '{}': invalid nanos", s))?;
        Ok(Self {
            account,
            valid_start_secs,
            valid_start_nanos,
        })
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// A ready-to-submit, signed transaction produced by a caller's builder.
///
/// The payload is opaque to the execution layer; only the id is inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// Transaction identity
    pub id: TransactionId,
    /// Serialized signed transaction bytes
    pub payload: Vec<u8>,
}

impl SignedTransaction {
    /// Wraps signed payload bytes under the given transaction id.
    pub fn new(id: TransactionId, payload: Vec<u8>) -> Self {
        Self { id, payload }
    }
}

/// The network's acknowledgement of a submission, before consensus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAck {
    /// Id of the submitted transaction
    pub transaction_id: TransactionId,
    /// Node that accepted the submission
    pub node: String,
}

/// Receipt status codes reported by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceiptStatus {
    /// Transaction reached consensus and succeeded
    Success,
    /// Node temporarily overloaded
    Busy,
    /// Consensus not yet reached
    Unknown,
    /// No receipt is available yet for the transaction
    ReceiptNotFound,
    /// The transaction id was already executed
    DuplicateTransaction,
    /// The payer cannot cover fees or transfers
    InsufficientPayerBalance,
    /// The transaction is structurally invalid
    InvalidTransaction,
    /// Missing or invalid authorization
    Unauthorized,
}

impl ReceiptStatus {
    /// Whether this status confirms success.
    pub fn is_success(self) -> bool {
        self == ReceiptStatus::Success
    }

    /// Whether a fresh submission could still succeed.
    ///
    /// `Busy`, `Unknown` and `ReceiptNotFound` are conditions the network
    /// resolves on its own; everything else means the request as built can
    /// never succeed.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ReceiptStatus::Busy | ReceiptStatus::Unknown | ReceiptStatus::ReceiptNotFound
        )
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReceiptStatus::Success => "SUCCESS",
            ReceiptStatus::Busy => "BUSY",
            ReceiptStatus::Unknown => "UNKNOWN",
            ReceiptStatus::ReceiptNotFound => "RECEIPT_NOT_FOUND",
            ReceiptStatus::DuplicateTransaction => "DUPLICATE_TRANSACTION",
            ReceiptStatus::InsufficientPayerBalance => "INSUFFICIENT_PAYER_BALANCE",
            ReceiptStatus::InvalidTransaction => "INVALID_TRANSACTION",
            ReceiptStatus::Unauthorized => "UNAUTHORIZED",
        };
        f.write_str(name)
    }
}

/// The ledger's authoritative confirmation record for a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Id of the confirmed transaction
    pub transaction_id: TransactionId,
    /// Consensus outcome
    pub status: ReceiptStatus,
    /// Consensus timestamp, present once consensus was reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consensus_timestamp: Option<String>,
}

/// Balance of an account in tinybars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    /// Queried account
    pub account: AccountId,
    /// Balance in tinybars
    pub tinybars: u64,
}

/// On-network view of an account, as returned by operator resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Account identity
    pub account: AccountId,
    /// Public key associated with the account
    pub key: String,
    /// Whether the account has been deleted
    #[serde(default)]
    pub deleted: bool,
}

/// Node identification returned by the connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    /// Node software version
    pub version: String,
    /// Network the node serves (e.g. `testnet`)
    pub network: String,
}

/// A read-only query envelope: wire method name plus positional parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerQuery {
    /// Wire method name
    pub method: String,
    /// Positional JSON parameters
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
}

impl LedgerQuery {
    /// Creates a query for `method` with no parameters.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Vec::new(),
        }
    }

    /// Appends a positional parameter.
    pub fn with_param(mut self, param: impl Into<serde_json::Value>) -> Self {
        self.params.push(param.into());
        self
    }
}

/// Raw result of a read-only query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse(pub serde_json::Value);

impl QueryResponse {
    /// Consumes the response, yielding the underlying JSON value.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_round_trip() {
        let id: AccountId = "0.0.1001".parse().unwrap();
        assert_eq!(id, AccountId::new(0, 0, 1001));
        assert_eq!(id.to_string(), "0.0.1001");
    }

    #[test]
    fn account_id_rejects_garbage() {
        assert!("".parse::<AccountId>().is_err());
        assert!("0.0".parse::<AccountId>().is_err());
        assert!("0.0.x".parse::<AccountId>().is_err());
        assert!("0.0.1.2".parse::<AccountId>().is_err());
    }

    #[test]
    fn transaction_id_round_trip() {
        let id: TransactionId = "0.0.1001@1700000000.000000042".parse().unwrap();
        assert_eq!(id.account, AccountId::new(0, 0, 1001));
        assert_eq!(id.valid_start_secs, 1_700_000_000);
        assert_eq!(id.valid_start_nanos, 42);
        assert_eq!(id.to_string(), "0.0.1001@1700000000.000000042");
    }

    #[test]
    fn transaction_id_rejects_short_nanos() {
        assert!("0.0.1001@1700000000.42".parse::<TransactionId>().is_err());
        assert!("0.0.1001".parse::<TransactionId>().is_err());
    }

    #[test]
    fn generated_id_carries_account_and_current_instant() {
        let account = AccountId::new(0, 0, 1001);
        let id = TransactionId::generate(account);
        assert_eq!(id.account, account);
        // Post-2023 clock; guards against a zeroed valid-start.
        assert!(id.valid_start_secs > 1_672_531_200);
    }

    #[test]
    fn receipt_status_classification() {
        assert!(ReceiptStatus::Success.is_success());
        assert!(ReceiptStatus::Busy.is_retryable());
        assert!(ReceiptStatus::Unknown.is_retryable());
        assert!(ReceiptStatus::ReceiptNotFound.is_retryable());
        assert!(!ReceiptStatus::DuplicateTransaction.is_retryable());
        assert!(!ReceiptStatus::InsufficientPayerBalance.is_retryable());
        assert!(!ReceiptStatus::InvalidTransaction.is_retryable());
        assert!(!ReceiptStatus::Unauthorized.is_retryable());
    }

    #[test]
    fn receipt_deserializes_wire_shape() {
        let receipt: Receipt = serde_json::from_value(serde_json::json!({
            "transactionId": "0.0.1001@1700000000.000000042",
            "status": "SUCCESS",
            "consensusTimestamp": "1700000001.000000000"
        }))
        .unwrap();
        assert!(receipt.status.is_success());
        assert_eq!(receipt.transaction_id.account.num, 1001);
    }

    #[test]
    fn ids_serialize_as_strings() {
        let id = AccountId::new(0, 0, 7);
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!("0.0.7"));
    }
}
