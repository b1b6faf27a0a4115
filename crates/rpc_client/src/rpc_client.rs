// Copyright (C) 2024-2025 The AION Project.
//
// rpc_client.rs file belongs to the aion project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use aion_config::ExecutorConfig;
use aion_core::{
    AccountBalance, AccountId, AccountInfo, LedgerClient, LedgerError, LedgerQuery, LedgerResult,
    NodeInfo, QueryResponse, Receipt, SignedTransaction, SubmitAck, TransactionId,
};

use crate::models::{codes, RpcRequest, RpcResponse, RpcResponseError};

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// JSON-RPC implementation of [`LedgerClient`].
///
/// One instance per endpoint; the handle is cheap to share behind an `Arc`
/// and is never mutated after construction (the request-id counter is the
/// only moving part).
pub struct RpcLedgerClient {
    endpoint: Url,
    http_client: Client,
    operator: Option<AccountId>,
    timeout_ms: u64,
    request_id: AtomicU64,
}

impl RpcLedgerClient {
    /// Creates a client for `endpoint` with the default request timeout.
    pub fn new(endpoint: Url, operator: Option<AccountId>) -> LedgerResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;
        Ok(Self {
            endpoint,
            http_client,
            operator,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            request_id: AtomicU64::new(1),
        })
    }

    /// Builds a fully configured client from an [`ExecutorConfig`].
    pub fn from_config(config: &ExecutorConfig) -> LedgerResult<Self> {
        config
            .validate()
            .map_err(|e| LedgerError::InvalidRequest(e.to_string()))?;
        let endpoint = Url::parse(config.resolved_endpoint())
            .map_err(|e| LedgerError::InvalidRequest(format!("bad endpoint: {}", e)))?;
        let operator = config
            .operator_account()
            .map_err(|e| LedgerError::InvalidRequest(e.to_string()))?;
        let timeout_ms = config.request_timeout_ms();

        let mut builder = Client::builder().timeout(Duration::from_millis(timeout_ms));

        // Add basic auth if provided
        if let (Some(user), Some(pass)) = (&config.rpc_user, &config.rpc_pass) {
            let auth = format!("{}:{}", user, pass);
            let encoded = general_purpose::STANDARD.encode(auth.as_bytes());
            builder = builder.default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    format!("Basic {}", encoded)
                        .parse()
                        .map_err(|e| LedgerError::InvalidRequest(format!("bad auth header: {}", e)))?,
                );
                headers
            });
        }

        Ok(Self {
            endpoint,
            http_client: builder
                .build()
                .map_err(|e| LedgerError::Transport(e.to_string()))?,
            operator,
            timeout_ms,
            request_id: AtomicU64::new(1),
        })
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn map_transport(&self, error: reqwest::Error) -> LedgerError {
        if error.is_timeout() {
            LedgerError::Timeout(self.timeout_ms)
        } else {
            LedgerError::Transport(error.to_string())
        }
    }

    /// Sends a single JSON-RPC request and returns the raw result value.
    async fn rpc_call(&self, method: &str, params: Vec<Value>) -> LedgerResult<Value> {
        let request = RpcRequest::new(self.request_id.fetch_add(1, Ordering::Relaxed), method, params);
        debug!(method = %request.method, id = request.id, "sending rpc request");

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(LedgerError::Busy(format!("http status {}", status)));
        }
        if !status.is_success() {
            return Err(LedgerError::Transport(format!("http status {}", status)));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::Protocol(format!("invalid response body: {}", e)))?;

        if let Some(error) = body.error {
            debug!(method, code = error.code, "rpc request failed");
            return Err(map_rpc_error(error));
        }
        body.result
            .ok_or_else(|| LedgerError::Protocol("response missing result".to_string()))
    }
}

/// Maps a JSON-RPC error object into the ledger error taxonomy.
///
/// Codes that need request context for a narrower variant (duplicate
/// submissions, missing receipts) stay `Rpc` here and are refined by the
/// calling method.
fn map_rpc_error(error: RpcResponseError) -> LedgerError {
    match error.code {
        codes::NODE_BUSY | codes::PLATFORM_NOT_ACTIVE => LedgerError::Busy(error.message),
        codes::INTERNAL_ERROR => LedgerError::Transport(error.message),
        codes::PARSE_ERROR
        | codes::INVALID_REQUEST
        | codes::METHOD_NOT_FOUND
        | codes::INVALID_PARAMS => LedgerError::InvalidRequest(error.message),
        codes::INSUFFICIENT_PAYER_BALANCE => LedgerError::InsufficientBalance(error.message),
        codes::UNAUTHORIZED => LedgerError::Unauthorized(error.message),
        code => LedgerError::Rpc {
            code,
            message: error.message,
        },
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    fn operator_account(&self) -> Option<AccountId> {
        self.operator
    }

    async fn ping(&self) -> LedgerResult<NodeInfo> {
        let value = self.rpc_call("getnodeinfo", Vec::new()).await?;
        serde_json::from_value(value)
            .map_err(|e| LedgerError::Protocol(format!("malformed node info: {}", e)))
    }

    async fn account_info(&self, account: AccountId) -> LedgerResult<AccountInfo> {
        let value = self
            .rpc_call("getaccount", vec![Value::from(account.to_string())])
            .await?;
        serde_json::from_value(value)
            .map_err(|e| LedgerError::Protocol(format!("malformed account info: {}", e)))
    }

    async fn account_balance(&self, account: AccountId) -> LedgerResult<AccountBalance> {
        let value = self
            .rpc_call("getbalance", vec![Value::from(account.to_string())])
            .await?;
        serde_json::from_value(value)
            .map_err(|e| LedgerError::Protocol(format!("malformed balance: {}", e)))
    }

    async fn submit(&self, transaction: SignedTransaction) -> LedgerResult<SubmitAck> {
        let payload = general_purpose::STANDARD.encode(&transaction.payload);
        let params = vec![serde_json::json!({
            "transactionId": transaction.id.to_string(),
            "payload": payload,
        })];
        match self.rpc_call("submittransaction", params).await {
            Ok(value) => serde_json::from_value(value)
                .map_err(|e| LedgerError::Protocol(format!("malformed submit ack: {}", e))),
            Err(LedgerError::Rpc { code, .. }) if code == codes::DUPLICATE_TRANSACTION => {
                Err(LedgerError::DuplicateTransaction(transaction.id))
            }
            Err(e) => Err(e),
        }
    }

    async fn transaction_receipt(&self, id: &TransactionId) -> LedgerResult<Receipt> {
        match self
            .rpc_call("gettransactionreceipt", vec![Value::from(id.to_string())])
            .await
        {
            Ok(value) => serde_json::from_value(value)
                .map_err(|e| LedgerError::Protocol(format!("malformed receipt: {}", e))),
            Err(LedgerError::Rpc { code, .. }) if code == codes::RECEIPT_NOT_FOUND => {
                Err(LedgerError::ReceiptPending(*id))
            }
            Err(e) => Err(e),
        }
    }

    async fn query(&self, query: LedgerQuery) -> LedgerResult<QueryResponse> {
        let value = self.rpc_call(&query.method, query.params).await?;
        Ok(QueryResponse(value))
    }
}
