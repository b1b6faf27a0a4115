// Copyright (C) 2024-2025 The AION Project.
//
// models.rs file belongs to the aion project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! JSON-RPC 2.0 request/response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard and application-level JSON-RPC error codes used by ledger nodes.
pub mod codes {
    /// Server could not parse the request body
    pub const PARSE_ERROR: i64 = -32700;
    /// Request is not a valid JSON-RPC request object
    pub const INVALID_REQUEST: i64 = -32600;
    /// Unknown method
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Parameters do not match the method
    pub const INVALID_PARAMS: i64 = -32602;
    /// Internal server failure
    pub const INTERNAL_ERROR: i64 = -32603;

    /// Node is throttling requests
    pub const NODE_BUSY: i64 = -32001;
    /// Node is up but not yet serving the network
    pub const PLATFORM_NOT_ACTIVE: i64 = -32002;
    /// No receipt exists yet for the transaction
    pub const RECEIPT_NOT_FOUND: i64 = -32003;
    /// The transaction id was already executed
    pub const DUPLICATE_TRANSACTION: i64 = -32010;
    /// Payer cannot cover the operation
    pub const INSUFFICIENT_PAYER_BALANCE: i64 = -32011;
    /// Missing or rejected authorization
    pub const UNAUTHORIZED: i64 = -32012;
}

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    /// Protocol version, always `"2.0"`
    pub jsonrpc: &'static str,
    /// Request id, unique per client
    pub id: u64,
    /// Method name
    pub method: String,
    /// Positional parameters
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Creates a request for `method` with positional `params`.
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    /// Request id the response answers
    #[serde(default)]
    pub id: Option<Value>,
    /// Result payload on success
    #[serde(default)]
    pub result: Option<Value>,
    /// Error object on failure
    #[serde(default)]
    pub error: Option<RpcResponseError>,
}

/// The error member of a JSON-RPC 2.0 response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponseError {
    /// Error code
    pub code: i64,
    /// Human-readable message
    pub message: String,
    /// Optional structured detail
    #[serde(default)]
    pub data: Option<Value>,
}
