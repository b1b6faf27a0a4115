// Copyright (C) 2024-2025 The AION Project.
//
// lib.rs file belongs to the aion project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! AION RPC Client Library
//!
//! JSON-RPC 2.0 implementation of the [`aion_core::LedgerClient`] interface.
//! The client carries no retry logic of its own; bounded retry lives in the
//! executor.

pub mod models;
mod rpc_client;

pub use rpc_client::RpcLedgerClient;

// Re-export commonly used types
pub use models::{RpcRequest, RpcResponse, RpcResponseError};
