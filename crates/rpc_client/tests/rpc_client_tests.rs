//! HTTP-level tests for the JSON-RPC ledger client.
//!
//! Each test stands up a mock server, programs one response and checks the
//! client's parsing and error mapping.

use mockito::Matcher;
use reqwest::Url;
use serde_json::json;

use aion_core::{AccountId, LedgerClient, LedgerError, LedgerQuery, SignedTransaction, TransactionId};
use aion_rpc_client::RpcLedgerClient;

fn operator() -> AccountId {
    AccountId::new(0, 0, 1001)
}

fn client_for(server: &mockito::ServerGuard) -> RpcLedgerClient {
    let url = Url::parse(&server.url()).unwrap();
    RpcLedgerClient::new(url, Some(operator())).unwrap()
}

fn signed_tx() -> SignedTransaction {
    let id = TransactionId::new(operator(), 1_700_000_000, 42);
    SignedTransaction::new(id, b"signed-bytes".to_vec())
}

#[tokio::test]
async fn ping_returns_node_info() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "getnodeinfo"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":{"version":"0.2.0","network":"testnet"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let info = client.ping().await.unwrap();
    assert_eq!(info.version, "0.2.0");
    assert_eq!(info.network, "testnet");
    mock.assert_async().await;
}

#[tokio::test]
async fn balance_query_parses_wire_shape() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "getbalance",
            "params": ["0.0.1001"],
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":{"account":"0.0.1001","tinybars":250000}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let balance = client.account_balance(operator()).await.unwrap();
    assert_eq!(balance.account, operator());
    assert_eq!(balance.tinybars, 250_000);
}

#[tokio::test]
async fn submit_returns_ack() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": "submittransaction"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"jsonrpc":"2.0","id":1,"result":{"transactionId":"0.0.1001@1700000000.000000042","node":"0.0.3"}}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let ack = client.submit(signed_tx()).await.unwrap();
    assert_eq!(ack.transaction_id, signed_tx().id);
    assert_eq!(ack.node, "0.0.3");
}

#[tokio::test]
async fn duplicate_submission_maps_to_duplicate_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32010,"message":"transaction already known"}}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let error = client.submit(signed_tx()).await.unwrap_err();
    match error {
        LedgerError::DuplicateTransaction(id) => assert_eq!(id, signed_tx().id),
        other => panic!("expected DuplicateTransaction, got {:?}", other),
    }
    assert!(!LedgerError::DuplicateTransaction(signed_tx().id).is_retryable());
}

#[tokio::test]
async fn missing_receipt_maps_to_pending() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32003,"message":"no receipt"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let id = signed_tx().id;
    let error = client.transaction_receipt(&id).await.unwrap_err();
    assert!(matches!(error, LedgerError::ReceiptPending(pending) if pending == id));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn insufficient_balance_is_terminal() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32011,"message":"payer 0.0.1001 below fee"}}"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let error = client.submit(signed_tx()).await.unwrap_err();
    assert!(matches!(error, LedgerError::InsufficientBalance(_)));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn http_overload_maps_to_busy() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let client = client_for(&server);
    let error = client.ping().await.unwrap_err();
    assert!(matches!(error, LedgerError::Busy(_)));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn malformed_body_is_protocol_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json at all")
        .create_async()
        .await;

    let client = client_for(&server);
    let error = client.ping().await.unwrap_err();
    assert!(matches!(error, LedgerError::Protocol(_)));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn generic_query_passes_method_and_params_through() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "gettopicinfo",
            "params": ["0.0.7777"],
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"jsonrpc":"2.0","id":1,"result":{"topicId":"0.0.7777","sequenceNumber":12}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let query = LedgerQuery::new("gettopicinfo").with_param("0.0.7777");
    let response = client.query(query).await.unwrap();
    assert_eq!(response.0["sequenceNumber"], 12);
}
