//! AION command-line interface.
//!
//! Thin orchestration over the library crates: load configuration, build a
//! client and executor, run one operation, exit non-zero on unrecovered
//! failure.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use aion_config::{ExecutorConfig, NetworkKind, OperatorConfig};
use aion_core::{AccountId, LedgerClient, LedgerQuery, SignedTransaction, TransactionId};
use aion_executor::{LedgerExecutor, Operation};
use aion_rpc_client::RpcLedgerClient;

#[derive(Parser)]
#[command(name = "aion-cli", version, about = "Resilient ledger operations from the command line")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Target network (mainnet, testnet, previewnet, local)
    #[arg(long, global = true)]
    network: Option<NetworkKind>,

    /// Node endpoint override
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Operator account (shard.realm.num)
    #[arg(long, global = true)]
    operator: Option<String>,

    /// Total attempts per operation, including the first
    #[arg(long, global = true)]
    max_attempts: Option<u32>,

    /// Fixed delay between attempts in milliseconds
    #[arg(long, global = true)]
    retry_delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the composite health check against the configured node
    Doctor,
    /// Query an account balance (defaults to the operator account)
    Balance {
        /// Account to query (shard.realm.num)
        account: Option<String>,
    },
    /// Fetch the receipt for a transaction
    Receipt {
        /// Transaction id (account@seconds.nanos)
        transaction_id: String,
    },
    /// Submit a pre-signed transaction payload
    Submit {
        /// File holding the signed payload bytes
        payload: PathBuf,
        /// Treat the payload file as hex text
        #[arg(long)]
        hex: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    config.validate()?;

    let client = Arc::new(RpcLedgerClient::from_config(&config)?);
    let executor = LedgerExecutor::new(client, config.retry.into());

    match &cli.command {
        Command::Doctor => doctor(&executor).await,
        Command::Balance { account } => balance(&executor, account.as_deref()).await,
        Command::Receipt { transaction_id } => receipt(&executor, transaction_id).await,
        Command::Submit { payload, hex } => submit(&executor, payload, *hex).await,
    }
}

/// Loads the TOML configuration (if any) and applies flag overrides.
fn load_config(cli: &Cli) -> Result<ExecutorConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => ExecutorConfig::default(),
    };

    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    if let Some(operator) = &cli.operator {
        config.operator = Some(OperatorConfig {
            account: operator.clone(),
        });
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.retry.max_attempts = max_attempts;
    }
    if let Some(delay) = cli.retry_delay_ms {
        config.retry.base_delay_ms = delay;
    }
    Ok(config)
}

async fn doctor(executor: &LedgerExecutor<RpcLedgerClient>) -> Result<()> {
    let result = executor.health_check().await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    if !result.healthy {
        anyhow::bail!("health check failed with score {}/3", result.score);
    }
    Ok(())
}

async fn balance(executor: &LedgerExecutor<RpcLedgerClient>, account: Option<&str>) -> Result<()> {
    let account = match account {
        Some(text) => text.parse::<AccountId>().map_err(|e| anyhow!(e))?,
        None => executor
            .client()
            .operator_account()
            .context("no account given and no operator configured")?,
    };

    let response = executor
        .execute_query(
            Operation::new("account balance").with_metadata("account", account.to_string()),
            LedgerQuery::new("getbalance").with_param(account.to_string()),
        )
        .await?;
    println!("{}", serde_json::to_string_pretty(&response.0)?);
    Ok(())
}

async fn receipt(executor: &LedgerExecutor<RpcLedgerClient>, transaction_id: &str) -> Result<()> {
    let id = transaction_id
        .parse::<TransactionId>()
        .map_err(|e| anyhow!(e))?;

    let response = executor
        .execute_query(
            Operation::new("transaction receipt").with_metadata("transaction", id.to_string()),
            LedgerQuery::new("gettransactionreceipt").with_param(id.to_string()),
        )
        .await?;
    println!("{}", serde_json::to_string_pretty(&response.0)?);
    Ok(())
}

async fn submit(
    executor: &LedgerExecutor<RpcLedgerClient>,
    payload: &PathBuf,
    hex_input: bool,
) -> Result<()> {
    let operator = executor
        .client()
        .operator_account()
        .context("submit requires an operator account")?;

    let raw = fs::read(payload).with_context(|| format!("reading payload {}", payload.display()))?;
    let bytes = if hex_input {
        let text = String::from_utf8(raw).context("hex payload file is not UTF-8")?;
        hex::decode(text.trim()).context("payload file is not valid hex")?
    } else {
        raw
    };

    let success = executor
        .execute_transaction(
            Operation::new("submit payload").with_metadata("file", payload.display().to_string()),
            move || {
                let bytes = bytes.clone();
                // A fresh id per attempt; the payload itself is resubmitted
                // verbatim, which is at-least-once by construction.
                async move { Ok(SignedTransaction::new(TransactionId::generate(operator), bytes)) }
            },
        )
        .await?;

    println!(
        "transaction {} confirmed in {} attempt(s)",
        success.ack.transaction_id, success.attempts
    );
    println!("{}", serde_json::to_string_pretty(&success.receipt)?);
    Ok(())
}
