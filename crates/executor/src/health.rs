//! Composite pre-flight health check.
//!
//! Three independent probes, run in sequence: connectivity, operator
//! resolution, operator balance. A failed probe lowers the score and never
//! aborts the remaining probes; the check itself never fails and is never
//! retried.

use serde::Serialize;
use tracing::{debug, warn};

use aion_core::LedgerClient;

/// Number of probes in the composite check.
pub const HEALTH_PROBES: u8 = 3;

/// Outcome of the composite health check.
///
/// `healthy` is true only when every probe passed; `score` records how many
/// passed even on partial failure, for diagnostics. `error` is populated
/// only when the probe sequence could not run at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckResult {
    /// Whether all probes passed
    pub healthy: bool,
    /// Number of probes that passed (0..=3)
    pub score: u8,
    /// Failure that prevented the probes from running, if any
    pub error: Option<String>,
}

/// Probes readiness of the given client: (1) node reachable, (2) operator
/// account resolvable on-network, (3) operator balance readable.
///
/// Callers are expected to abort workflow startup when the result is not
/// healthy; the probe itself never returns an error to the caller.
pub async fn perform_health_check<C>(client: &C) -> HealthCheckResult
where
    C: LedgerClient + ?Sized,
{
    let operator = match client.operator_account() {
        Some(operator) => operator,
        None => {
            warn!("health check aborted: no operator account configured");
            return HealthCheckResult {
                healthy: false,
                score: 0,
                error: Some("no operator account configured".to_string()),
            };
        }
    };

    let mut score = 0u8;

    match client.ping().await {
        Ok(info) => {
            debug!("connectivity probe passed: {} on {}", info.version, info.network);
            score += 1;
        }
        Err(e) => warn!("connectivity probe failed: {}", e),
    }

    match client.account_info(operator).await {
        Ok(info) if info.deleted => {
            warn!("operator probe failed: account {} is deleted", operator);
        }
        Ok(_) => {
            debug!("operator probe passed: {}", operator);
            score += 1;
        }
        Err(e) => warn!("operator probe failed: {}", e),
    }

    match client.account_balance(operator).await {
        Ok(balance) => {
            debug!("balance probe passed: {} tinybars", balance.tinybars);
            score += 1;
        }
        Err(e) => warn!("balance probe failed: {}", e),
    }

    HealthCheckResult {
        healthy: score == HEALTH_PROBES,
        score,
        error: None,
    }
}
