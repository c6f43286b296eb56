use crate::{
    error::Error,
    interfaces::{AccountView, CheckOutcome, DiagnosticReport, VerifyArgs},
};
use alloy::primitives::U256;
use chaindoctor_common::{
    constants::{
        FORK_LIVENESS_ADDRESS, KNOWN_NETWORKS, NETWORK_SIMULATED, REMOTE_BLOCK_HEIGHT_FLOOR,
    },
    ether::probe::{ChainProbe, RpcProbe},
};
use chaindoctor_config::{resolve_mode, ConfigSnapshot, OperatingMode};
use tracing::{debug, info, warn};

/// How many provisioned accounts the verify output lists.
const ACCOUNTS_TO_LIST: usize = 5;

const CHECK_NETWORK_NAME: &str = "network-name";
const CHECK_CHAIN_ID: &str = "chain-id";
const CHECK_BLOCK_HEIGHT: &str = "block-height";
const CHECK_FORK_LIVENESS: &str = "fork-liveness";

/// Result of a successful environment-verification pass.
///
/// "Successful" means the pass ran to completion; individual checks may still
/// have failed. Callers reduce [`DiagnosticReport::is_success`] to an exit
/// status.
#[derive(Debug, Clone)]
pub struct VerifyResult {
    /// The operating mode the run was classified into.
    pub mode: OperatingMode,
    /// The full diagnostic report, one entry per declared check.
    pub report: DiagnosticReport,
    /// The first few provisioned accounts, for operator display.
    pub accounts: Vec<AccountView>,
}

/// Runs the environment diagnostics for the given mode against the given
/// probe. Always returns a complete report: one entry per declared check,
/// with probe failures downgraded to `Fail` entries. Never errors.
pub async fn diagnose(
    mode: OperatingMode,
    snapshot: &ConfigSnapshot,
    probe: &dyn ChainProbe,
) -> DiagnosticReport {
    let mut report = DiagnosticReport::new();

    flag_missing_keys(mode, snapshot, &mut report);

    // network-name: the declared name must be one the harness classifies.
    // This check needs no probe call.
    if KNOWN_NETWORKS.contains(&snapshot.declared_network.as_str()) {
        report.push(
            CHECK_NETWORK_NAME,
            CheckOutcome::Pass,
            format!("declared network '{}' runs in {} mode", snapshot.declared_network, mode),
        );
    } else {
        report.push(
            CHECK_NETWORK_NAME,
            CheckOutcome::Fail,
            format!("unrecognized network '{}'", snapshot.declared_network),
        );
    }

    // chain-id: the node must report the id this mode expects.
    match probe.chain_id().await {
        Ok(chain_id) if chain_id == mode.expected_chain_id() => {
            report.push(CHECK_CHAIN_ID, CheckOutcome::Pass, format!("chain id {chain_id}"));
        }
        Ok(chain_id) => {
            report.push(
                CHECK_CHAIN_ID,
                CheckOutcome::Fail,
                format!(
                    "expected chain id {}, node reports {chain_id}",
                    mode.expected_chain_id()
                ),
            );
        }
        Err(e) => report.push(CHECK_CHAIN_ID, CheckOutcome::Fail, e.to_string()),
    }

    // block-height: readable in every mode; the remote network must
    // additionally be far past genesis, or we are not really talking to it.
    match probe.block_number().await {
        Ok(height) if mode == OperatingMode::RemoteTest && height <= REMOTE_BLOCK_HEIGHT_FLOOR => {
            report.push(
                CHECK_BLOCK_HEIGHT,
                CheckOutcome::Fail,
                format!(
                    "block height {height} is below the remote floor of {REMOTE_BLOCK_HEIGHT_FLOOR}"
                ),
            );
        }
        Ok(height) => {
            report.push(CHECK_BLOCK_HEIGHT, CheckOutcome::Pass, format!("block height {height}"));
        }
        Err(e) => report.push(CHECK_BLOCK_HEIGHT, CheckOutcome::Fail, e.to_string()),
    }

    // fork-liveness: a fork serving mainnet state can read a well-funded
    // mainnet account. On the isolated local chain there is no external state
    // to probe, and on the remote network the balance proves nothing.
    match mode {
        OperatingMode::Forked => match probe.balance_of(FORK_LIVENESS_ADDRESS).await {
            Ok(balance) if balance > U256::ZERO => {
                report.push(
                    CHECK_FORK_LIVENESS,
                    CheckOutcome::Pass,
                    format!("liveness account {FORK_LIVENESS_ADDRESS} holds {balance} wei"),
                );
            }
            Ok(_) => {
                report.push(
                    CHECK_FORK_LIVENESS,
                    CheckOutcome::Fail,
                    format!(
                        "liveness account {FORK_LIVENESS_ADDRESS} reads empty; the fork is not serving mainnet state"
                    ),
                );
            }
            Err(e) => report.push(CHECK_FORK_LIVENESS, CheckOutcome::Fail, e.to_string()),
        },
        OperatingMode::Local => {
            report.push(
                CHECK_FORK_LIVENESS,
                CheckOutcome::Skipped,
                "no external state exists to probe on the local chain",
            );
        }
        OperatingMode::RemoteTest => {
            report.push(
                CHECK_FORK_LIVENESS,
                CheckOutcome::Skipped,
                "the balance probe is not a liveness signal on a real network",
            );
        }
    }

    debug!(
        "diagnostics complete: {} passed, {} failed, {} skipped",
        report.count(CheckOutcome::Pass),
        report.count(CheckOutcome::Fail),
        report.count(CheckOutcome::Skipped)
    );

    report
}

/// Attaches warnings for keys the resolved mode would normally need. Missing
/// keys never change the mode and never fail a check.
fn flag_missing_keys(mode: OperatingMode, snapshot: &ConfigSnapshot, report: &mut DiagnosticReport) {
    match mode {
        OperatingMode::RemoteTest => {
            if snapshot.signing_key.is_none() {
                report.warn("no signing key configured; transactions cannot be sent on sepolia");
            }
            if snapshot.provider_api_key.is_none() {
                report.warn(
                    "no provider API key configured; the sepolia endpoint may be rate-limited",
                );
            }
        }
        OperatingMode::Local => {
            if snapshot.declared_network == NETWORK_SIMULATED &&
                !snapshot.has_valid_provider_key()
            {
                report.warn(
                    "no usable provider API key configured; running against isolated local state instead of a mainnet fork",
                );
            }
        }
        OperatingMode::Forked => {}
    }
}

/// Reads the first few provisioned accounts and their balances. Failures here
/// are display-only and are logged rather than reported.
pub(crate) async fn account_views(probe: &dyn ChainProbe, limit: usize) -> Vec<AccountView> {
    let addresses = match probe.accounts().await {
        Ok(addresses) => addresses,
        Err(e) => {
            debug!("could not list accounts for display: {e}");
            return Vec::new();
        }
    };

    let mut views = Vec::new();
    for address in addresses.into_iter().take(limit) {
        match probe.balance_of(address).await {
            Ok(balance) => views.push(AccountView { address, balance }),
            Err(e) => debug!("could not read balance of {address} for display: {e}"),
        }
    }
    views
}

/// The `verify` operation: snapshots the environment, resolves the operating
/// mode, and runs the environment diagnostics against the given RPC endpoint.
pub async fn verify(args: VerifyArgs) -> Result<VerifyResult, Error> {
    let mut snapshot = ConfigSnapshot::from_env();
    if !args.network.is_empty() {
        snapshot = snapshot.with_network(&args.network);
    }

    // an unrecognized network is reported, not fatal: fall back to local so
    // the operator still gets a full report (with a failed network-name
    // check) in one pass.
    let (mode, config_warning) = match resolve_mode(&snapshot) {
        Ok(mode) => (mode, None),
        Err(e) => {
            warn!("{e}; falling back to local mode");
            (OperatingMode::Local, Some(e.to_string()))
        }
    };
    info!("verifying environment in {} mode", mode);

    let probe = RpcProbe::connect(&args.rpc_url).await?;
    let mut report = diagnose(mode, &snapshot, &probe).await;
    if let Some(warning) = config_warning {
        report.warn(warning);
    }

    let accounts = account_views(&probe, ACCOUNTS_TO_LIST).await;

    Ok(VerifyResult { mode, report, accounts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockProbe;
    use chaindoctor_common::constants::PLACEHOLDER_API_KEY;

    fn snapshot(network: &str, key: Option<&str>) -> ConfigSnapshot {
        ConfigSnapshot {
            provider_api_key: key.map(|k| k.to_string()),
            declared_network: network.to_string(),
            ..ConfigSnapshot::default()
        }
    }

    #[tokio::test]
    async fn test_local_scenario_passes() {
        let snap = snapshot("hardhat", None);
        let mode = resolve_mode(&snap).expect("resolve failed");
        assert_eq!(mode, OperatingMode::Local);

        let probe = MockProbe::local();
        let report = diagnose(mode, &snap, &probe).await;

        assert_eq!(report.len(), 4);
        assert!(report.is_success());
        assert_eq!(report.entries()[0].name, "network-name");
        assert_eq!(report.entries()[0].outcome, CheckOutcome::Pass);
        assert_eq!(report.entries()[1].outcome, CheckOutcome::Pass);
        assert_eq!(report.entries()[2].outcome, CheckOutcome::Pass);
        // no external state on the local chain, so the liveness probe skips
        assert_eq!(report.entries()[3].outcome, CheckOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_placeholder_key_stays_local() {
        let snap = snapshot("hardhat", Some(PLACEHOLDER_API_KEY));
        let mode = resolve_mode(&snap).expect("resolve failed");
        assert_eq!(mode, OperatingMode::Local);
    }

    #[tokio::test]
    async fn test_forked_scenario_liveness_pass() {
        let snap = snapshot("hardhat", Some("abc123"));
        let mode = resolve_mode(&snap).expect("resolve failed");
        assert_eq!(mode, OperatingMode::Forked);

        let probe = MockProbe::forked();
        let report = diagnose(mode, &snap, &probe).await;

        assert!(report.is_success());
        assert_eq!(report.entries()[3].name, "fork-liveness");
        assert_eq!(report.entries()[3].outcome, CheckOutcome::Pass);
    }

    #[tokio::test]
    async fn test_forked_dead_fork_fails_liveness() {
        let snap = snapshot("hardhat", Some("abc123"));
        // a fork that serves no mainnet state reads the liveness account as empty
        let probe = MockProbe::local();
        let report = diagnose(OperatingMode::Forked, &snap, &probe).await;

        assert!(!report.is_success());
        assert_eq!(report.entries()[3].outcome, CheckOutcome::Fail);
    }

    #[tokio::test]
    async fn test_forked_liveness_probe_error_downgrades_to_fail() {
        let snap = snapshot("hardhat", Some("abc123"));
        let probe = MockProbe::forked().with_failing_balance_reads();
        let report = diagnose(OperatingMode::Forked, &snap, &probe).await;

        // the failed balance read becomes the check's detail, and the rest
        // of the report is still produced
        assert_eq!(report.len(), 4);
        assert_eq!(report.entries()[3].name, "fork-liveness");
        assert_eq!(report.entries()[3].outcome, CheckOutcome::Fail);
        assert!(report.entries()[3].detail.contains("balance"));
        assert_eq!(report.entries()[1].outcome, CheckOutcome::Pass);
    }

    #[tokio::test]
    async fn test_remote_scenario_passes_with_warnings() {
        let snap = snapshot("sepolia", Some("abc123"));
        let mode = resolve_mode(&snap).expect("resolve failed");
        assert_eq!(mode, OperatingMode::RemoteTest);

        let probe = MockProbe::sepolia();
        let report = diagnose(mode, &snap, &probe).await;

        assert!(report.is_success());
        assert_eq!(report.entries()[3].outcome, CheckOutcome::Skipped);
        // no signing key configured: flagged, not failed
        assert_eq!(report.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_local_without_key_flags_fork_opportunity() {
        let snap = snapshot("hardhat", None);
        let probe = MockProbe::local();
        let report = diagnose(OperatingMode::Local, &snap, &probe).await;

        assert!(report.is_success());
        assert_eq!(report.warnings().len(), 1);
        assert!(report.warnings()[0].contains("provider API key"));

        // a localhost run is not fork-eligible, so nothing to flag
        let snap = snapshot("localhost", None);
        let report = diagnose(OperatingMode::Local, &snap, &probe).await;
        assert!(report.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_remote_block_floor() {
        let snap = snapshot("sepolia", None);
        let probe = MockProbe::sepolia().with_block_number(42);
        let report = diagnose(OperatingMode::RemoteTest, &snap, &probe).await;

        assert_eq!(report.entries()[2].name, "block-height");
        assert_eq!(report.entries()[2].outcome, CheckOutcome::Fail);
    }

    #[tokio::test]
    async fn test_wrong_chain_id_fails() {
        let snap = snapshot("hardhat", None);
        let probe = MockProbe::local().with_chain_id(1);
        let report = diagnose(OperatingMode::Local, &snap, &probe).await;

        assert_eq!(report.entries()[1].outcome, CheckOutcome::Fail);
        assert!(report.entries()[1].detail.contains("31337"));
    }

    #[tokio::test]
    async fn test_failing_probe_still_yields_full_report() {
        let snap = snapshot("hardhat", None);
        let probe = MockProbe::failing();
        let report = diagnose(OperatingMode::Local, &snap, &probe).await;

        // totality: one entry per declared check, no early abort
        assert_eq!(report.len(), 4);
        assert!(!report.is_success());
        assert_eq!(report.entries()[1].outcome, CheckOutcome::Fail);
        assert_eq!(report.entries()[2].outcome, CheckOutcome::Fail);
    }

    #[tokio::test]
    async fn test_unknown_network_fails_name_check() {
        let snap = snapshot("goerli", None);
        let probe = MockProbe::local();
        let report = diagnose(OperatingMode::Local, &snap, &probe).await;

        assert_eq!(report.entries()[0].outcome, CheckOutcome::Fail);
        assert!(report.entries()[0].detail.contains("goerli"));
    }

    #[tokio::test]
    async fn test_account_views_limit_and_failure() {
        let probe = MockProbe::local();
        let views = account_views(&probe, 5).await;
        assert_eq!(views.len(), 5);
        assert!(views[0].balance > U256::ZERO);

        let views = account_views(&MockProbe::failing(), 5).await;
        assert!(views.is_empty());
    }
}
