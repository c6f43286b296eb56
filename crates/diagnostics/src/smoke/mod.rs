use crate::{
    error::Error,
    interfaces::{CheckOutcome, DiagnosticReport, SmokeArgs},
};
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, U256},
    rpc::types::TransactionRequest,
};
use chaindoctor_common::{
    constants::{
        DEV_ACCOUNTS_TO_CHECK, DEV_BALANCE_FLOOR, GAS_ESTIMATE_CEILING, GAS_PROBE_ADDRESS,
        MIN_DEV_ACCOUNTS, MIN_REMOTE_ACCOUNTS, REMOTE_BALANCE_FLOOR, REMOTE_BLOCK_HEIGHT_FLOOR,
        REMOTE_GAS_PROBE_VALUE, TIME_ADVANCE_SECONDS, TRANSFER_VALUE,
    },
    ether::probe::{ChainProbe, RpcProbe},
};
use chaindoctor_config::{resolve_mode, ConfigSnapshot, OperatingMode};
use tracing::{debug, info, warn};

const CHECK_NETWORK_IDENTITY: &str = "network-identity";
const CHECK_ACCOUNT_COUNT: &str = "account-count";
const CHECK_ACCOUNT_BALANCES: &str = "account-balances";
const CHECK_GAS_ESTIMATE: &str = "gas-estimate";
const CHECK_VALUE_TRANSFER: &str = "value-transfer";
const CHECK_TIME_ADVANCE: &str = "time-advance";
const CHECK_BLOCK_MINE: &str = "block-mine";

const SKIP_REASON: &str = "mutating a real shared network is unsafe and costs real value";

/// Result of a completed smoke-test pass.
#[derive(Debug, Clone)]
pub struct SmokeResult {
    /// The operating mode the run was classified into.
    pub mode: OperatingMode,
    /// The full smoke report, one entry per declared check.
    pub report: DiagnosticReport,
}

/// Runs the smoke-test suite for the given mode against the given probe: a
/// one-shot batch of independent checks, recorded in declaration order.
/// Mutating checks are skipped, not failed, on the remote network. Always
/// returns a complete report and never errors.
pub async fn run_smoke(mode: OperatingMode, probe: &dyn ChainProbe) -> DiagnosticReport {
    let mut report = DiagnosticReport::new();

    record(&mut report, CHECK_NETWORK_IDENTITY, check_network_identity(mode, probe).await);
    record(&mut report, CHECK_ACCOUNT_COUNT, check_account_count(mode, probe).await);
    record(&mut report, CHECK_ACCOUNT_BALANCES, check_account_balances(mode, probe).await);
    record(&mut report, CHECK_GAS_ESTIMATE, check_gas_estimate(mode, probe).await);
    record(&mut report, CHECK_VALUE_TRANSFER, check_value_transfer(mode, probe).await);
    record(&mut report, CHECK_TIME_ADVANCE, check_time_advance(mode, probe).await);
    record(&mut report, CHECK_BLOCK_MINE, check_block_mine(mode, probe).await);

    debug!(
        "smoke suite complete: {} passed, {} failed, {} skipped",
        report.count(CheckOutcome::Pass),
        report.count(CheckOutcome::Fail),
        report.count(CheckOutcome::Skipped)
    );

    report
}

/// Appends one check result, downgrading a probe error to a Fail entry so the
/// remaining checks still run.
fn record(
    report: &mut DiagnosticReport,
    name: &'static str,
    result: Result<(CheckOutcome, String), chaindoctor_common::error::Error>,
) {
    match result {
        Ok((outcome, detail)) => report.push(name, outcome, detail),
        Err(e) => report.push(name, CheckOutcome::Fail, e.to_string()),
    }
}

type CheckRun = Result<(CheckOutcome, String), chaindoctor_common::error::Error>;

/// The node must identify as the network the resolved mode targets. On the
/// remote network the height must also be far past genesis.
async fn check_network_identity(mode: OperatingMode, probe: &dyn ChainProbe) -> CheckRun {
    let chain_id = probe.chain_id().await?;
    if chain_id != mode.expected_chain_id() {
        return Ok((
            CheckOutcome::Fail,
            format!("expected chain id {}, node reports {chain_id}", mode.expected_chain_id()),
        ));
    }

    if mode == OperatingMode::RemoteTest {
        let height = probe.block_number().await?;
        if height <= REMOTE_BLOCK_HEIGHT_FLOOR {
            return Ok((
                CheckOutcome::Fail,
                format!(
                    "block height {height} is below the remote floor of {REMOTE_BLOCK_HEIGHT_FLOOR}"
                ),
            ));
        }
        return Ok((CheckOutcome::Pass, format!("chain id {chain_id}, block height {height}")));
    }

    Ok((CheckOutcome::Pass, format!("chain id {chain_id}")))
}

/// The remote network only needs a single funded key; the simulated chain
/// must expose its deterministic multi-account pool.
async fn check_account_count(mode: OperatingMode, probe: &dyn ChainProbe) -> CheckRun {
    let required = if mode == OperatingMode::RemoteTest {
        MIN_REMOTE_ACCOUNTS
    } else {
        MIN_DEV_ACCOUNTS
    };
    let count = probe.accounts().await?.len();

    if count >= required {
        Ok((CheckOutcome::Pass, format!("{count} signers available (minimum {required})")))
    } else {
        Ok((CheckOutcome::Fail, format!("{count} signers available, need at least {required}")))
    }
}

/// The remote primary account needs a small real balance; simulated accounts
/// are preloaded with abundant balance.
async fn check_account_balances(mode: OperatingMode, probe: &dyn ChainProbe) -> CheckRun {
    let accounts = probe.accounts().await?;

    if mode == OperatingMode::RemoteTest {
        let Some(primary) = accounts.first().copied() else {
            return Ok((CheckOutcome::Fail, "no accounts provisioned".to_string()));
        };
        let balance = probe.balance_of(primary).await?;
        return if balance > *REMOTE_BALANCE_FLOOR {
            Ok((CheckOutcome::Pass, format!("primary account holds {balance} wei")))
        } else {
            Ok((
                CheckOutcome::Fail,
                format!(
                    "primary account holds {balance} wei, need more than {}",
                    *REMOTE_BALANCE_FLOOR
                ),
            ))
        };
    }

    if accounts.len() < DEV_ACCOUNTS_TO_CHECK {
        return Ok((
            CheckOutcome::Fail,
            format!("only {} accounts provisioned, need {DEV_ACCOUNTS_TO_CHECK}", accounts.len()),
        ));
    }

    for address in accounts.iter().take(DEV_ACCOUNTS_TO_CHECK) {
        let balance = probe.balance_of(*address).await?;
        if balance <= *DEV_BALANCE_FLOOR {
            return Ok((
                CheckOutcome::Fail,
                format!(
                    "account {address} holds {balance} wei, need more than {}",
                    *DEV_BALANCE_FLOOR
                ),
            ));
        }
    }

    Ok((
        CheckOutcome::Pass,
        format!("first {DEV_ACCOUNTS_TO_CHECK} accounts each hold more than 1000 ether"),
    ))
}

/// A minimal value transfer must estimate strictly positive and well under
/// the ceiling, in every mode. Against the remote network the estimate
/// targets a fixed address so no counterparty account is involved.
async fn check_gas_estimate(mode: OperatingMode, probe: &dyn ChainProbe) -> CheckRun {
    let accounts = probe.accounts().await?;
    let Some(sender) = accounts.first().copied() else {
        return Ok((CheckOutcome::Fail, "no accounts provisioned".to_string()));
    };

    let (target, value): (Address, U256) = if mode == OperatingMode::RemoteTest {
        (GAS_PROBE_ADDRESS, *REMOTE_GAS_PROBE_VALUE)
    } else {
        (accounts.get(1).copied().unwrap_or(GAS_PROBE_ADDRESS), *TRANSFER_VALUE)
    };

    let tx = TransactionRequest::default().with_from(sender).with_to(target).with_value(value);
    let estimate = probe.estimate_gas(tx).await?;

    if estimate > 0 && estimate < GAS_ESTIMATE_CEILING {
        Ok((CheckOutcome::Pass, format!("{estimate} gas for a minimal transfer")))
    } else {
        Ok((
            CheckOutcome::Fail,
            format!("estimate of {estimate} gas is outside (0, {GAS_ESTIMATE_CEILING})"),
        ))
    }
}

/// Moves one ether between the first two dev accounts and verifies the
/// receiver's balance delta.
async fn check_value_transfer(mode: OperatingMode, probe: &dyn ChainProbe) -> CheckRun {
    if !mode.allows_mutation() {
        return Ok((CheckOutcome::Skipped, SKIP_REASON.to_string()));
    }

    let accounts = probe.accounts().await?;
    let (Some(sender), Some(receiver)) = (accounts.first().copied(), accounts.get(1).copied())
    else {
        return Ok((CheckOutcome::Fail, "need two accounts for a transfer".to_string()));
    };

    let before = probe.balance_of(receiver).await?;
    let tx = TransactionRequest::default()
        .with_from(sender)
        .with_to(receiver)
        .with_value(*TRANSFER_VALUE);
    probe.send_transaction(tx).await?;
    let after = probe.balance_of(receiver).await?;

    if after.checked_sub(before) == Some(*TRANSFER_VALUE) {
        Ok((CheckOutcome::Pass, "receiver balance grew by exactly 1 ether".to_string()))
    } else {
        Ok((
            CheckOutcome::Fail,
            format!("receiver balance moved from {before} to {after} wei"),
        ))
    }
}

/// Pushes the chain clock forward and verifies the next block observes the
/// shift.
async fn check_time_advance(mode: OperatingMode, probe: &dyn ChainProbe) -> CheckRun {
    if !mode.allows_mutation() {
        return Ok((CheckOutcome::Skipped, SKIP_REASON.to_string()));
    }

    let before = probe.latest_timestamp().await?;
    probe.increase_time(TIME_ADVANCE_SECONDS).await?;
    probe.mine_block().await?;
    let after = probe.latest_timestamp().await?;

    let shift = after.saturating_sub(before);
    if shift >= TIME_ADVANCE_SECONDS {
        Ok((CheckOutcome::Pass, format!("chain clock advanced by {shift} seconds")))
    } else {
        Ok((
            CheckOutcome::Fail,
            format!("chain clock advanced by {shift} seconds, expected at least {TIME_ADVANCE_SECONDS}"),
        ))
    }
}

/// Forces a block and verifies the height moved up by one.
async fn check_block_mine(mode: OperatingMode, probe: &dyn ChainProbe) -> CheckRun {
    if !mode.allows_mutation() {
        return Ok((CheckOutcome::Skipped, SKIP_REASON.to_string()));
    }

    let before = probe.block_number().await?;
    probe.mine_block().await?;
    let after = probe.block_number().await?;

    if after == before + 1 {
        Ok((CheckOutcome::Pass, format!("block height moved from {before} to {after}")))
    } else {
        Ok((
            CheckOutcome::Fail,
            format!("block height moved from {before} to {after}, expected {}", before + 1),
        ))
    }
}

/// The `smoke` operation: snapshots the environment, resolves the operating
/// mode, and runs the smoke suite against the given RPC endpoint.
pub async fn smoke(args: SmokeArgs) -> Result<SmokeResult, Error> {
    let mut snapshot = ConfigSnapshot::from_env();
    if !args.network.is_empty() {
        snapshot = snapshot.with_network(&args.network);
    }

    let (mode, config_warning) = match resolve_mode(&snapshot) {
        Ok(mode) => (mode, None),
        Err(e) => {
            warn!("{e}; falling back to local mode");
            (OperatingMode::Local, Some(e.to_string()))
        }
    };
    info!("running smoke suite in {} mode", mode);

    let probe = RpcProbe::connect(&args.rpc_url).await?;
    let mut report = run_smoke(mode, &probe).await;
    if let Some(warning) = config_warning {
        report.warn(warning);
    }

    Ok(SmokeResult { mode, report })
}
