//! Console rendering for diagnostic reports. Report types stay
//! presentation-free; everything display-related lives here.

use alloy::primitives::utils::format_ether;
use chaindoctor_config::OperatingMode;
use chaindoctor_diagnostics::{AccountView, CheckOutcome, DiagnosticReport};
use colored::Colorize;

/// One line per check, a warnings block, and a summary line. The full report
/// is always rendered, even when several checks failed, so the operator sees
/// every problem in one pass.
pub(crate) fn render_report(report: &DiagnosticReport) {
    for entry in report.entries() {
        let tag = match entry.outcome {
            CheckOutcome::Pass => "PASS".green().bold(),
            CheckOutcome::Fail => "FAIL".red().bold(),
            CheckOutcome::Skipped => "SKIP".yellow().bold(),
        };
        println!("  [{tag}] {:<18} {}", entry.name, entry.detail.dimmed());
    }

    for warning in report.warnings() {
        println!("  {} {}", "warning:".yellow().bold(), warning);
    }

    let summary = format!(
        "{} passed, {} failed, {} skipped",
        report.count(CheckOutcome::Pass),
        report.count(CheckOutcome::Fail),
        report.count(CheckOutcome::Skipped)
    );
    if report.is_success() {
        println!("\n  {} {summary}", "environment ok:".green().bold());
    } else {
        println!("\n  {} {summary}", "environment broken:".red().bold());
    }
}

/// Header line naming the resolved operating mode.
pub(crate) fn render_mode(mode: OperatingMode) {
    let label = match mode {
        OperatingMode::Local => "local (isolated simulated chain)",
        OperatingMode::Forked => "forked (simulated chain serving a mainnet snapshot)",
        OperatingMode::RemoteTest => "sepolia (remote test network)",
    };
    println!("  {} {label}\n", "mode:".bold());
}

/// Account listing for the verify output.
pub(crate) fn render_accounts(accounts: &[AccountView]) {
    if accounts.is_empty() {
        return;
    }
    println!("\n  accounts:");
    for (index, view) in accounts.iter().enumerate() {
        println!(
            "    {index}: {} ({} ETH)",
            view.address,
            format_ether(view.balance)
        );
    }
}
