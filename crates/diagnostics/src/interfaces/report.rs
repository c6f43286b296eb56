use alloy::primitives::{Address, U256};
use serde::Serialize;
use std::fmt::Display;

/// The outcome of one diagnostic check. Skips are a first-class outcome, not
/// control flow: a check that does not apply to the active mode still appears
/// in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckOutcome {
    /// The check's expectation held.
    Pass,
    /// The expectation did not hold, or the probe call behind it failed.
    Fail,
    /// The check does not apply to the active operating mode.
    Skipped,
}

impl Display for CheckOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckOutcome::Pass => write!(f, "PASS"),
            CheckOutcome::Fail => write!(f, "FAIL"),
            CheckOutcome::Skipped => write!(f, "SKIP"),
        }
    }
}

/// One atomic verification step and how it went.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// The stable name of the check.
    pub name: &'static str,
    /// How the check went.
    pub outcome: CheckOutcome,
    /// Human-readable context: the observed value on a pass, the expectation
    /// miss or probe error on a fail, the reason on a skip.
    pub detail: String,
}

/// An ordered, append-only record of a diagnostic pass. Entries are never
/// mutated after being appended, and a failed check never stops the checks
/// after it from being appended.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosticReport {
    entries: Vec<CheckResult>,
    warnings: Vec<String>,
}

impl DiagnosticReport {
    /// An empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a check result. The only way entries get into a report.
    pub fn push(&mut self, name: &'static str, outcome: CheckOutcome, detail: impl Into<String>) {
        self.entries.push(CheckResult { name, outcome, detail: detail.into() });
    }

    /// Attaches a configuration warning. Warnings never affect
    /// [`is_success`](Self::is_success).
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// The check results, in declaration order.
    pub fn entries(&self) -> &[CheckResult] {
        &self.entries
    }

    /// The attached configuration warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Number of recorded checks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no checks have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The boolean reduction the CLI maps to an exit code: every check passed
    /// or was skipped. Skips never count against success.
    pub fn is_success(&self) -> bool {
        self.entries.iter().all(|entry| entry.outcome != CheckOutcome::Fail)
    }

    /// Count of entries with the given outcome.
    pub fn count(&self, outcome: CheckOutcome) -> usize {
        self.entries.iter().filter(|entry| entry.outcome == outcome).count()
    }
}

/// A read-only view of one provisioned account, refreshed per diagnostic
/// pass.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    /// The account address.
    pub address: Address,
    /// The account balance, in wei.
    pub balance: U256,
}
