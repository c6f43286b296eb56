//! Environment diagnostics and the smoke-test harness.
//!
//! Both entry points consume a resolved
//! [`OperatingMode`](chaindoctor_config::OperatingMode) and a
//! [`ChainProbe`](chaindoctor_common::ether::probe::ChainProbe), and produce a
//! [`DiagnosticReport`]: an ordered, append-only list of check results that is
//! always complete, even when every probe call fails.

pub mod error;

mod core;
mod interfaces;
mod smoke;

#[cfg(test)]
mod test_utils;

// re-export the public interface
pub use crate::core::{diagnose, verify, VerifyResult};
pub use crate::interfaces::{
    AccountView, CheckOutcome, CheckResult, DiagnosticReport, SmokeArgs, SmokeArgsBuilder,
    VerifyArgs, VerifyArgsBuilder,
};
pub use crate::smoke::{run_smoke, smoke, SmokeResult};
