mod args;
mod report;

pub use args::{SmokeArgs, SmokeArgsBuilder, VerifyArgs, VerifyArgsBuilder};
pub use report::{AccountView, CheckOutcome, CheckResult, DiagnosticReport};
