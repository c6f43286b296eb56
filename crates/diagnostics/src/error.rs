/// Errors that can escape the diagnostics entry points. Note that probe
/// failures inside a running check never surface here; they are downgraded to
/// `Fail` entries in the report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The chain-access layer failed before any check could run (e.g. the
    /// probe could not connect at all).
    #[error("RPC error: {0}")]
    Rpc(#[from] chaindoctor_common::error::Error),
}
