//! Error types for the configuration module

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The declared network name is not one this harness knows how to
    /// classify. Reported, never fatal; callers decide whether to abort.
    #[error("unrecognized network: '{0}'")]
    UnrecognizedNetwork(String),
}
