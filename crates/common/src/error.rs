/// Errors produced by the chain-access layer and shared utilities.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An RPC call to the chain-access provider failed
    #[error("RPC error: {0}")]
    RpcError(String),

    /// An error that occurred during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
}
