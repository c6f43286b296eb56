#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Generic(String),
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Diagnostics error: {0}")]
    DiagnosticsError(#[from] chaindoctor_diagnostics::error::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] chaindoctor_common::error::Error),
}
