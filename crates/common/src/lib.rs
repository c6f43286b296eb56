//! Common utilities, constants, and chain-access plumbing shared across the
//! chaindoctor workspace.

/// Constants used throughout the chaindoctor codebase.
pub mod constants;

/// Error types shared by the chain-access layer.
pub mod error;

/// Utilities for interacting with an Ethereum node, including the provider
/// wrapper and the [`ChainProbe`](crate::ether::probe::ChainProbe) seam.
pub mod ether;

/// General utility functions and types for common tasks.
pub mod utils;
