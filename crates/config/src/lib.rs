//! Configuration management for chaindoctor
//!
//! This crate provides the one-shot [`ConfigSnapshot`] of the process
//! environment and the pure [`resolve_mode`] function that classifies a run
//! into an [`OperatingMode`]. Every downstream component consumes the
//! resolved mode tag; nothing re-derives mode from raw configuration.

/// Error types for the configuration module
pub mod error;

use crate::error::Error;
use chaindoctor_common::{
    constants::{
        ENV_ETHERSCAN_API_KEY, ENV_NETWORK, ENV_PROVIDER_API_KEY, ENV_SIGNING_KEY,
        NETWORK_LOCALHOST, NETWORK_SEPOLIA, NETWORK_SIMULATED, PLACEHOLDER_API_KEY,
    },
    utils::env::get_env,
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

/// The [`ConfigSnapshot`] struct is an immutable view of the process
/// environment, taken once at startup. All chaindoctor modules read
/// configuration from a snapshot instead of the ambient environment, so a run
/// cannot change classification midway through.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ConfigSnapshot {
    /// The RPC provider API key, if one is configured.
    pub provider_api_key: Option<String>,

    /// The signing key used on the remote test network, if configured.
    pub signing_key: Option<String>,

    /// The contract-verification API key. Recognized so operators see it in
    /// debug output, but unused by diagnostics.
    pub etherscan_api_key: Option<String>,

    /// The network name declared for this run.
    pub declared_network: String,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        ConfigSnapshot {
            provider_api_key: None,
            signing_key: None,
            etherscan_api_key: None,
            declared_network: NETWORK_SIMULATED.to_string(),
        }
    }
}

impl ConfigSnapshot {
    /// Takes a snapshot of the process environment. The declared network
    /// falls back to the simulated default when unset.
    pub fn from_env() -> Self {
        let snapshot = ConfigSnapshot {
            provider_api_key: get_env(ENV_PROVIDER_API_KEY),
            signing_key: get_env(ENV_SIGNING_KEY),
            etherscan_api_key: get_env(ENV_ETHERSCAN_API_KEY),
            declared_network: get_env(ENV_NETWORK)
                .unwrap_or_else(|| NETWORK_SIMULATED.to_string()),
        };
        debug!("snapshotted environment: network '{}'", snapshot.declared_network);
        snapshot
    }

    /// Returns a copy of this snapshot with the declared network replaced.
    /// Used when a CLI flag overrides the environment.
    pub fn with_network(&self, network: &str) -> Self {
        ConfigSnapshot { declared_network: network.to_string(), ..self.clone() }
    }

    /// Whether the provider API key is present and usable. The placeholder
    /// value shipped in `.env.example` does not count.
    pub fn has_valid_provider_key(&self) -> bool {
        self.provider_api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
    }
}

/// The resolved classification of which blockchain environment a run targets.
/// Exactly one value per run; derived once and passed by value everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingMode {
    /// An isolated in-process simulated chain. No external state exists.
    Local,

    /// The simulated chain forking a snapshot of mainnet through the
    /// configured provider.
    Forked,

    /// The Sepolia remote test network. Shared, real-value state; mutating
    /// checks must not run here.
    RemoteTest,
}

impl OperatingMode {
    /// The chain id a correctly-configured node reports in this mode. A fork
    /// keeps the simulated chain's id.
    pub fn expected_chain_id(&self) -> u64 {
        match self {
            OperatingMode::Local | OperatingMode::Forked => {
                chaindoctor_common::constants::CHAIN_ID_SIMULATED
            }
            OperatingMode::RemoteTest => chaindoctor_common::constants::CHAIN_ID_SEPOLIA,
        }
    }

    /// Whether state-mutating checks (time travel, forced mining, transfers)
    /// are safe in this mode.
    pub fn allows_mutation(&self) -> bool {
        !matches!(self, OperatingMode::RemoteTest)
    }
}

impl Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatingMode::Local => write!(f, "local"),
            OperatingMode::Forked => write!(f, "forked"),
            OperatingMode::RemoteTest => write!(f, "sepolia"),
        }
    }
}

/// Classifies a run into an [`OperatingMode`]. Pure: same snapshot, same
/// mode, no hidden state.
///
/// Decision order, first match wins:
/// 1. the remote test network is declared -> [`OperatingMode::RemoteTest`],
///    regardless of key presence;
/// 2. the simulated default is declared and a usable provider key is present
///    -> [`OperatingMode::Forked`];
/// 3. the simulated default or the localhost node is declared ->
///    [`OperatingMode::Local`].
///
/// Any other network name is an [`Error::UnrecognizedNetwork`]; callers
/// report it as a warning and decide for themselves whether to abort.
pub fn resolve_mode(snapshot: &ConfigSnapshot) -> Result<OperatingMode, Error> {
    match snapshot.declared_network.as_str() {
        NETWORK_SEPOLIA => Ok(OperatingMode::RemoteTest),
        NETWORK_SIMULATED => {
            if snapshot.has_valid_provider_key() {
                Ok(OperatingMode::Forked)
            } else {
                Ok(OperatingMode::Local)
            }
        }
        NETWORK_LOCALHOST => Ok(OperatingMode::Local),
        other => Err(Error::UnrecognizedNetwork(other.to_string())),
    }
}
