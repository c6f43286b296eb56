use alloy::primitives::{address, Address, U256};
use lazy_static::lazy_static;

/// Chain ID of the in-process simulated chain (and of a fork of mainnet
/// running on it, since the fork keeps the simulated chain's ID).
pub const CHAIN_ID_SIMULATED: u64 = 31337;

/// Sepolia testnet chain ID.
pub const CHAIN_ID_SEPOLIA: u64 = 11155111;

/// Network name of the default in-process simulated chain.
pub const NETWORK_SIMULATED: &str = "hardhat";

/// Network name of a standalone local node reached over http.
pub const NETWORK_LOCALHOST: &str = "localhost";

/// Network name of the remote test network.
pub const NETWORK_SEPOLIA: &str = "sepolia";

/// All network names this harness knows how to classify.
pub const KNOWN_NETWORKS: [&str; 3] = [NETWORK_SIMULATED, NETWORK_LOCALHOST, NETWORK_SEPOLIA];

/// The placeholder value shipped in `.env.example` for the provider API key.
/// A key equal to this sentinel must be treated as absent.
pub const PLACEHOLDER_API_KEY: &str = "YOUR-FREE-ALCHEMY-KEY";

/// Environment variable holding the RPC provider API key.
pub const ENV_PROVIDER_API_KEY: &str = "ALCHEMY_API_KEY";

/// Environment variable holding the remote-test signing key.
pub const ENV_SIGNING_KEY: &str = "SEPOLIA_PRIVATE_KEY";

/// Environment variable holding the contract-verification API key. Recognized
/// but unused by diagnostics.
pub const ENV_ETHERSCAN_API_KEY: &str = "ETHERSCAN_API_KEY";

/// Environment variable naming the target network for a run.
pub const ENV_NETWORK: &str = "CHAIN_NETWORK";

/// A well-funded mainnet address used as a liveness signal for fork mode: if
/// the fork is live, this account has a nonzero balance to read.
pub const FORK_LIVENESS_ADDRESS: Address =
    address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

/// Fixed transfer target used when estimating gas against a real network, so
/// the estimate never involves a counterparty account we control.
pub const GAS_PROBE_ADDRESS: Address =
    address!("0000000000000000000000000000000000000001");

/// Minimum signer count on the simulated chain's deterministic account pool.
pub const MIN_DEV_ACCOUNTS: usize = 10;

/// Minimum signer count on the remote test network (a single funded key).
pub const MIN_REMOTE_ACCOUNTS: usize = 1;

/// Number of dev accounts whose balances are individually checked.
pub const DEV_ACCOUNTS_TO_CHECK: usize = 3;

/// Gas estimates for a minimal value transfer must come in strictly below
/// this, in every mode.
pub const GAS_ESTIMATE_CEILING: u64 = 100_000;

/// The remote test network is expected to be far past this block height; a
/// lower reading means we are not actually talking to it.
pub const REMOTE_BLOCK_HEIGHT_FLOOR: u64 = 1_000_000;

/// Seconds the time-advance smoke check pushes the simulated clock forward.
pub const TIME_ADVANCE_SECONDS: u64 = 3600;

lazy_static! {
    /// One ether, in wei.
    pub static ref ONE_ETHER: U256 = U256::from(10u64).pow(U256::from(18u64));

    /// Simulated dev accounts are preloaded with abundant balance; the first
    /// few are each expected to hold more than this (1000 ether).
    pub static ref DEV_BALANCE_FLOOR: U256 = U256::from(10u64).pow(U256::from(21u64));

    /// The remote primary account only needs a small real-asset balance to be
    /// usable (0.01 ether).
    pub static ref REMOTE_BALANCE_FLOOR: U256 = U256::from(10u64).pow(U256::from(16u64));

    /// Value moved by the local transfer smoke check (1 ether).
    pub static ref TRANSFER_VALUE: U256 = *ONE_ETHER;

    /// Value used when estimating gas against the remote network (0.001
    /// ether), mirroring what a cautious operator would actually send.
    pub static ref REMOTE_GAS_PROBE_VALUE: U256 = U256::from(10u64).pow(U256::from(15u64));
}
