//! The chain-access seam: everything the diagnostic harness asks a node is
//! routed through [`ChainProbe`], so checks can run against the real provider
//! or a scripted stand-in.
use crate::{error::Error, ether::provider::RpcProvider};
use alloy::{
    primitives::{Address, U256},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use tracing::trace;

/// Chain access as the diagnostic harness sees it. Implementations must not
/// panic; every failure surfaces as an [`Error`] so callers can downgrade it
/// to a failed check.
#[async_trait]
pub trait ChainProbe: Send + Sync {
    /// The chain id reported by the node.
    async fn chain_id(&self) -> Result<u64, Error>;

    /// The latest block height.
    async fn block_number(&self) -> Result<u64, Error>;

    /// The timestamp of the latest block.
    async fn latest_timestamp(&self) -> Result<u64, Error>;

    /// The balance of the given address, in wei.
    async fn balance_of(&self, address: Address) -> Result<U256, Error>;

    /// The node's unlocked accounts, in provisioning order.
    async fn accounts(&self) -> Result<Vec<Address>, Error>;

    /// Gas estimate for the given transaction skeleton.
    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64, Error>;

    /// Execute an unsigned transfer from an unlocked account. Dev nodes only.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<(), Error>;

    /// Advance the node's clock. Dev nodes only.
    async fn increase_time(&self, seconds: u64) -> Result<(), Error>;

    /// Force a block to be mined. Dev nodes only.
    async fn mine_block(&self) -> Result<(), Error>;
}

/// [`ChainProbe`] implementation backed by a live RPC endpoint.
#[derive(Clone, Debug)]
pub struct RpcProbe {
    provider: RpcProvider,
}

impl RpcProbe {
    /// Connect to the given RPC URL.
    pub async fn connect(rpc_url: &str) -> Result<Self, Error> {
        trace!("connecting probe to '{}'", rpc_url);
        let provider = RpcProvider::connect(rpc_url)
            .await
            .map_err(|_| Error::RpcError(format!("failed to connect to provider '{rpc_url}'")))?;
        Ok(Self { provider })
    }
}

#[async_trait]
impl ChainProbe for RpcProbe {
    async fn chain_id(&self) -> Result<u64, Error> {
        self.provider
            .get_chainid()
            .await
            .map_err(|e| Error::RpcError(format!("failed to get chain id: {e}")))
    }

    async fn block_number(&self) -> Result<u64, Error> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| Error::RpcError(format!("failed to get block number: {e}")))
    }

    async fn latest_timestamp(&self) -> Result<u64, Error> {
        self.provider
            .get_latest_timestamp()
            .await
            .map_err(|e| Error::RpcError(format!("failed to get latest block timestamp: {e}")))
    }

    async fn balance_of(&self, address: Address) -> Result<U256, Error> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| Error::RpcError(format!("failed to get balance of {address}: {e}")))
    }

    async fn accounts(&self) -> Result<Vec<Address>, Error> {
        self.provider
            .get_accounts()
            .await
            .map_err(|e| Error::RpcError(format!("failed to get accounts: {e}")))
    }

    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64, Error> {
        self.provider
            .estimate_gas(tx)
            .await
            .map_err(|e| Error::RpcError(format!("failed to estimate gas: {e}")))
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<(), Error> {
        self.provider
            .send_transaction(tx)
            .await
            .map(|_| ())
            .map_err(|e| Error::RpcError(format!("failed to send transaction: {e}")))
    }

    async fn increase_time(&self, seconds: u64) -> Result<(), Error> {
        self.provider
            .evm_increase_time(seconds)
            .await
            .map_err(|e| Error::RpcError(format!("failed to increase time: {e}")))
    }

    async fn mine_block(&self) -> Result<(), Error> {
        self.provider
            .evm_mine()
            .await
            .map_err(|e| Error::RpcError(format!("failed to mine block: {e}")))
    }
}
