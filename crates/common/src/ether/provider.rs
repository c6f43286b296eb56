//! A thin wrapper around an alloy provider, exposing exactly the calls the
//! diagnostic harness needs.
use alloy::{
    eips::BlockNumberOrTag,
    network::Ethereum,
    primitives::{Address, B256, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionRequest,
};
use eyre::Result;

/// [`RpcProvider`] is a convenience wrapper around a [`RootProvider`],
/// connected to whichever node the active network points at (an in-process
/// simulated chain, a local node, or a remote endpoint).
#[derive(Clone, Debug)]
pub struct RpcProvider {
    provider: RootProvider<Ethereum>,
}

impl RpcProvider {
    /// Connect to a provider using the given rpc_url.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        if rpc_url.is_empty() {
            return Err(eyre::eyre!("No RPC URL provided"));
        }

        let provider = ProviderBuilder::new()
            .connect(rpc_url)
            .await
            .map_err(|e| eyre::eyre!("failed to connect to '{rpc_url}': {e}"))?
            .root()
            .clone();
        Ok(Self { provider })
    }

    /// Get the chain id.
    pub async fn get_chainid(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    /// Get the timestamp of the latest block.
    pub async fn get_latest_timestamp(&self) -> Result<u64> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await?
            .ok_or_else(|| eyre::eyre!("node returned no latest block"))?;
        Ok(block.header.timestamp)
    }

    /// Get the balance of the given address, in wei.
    pub async fn get_balance(&self, address: Address) -> Result<U256> {
        Ok(self.provider.get_balance(address).await?)
    }

    /// Get the node's unlocked accounts.
    pub async fn get_accounts(&self) -> Result<Vec<Address>> {
        Ok(self.provider.get_accounts().await?)
    }

    /// Estimate the gas required for the given transaction.
    pub async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64> {
        Ok(self.provider.estimate_gas(tx).await?)
    }

    /// Send an unsigned transaction from one of the node's unlocked accounts.
    /// Only meaningful against a dev node.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256> {
        let hash = self.provider.raw_request("eth_sendTransaction".into(), (tx,)).await?;
        Ok(hash)
    }

    /// Advance the dev node's clock by the given number of seconds. The shift
    /// takes effect in the next mined block.
    pub async fn evm_increase_time(&self, seconds: u64) -> Result<()> {
        let _: serde_json::Value =
            self.provider.raw_request("evm_increaseTime".into(), (seconds,)).await?;
        Ok(())
    }

    /// Force the dev node to mine a block.
    pub async fn evm_mine(&self) -> Result<()> {
        let _: serde_json::Value =
            self.provider.raw_request("evm_mine".into(), Vec::<u64>::new()).await?;
        Ok(())
    }
}
