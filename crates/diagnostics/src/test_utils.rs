//! A scriptable [`ChainProbe`] used by the diagnostics and smoke tests.

use alloy::{
    primitives::{Address, TxKind, U256},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use chaindoctor_common::{
    constants::{CHAIN_ID_SEPOLIA, CHAIN_ID_SIMULATED, FORK_LIVENESS_ADDRESS},
    error::Error,
    ether::probe::ChainProbe,
};
use std::{collections::HashMap, sync::Mutex};

#[derive(Debug)]
struct MockState {
    block_number: u64,
    timestamp: u64,
    pending_time_offset: u64,
    balances: HashMap<Address, U256>,
}

/// A probe whose world is entirely in memory. Mutating calls behave like a
/// dev node: `increase_time` is applied by the next mined block, transfers
/// credit the receiver immediately.
#[derive(Debug)]
pub(crate) struct MockProbe {
    chain_id: u64,
    accounts: Vec<Address>,
    gas_estimate: u64,
    fail_all: bool,
    fail_balance_of: bool,
    state: Mutex<MockState>,
}

fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

fn account(index: u8) -> Address {
    Address::with_last_byte(index + 1)
}

impl MockProbe {
    fn new(
        chain_id: u64,
        block_number: u64,
        account_count: u8,
        account_balance: U256,
    ) -> Self {
        let accounts: Vec<Address> = (0..account_count).map(account).collect();
        let balances = accounts.iter().map(|a| (*a, account_balance)).collect();
        MockProbe {
            chain_id,
            accounts,
            gas_estimate: 21_000,
            fail_all: false,
            fail_balance_of: false,
            state: Mutex::new(MockState {
                block_number,
                timestamp: 1_700_000_000,
                pending_time_offset: 0,
                balances,
            }),
        }
    }

    /// A fresh isolated dev chain: 20 accounts at 10,000 ether, height 0.
    pub(crate) fn local() -> Self {
        Self::new(CHAIN_ID_SIMULATED, 0, 20, ether(10_000))
    }

    /// A dev chain forking mainnet: pinned at a mainnet-like height, with the
    /// fork-liveness account funded.
    pub(crate) fn forked() -> Self {
        let probe = Self::new(CHAIN_ID_SIMULATED, 18_800_000, 20, ether(10_000));
        probe
            .state
            .lock()
            .expect("mock state poisoned")
            .balances
            .insert(FORK_LIVENESS_ADDRESS, ether(900));
        probe
    }

    /// The remote test network: one funded key with a modest real balance.
    pub(crate) fn sepolia() -> Self {
        let mut probe = Self::new(CHAIN_ID_SEPOLIA, 9_100_000, 1, U256::ZERO);
        let primary = probe.accounts[0];
        probe
            .state
            .get_mut()
            .expect("mock state poisoned")
            .balances
            .insert(primary, ether(5) / U256::from(100u64));
        probe
    }

    /// A probe whose every call fails, as if the endpoint were unreachable.
    pub(crate) fn failing() -> Self {
        let mut probe = Self::new(0, 0, 0, U256::ZERO);
        probe.fail_all = true;
        probe
    }

    pub(crate) fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub(crate) fn with_block_number(mut self, block_number: u64) -> Self {
        self.state.get_mut().expect("mock state poisoned").block_number = block_number;
        self
    }

    pub(crate) fn with_gas_estimate(mut self, gas_estimate: u64) -> Self {
        self.gas_estimate = gas_estimate;
        self
    }

    pub(crate) fn with_failing_balance_reads(mut self) -> Self {
        self.fail_balance_of = true;
        self
    }

    pub(crate) fn with_uniform_balance(mut self, balance: U256) -> Self {
        let state = self.state.get_mut().expect("mock state poisoned");
        for value in state.balances.values_mut() {
            *value = balance;
        }
        self
    }

    fn check_online(&self) -> Result<(), Error> {
        if self.fail_all {
            Err(Error::RpcError("probe offline: connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChainProbe for MockProbe {
    async fn chain_id(&self) -> Result<u64, Error> {
        self.check_online()?;
        Ok(self.chain_id)
    }

    async fn block_number(&self) -> Result<u64, Error> {
        self.check_online()?;
        Ok(self.state.lock().expect("mock state poisoned").block_number)
    }

    async fn latest_timestamp(&self) -> Result<u64, Error> {
        self.check_online()?;
        Ok(self.state.lock().expect("mock state poisoned").timestamp)
    }

    async fn balance_of(&self, address: Address) -> Result<U256, Error> {
        self.check_online()?;
        if self.fail_balance_of {
            return Err(Error::RpcError(format!("failed to get balance of {address}: timed out")));
        }
        let state = self.state.lock().expect("mock state poisoned");
        Ok(state.balances.get(&address).copied().unwrap_or(U256::ZERO))
    }

    async fn accounts(&self) -> Result<Vec<Address>, Error> {
        self.check_online()?;
        Ok(self.accounts.clone())
    }

    async fn estimate_gas(&self, _tx: TransactionRequest) -> Result<u64, Error> {
        self.check_online()?;
        Ok(self.gas_estimate)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<(), Error> {
        self.check_online()?;
        let from = tx.from.ok_or_else(|| Error::RpcError("missing sender".to_string()))?;
        let Some(TxKind::Call(to)) = tx.to else {
            return Err(Error::RpcError("missing transfer target".to_string()));
        };
        let value = tx.value.unwrap_or(U256::ZERO);

        let mut state = self.state.lock().expect("mock state poisoned");
        let sender_balance = state.balances.get(&from).copied().unwrap_or(U256::ZERO);
        if sender_balance < value {
            return Err(Error::RpcError("insufficient funds".to_string()));
        }
        state.balances.insert(from, sender_balance - value);
        let receiver_balance = state.balances.get(&to).copied().unwrap_or(U256::ZERO);
        state.balances.insert(to, receiver_balance + value);
        state.block_number += 1;
        state.timestamp += 1;
        Ok(())
    }

    async fn increase_time(&self, seconds: u64) -> Result<(), Error> {
        self.check_online()?;
        self.state.lock().expect("mock state poisoned").pending_time_offset += seconds;
        Ok(())
    }

    async fn mine_block(&self) -> Result<(), Error> {
        self.check_online()?;
        let mut state = self.state.lock().expect("mock state poisoned");
        state.block_number += 1;
        state.timestamp += state.pending_time_offset + 1;
        state.pending_time_offset = 0;
        Ok(())
    }
}
