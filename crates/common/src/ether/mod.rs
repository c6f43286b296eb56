/// The [`ChainProbe`](probe::ChainProbe) trait and its RPC-backed
/// implementation.
pub mod probe;

/// A thin wrapper around an alloy [`RootProvider`](alloy::providers::RootProvider).
pub mod provider;
