//! Pessimistic price oracle for AMM liquidity pool tokens and the vault tokens built on them.
//!
//! Pools, their observation logs, reference feeds and vaults are separate contracts queried
//! through the helpers in [`pessimistic_oracle::querier`].

pub mod cache;
pub mod classifier;
pub mod contract;
pub mod error;
pub mod feeds;
pub mod pricing;
pub mod resolver;
pub mod state;
pub mod twap;
pub mod vault;

#[cfg(test)]
mod testing;
