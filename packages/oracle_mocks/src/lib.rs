//! Mock collaborators of the pessimistic LP oracle.
//!
//! [`MockPair`] simulates an AMM pool which accumulates prices and writes an observation once per
//! [`OBSERVATION_PERIOD`](pessimistic_oracle::pair::OBSERVATION_PERIOD). [`WasmMockQuerier`]
//! answers the smart queries the oracle sends to pools, feeds and vaults.

mod pair;
mod querier;
mod stable_math;

pub use pair::MockPair;
pub use querier::{mock_dependencies, WasmMockQuerier};
