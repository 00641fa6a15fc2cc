use cosmwasm_std::{QuerierWrapper, StdResult};

use crate::feed::{QueryMsg as FeedQueryMsg, RoundData};
use crate::pair::{CumulativePricesResponse, Observation, PoolInfo, QueryMsg as PairQueryMsg};
use crate::vault::{QueryMsg as VaultQueryMsg, VaultInfo};

/// Returns the current reserves, invariant and LP supply of a pool.
pub fn query_pool(querier: &QuerierWrapper, pool: impl Into<String>) -> StdResult<PoolInfo> {
    querier.query_wasm_smart(pool, &PairQueryMsg::Pool {})
}

/// Returns the number of observations a pool has written so far.
pub fn query_observation_length(
    querier: &QuerierWrapper,
    pool: impl Into<String>,
) -> StdResult<u64> {
    querier.query_wasm_smart(pool, &PairQueryMsg::ObservationLength {})
}

pub fn query_observation(
    querier: &QuerierWrapper,
    pool: impl Into<String>,
    index: u64,
) -> StdResult<Observation> {
    querier.query_wasm_smart(pool, &PairQueryMsg::Observation { index })
}

/// Returns the cumulative prices of a pool as of its last reserve change.
pub fn query_cumulative_prices(
    querier: &QuerierWrapper,
    pool: impl Into<String>,
) -> StdResult<CumulativePricesResponse> {
    querier.query_wasm_smart(pool, &PairQueryMsg::CumulativePrices {})
}

/// Returns the latest round of a feed or `None` if the feed never answered.
pub fn query_latest_round(
    querier: &QuerierWrapper,
    feed: impl Into<String>,
) -> StdResult<Option<RoundData>> {
    querier.query_wasm_smart(feed, &FeedQueryMsg::LatestRound {})
}

/// Returns the underlying pool and share exchange rate of a vault.
pub fn query_vault(querier: &QuerierWrapper, vault: impl Into<String>) -> StdResult<VaultInfo> {
    querier.query_wasm_smart(vault, &VaultQueryMsg::VaultInfo {})
}
