//! Time weighted average prices computed from the observation log of a pool.
//!
//! The sampler anchors at the observation `points` checkpoints back and averages the cumulative
//! prices between that anchor and the current (extrapolated) cumulative value:
//!
//! `twap = (C_now - C_anchor) / (now - T_anchor)`
//!
//! A trade only moves the TWAP once the reserves it produced have been held for some time, and
//! the wider the window the smaller the move. Prices are accumulated in whole token units so the
//! average keeps its precision across any decimal gap between the pool sides.

use cosmwasm_std::{Decimal256, Deps, Timestamp, Uint128, Uint256};

use pessimistic_oracle::oracle::TwapQuoteResponse;
use pessimistic_oracle::pair::{accumulate_prices, Observation};
use pessimistic_oracle::querier::{
    query_cumulative_prices, query_observation, query_observation_length,
};

use crate::classifier::{load_pool, ClassifiedPool};
use crate::error::ContractError;
use crate::state::points_for;

/// Time weighted average prices of both pool sides in whole token units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwapSample {
    /// Whole asset 1 tokens per whole asset 0 token
    pub price0: Decimal256,
    /// Whole asset 0 tokens per whole asset 1 token
    pub price1: Decimal256,
    /// Number of observations the window actually spans
    pub points: u32,
    /// Set when the pool has fewer observations than requested
    pub degraded: bool,
}

impl TwapSample {
    /// Average price of the asset at `index` denominated in the other asset.
    pub fn price_of(&self, index: usize) -> Decimal256 {
        if index == 0 {
            self.price0
        } else {
            self.price1
        }
    }
}

/// Samples the TWAP of `pool` over the last `points` observations.
pub fn sample(
    deps: Deps,
    pool: &ClassifiedPool,
    points: u32,
    now: Timestamp,
) -> Result<TwapSample, ContractError> {
    let no_history = || ContractError::InsufficientObservationHistory {
        pool: pool.pool.clone(),
    };

    let length = query_observation_length(&deps.querier, &pool.pool)?;
    if length == 0 {
        return Err(no_history());
    }

    let requested = u64::from(points.max(1));
    let degraded = length < requested;
    let mut anchor_index = length.saturating_sub(requested);
    let mut anchor = query_observation(&deps.querier, &pool.pool, anchor_index)?;

    let last = query_cumulative_prices(&deps.querier, &pool.pool)?;
    let current = accumulate_prices(pool.assets(), &last, now.seconds())?;

    // An anchor written in the current second carries no time. Widen the window instead of
    // dividing by zero.
    while current.block_timestamp_last <= anchor.timestamp && anchor_index > 0 {
        anchor_index -= 1;
        anchor = query_observation(&deps.querier, &pool.pool, anchor_index)?;
    }

    // Reserves set in the current second must never be priced on their own
    if current.block_timestamp_last <= anchor.timestamp {
        return Err(no_history());
    }

    let elapsed = Uint256::from(current.block_timestamp_last - anchor.timestamp);
    let price0 = average(current.price0_cumulative_last, &anchor, elapsed, |obs| {
        obs.price0_cumulative
    })?;
    let price1 = average(current.price1_cumulative_last, &anchor, elapsed, |obs| {
        obs.price1_cumulative
    })?;

    Ok(TwapSample {
        price0,
        price1,
        points: u32::try_from(length - anchor_index).unwrap_or(u32::MAX),
        degraded,
    })
}

fn average(
    cumulative_now: Uint256,
    anchor: &Observation,
    elapsed: Uint256,
    cumulative_of: impl Fn(&Observation) -> Uint256,
) -> Result<Decimal256, ContractError> {
    // Accumulators are allowed to wrap around
    let delta = cumulative_now.wrapping_sub(cumulative_of(anchor));
    Ok(Decimal256::new(delta.checked_div(elapsed)?))
}

/// Quotes `amount_in` native units of `asset` in native units of the other pool asset at the
/// time weighted average price.
pub fn get_twap_price(
    deps: Deps,
    pool: &str,
    asset: &str,
    amount_in: Uint128,
    now: Timestamp,
) -> Result<TwapQuoteResponse, ContractError> {
    let classified = load_pool(deps, pool)?;
    let offer_index = classified.index_of(asset)?;
    let offer = &classified.assets()[offer_index];
    let ask = &classified.assets()[1 - offer_index];
    let points = points_for(deps.storage, pool)?;

    let sample = sample(deps, &classified, points, now)?;
    let amount_out = Uint256::from(amount_in).checked_multiply_ratio(
        sample.price_of(offer_index).atomics().checked_mul(ask.unit()?)?,
        offer.unit()?.checked_mul(Decimal256::one().atomics())?,
    )?;

    Ok(TwapQuoteResponse {
        amount_out,
        ask_denom: ask.denom.clone(),
        points: sample.points,
        degraded: sample.degraded,
    })
}
