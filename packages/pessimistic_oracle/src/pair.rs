use std::fmt::{Display, Formatter, Result};

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Decimal256, StdError, StdResult, Uint128, Uint256};

use crate::asset::PoolAsset;

/// Decimal precision of cumulative prices. A price is accumulated as [`Decimal256`] atomics
/// multiplied by elapsed seconds.
pub const TWAP_PRECISION: u8 = 18;

/// Pools write a new observation once this many seconds have passed since the previous one.
pub const OBSERVATION_PERIOD: u64 = 1800;

/// This enum describes the invariant a pool is built on.
#[cw_serde]
pub enum PairType {
    /// Constant product (x * y = k) pool
    Xyk {},
    /// Low slippage pool for closely pegged assets
    Stable {},
    /// Any other curve. The oracle doesn't know how to value it
    Custom { pair_type: String },
}

impl Display for PairType {
    fn fmt(&self, fmt: &mut Formatter) -> Result {
        match self {
            PairType::Xyk {} => fmt.write_str("xyk"),
            PairType::Stable {} => fmt.write_str("stable"),
            PairType::Custom { pair_type } => write!(fmt, "custom-{pair_type}"),
        }
    }
}

/// This structure describes a pool as reported by the AMM.
#[cw_serde]
pub struct PoolInfo {
    /// Both pool sides with their current reserves
    pub assets: [PoolAsset; 2],
    /// Pool invariant
    pub pair_type: PairType,
    /// Total amount of LP shares in circulation
    pub total_share: Uint128,
    /// Number of decimals of the LP share
    pub share_decimals: u8,
}

/// A periodic snapshot of the pool cumulative prices.
#[cw_serde]
#[derive(Copy)]
pub struct Observation {
    /// Timestamp (in seconds) of the snapshot
    pub timestamp: u64,
    /// Sum of `price0 * seconds` where `price0` is the amount of whole asset 1 tokens per whole
    /// asset 0 token
    pub price0_cumulative: Uint256,
    /// Sum of `price1 * seconds` where `price1` is the amount of whole asset 0 tokens per whole
    /// asset 1 token
    pub price1_cumulative: Uint256,
}

/// Cumulative prices as of the last reserve change of a pool.
#[cw_serde]
pub struct CumulativePricesResponse {
    pub price0_cumulative_last: Uint256,
    pub price1_cumulative_last: Uint256,
    pub block_timestamp_last: u64,
}

/// Queries a pool contract answers.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PoolInfo)]
    Pool {},
    /// Number of observations written so far
    #[returns(u64)]
    ObservationLength {},
    /// Observation at `index`, 0 is the oldest one
    #[returns(Observation)]
    Observation { index: u64 },
    #[returns(CumulativePricesResponse)]
    CumulativePrices {},
}

/// Returns the instantaneous prices `(price0, price1)` implied by the reserves, each expressed
/// in whole tokens of the other asset. `None` is returned if either side is empty.
pub fn spot_prices(assets: &[PoolAsset; 2]) -> StdResult<Option<(Decimal256, Decimal256)>> {
    let [asset0, asset1] = assets;
    if asset0.amount.is_zero() || asset1.amount.is_zero() {
        return Ok(None);
    }

    // r1 * 10^dec0 / (r0 * 10^dec1) keeps full precision whatever the decimal gap is
    let scaled0 = Uint256::from(asset0.amount).checked_mul(asset1.unit()?)?;
    let scaled1 = Uint256::from(asset1.amount).checked_mul(asset0.unit()?)?;

    let ratio = |numerator: Uint256, denominator: Uint256| {
        Decimal256::checked_from_ratio(numerator, denominator)
            .map_err(|err| StdError::generic_err(format!("Spot price: {err}")))
    };

    Ok(Some((ratio(scaled1, scaled0)?, ratio(scaled0, scaled1)?)))
}

/// Extends `last` up to `now` with the current reserves. Accumulators wrap around on overflow.
pub fn accumulate_prices(
    assets: &[PoolAsset; 2],
    last: &CumulativePricesResponse,
    now: u64,
) -> StdResult<CumulativePricesResponse> {
    let mut accumulated = last.clone();
    if now <= last.block_timestamp_last {
        return Ok(accumulated);
    }

    if let Some((price0, price1)) = spot_prices(assets)? {
        let elapsed = Uint256::from(now - last.block_timestamp_last);
        accumulated.price0_cumulative_last = last
            .price0_cumulative_last
            .wrapping_add(price0.atomics().wrapping_mul(elapsed));
        accumulated.price1_cumulative_last = last
            .price1_cumulative_last
            .wrapping_add(price1.atomics().wrapping_mul(elapsed));
    }
    accumulated.block_timestamp_last = now;

    Ok(accumulated)
}
