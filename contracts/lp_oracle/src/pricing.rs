use cosmwasm_std::{Decimal256, Deps, Isqrt, Order, StdResult, Timestamp, Uint256, Uint512};
use cw_storage_plus::Bound;

use pessimistic_oracle::asset::Decimal256Ext;
use pessimistic_oracle::oracle::SECONDS_PER_DAY;

use crate::classifier::{load_pool, ClassifiedPool, InvariantKind};
use crate::error::ContractError;
use crate::resolver::resolve_token_prices;
use crate::state::{CONFIG, DAILY_LOWS, PRICE_CAPS};

/// Price of one LP token given the USD prices of both pool constituents.
///
/// * Volatile pools: `2 * sqrt(price_a * price_b * reserve_a * reserve_b) / supply`. A trade which
///   keeps `x * y` leaves the result unchanged no matter how far it moves the spot price.
/// * Stable pools: `(reserve_a * price_a + reserve_b * price_b) / supply`.
pub fn lp_price(pool: &ClassifiedPool, prices: [Decimal256; 2]) -> Result<Decimal256, ContractError> {
    let [asset_a, asset_b] = pool.assets();

    let pool_value = match pool.kind {
        InvariantKind::Volatile => {
            // The radicand is built from integers in 512 bits so that tiny prices don't vanish
            // before being multiplied by a large k
            let k = asset_a.amount.full_mul(asset_b.amount);
            let scale = asset_a.unit()?.checked_mul(asset_b.unit()?)?;

            let radicand = Uint512::from(prices[0].atomics())
                .checked_mul(Uint512::from(prices[1].atomics()))?
                .checked_mul(Uint512::from(k))?
                .checked_div(Uint512::from(scale))?;
            let root = Uint256::try_from(radicand)?.isqrt();

            Decimal256::new(root.checked_mul(Uint256::from(2u8))?)
        }
        InvariantKind::Stable => {
            let value_a = asset_a.to_decimal()?.checked_mul(prices[0])?;
            let value_b = asset_b.to_decimal()?.checked_mul(prices[1])?;
            value_a.checked_add(value_b)?
        }
    };

    let supply = Decimal256::with_precision(pool.info.total_share, pool.info.share_decimals)?;
    if supply.is_zero() {
        return Err(ContractError::EmptyPool {
            pool: pool.pool.clone(),
        });
    }

    Ok(pool_value.checked_div(supply)?)
}

/// Current price of one LP token of `pool` computed from the feeds, the TWAP and the reserves.
pub fn live_pool_price(
    deps: Deps,
    pool: &str,
    now: Timestamp,
) -> Result<Decimal256, ContractError> {
    let classified = load_pool(deps, pool)?;
    let prices = resolve_token_prices(deps, &classified, now)?;

    lp_price(&classified, [prices[0].price, prices[1].price])
}

/// The lowest of the live price and the daily lows recorded today and during the look-back
/// period, bounded by the pool price cap if one is set.
pub fn pessimistic_pool_price(
    deps: Deps,
    pool: &str,
    now: Timestamp,
) -> Result<Decimal256, ContractError> {
    let live = live_pool_price(deps, pool, now)?;
    let config = CONFIG.load(deps.storage)?;

    let today = now.seconds() / SECONDS_PER_DAY;
    let first_day = today.saturating_sub(config.pessimistic_lookback_days);

    let lowest = DAILY_LOWS
        .prefix(pool)
        .range(
            deps.storage,
            Some(Bound::inclusive(first_day)),
            Some(Bound::inclusive(today)),
            Order::Ascending,
        )
        .try_fold(live, |lowest, item| -> StdResult<_> {
            let (_, low) = item?;
            Ok(lowest.min(low))
        })?;

    Ok(match PRICE_CAPS.may_load(deps.storage, pool)? {
        Some(cap) => lowest.min(cap),
        None => lowest,
    })
}

/// Returns the price of one LP token of `pool`.
pub fn get_current_pool_price(
    deps: Deps,
    pool: &str,
    now: Timestamp,
    pessimistic: bool,
) -> Result<Decimal256, ContractError> {
    if pessimistic {
        pessimistic_pool_price(deps, pool, now)
    } else {
        live_pool_price(deps, pool, now)
    }
}
