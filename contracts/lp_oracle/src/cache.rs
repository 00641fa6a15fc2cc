use cosmwasm_std::{attr, Decimal256, DepsMut, Order, Response, StdResult, Timestamp};
use cw_storage_plus::Bound;
use itertools::Itertools;

use pessimistic_oracle::oracle::{CachedPrice, SECONDS_PER_DAY};

use crate::error::ContractError;
use crate::pricing::live_pool_price;
use crate::state::{CONFIG, DAILY_LOWS, PRICE_CACHE};

/// Recomputes the live price of `pool`, persists it and records it as a daily low candidate.
/// Nothing is written if the price can't be computed.
fn store_price(
    deps: DepsMut,
    pool: &str,
    now: Timestamp,
) -> Result<Decimal256, ContractError> {
    let price = live_pool_price(deps.as_ref(), pool, now)?;
    let config = CONFIG.load(deps.storage)?;

    PRICE_CACHE.save(
        deps.storage,
        pool,
        &CachedPrice {
            price,
            last_updated: now.seconds(),
        },
    )?;

    let today = now.seconds() / SECONDS_PER_DAY;
    DAILY_LOWS.update(deps.storage, (pool, today), |low| -> StdResult<_> {
        Ok(low.map_or(price, |low| low.min(price)))
    })?;

    // Lows which left the look-back window are never read again
    let first_day = today.saturating_sub(config.pessimistic_lookback_days);
    let expired = DAILY_LOWS
        .prefix(pool)
        .keys(
            deps.storage,
            None,
            Some(Bound::exclusive(first_day)),
            Order::Ascending,
        )
        .collect::<StdResult<Vec<_>>>()?;
    for day in expired {
        DAILY_LOWS.remove(deps.storage, (pool, day));
    }

    Ok(price)
}

/// Recomputes and persists the price of one pool.
pub fn update_price(
    deps: DepsMut,
    pool: String,
    now: Timestamp,
) -> Result<Response, ContractError> {
    let price = store_price(deps, &pool, now)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "update_price"),
        attr("pool", pool),
        attr("price", price.to_string()),
    ]))
}

/// Recomputes and persists prices of several pools. A pool which can't be priced is reported in
/// a `failed` attribute and doesn't prevent the remaining pools from updating.
pub fn update_many(
    mut deps: DepsMut,
    pools: Vec<String>,
    now: Timestamp,
) -> Result<Response, ContractError> {
    let mut updated = vec![];
    let mut failed = vec![];

    for pool in pools.into_iter().unique() {
        match store_price(deps.branch(), &pool, now) {
            Ok(price) => updated.push(attr("updated", format!("{pool}:{price}"))),
            Err(err) => failed.push(attr("failed", format!("{pool}:{err}"))),
        }
    }

    Ok(Response::new()
        .add_attribute("action", "update_many")
        .add_attributes(updated)
        .add_attributes(failed))
}
