use cosmwasm_std::{Decimal256, Deps, Timestamp};

use pessimistic_oracle::oracle::{PriceSource, TokenPrice, TokenPricesResponse};

use crate::classifier::{load_pool, ClassifiedPool, InvariantKind};
use crate::error::ContractError;
use crate::feeds::get_reference_price;
use crate::state::{points_for, FEEDS};
use crate::twap::sample;

/// Resolves the USD price of both constituents of an already classified pool.
///
/// A fresh feed is authoritative. An asset without one is priced through its sibling: by the
/// pool TWAP in volatile pools, at the sibling price in stable pools. If neither side has a
/// fresh feed the pool can't be priced.
pub fn resolve_token_prices(
    deps: Deps,
    pool: &ClassifiedPool,
    now: Timestamp,
) -> Result<[TokenPrice; 2], ContractError> {
    let assets = pool.assets();
    let feed_prices = [
        get_reference_price(deps, &assets[0].denom, now)?,
        get_reference_price(deps, &assets[1].denom, now)?,
    ];

    let fed_token = |index: usize, price: Decimal256| -> Result<TokenPrice, ContractError> {
        let binding = FEEDS.load(deps.storage, &assets[index].denom)?;
        Ok(TokenPrice {
            denom: assets[index].denom.clone(),
            price,
            source: PriceSource::Feed { feed: binding.feed },
        })
    };

    let (fed_index, fed_price) = match feed_prices {
        [Some(price0), Some(price1)] => return Ok([fed_token(0, price0)?, fed_token(1, price1)?]),
        [Some(price0), None] => (0, price0),
        [None, Some(price1)] => (1, price1),
        [None, None] => {
            return Err(ContractError::NoPriceableAsset {
                pool: pool.pool.clone(),
            })
        }
    };
    let unfed_index = 1 - fed_index;

    let unfed = match pool.kind {
        InvariantKind::Volatile => {
            let points = points_for(deps.storage, &pool.pool)?;
            let twap = sample(deps, pool, points, now)?;
            TokenPrice {
                denom: assets[unfed_index].denom.clone(),
                price: fed_price.checked_mul(twap.price_of(unfed_index))?,
                source: PriceSource::Twap {
                    points: twap.points,
                    degraded: twap.degraded,
                },
            }
        }
        InvariantKind::Stable => TokenPrice {
            denom: assets[unfed_index].denom.clone(),
            price: fed_price,
            source: PriceSource::Peg {
                denom: assets[fed_index].denom.clone(),
            },
        },
    };

    let fed = fed_token(fed_index, fed_price)?;
    Ok(if fed_index == 0 {
        [fed, unfed]
    } else {
        [unfed, fed]
    })
}

/// Returns the USD prices of both pool constituents.
pub fn get_token_prices(
    deps: Deps,
    pool: &str,
    now: Timestamp,
) -> Result<TokenPricesResponse, ContractError> {
    let classified = load_pool(deps, pool)?;
    let prices = resolve_token_prices(deps, &classified, now)?;

    Ok(TokenPricesResponse { prices })
}
