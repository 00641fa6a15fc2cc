use cosmwasm_std::{Addr, Decimal256, StdResult, Storage};
use cw_storage_plus::{Item, Map};

use pessimistic_oracle::common::OwnershipProposal;
use pessimistic_oracle::feed::FeedBinding;
use pessimistic_oracle::oracle::{CachedPrice, Config};

use crate::error::ContractError;

/// Stores the oracle config at the given key
pub const CONFIG: Item<Config> = Item::new("config");
/// Stores the latest contract ownership transfer proposal
pub const OWNERSHIP_PROPOSAL: Item<OwnershipProposal> = Item::new("ownership_proposal");
/// Asset denom -> reference feed binding
pub const FEEDS: Map<&str, FeedBinding> = Map::new("feeds");
/// Pool -> TWAP window override
pub const POINTS_OVERRIDES: Map<&str, u32> = Map::new("points_overrides");
/// Pool -> upper bound of pessimistic prices
pub const PRICE_CAPS: Map<&str, Decimal256> = Map::new("price_caps");
/// Pool -> last persisted live price
pub const PRICE_CACHE: Map<&str, CachedPrice> = Map::new("price_cache");
/// (pool, day) -> lowest live price recorded that day
pub const DAILY_LOWS: Map<(&str, u64), Decimal256> = Map::new("daily_lows");

/// Returns the TWAP window applied to `pool`.
pub fn points_for(storage: &dyn Storage, pool: &str) -> StdResult<u32> {
    match POINTS_OVERRIDES.may_load(storage, pool)? {
        Some(points) => Ok(points),
        None => Ok(CONFIG.load(storage)?.default_points),
    }
}

/// Governance capability check. Only the oracle owner may change feeds, windows, caps and config.
pub fn assert_owner(storage: &dyn Storage, sender: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    Ok(config)
}
