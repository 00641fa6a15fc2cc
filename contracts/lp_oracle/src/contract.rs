#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_json_binary, Binary, Decimal256, Deps, DepsMut, Env, MessageInfo, Response, StdError,
};
use cw2::set_contract_version;

use pessimistic_oracle::common::{
    addr_validate_to_lower, claim_ownership, drop_ownership_proposal, propose_new_owner,
};
use pessimistic_oracle::oracle::{
    Config, ExecuteMsg, InstantiateMsg, QueryMsg, DEFAULT_PESSIMISTIC_LOOKBACK_DAYS,
    DEFAULT_TWAP_POINTS, MAX_PESSIMISTIC_LOOKBACK_DAYS, MAX_TWAP_POINTS,
};

use crate::cache::{update_many, update_price};
use crate::error::ContractError;
use crate::feeds::{get_reference_price, remove_feed, set_feed};
use crate::pricing::get_current_pool_price;
use crate::resolver::get_token_prices;
use crate::state::{
    assert_owner, points_for, CONFIG, FEEDS, OWNERSHIP_PROPOSAL, POINTS_OVERRIDES, PRICE_CACHE,
    PRICE_CAPS,
};
use crate::twap::get_twap_price;
use crate::vault::get_current_vault_price;

/// Contract name that is used for migration.
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
/// Contract version that is used for migration.
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a new oracle with the specified parameters in the [`InstantiateMsg`].
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let default_points = msg.default_points.unwrap_or(DEFAULT_TWAP_POINTS);
    validate_points(default_points)?;
    let pessimistic_lookback_days = msg
        .pessimistic_lookback_days
        .unwrap_or(DEFAULT_PESSIMISTIC_LOOKBACK_DAYS);
    validate_lookback(pessimistic_lookback_days)?;

    let config = Config {
        owner: addr_validate_to_lower(deps.api, &msg.owner)?,
        default_points,
        pessimistic_lookback_days,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "instantiate"),
        attr("owner", config.owner),
        attr("default_points", default_points.to_string()),
        attr(
            "pessimistic_lookback_days",
            pessimistic_lookback_days.to_string(),
        ),
    ]))
}

/// Exposes all the execute functions available in the oracle.
///
/// ## Variants
/// * **ExecuteMsg::SetFeed { asset, feed, heartbeat }** Binds an asset to a reference feed.
///
/// * **ExecuteMsg::RemoveFeed { asset }** Unbinds an asset.
///
/// * **ExecuteMsg::SetPointsOverride { pool, points }** Sets or clears the TWAP window of a pool.
///
/// * **ExecuteMsg::SetPriceCap { pool, cap }** Sets or clears the pessimistic price cap of a pool.
///
/// * **ExecuteMsg::UpdateConfig { .. }** Updates the oracle configuration.
///
/// * **ExecuteMsg::UpdatePrice { pool }** Persists the current price of a pool.
///
/// * **ExecuteMsg::UpdateMany { pools }** Persists current prices of several pools.
///
/// * **ExecuteMsg::ProposeNewOwner { owner, expires_in }** Creates a request to change contract ownership.
///
/// * **ExecuteMsg::DropOwnershipProposal {}** Removes a request to change contract ownership.
///
/// * **ExecuteMsg::ClaimOwnership {}** Claims contract ownership.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SetFeed {
            asset,
            feed,
            heartbeat,
        } => set_feed(deps, info, asset, feed, heartbeat),
        ExecuteMsg::RemoveFeed { asset } => remove_feed(deps, info, asset),
        ExecuteMsg::SetPointsOverride { pool, points } => {
            set_points_override(deps, info, pool, points)
        }
        ExecuteMsg::SetPriceCap { pool, cap } => set_price_cap(deps, info, pool, cap),
        ExecuteMsg::UpdateConfig {
            default_points,
            pessimistic_lookback_days,
        } => update_config(deps, info, default_points, pessimistic_lookback_days),
        ExecuteMsg::UpdatePrice { pool } => update_price(deps, pool, env.block.time),
        ExecuteMsg::UpdateMany { pools } => update_many(deps, pools, env.block.time),
        ExecuteMsg::ProposeNewOwner { owner, expires_in } => {
            let config = CONFIG.load(deps.storage)?;

            propose_new_owner(
                deps,
                info,
                env,
                owner,
                expires_in,
                config.owner,
                OWNERSHIP_PROPOSAL,
            )
            .map_err(Into::into)
        }
        ExecuteMsg::DropOwnershipProposal {} => {
            let config = CONFIG.load(deps.storage)?;

            drop_ownership_proposal(deps, info, config.owner, OWNERSHIP_PROPOSAL)
                .map_err(Into::into)
        }
        ExecuteMsg::ClaimOwnership {} => {
            claim_ownership(deps, info, env, OWNERSHIP_PROPOSAL, |deps, new_owner| {
                CONFIG.update::<_, StdError>(deps.storage, |mut v| {
                    v.owner = new_owner;
                    Ok(v)
                })?;

                Ok(())
            })
            .map_err(Into::into)
        }
    }
}

fn validate_points(points: u32) -> Result<(), ContractError> {
    if points == 0 || points > MAX_TWAP_POINTS {
        return Err(ContractError::InvalidPoints {
            points,
            max: MAX_TWAP_POINTS,
        });
    }

    Ok(())
}

fn validate_lookback(days: u64) -> Result<(), ContractError> {
    if days > MAX_PESSIMISTIC_LOOKBACK_DAYS {
        return Err(ContractError::InvalidLookback {
            days,
            max: MAX_PESSIMISTIC_LOOKBACK_DAYS,
        });
    }

    Ok(())
}

/// Overrides the TWAP window of `pool`. `None` restores the default window.
/// ## Executor
/// Only the owner can execute this.
pub fn set_points_override(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
    points: Option<u32>,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;

    let points = match points {
        Some(points) => {
            validate_points(points)?;
            POINTS_OVERRIDES.save(deps.storage, &pool, &points)?;
            points.to_string()
        }
        None => {
            POINTS_OVERRIDES.remove(deps.storage, &pool);
            "default".to_string()
        }
    };

    Ok(Response::new().add_attributes(vec![
        attr("action", "set_points_override"),
        attr("pool", pool),
        attr("points", points),
    ]))
}

/// Sets or clears the upper bound of pessimistic prices of `pool`.
/// ## Executor
/// Only the owner can execute this.
pub fn set_price_cap(
    deps: DepsMut,
    info: MessageInfo,
    pool: String,
    cap: Option<Decimal256>,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;

    let cap = match cap {
        Some(cap) => {
            PRICE_CAPS.save(deps.storage, &pool, &cap)?;
            cap.to_string()
        }
        None => {
            PRICE_CAPS.remove(deps.storage, &pool);
            "none".to_string()
        }
    };

    Ok(Response::new().add_attributes(vec![
        attr("action", "set_price_cap"),
        attr("pool", pool),
        attr("cap", cap),
    ]))
}

/// Updates the oracle configuration.
/// ## Executor
/// Only the owner can execute this.
pub fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    default_points: Option<u32>,
    pessimistic_lookback_days: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = assert_owner(deps.storage, &info.sender)?;
    let mut attributes = vec![attr("action", "update_config")];

    if let Some(default_points) = default_points {
        validate_points(default_points)?;
        config.default_points = default_points;
        attributes.push(attr("default_points", default_points.to_string()));
    }

    if let Some(days) = pessimistic_lookback_days {
        validate_lookback(days)?;
        config.pessimistic_lookback_days = days;
        attributes.push(attr("pessimistic_lookback_days", days.to_string()));
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(attributes))
}

/// Exposes all the queries available in the oracle.
///
/// ## Queries
/// * **QueryMsg::Config {}** Returns the oracle configuration.
///
/// * **QueryMsg::Feed { asset }** Returns the feed binding of an asset.
///
/// * **QueryMsg::ReferencePrice { asset }** Returns the fresh feed price of an asset.
///
/// * **QueryMsg::Points { pool }** Returns the TWAP window applied to a pool.
///
/// * **QueryMsg::TokenPrices { pool }** Returns USD prices of both pool constituents.
///
/// * **QueryMsg::PoolPrice { pool, pessimistic }** Returns the price of one LP token.
///
/// * **QueryMsg::VaultPrice { vault, pessimistic }** Returns the price of one vault share.
///
/// * **QueryMsg::TwapPrice { pool, asset, amount_in }** Returns a time weighted quote.
///
/// * **QueryMsg::CachedPrice { pool }** Returns the last persisted price of a pool.
///
/// * **QueryMsg::PriceCap { pool }** Returns the pessimistic price cap of a pool.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let now = env.block.time;
    let res = match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?)?,
        QueryMsg::Feed { asset } => to_json_binary(&FEEDS.may_load(deps.storage, &asset)?)?,
        QueryMsg::ReferencePrice { asset } => {
            to_json_binary(&get_reference_price(deps, &asset, now)?)?
        }
        QueryMsg::Points { pool } => to_json_binary(&points_for(deps.storage, &pool)?)?,
        QueryMsg::TokenPrices { pool } => to_json_binary(&get_token_prices(deps, &pool, now)?)?,
        QueryMsg::PoolPrice { pool, pessimistic } => to_json_binary(&get_current_pool_price(
            deps,
            &pool,
            now,
            pessimistic.unwrap_or_default(),
        )?)?,
        QueryMsg::VaultPrice { vault, pessimistic } => to_json_binary(
            &get_current_vault_price(deps, &vault, now, pessimistic.unwrap_or_default())?,
        )?,
        QueryMsg::TwapPrice {
            pool,
            asset,
            amount_in,
        } => to_json_binary(&get_twap_price(deps, &pool, &asset, amount_in, now)?)?,
        QueryMsg::CachedPrice { pool } => {
            to_json_binary(&PRICE_CACHE.may_load(deps.storage, &pool)?)?
        }
        QueryMsg::PriceCap { pool } => to_json_binary(&PRICE_CAPS.may_load(deps.storage, &pool)?)?,
    };

    Ok(res)
}
