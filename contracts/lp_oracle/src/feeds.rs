//! Feed registry: binds assets to reference price feeds and decides whether their latest
//! answer can be trusted.

use cosmwasm_std::{attr, Decimal256, Deps, DepsMut, MessageInfo, Response, Timestamp};

use pessimistic_oracle::common::addr_validate_to_lower;
use pessimistic_oracle::feed::FeedBinding;
use pessimistic_oracle::querier::query_latest_round;

use crate::error::ContractError;
use crate::state::{assert_owner, FEEDS};

/// Binds `asset` to `feed`, overwriting any previous binding.
/// ## Executor
/// Only the owner can execute this.
pub fn set_feed(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
    feed: String,
    heartbeat: u64,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;

    if heartbeat == 0 {
        return Err(ContractError::InvalidHeartbeat {});
    }

    let feed = addr_validate_to_lower(deps.api, feed)?;
    FEEDS.save(
        deps.storage,
        &asset,
        &FeedBinding {
            feed: feed.to_string(),
            heartbeat,
        },
    )?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "set_feed"),
        attr("asset", asset),
        attr("feed", feed),
        attr("heartbeat", heartbeat.to_string()),
    ]))
}

/// Unbinds `asset` from its feed.
/// ## Executor
/// Only the owner can execute this.
pub fn remove_feed(
    deps: DepsMut,
    info: MessageInfo,
    asset: String,
) -> Result<Response, ContractError> {
    assert_owner(deps.storage, &info.sender)?;

    FEEDS.remove(deps.storage, &asset);

    Ok(Response::new().add_attributes(vec![attr("action", "remove_feed"), attr("asset", asset)]))
}

/// Returns the latest feed price of `asset` if it can be used as ground truth.
///
/// * [`ContractError::FeedMissing`] - the asset isn't bound, the feed never answered or
///   answered zero.
/// * [`ContractError::FeedStale`] - the latest round is older than the heartbeat.
pub fn query_feed_price(
    deps: Deps,
    asset: &str,
    now: Timestamp,
) -> Result<Decimal256, ContractError> {
    let missing = || ContractError::FeedMissing {
        asset: asset.to_string(),
    };

    let binding = FEEDS.may_load(deps.storage, asset)?.ok_or_else(missing)?;
    let round = query_latest_round(&deps.querier, &binding.feed)?.ok_or_else(missing)?;

    if round.price.is_zero() {
        return Err(missing());
    }

    if !round.is_fresh(now.seconds(), binding.heartbeat) {
        return Err(ContractError::FeedStale {
            asset: asset.to_string(),
            age: round.age(now.seconds()),
            heartbeat: binding.heartbeat,
        });
    }

    Ok(round.price)
}

/// Returns the fresh reference price of `asset` or `None` when it is stale or unbound.
pub fn get_reference_price(
    deps: Deps,
    asset: &str,
    now: Timestamp,
) -> Result<Option<Decimal256>, ContractError> {
    match query_feed_price(deps, asset, now) {
        Ok(price) => Ok(Some(price)),
        Err(err) if err.is_feed_unavailable() => Ok(None),
        Err(err) => Err(err),
    }
}
