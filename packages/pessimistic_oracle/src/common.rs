use cosmwasm_schema::cw_serde;
use cosmwasm_std::{attr, Addr, Api, DepsMut, Env, MessageInfo, Response, StdError, StdResult};
use cw_storage_plus::Item;

/// The longest period (in seconds) an ownership proposal stays valid.
pub const MAX_PROPOSAL_TTL: u64 = 1209600;

/// This structure describes the parameters used for creating a request for a change of contract ownership.
#[cw_serde]
pub struct OwnershipProposal {
    /// The newly proposed contract owner
    pub owner: Addr,
    /// Time until the proposal to change ownership expires
    pub ttl: u64,
}

/// Validates an address which must already be lowercase.
pub fn addr_validate_to_lower(api: &dyn Api, addr: impl Into<String>) -> StdResult<Addr> {
    let addr = addr.into();
    if addr.to_lowercase() != addr {
        return Err(StdError::generic_err(format!(
            "Address {addr} should be lowercase"
        )));
    }

    api.addr_validate(&addr)
}

/// Creates a new request to change the oracle owner.
/// ## Executor
/// Only the current owner can execute this.
pub fn propose_new_owner(
    deps: DepsMut,
    info: MessageInfo,
    env: Env,
    new_owner: String,
    expires_in: u64,
    owner: Addr,
    proposal: Item<OwnershipProposal>,
) -> StdResult<Response> {
    if info.sender != owner {
        return Err(StdError::generic_err("Unauthorized"));
    }

    let new_owner = addr_validate_to_lower(deps.api, new_owner)?;
    if new_owner == owner {
        return Err(StdError::generic_err("New owner cannot be same"));
    }

    if expires_in > MAX_PROPOSAL_TTL {
        return Err(StdError::generic_err(format!(
            "Parameter expires_in cannot be higher than {MAX_PROPOSAL_TTL}"
        )));
    }

    proposal.save(
        deps.storage,
        &OwnershipProposal {
            owner: new_owner.clone(),
            ttl: env.block.time.seconds() + expires_in,
        },
    )?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "propose_new_owner"),
        attr("new_owner", new_owner),
    ]))
}

/// Removes a pending ownership proposal.
/// ## Executor
/// Only the current owner can execute this.
pub fn drop_ownership_proposal(
    deps: DepsMut,
    info: MessageInfo,
    owner: Addr,
    proposal: Item<OwnershipProposal>,
) -> StdResult<Response> {
    if info.sender != owner {
        return Err(StdError::generic_err("Unauthorized"));
    }

    proposal.remove(deps.storage);

    Ok(Response::new().add_attribute("action", "drop_ownership_proposal"))
}

/// Accepts a pending ownership proposal. `cb` persists the new owner.
/// ## Executor
/// Only the proposed owner can execute this, before the proposal expires.
pub fn claim_ownership(
    deps: DepsMut,
    info: MessageInfo,
    env: Env,
    proposal: Item<OwnershipProposal>,
    cb: fn(DepsMut, Addr) -> StdResult<()>,
) -> StdResult<Response> {
    let pending = proposal
        .load(deps.storage)
        .map_err(|_| StdError::generic_err("Ownership proposal not found"))?;

    if info.sender != pending.owner {
        return Err(StdError::generic_err("Unauthorized"));
    }

    if env.block.time.seconds() > pending.ttl {
        return Err(StdError::generic_err("Ownership proposal expired"));
    }

    proposal.remove(deps.storage);
    cb(deps, pending.owner.clone())?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "claim_ownership"),
        attr("new_owner", pending.owner),
    ]))
}
