use cosmwasm_std::{Decimal256, Deps, Timestamp};

use pessimistic_oracle::querier::query_vault;

use crate::error::ContractError;
use crate::pricing::get_current_pool_price;

/// Price of one vault share: the underlying LP price times the share exchange rate reported by
/// the vault. The rate is trusted as is, so the result is exactly as manipulation resistant as
/// the underlying pool price.
pub fn get_current_vault_price(
    deps: Deps,
    vault: &str,
    now: Timestamp,
    pessimistic: bool,
) -> Result<Decimal256, ContractError> {
    let vault_info = query_vault(&deps.querier, vault)?;
    let pool_price = get_current_pool_price(deps, &vault_info.underlying_pool, now, pessimistic)?;

    Ok(pool_price.checked_mul(vault_info.share_rate)?)
}
