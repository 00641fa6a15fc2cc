use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Decimal256;

/// Describes a vault (wrapper) token built on top of an LP token.
#[cw_serde]
pub struct VaultInfo {
    /// Pool whose LP token the vault holds
    pub underlying_pool: String,
    /// Amount of underlying LP tokens redeemable for one vault share
    pub share_rate: Decimal256,
}

/// Queries a vault contract answers.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(VaultInfo)]
    VaultInfo {},
}
