use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Decimal256, Uint128, Uint256};

use crate::feed::FeedBinding;

/// Number of observations the TWAP looks back when no override is set for a pool
pub const DEFAULT_TWAP_POINTS: u32 = 4;
/// Upper bound for a TWAP window (two days of 30 minute observations)
pub const MAX_TWAP_POINTS: u32 = 96;
/// Number of previous days whose lows take part in the pessimistic price
pub const DEFAULT_PESSIMISTIC_LOOKBACK_DAYS: u64 = 2;
/// Upper bound for the pessimistic look-back
pub const MAX_PESSIMISTIC_LOOKBACK_DAYS: u64 = 30;
/// Length of one pessimistic bucket
pub const SECONDS_PER_DAY: u64 = 86400;

/// This structure describes the basic settings for creating an oracle.
#[cw_serde]
pub struct InstantiateMsg {
    /// Address allowed to change feeds, TWAP windows and caps
    pub owner: String,
    /// TWAP window used for pools without an override
    pub default_points: Option<u32>,
    /// How many previous days of lows the pessimistic price considers
    pub pessimistic_lookback_days: Option<u64>,
}

/// Oracle configuration
#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub default_points: u32,
    pub pessimistic_lookback_days: u64,
}

/// This structure describes the execute messages of the oracle.
#[cw_serde]
pub enum ExecuteMsg {
    /// Bind an asset to a reference price feed. Overwrites any previous binding
    SetFeed {
        asset: String,
        feed: String,
        heartbeat: u64,
    },
    /// Unbind an asset from its feed
    RemoveFeed { asset: String },
    /// Override the TWAP window of a pool. `None` restores the default
    SetPointsOverride { pool: String, points: Option<u32> },
    /// Set or clear the upper bound of pessimistic prices of a pool
    SetPriceCap {
        pool: String,
        cap: Option<Decimal256>,
    },
    /// Change the oracle configuration
    UpdateConfig {
        default_points: Option<u32>,
        pessimistic_lookback_days: Option<u64>,
    },
    /// Recompute and persist the price of a pool
    UpdatePrice { pool: String },
    /// Recompute and persist prices of several pools. A failing pool doesn't block the others
    UpdateMany { pools: Vec<String> },
    /// Creates a proposal to change contract ownership. The validity period of the proposal is set in `expires_in`
    ProposeNewOwner { owner: String, expires_in: u64 },
    /// Removes a proposal to change contract ownership
    DropOwnershipProposal {},
    /// Claims contract ownership
    ClaimOwnership {},
}

/// This structure describes the query messages of the oracle.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(Option<FeedBinding>)]
    Feed { asset: String },
    /// Fresh reference price of an asset, if any
    #[returns(Option<Decimal256>)]
    ReferencePrice { asset: String },
    /// TWAP window currently applied to a pool
    #[returns(u32)]
    Points { pool: String },
    #[returns(TokenPricesResponse)]
    TokenPrices { pool: String },
    /// Price of one LP token. Live unless `pessimistic` is set
    #[returns(Decimal256)]
    PoolPrice {
        pool: String,
        pessimistic: Option<bool>,
    },
    /// Price of one vault share
    #[returns(Decimal256)]
    VaultPrice {
        vault: String,
        pessimistic: Option<bool>,
    },
    /// Time weighted quote of `amount_in` units of `asset` in the other pool asset
    #[returns(TwapQuoteResponse)]
    TwapPrice {
        pool: String,
        asset: String,
        amount_in: Uint128,
    },
    #[returns(Option<CachedPrice>)]
    CachedPrice { pool: String },
    #[returns(Option<Decimal256>)]
    PriceCap { pool: String },
}

/// Where a token price comes from.
#[cw_serde]
pub enum PriceSource {
    /// Fresh reference feed
    Feed { feed: String },
    /// Sibling feed multiplied by the pool TWAP
    Twap { points: u32, degraded: bool },
    /// Sibling feed price (stable pools only)
    Peg { denom: String },
}

#[cw_serde]
pub struct TokenPrice {
    pub denom: String,
    /// USD price of one whole token
    pub price: Decimal256,
    pub source: PriceSource,
}

#[cw_serde]
pub struct TokenPricesResponse {
    pub prices: [TokenPrice; 2],
}

#[cw_serde]
pub struct TwapQuoteResponse {
    /// Amount of the other pool asset in native units
    pub amount_out: Uint256,
    /// Asset the quote is denominated in
    pub ask_denom: String,
    /// Number of observations actually spanned
    pub points: u32,
    /// Set when the pool has fewer observations than requested
    pub degraded: bool,
}

/// Last persisted price of a pool.
#[cw_serde]
#[derive(Copy)]
pub struct CachedPrice {
    pub price: Decimal256,
    /// Timestamp (in seconds) of the update
    pub last_updated: u64,
}
