use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Decimal256;

/// Binds an asset to an external reference price feed.
#[cw_serde]
pub struct FeedBinding {
    /// Feed identifier understood by the feed querier
    pub feed: String,
    /// Maximum age (in seconds) of a round before it is considered stale
    pub heartbeat: u64,
}

/// Latest answer of a reference price feed.
#[cw_serde]
#[derive(Copy)]
pub struct RoundData {
    /// Price of one whole token in USD
    pub price: Decimal256,
    /// Timestamp (in seconds) of the last feed update
    pub updated_at: u64,
}

impl RoundData {
    /// Seconds elapsed since the round was published. Rounds from the future are treated as fresh.
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.updated_at)
    }

    pub fn is_fresh(&self, now: u64, heartbeat: u64) -> bool {
        self.age(now) <= heartbeat
    }
}

/// Queries a reference feed contract answers.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Latest round or `None` if the feed never answered
    #[returns(Option<RoundData>)]
    LatestRound {},
}
