use cosmwasm_std::{
    CheckedFromRatioError, CheckedMultiplyRatioError, ConversionOverflowError, DivideByZeroError,
    OverflowError, StdError,
};
use thiserror::Error;

/// This enum describes oracle errors
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Feed of {asset} is stale: last update {age}s ago, heartbeat {heartbeat}s")]
    FeedStale {
        asset: String,
        age: u64,
        heartbeat: u64,
    },

    #[error("No usable feed for {asset}")]
    FeedMissing { asset: String },

    #[error("Neither asset of pool {pool} can be priced")]
    NoPriceableAsset { pool: String },

    #[error("Pool {pool} has no observation history to average over")]
    InsufficientObservationHistory { pool: String },

    #[error("Arithmetic overflow: {reason}")]
    ArithmeticOverflow { reason: String },

    #[error("Division by zero: {reason}")]
    DivideByZero { reason: String },

    #[error("Pair type {pair_type} is not supported")]
    UnsupportedPairType { pair_type: String },

    #[error("Invalid pool {pool}: {reason}")]
    InvalidPool { pool: String, reason: String },

    #[error("Pool {pool} has no LP supply")]
    EmptyPool { pool: String },

    #[error("TWAP points must be within 1..={max}, got {points}")]
    InvalidPoints { points: u32, max: u32 },

    #[error("Pessimistic look-back must be at most {max} days, got {days}")]
    InvalidLookback { days: u64, max: u64 },

    #[error("Heartbeat must be greater than zero")]
    InvalidHeartbeat {},

    #[error("Asset {asset} is not in pool {pool}")]
    AssetNotInPool { asset: String, pool: String },
}

impl ContractError {
    /// Whether the error only means that a feed can't be used as ground truth right now.
    /// The resolver falls back to another source on such errors.
    pub fn is_feed_unavailable(&self) -> bool {
        matches!(
            self,
            ContractError::FeedStale { .. } | ContractError::FeedMissing { .. }
        )
    }
}

impl From<OverflowError> for ContractError {
    fn from(o: OverflowError) -> Self {
        ContractError::ArithmeticOverflow {
            reason: o.to_string(),
        }
    }
}

impl From<ConversionOverflowError> for ContractError {
    fn from(e: ConversionOverflowError) -> Self {
        ContractError::ArithmeticOverflow {
            reason: e.to_string(),
        }
    }
}

impl From<DivideByZeroError> for ContractError {
    fn from(e: DivideByZeroError) -> Self {
        ContractError::DivideByZero {
            reason: e.to_string(),
        }
    }
}

impl From<CheckedFromRatioError> for ContractError {
    fn from(e: CheckedFromRatioError) -> Self {
        match e {
            CheckedFromRatioError::DivideByZero => ContractError::DivideByZero {
                reason: e.to_string(),
            },
            CheckedFromRatioError::Overflow => ContractError::ArithmeticOverflow {
                reason: e.to_string(),
            },
        }
    }
}

impl From<CheckedMultiplyRatioError> for ContractError {
    fn from(e: CheckedMultiplyRatioError) -> Self {
        match e {
            CheckedMultiplyRatioError::DivideByZero => ContractError::DivideByZero {
                reason: e.to_string(),
            },
            CheckedMultiplyRatioError::Overflow => ContractError::ArithmeticOverflow {
                reason: e.to_string(),
            },
        }
    }
}
