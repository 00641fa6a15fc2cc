use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Decimal256, StdError, StdResult, Uint128, Uint256};

/// The greatest number of decimals an asset may have. Matches [`Decimal256::DECIMAL_PLACES`].
pub const MAX_ALLOWED_DECIMALS: u8 = 18;

/// This struct describes one side of a pool: the asset denomination, its decimal scale
/// and the reserve the pool currently holds (in native units).
#[cw_serde]
pub struct PoolAsset {
    /// Asset denomination (native denom or token contract address)
    pub denom: String,
    /// Number of decimals of the asset
    pub decimals: u8,
    /// Pool reserve in native units
    pub amount: Uint128,
}

impl fmt::Display for PoolAsset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl PoolAsset {
    pub fn new(denom: impl Into<String>, decimals: u8, amount: impl Into<Uint128>) -> Self {
        Self {
            denom: denom.into(),
            decimals,
            amount: amount.into(),
        }
    }

    /// Returns the reserve expressed in whole units.
    pub fn to_decimal(&self) -> StdResult<Decimal256> {
        Decimal256::with_precision(self.amount, self.decimals)
    }

    /// Returns `10^decimals`, the number of native units in one whole unit.
    pub fn unit(&self) -> StdResult<Uint256> {
        Uint256::from(10u8)
            .checked_pow(self.decimals.into())
            .map_err(Into::into)
    }
}

/// Builds decimals out of native integer amounts.
pub trait Decimal256Ext {
    /// `value / 10^precision`, e.g. a reserve in native units to whole units.
    fn with_precision(
        value: impl Into<Uint256>,
        precision: impl Into<u32>,
    ) -> StdResult<Decimal256>;
}

impl Decimal256Ext for Decimal256 {
    fn with_precision(
        value: impl Into<Uint256>,
        precision: impl Into<u32>,
    ) -> StdResult<Decimal256> {
        Decimal256::from_atomics(value, precision.into())
            .map_err(|_| StdError::generic_err("Decimal256 range exceeded"))
    }
}
