use cosmwasm_std::{StdError, StdResult, Uint128, Uint256};

use pessimistic_oracle::asset::PoolAsset;
use pessimistic_oracle::pair::{
    accumulate_prices, CumulativePricesResponse, Observation, PairType, PoolInfo,
    OBSERVATION_PERIOD,
};

use crate::stable_math::{get_y, invariant};

/// In-memory AMM pool. Prices are accumulated before every reserve change and an observation is
/// written whenever more than [`OBSERVATION_PERIOD`] seconds passed since the previous one.
/// Swaps charge no fee, so an exact constant product trade keeps `x * y` unchanged.
#[derive(Clone, Debug)]
pub struct MockPair {
    pub assets: [PoolAsset; 2],
    pub pair_type: PairType,
    pub total_share: Uint128,
    pub share_decimals: u8,
    cumulative: CumulativePricesResponse,
    observations: Vec<Observation>,
}

impl MockPair {
    pub fn new(
        now: u64,
        pair_type: PairType,
        assets: [PoolAsset; 2],
        total_share: impl Into<Uint128>,
    ) -> Self {
        Self {
            assets,
            pair_type,
            total_share: total_share.into(),
            share_decimals: 18,
            cumulative: CumulativePricesResponse {
                price0_cumulative_last: Uint256::zero(),
                price1_cumulative_last: Uint256::zero(),
                block_timestamp_last: now,
            },
            observations: vec![Observation {
                timestamp: now,
                price0_cumulative: Uint256::zero(),
                price1_cumulative: Uint256::zero(),
            }],
        }
    }

    pub fn xyk(now: u64, assets: [PoolAsset; 2], total_share: impl Into<Uint128>) -> Self {
        Self::new(now, PairType::Xyk {}, assets, total_share)
    }

    pub fn stable(now: u64, assets: [PoolAsset; 2], total_share: impl Into<Uint128>) -> Self {
        Self::new(now, PairType::Stable {}, assets, total_share)
    }

    pub fn info(&self) -> PoolInfo {
        PoolInfo {
            assets: self.assets.clone(),
            pair_type: self.pair_type.clone(),
            total_share: self.total_share,
            share_decimals: self.share_decimals,
        }
    }

    pub fn reserves(&self) -> (Uint128, Uint128) {
        (self.assets[0].amount, self.assets[1].amount)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Drops the whole observation log, as if the pool never checkpointed.
    pub fn forget_observations(&mut self) {
        self.observations.clear();
    }

    /// Accumulates prices up to `now` and writes an observation when a period has passed.
    pub fn sync(&mut self, now: u64) -> StdResult<()> {
        self.cumulative = accumulate_prices(&self.assets, &self.cumulative, now)?;

        let due = match self.observations.last() {
            Some(last) => now.saturating_sub(last.timestamp) > OBSERVATION_PERIOD,
            None => true,
        };
        if due {
            self.observations.push(Observation {
                timestamp: now,
                price0_cumulative: self.cumulative.price0_cumulative_last,
                price1_cumulative: self.cumulative.price1_cumulative_last,
            });
        }

        Ok(())
    }

    /// Sells `amount_in` of `offer_denom` to the pool. Returns the amount of the other asset
    /// paid out.
    pub fn swap(
        &mut self,
        now: u64,
        offer_denom: &str,
        amount_in: impl Into<Uint128>,
    ) -> StdResult<Uint128> {
        let amount_in = amount_in.into();
        let (offer_ind, ask_ind) = self.indexes(offer_denom)?;
        self.sync(now)?;

        let offer_pool = self.assets[offer_ind].amount;
        let ask_pool = self.assets[ask_ind].amount;

        let amount_out = match self.pair_type {
            PairType::Xyk {} => amount_in.multiply_ratio(ask_pool, offer_pool + amount_in),
            PairType::Stable {} => {
                let offer_unit = self.assets[offer_ind].unit()?;
                let ask_unit = self.assets[ask_ind].unit()?;
                let precision = Uint256::from(10u128.pow(18));

                let x = Uint256::from(offer_pool) * precision / offer_unit;
                let y = Uint256::from(ask_pool) * precision / ask_unit;
                let dx = Uint256::from(amount_in) * precision / offer_unit;

                let new_y = get_y(x + dx, invariant(x, y), y);
                ((y - new_y) * ask_unit / precision).try_into()?
            }
            PairType::Custom { .. } => {
                return Err(StdError::generic_err("Custom pools can't be simulated"))
            }
        };

        self.assets[offer_ind].amount += amount_in;
        self.assets[ask_ind].amount -= amount_out;

        Ok(amount_out)
    }

    /// Transfers `amount` of `denom` to the pool without taking anything out.
    pub fn donate(&mut self, now: u64, denom: &str, amount: impl Into<Uint128>) -> StdResult<()> {
        let (ind, _) = self.indexes(denom)?;
        self.sync(now)?;
        self.assets[ind].amount += amount.into();
        Ok(())
    }

    /// Overwrites both reserves, e.g. to apply a trade computed by the test itself.
    pub fn set_reserves(
        &mut self,
        now: u64,
        reserve0: impl Into<Uint128>,
        reserve1: impl Into<Uint128>,
    ) -> StdResult<()> {
        self.sync(now)?;
        self.assets[0].amount = reserve0.into();
        self.assets[1].amount = reserve1.into();
        Ok(())
    }

    /// Cumulative prices as of the last reserve change.
    pub fn cumulative_prices(&self) -> CumulativePricesResponse {
        self.cumulative.clone()
    }

    fn indexes(&self, denom: &str) -> StdResult<(usize, usize)> {
        if self.assets[0].denom == denom {
            Ok((0, 1))
        } else if self.assets[1].denom == denom {
            Ok((1, 0))
        } else {
            Err(StdError::generic_err(format!("{denom} is not in the pool")))
        }
    }
}
