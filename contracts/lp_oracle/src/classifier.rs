use cosmwasm_std::Deps;

use pessimistic_oracle::asset::{PoolAsset, MAX_ALLOWED_DECIMALS};
use pessimistic_oracle::pair::{PairType, PoolInfo};
use pessimistic_oracle::querier::query_pool;

use crate::error::ContractError;

/// Pricing formula family of a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantKind {
    /// Constant product (x * y = k)
    Volatile,
    /// Low slippage curve for pegged assets
    Stable,
}

/// A pool which passed validation and can be priced.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedPool {
    pub pool: String,
    pub kind: InvariantKind,
    pub info: PoolInfo,
}

impl ClassifiedPool {
    pub fn assets(&self) -> &[PoolAsset; 2] {
        &self.info.assets
    }

    /// Returns the index of `denom` in the pool.
    pub fn index_of(&self, denom: &str) -> Result<usize, ContractError> {
        self.info
            .assets
            .iter()
            .position(|asset| asset.denom == denom)
            .ok_or_else(|| ContractError::AssetNotInPool {
                asset: denom.to_string(),
                pool: self.pool.clone(),
            })
    }
}

/// Validates pool info and identifies its invariant family.
pub fn classify(pool: &str, info: PoolInfo) -> Result<ClassifiedPool, ContractError> {
    let kind = match &info.pair_type {
        PairType::Xyk {} => InvariantKind::Volatile,
        PairType::Stable {} => InvariantKind::Stable,
        pair_type @ PairType::Custom { .. } => {
            return Err(ContractError::UnsupportedPairType {
                pair_type: pair_type.to_string(),
            })
        }
    };

    let invalid = |reason: &str| ContractError::InvalidPool {
        pool: pool.to_string(),
        reason: reason.to_string(),
    };

    if info.assets[0].denom == info.assets[1].denom {
        return Err(invalid("doubling assets"));
    }
    if info
        .assets
        .iter()
        .any(|asset| asset.decimals > MAX_ALLOWED_DECIMALS)
        || info.share_decimals > MAX_ALLOWED_DECIMALS
    {
        return Err(invalid("too many decimals"));
    }
    if info.total_share.is_zero() {
        return Err(ContractError::EmptyPool {
            pool: pool.to_string(),
        });
    }

    Ok(ClassifiedPool {
        pool: pool.to_string(),
        kind,
        info,
    })
}

/// Loads a pool from the AMM and classifies it.
pub fn load_pool(deps: Deps, pool: &str) -> Result<ClassifiedPool, ContractError> {
    let info = query_pool(&deps.querier, pool)?;
    classify(pool, info)
}
