use cosmwasm_std::{
    CheckedFromRatioError, ConversionOverflowError, Decimal256, OverflowError, OverflowOperation,
    Timestamp, Uint128,
};
use test_case::test_case;

use pessimistic_oracle::asset::PoolAsset;
use pessimistic_oracle::feed::FeedBinding;
use pessimistic_oracle::pair::{PairType, PoolInfo};
use pessimistic_oracle_mocks::mock_dependencies;

use crate::classifier::{classify, InvariantKind};
use crate::error::ContractError;
use crate::feeds::{get_reference_price, query_feed_price};
use crate::pricing::lp_price;
use crate::state::FEEDS;

fn usdc(amount: u128) -> PoolAsset {
    PoolAsset::new("usdc", 6, amount)
}

fn weth(amount: u128) -> PoolAsset {
    PoolAsset::new("weth", 18, amount)
}

fn pool_info(pair_type: PairType, assets: [PoolAsset; 2], total_share: u128) -> PoolInfo {
    PoolInfo {
        assets,
        pair_type,
        total_share: Uint128::new(total_share),
        share_decimals: 18,
    }
}

fn dec(value: u128) -> Decimal256 {
    Decimal256::from_ratio(value, 1u8)
}

#[test]
fn classify_pools() {
    let volatile = classify(
        "weth-usdc",
        pool_info(
            PairType::Xyk {},
            [usdc(2_000_000_000_000), weth(1_000_000_000_000_000_000_000)],
            1_000_000_000_000_000_000_000,
        ),
    )
    .unwrap();
    assert_eq!(volatile.kind, InvariantKind::Volatile);
    assert_eq!(volatile.index_of("weth").unwrap(), 1);
    assert_eq!(
        volatile.index_of("uatom").unwrap_err(),
        ContractError::AssetNotInPool {
            asset: "uatom".to_string(),
            pool: "weth-usdc".to_string()
        }
    );

    let stable = classify(
        "usdc-usdt",
        pool_info(
            PairType::Stable {},
            [usdc(100), PoolAsset::new("usdt", 6, 100u128)],
            100,
        ),
    )
    .unwrap();
    assert_eq!(stable.kind, InvariantKind::Stable);
}

#[test]
fn reject_invalid_pools() {
    let err = classify(
        "pcl",
        pool_info(
            PairType::Custom {
                pair_type: "concentrated".to_string(),
            },
            [usdc(100), weth(100)],
            100,
        ),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::UnsupportedPairType {
            pair_type: "custom-concentrated".to_string()
        }
    );

    let err = classify(
        "twins",
        pool_info(PairType::Xyk {}, [usdc(100), usdc(100)], 100),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::InvalidPool {
            pool: "twins".to_string(),
            reason: "doubling assets".to_string()
        }
    );

    let err = classify(
        "wide",
        pool_info(
            PairType::Xyk {},
            [usdc(100), PoolAsset::new("wide", 19, 100u128)],
            100,
        ),
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::InvalidPool { .. }));

    let err = classify(
        "empty",
        pool_info(PairType::Xyk {}, [usdc(100), weth(100)], 0),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::EmptyPool {
            pool: "empty".to_string()
        }
    );
}

#[test]
fn volatile_lp_price() {
    // 2M USDC and 1000 WETH backing 1000 LP tokens
    let pool = classify(
        "weth-usdc",
        pool_info(
            PairType::Xyk {},
            [usdc(2_000_000_000_000), weth(1_000_000_000_000_000_000_000)],
            1_000_000_000_000_000_000_000,
        ),
    )
    .unwrap();

    assert_eq!(lp_price(&pool, [dec(1), dec(2000)]).unwrap(), dec(4000));
    // Prices off the pool ratio are penalized, the pool value isn't just summed up
    assert_eq!(lp_price(&pool, [dec(1), dec(4500)]).unwrap(), dec(6000));
    assert_eq!(lp_price(&pool, [dec(1), Decimal256::zero()]).unwrap(), dec(0));
}

#[test]
fn stable_lp_price() {
    let pool = classify(
        "usdc-usdt",
        pool_info(
            PairType::Stable {},
            [
                usdc(1_500_000_000_000),
                PoolAsset::new("usdt", 6, 500_000_000_000u128),
            ],
            2_000_000_000_000_000_000_000_000,
        ),
    )
    .unwrap();

    assert_eq!(lp_price(&pool, [dec(1), dec(1)]).unwrap(), dec(1));
    assert_eq!(
        lp_price(&pool, [dec(1), Decimal256::percent(98)]).unwrap(),
        Decimal256::permille(995)
    );
}

#[test]
fn volatile_lp_price_of_tiny_prices() {
    // 1e15 whole tokens of 1e-10 USD each on both sides
    let pool = classify(
        "dust",
        pool_info(
            PairType::Xyk {},
            [
                PoolAsset::new("dusta", 18, 10u128.pow(33)),
                PoolAsset::new("dustb", 18, 10u128.pow(33)),
            ],
            10u128.pow(33),
        ),
    )
    .unwrap();

    let tiny = Decimal256::from_ratio(1u8, 10_000_000_000u64);
    assert_eq!(
        lp_price(&pool, [tiny, tiny]).unwrap(),
        Decimal256::from_ratio(2u8, 10_000_000_000u64)
    );
}

#[test_case(None, 1000 => Err(ContractError::FeedMissing { asset: "weth".to_string() }); "no round")]
#[test_case(Some((0, 1000)), 1000 => Err(ContractError::FeedMissing { asset: "weth".to_string() }); "zero price")]
#[test_case(Some((2000, 1000)), 1060 => Ok(dec(2000)); "within heartbeat")]
#[test_case(Some((2000, 1000)), 1061 => Err(ContractError::FeedStale { asset: "weth".to_string(), age: 61, heartbeat: 60 }); "stale")]
fn feed_price(round: Option<(u128, u64)>, now: u64) -> Result<Decimal256, ContractError> {
    let mut deps = mock_dependencies();
    FEEDS
        .save(
            &mut deps.storage,
            "weth",
            &FeedBinding {
                feed: "eth-usd".to_string(),
                heartbeat: 60,
            },
        )
        .unwrap();
    if let Some((price, updated_at)) = round {
        deps.querier.set_round("eth-usd", dec(price), updated_at);
    }

    query_feed_price(deps.as_ref(), "weth", Timestamp::from_seconds(now))
}

#[test]
fn unbound_asset_has_no_reference_price() {
    let deps = mock_dependencies();
    assert_eq!(
        get_reference_price(deps.as_ref(), "weth", Timestamp::from_seconds(1)).unwrap(),
        None
    );
}

#[test]
fn arithmetic_errors() {
    let err: ContractError = OverflowError::new(OverflowOperation::Mul, 1u8, 2u8).into();
    assert!(matches!(err, ContractError::ArithmeticOverflow { .. }));

    let err: ContractError = CheckedFromRatioError::Overflow.into();
    assert!(matches!(err, ContractError::ArithmeticOverflow { .. }));

    let err: ContractError = ConversionOverflowError::new("Uint512", "Uint256", "1").into();
    assert!(matches!(err, ContractError::ArithmeticOverflow { .. }));

    let err: ContractError = CheckedFromRatioError::DivideByZero.into();
    assert!(matches!(err, ContractError::DivideByZero { .. }));

    assert!(ContractError::FeedMissing {
        asset: "weth".to_string()
    }
    .is_feed_unavailable());
    assert!(!ContractError::Unauthorized {}.is_feed_unavailable());
}
