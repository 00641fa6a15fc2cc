use cosmwasm_std::testing::MockApi;
use cosmwasm_std::{Decimal256, Uint256};
use test_case::test_case;

use crate::asset::{Decimal256Ext, PoolAsset};
use crate::common::addr_validate_to_lower;
use crate::feed::RoundData;
use crate::pair::{spot_prices, PairType};

#[test]
fn pool_asset_to_decimal() {
    let usdc = PoolAsset::new("usdc", 6, 1_234_560_000u128);
    assert_eq!(
        usdc.to_decimal().unwrap(),
        Decimal256::from_ratio(123456u128, 100u128)
    );
    assert_eq!(usdc.unit().unwrap(), Uint256::from(1_000_000u128));

    let weth = PoolAsset::new("weth", 18, 5u128);
    assert_eq!(weth.to_decimal().unwrap(), Decimal256::raw(5));

    let broken = PoolAsset::new("broken", 78, 1u128);
    broken.unit().unwrap_err();
}

#[test]
fn decimal_with_precision() {
    assert_eq!(
        Decimal256::with_precision(1_500_000u128, 6u32).unwrap(),
        Decimal256::from_ratio(15u128, 10u128)
    );
    Decimal256::with_precision(Uint256::MAX, 0u32).unwrap_err();
}

#[test]
fn spot_prices_of_reserves() {
    let (p0, p1) = spot_prices(&[
        PoolAsset::new("uatom", 6, 100u128),
        PoolAsset::new("untrn", 6, 400u128),
    ])
    .unwrap()
    .unwrap();
    assert_eq!(p0, Decimal256::from_ratio(4u8, 1u8));
    assert_eq!(p1, Decimal256::from_ratio(1u8, 4u8));

    let empty = spot_prices(&[
        PoolAsset::new("uatom", 6, 0u128),
        PoolAsset::new("untrn", 6, 400u128),
    ])
    .unwrap();
    assert_eq!(empty, None);
}

#[test]
fn spot_prices_across_decimal_gap() {
    // 1M USDC against 8.1004e10 PEPE
    let (usdc_in_pepe, pepe_in_usdc) = spot_prices(&[
        PoolAsset::new("usdc", 6, 1_000_000_000_000u128),
        PoolAsset::new("pepe", 18, 81_004_000_000_000_000_000_000_000_000u128),
    ])
    .unwrap()
    .unwrap();

    assert_eq!(usdc_in_pepe, Decimal256::from_ratio(81_004u128, 1u8));
    assert_eq!(
        pepe_in_usdc,
        Decimal256::from_ratio(1_000_000u128, 81_004_000_000u128)
    );
    assert!(!pepe_in_usdc.is_zero());
}

#[test_case(1000, 1000, 0 => true; "same second")]
#[test_case(1000, 1060, 60 => true; "exactly heartbeat")]
#[test_case(1000, 1061, 60 => false; "one second late")]
#[test_case(2000, 1000, 0 => true; "round from the future")]
fn round_freshness(updated_at: u64, now: u64, heartbeat: u64) -> bool {
    let round = RoundData {
        price: Decimal256::one(),
        updated_at,
    };
    round.is_fresh(now, heartbeat)
}

#[test]
fn pair_type_display() {
    assert_eq!(PairType::Xyk {}.to_string(), "xyk");
    assert_eq!(PairType::Stable {}.to_string(), "stable");
    assert_eq!(
        PairType::Custom {
            pair_type: "concentrated".to_string()
        }
        .to_string(),
        "custom-concentrated"
    );
}

#[test]
fn address_validation() {
    let api = MockApi::default();
    let owner = api.addr_make("owner");

    assert_eq!(addr_validate_to_lower(&api, owner.as_str()).unwrap(), owner);
    addr_validate_to_lower(&api, owner.as_str().to_uppercase()).unwrap_err();
    addr_validate_to_lower(&api, "").unwrap_err();
}
