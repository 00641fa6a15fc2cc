use cosmwasm_std::testing::{mock_env, mock_info, MockApi, MockStorage};
use cosmwasm_std::{
    attr, from_json, Addr, Decimal256, Env, OwnedDeps, Response, StdError, Timestamp,
};
use test_case::test_case;

use pessimistic_lp_oracle::contract::{execute, instantiate, query};
use pessimistic_lp_oracle::error::ContractError;
use pessimistic_oracle::feed::FeedBinding;
use pessimistic_oracle::oracle::{Config, ExecuteMsg, InstantiateMsg, QueryMsg};
use pessimistic_oracle_mocks::{mock_dependencies, WasmMockQuerier};

type TestDeps = OwnedDeps<MockStorage, MockApi, WasmMockQuerier>;

fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

fn owner() -> Addr {
    addr("owner")
}

fn env_at(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(seconds);
    env
}

fn exec(
    deps: &mut TestDeps,
    seconds: u64,
    sender: &Addr,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    execute(
        deps.as_mut(),
        env_at(seconds),
        mock_info(sender.as_str(), &[]),
        msg,
    )
}

fn instantiate_with(deps: &mut TestDeps, msg: InstantiateMsg) -> Result<Response, ContractError> {
    instantiate(deps.as_mut(), env_at(0), mock_info("creator", &[]), msg)
}

fn setup() -> TestDeps {
    let mut deps = mock_dependencies();
    instantiate_with(
        &mut deps,
        InstantiateMsg {
            owner: owner().to_string(),
            default_points: None,
            pessimistic_lookback_days: None,
        },
    )
    .unwrap();

    deps
}

fn config(deps: &TestDeps) -> Config {
    from_json(query(deps.as_ref(), env_at(0), QueryMsg::Config {}).unwrap()).unwrap()
}

fn points(deps: &TestDeps, pool: &str) -> u32 {
    from_json(
        query(
            deps.as_ref(),
            env_at(0),
            QueryMsg::Points {
                pool: pool.to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap()
}

#[test]
fn instantiate_defaults() {
    let deps = setup();
    assert_eq!(
        config(&deps),
        Config {
            owner: owner(),
            default_points: 4,
            pessimistic_lookback_days: 2,
        }
    );
    assert_eq!(points(&deps, "any"), 4);
}

#[test_case(Some(0), None => ContractError::InvalidPoints { points: 0, max: 96 }; "zero points")]
#[test_case(Some(97), None => ContractError::InvalidPoints { points: 97, max: 96 }; "too many points")]
#[test_case(None, Some(31) => ContractError::InvalidLookback { days: 31, max: 30 }; "look-back too long")]
fn instantiate_rejects(default_points: Option<u32>, days: Option<u64>) -> ContractError {
    let mut deps = mock_dependencies();
    instantiate_with(
        &mut deps,
        InstantiateMsg {
            owner: owner().to_string(),
            default_points,
            pessimistic_lookback_days: days,
        },
    )
    .unwrap_err()
}

#[test]
fn instantiate_rejects_blank_owner() {
    let mut deps = mock_dependencies();
    let err = instantiate_with(
        &mut deps,
        InstantiateMsg {
            owner: "".to_string(),
            default_points: None,
            pessimistic_lookback_days: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Std(StdError::GenericErr { .. })));
}

#[test]
fn only_owner_governs() {
    let mut deps = setup();
    let stranger = addr("stranger");

    let msgs = vec![
        ExecuteMsg::SetFeed {
            asset: "weth".to_string(),
            feed: "weth-usd".to_string(),
            heartbeat: 60,
        },
        ExecuteMsg::RemoveFeed {
            asset: "weth".to_string(),
        },
        ExecuteMsg::SetPointsOverride {
            pool: "weth-usdc".to_string(),
            points: Some(8),
        },
        ExecuteMsg::SetPriceCap {
            pool: "weth-usdc".to_string(),
            cap: Some(Decimal256::one()),
        },
        ExecuteMsg::UpdateConfig {
            default_points: Some(8),
            pessimistic_lookback_days: None,
        },
    ];

    for msg in msgs {
        let err = exec(&mut deps, 0, &stranger, msg).unwrap_err();
        assert_eq!(err, ContractError::Unauthorized {});
    }

    let feed: Option<FeedBinding> = from_json(
        query(
            deps.as_ref(),
            env_at(0),
            QueryMsg::Feed {
                asset: "weth".to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(feed, None);
    assert_eq!(points(&deps, "weth-usdc"), 4);
}

#[test]
fn feed_bindings() {
    let mut deps = setup();
    let owner = owner();

    let err = exec(
        &mut deps,
        0,
        &owner,
        ExecuteMsg::SetFeed {
            asset: "weth".to_string(),
            feed: "weth-usd".to_string(),
            heartbeat: 0,
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::InvalidHeartbeat {});

    let err = exec(
        &mut deps,
        0,
        &owner,
        ExecuteMsg::SetFeed {
            asset: "weth".to_string(),
            feed: "WETH-USD".to_string(),
            heartbeat: 60,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::Std(StdError::generic_err("Address WETH-USD should be lowercase"))
    );

    for (feed, heartbeat) in [(addr("weth-usd"), 60), (addr("eth-usd-backup"), 3600)] {
        let res = exec(
            &mut deps,
            0,
            &owner,
            ExecuteMsg::SetFeed {
                asset: "weth".to_string(),
                feed: feed.to_string(),
                heartbeat,
            },
        )
        .unwrap();
        assert_eq!(res.attributes[0], attr("action", "set_feed"));
    }

    let query_feed = |deps: &TestDeps| -> Option<FeedBinding> {
        from_json(
            query(
                deps.as_ref(),
                env_at(0),
                QueryMsg::Feed {
                    asset: "weth".to_string(),
                },
            )
            .unwrap(),
        )
        .unwrap()
    };
    assert_eq!(
        query_feed(&deps),
        Some(FeedBinding {
            feed: addr("eth-usd-backup").to_string(),
            heartbeat: 3600
        })
    );

    exec(
        &mut deps,
        0,
        &owner,
        ExecuteMsg::RemoveFeed {
            asset: "weth".to_string(),
        },
    )
    .unwrap();
    assert_eq!(query_feed(&deps), None);
}

#[test]
fn points_override() {
    let mut deps = setup();
    let owner = owner();

    let set_points = |deps: &mut TestDeps, points: Option<u32>| {
        exec(
            deps,
            0,
            &owner,
            ExecuteMsg::SetPointsOverride {
                pool: "weth-usdc".to_string(),
                points,
            },
        )
    };

    set_points(&mut deps, Some(12)).unwrap();
    assert_eq!(points(&deps, "weth-usdc"), 12);
    assert_eq!(points(&deps, "usdc-usdt"), 4);

    assert_eq!(
        set_points(&mut deps, Some(0)).unwrap_err(),
        ContractError::InvalidPoints { points: 0, max: 96 }
    );

    // Overrides outlive default changes
    exec(
        &mut deps,
        0,
        &owner,
        ExecuteMsg::UpdateConfig {
            default_points: Some(24),
            pessimistic_lookback_days: Some(7),
        },
    )
    .unwrap();
    assert_eq!(points(&deps, "weth-usdc"), 12);
    assert_eq!(points(&deps, "usdc-usdt"), 24);
    assert_eq!(config(&deps).pessimistic_lookback_days, 7);

    set_points(&mut deps, None).unwrap();
    assert_eq!(points(&deps, "weth-usdc"), 24);
}

#[test]
fn ownership_transfer() {
    let mut deps = setup();
    let owner = owner();
    let new_owner = addr("new_owner");

    let err = exec(
        &mut deps,
        0,
        &new_owner,
        ExecuteMsg::ProposeNewOwner {
            owner: new_owner.to_string(),
            expires_in: 100,
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::Std(StdError::generic_err("Unauthorized")));

    exec(
        &mut deps,
        0,
        &owner,
        ExecuteMsg::ProposeNewOwner {
            owner: new_owner.to_string(),
            expires_in: 100,
        },
    )
    .unwrap();

    let err = exec(&mut deps, 101, &new_owner, ExecuteMsg::ClaimOwnership {})
        .unwrap_err();
    assert_eq!(
        err,
        ContractError::Std(StdError::generic_err("Ownership proposal expired"))
    );

    exec(&mut deps, 100, &new_owner, ExecuteMsg::ClaimOwnership {}).unwrap();
    assert_eq!(config(&deps).owner, new_owner);

    // The previous owner lost its rights
    let err = exec(
        &mut deps,
        100,
        &owner,
        ExecuteMsg::SetPriceCap {
            pool: "weth-usdc".to_string(),
            cap: None,
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::Unauthorized {});

    // Nothing left to claim
    let err = exec(&mut deps, 100, &new_owner, ExecuteMsg::ClaimOwnership {})
        .unwrap_err();
    assert_eq!(
        err,
        ContractError::Std(StdError::generic_err("Ownership proposal not found"))
    );
}

#[test]
fn drop_ownership_proposal() {
    let mut deps = setup();
    let owner = owner();
    let new_owner = addr("new_owner");

    exec(
        &mut deps,
        0,
        &owner,
        ExecuteMsg::ProposeNewOwner {
            owner: new_owner.to_string(),
            expires_in: 100,
        },
    )
    .unwrap();
    exec(&mut deps, 1, &owner, ExecuteMsg::DropOwnershipProposal {}).unwrap();

    exec(&mut deps, 2, &new_owner, ExecuteMsg::ClaimOwnership {}).unwrap_err();
    assert_eq!(config(&deps).owner, owner);
}
