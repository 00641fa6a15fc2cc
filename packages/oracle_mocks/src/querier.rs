use std::collections::HashMap;

use cosmwasm_std::testing::{MockApi, MockQuerier, MockStorage};
use cosmwasm_std::{
    from_json, to_json_binary, Binary, ContractResult, Decimal256, Empty, OwnedDeps, Querier,
    QuerierResult, QueryRequest, StdError, StdResult, SystemError, SystemResult, WasmQuery,
};

use pessimistic_oracle::feed::{QueryMsg as FeedQueryMsg, RoundData};
use pessimistic_oracle::pair::QueryMsg as PairQueryMsg;
use pessimistic_oracle::vault::{QueryMsg as VaultQueryMsg, VaultInfo};

use crate::pair::MockPair;

pub fn mock_dependencies() -> OwnedDeps<MockStorage, MockApi, WasmMockQuerier> {
    OwnedDeps {
        storage: MockStorage::default(),
        api: MockApi::default(),
        querier: WasmMockQuerier::new(MockQuerier::new(&[])),
        custom_query_type: Default::default(),
    }
}

/// Answers smart queries of mocked pool, feed and vault contracts. Everything else goes to the
/// base [`MockQuerier`].
pub struct WasmMockQuerier {
    base: MockQuerier<Empty>,
    pub pairs: HashMap<String, MockPair>,
    pub rounds: HashMap<String, RoundData>,
    pub vaults: HashMap<String, VaultInfo>,
}

impl Querier for WasmMockQuerier {
    fn raw_query(&self, bin_request: &[u8]) -> QuerierResult {
        let request: QueryRequest<Empty> = match from_json(bin_request) {
            Ok(v) => v,
            Err(e) => {
                return SystemResult::Err(SystemError::InvalidRequest {
                    error: format!("Parsing query request: {e}"),
                    request: bin_request.into(),
                })
            }
        };
        self.handle_query(&request)
    }
}

impl WasmMockQuerier {
    pub fn new(base: MockQuerier<Empty>) -> Self {
        WasmMockQuerier {
            base,
            pairs: HashMap::new(),
            rounds: HashMap::new(),
            vaults: HashMap::new(),
        }
    }

    pub fn handle_query(&self, request: &QueryRequest<Empty>) -> QuerierResult {
        match request {
            QueryRequest::Wasm(WasmQuery::Smart { contract_addr, msg }) => {
                let res = if let Some(pair) = self.pairs.get(contract_addr) {
                    Self::handle_pair_query(pair, msg)
                } else if self.rounds.contains_key(contract_addr) || is_feed_query(msg) {
                    from_json::<FeedQueryMsg>(msg).and_then(|FeedQueryMsg::LatestRound {}| {
                        to_json_binary(&self.rounds.get(contract_addr))
                    })
                } else if let Some(vault) = self.vaults.get(contract_addr) {
                    from_json::<VaultQueryMsg>(msg)
                        .and_then(|VaultQueryMsg::VaultInfo {}| to_json_binary(vault))
                } else {
                    return SystemResult::Err(SystemError::NoSuchContract {
                        addr: contract_addr.clone(),
                    });
                };

                SystemResult::Ok(ContractResult::from(res))
            }
            _ => self.base.handle_query(request),
        }
    }

    fn handle_pair_query(pair: &MockPair, msg: &Binary) -> StdResult<Binary> {
        match from_json(msg)? {
            PairQueryMsg::Pool {} => to_json_binary(&pair.info()),
            PairQueryMsg::ObservationLength {} => {
                to_json_binary(&(pair.observations().len() as u64))
            }
            PairQueryMsg::Observation { index } => pair
                .observations()
                .get(index as usize)
                .ok_or_else(|| StdError::generic_err(format!("Observation {index} not found")))
                .and_then(to_json_binary),
            PairQueryMsg::CumulativePrices {} => to_json_binary(&pair.cumulative_prices()),
        }
    }

    pub fn with_pair(&mut self, pool: impl Into<String>, pair: MockPair) -> &mut Self {
        self.pairs.insert(pool.into(), pair);
        self
    }

    pub fn pair_mut(&mut self, pool: &str) -> &mut MockPair {
        self.pairs
            .get_mut(pool)
            .unwrap_or_else(|| panic!("Pool {pool} is not mocked"))
    }

    /// Publishes a new feed round.
    pub fn set_round(&mut self, feed: impl Into<String>, price: Decimal256, updated_at: u64) {
        self.rounds
            .insert(feed.into(), RoundData { price, updated_at });
    }

    pub fn set_vault(
        &mut self,
        vault: impl Into<String>,
        underlying_pool: impl Into<String>,
        share_rate: Decimal256,
    ) {
        self.vaults.insert(
            vault.into(),
            VaultInfo {
                underlying_pool: underlying_pool.into(),
                share_rate,
            },
        );
    }
}

/// A feed contract which never published a round still answers `LatestRound` with `None`.
fn is_feed_query(msg: &Binary) -> bool {
    from_json::<FeedQueryMsg>(msg).is_ok()
}
