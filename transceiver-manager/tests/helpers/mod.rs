//! Shared test harness: contract wrappers, a mock transceiver and setup
//! helpers.

#![allow(dead_code)]

use cosmwasm_schema::cw_serde;
use cosmwasm_std::testing::MockApi;
use cosmwasm_std::{
    coins, to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response,
    StdError, StdResult, Uint128, WasmMsg,
};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use cw_storage_plus::Item;

use common::address::UniversalAddress;
use common::transceiver::DeliveryPriceResponse;
use common::types::{MessageReceived, MessageToSend};

use transceiver_manager::msg::{ExecuteMsg, InstantiateMsg};

// ============================================================================
// Mock Transceiver Contract
// ============================================================================

#[cw_serde]
pub struct MockInstantiateMsg {
    pub manager: String,
    pub fee: Uint128,
}

#[cw_serde]
pub enum MockExecuteMsg {
    /// Interface method called by the manager during fan-out.
    SendMessage {
        message: MessageToSend,
        instruction: Binary,
    },
    /// Test hook: forward a delivered message to the manager as an
    /// attestation, in this transceiver's name.
    Deliver { message: MessageReceived },
}

#[cw_serde]
pub enum MockQueryMsg {
    QuoteDeliveryPrice {
        message: MessageToSend,
        instruction: Binary,
    },
    LastSend {},
}

#[cw_serde]
pub struct LastSendResponse {
    pub message: Option<MessageToSend>,
    pub instruction: Option<Binary>,
    pub paid: Option<Uint128>,
}

const MOCK_MANAGER: Item<Addr> = Item::new("mock_manager");
const MOCK_FEE: Item<Uint128> = Item::new("mock_fee");
const MOCK_LAST_SEND: Item<(MessageToSend, Binary, Uint128)> = Item::new("mock_last_send");

fn mock_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: MockInstantiateMsg,
) -> StdResult<Response> {
    MOCK_MANAGER.save(deps.storage, &deps.api.addr_validate(&msg.manager)?)?;
    MOCK_FEE.save(deps.storage, &msg.fee)?;
    Ok(Response::new())
}

fn mock_execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: MockExecuteMsg,
) -> StdResult<Response> {
    match msg {
        MockExecuteMsg::SendMessage {
            message,
            instruction,
        } => {
            let manager = MOCK_MANAGER.load(deps.storage)?;
            if info.sender != manager {
                return Err(StdError::generic_err("caller is not the manager"));
            }

            let fee = MOCK_FEE.load(deps.storage)?;
            let paid = info
                .funds
                .iter()
                .map(|coin| coin.amount)
                .sum::<Uint128>();
            if paid != fee {
                return Err(StdError::generic_err(format!(
                    "mock transceiver underpaid: expected {fee}, got {paid}"
                )));
            }

            MOCK_LAST_SEND.save(deps.storage, &(message, instruction, paid))?;
            Ok(Response::new())
        }
        MockExecuteMsg::Deliver { message } => {
            let manager = MOCK_MANAGER.load(deps.storage)?;
            Ok(Response::new().add_message(WasmMsg::Execute {
                contract_addr: manager.to_string(),
                msg: to_json_binary(&ExecuteMsg::AttestationReceived { message })?,
                funds: vec![],
            }))
        }
    }
}

fn mock_query(deps: Deps, _env: Env, msg: MockQueryMsg) -> StdResult<Binary> {
    match msg {
        MockQueryMsg::QuoteDeliveryPrice { .. } => to_json_binary(&DeliveryPriceResponse {
            price: MOCK_FEE.load(deps.storage)?,
        }),
        MockQueryMsg::LastSend {} => {
            let last = MOCK_LAST_SEND.may_load(deps.storage)?;
            let (message, instruction, paid) = match last {
                Some((message, instruction, paid)) => (Some(message), Some(instruction), Some(paid)),
                None => (None, None, None),
            };
            to_json_binary(&LastSendResponse {
                message,
                instruction,
                paid,
            })
        }
    }
}

pub fn contract_mock_transceiver() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(mock_execute, mock_instantiate, mock_query))
}

pub fn contract_manager() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        transceiver_manager::contract::execute,
        transceiver_manager::contract::instantiate,
        transceiver_manager::contract::query,
    ))
}

// ============================================================================
// Setup Helpers
// ============================================================================

pub const FEE_DENOM: &str = "uluna";

pub fn universal(addr: &Addr) -> UniversalAddress {
    UniversalAddress::from_addr(&MockApi::default(), addr).unwrap()
}

/// App with a manager instantiated and a handler registered under
/// "handleraddr", administered by "adminaddr".
pub fn setup() -> (App, Addr) {
    let mut app = App::default();
    let admin = Addr::unchecked("adminaddr");
    let handler = Addr::unchecked("handleraddr");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &handler, coins(10_000_000_000, FEE_DENOM))
            .unwrap();
    });

    let code_id = app.store_code(contract_manager());
    let manager_addr = app
        .instantiate_contract(
            code_id,
            admin.clone(),
            &InstantiateMsg {
                fee_denom: FEE_DENOM.to_string(),
            },
            &[],
            "transceiver-manager",
            Some(admin.to_string()),
        )
        .unwrap();

    app.execute_contract(
        handler,
        manager_addr.clone(),
        &ExecuteMsg::RegisterHandler {
            admin: admin.to_string(),
        },
        &[],
    )
    .unwrap();

    (app, manager_addr)
}

/// Instantiate a mock transceiver wired to the manager.
pub fn instantiate_mock_transceiver(app: &mut App, manager: &Addr, fee: u128) -> Addr {
    let code_id = app.store_code(contract_mock_transceiver());
    app.instantiate_contract(
        code_id,
        Addr::unchecked("adminaddr"),
        &MockInstantiateMsg {
            manager: manager.to_string(),
            fee: Uint128::from(fee),
        },
        &[],
        "mock-transceiver",
        None,
    )
    .unwrap()
}

/// Extract an attribute value emitted by a contract during execution.
pub fn attr_value(res: &AppResponse, key: &str) -> Option<String> {
    res.events.iter().find_map(|event| {
        event
            .attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.clone())
    })
}
