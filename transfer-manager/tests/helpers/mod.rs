//! Shared test harness: a cw20 token behind a mock custody, a mock
//! transceiver pair and a fully wired manager deployment.

#![allow(dead_code)]

use cosmwasm_schema::cw_serde;
use cosmwasm_std::testing::MockApi;
use cosmwasm_std::{
    coins, to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response,
    StdError, StdResult, Uint128, WasmMsg,
};
use cw20::{Cw20Coin, MinterResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use cw_storage_plus::Item;

use common::address::UniversalAddress;
use common::custody::{AssetResponse, CustodyExecuteMsg, CustodyQueryMsg};
use common::transceiver::DeliveryPriceResponse;
use common::trimmed::TrimmedAmount;
use common::types::{MessageReceived, MessageToSend};
use common::wire::encode_transfer_payload;

use transfer_manager::msg::InstantiateMsg;

pub const FEE_DENOM: &str = "uluna";

/// Local protocol chain id used across tests.
pub const LOCAL_CHAIN: u16 = 1;

/// Registered peer chain.
pub const PEER_CHAIN: u16 = 2;

/// Peer contract on the remote chain.
pub const PEER_CONTRACT: UniversalAddress = UniversalAddress([0xEE; 32]);

/// Token decimals on the local chain / on the peer chain.
pub const LOCAL_DECIMALS: u8 = 9;
pub const PEER_DECIMALS: u8 = 18;

// ============================================================================
// Mock Transceiver Contract
// ============================================================================

#[cw_serde]
pub struct MockTransceiverInstantiateMsg {
    pub manager: String,
    pub fee: Uint128,
}

#[cw_serde]
pub enum MockTransceiverExecuteMsg {
    SendMessage {
        message: MessageToSend,
        instruction: Binary,
    },
    /// Test hook: forward a delivered message to the manager as an
    /// attestation, in this transceiver's name.
    Deliver { message: MessageReceived },
}

#[cw_serde]
pub enum MockTransceiverQueryMsg {
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

fn transceiver_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: MockTransceiverInstantiateMsg,
) -> StdResult<Response> {
    MOCK_MANAGER.save(deps.storage, &deps.api.addr_validate(&msg.manager)?)?;
    MOCK_FEE.save(deps.storage, &msg.fee)?;
    Ok(Response::new())
}

fn transceiver_execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: MockTransceiverExecuteMsg,
) -> StdResult<Response> {
    match msg {
        MockTransceiverExecuteMsg::SendMessage {
            message,
            instruction,
        } => {
            let fee = MOCK_FEE.load(deps.storage)?;
            let paid = info.funds.iter().map(|coin| coin.amount).sum::<Uint128>();
            if paid != fee {
                return Err(StdError::generic_err(format!(
                    "mock transceiver underpaid: expected {fee}, got {paid}"
                )));
            }
            MOCK_LAST_SEND.save(deps.storage, &(message, instruction, paid))?;
            Ok(Response::new())
        }
        MockTransceiverExecuteMsg::Deliver { message } => {
            let manager = MOCK_MANAGER.load(deps.storage)?;
            Ok(Response::new().add_message(WasmMsg::Execute {
                contract_addr: manager.to_string(),
                msg: to_json_binary(&transceiver_manager::msg::ExecuteMsg::AttestationReceived {
                    message,
                })?,
                funds: vec![],
            }))
        }
    }
}

fn transceiver_query(deps: Deps, _env: Env, msg: MockTransceiverQueryMsg) -> StdResult<Binary> {
    match msg {
        MockTransceiverQueryMsg::QuoteDeliveryPrice { .. } => {
            to_json_binary(&DeliveryPriceResponse {
                price: MOCK_FEE.load(deps.storage)?,
            })
        }
        MockTransceiverQueryMsg::LastSend {} => {
            let last = MOCK_LAST_SEND.may_load(deps.storage)?;
            let (message, instruction, paid) = match last {
                Some((message, instruction, paid)) => {
                    (Some(message), Some(instruction), Some(paid))
                }
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

// ============================================================================
// Mock Custody Contract
// ============================================================================

#[cw_serde]
pub struct MockCustodyInstantiateMsg {
    pub token: String,
}

const CUSTODY_TOKEN: Item<Addr> = Item::new("custody_token");

fn custody_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: MockCustodyInstantiateMsg,
) -> StdResult<Response> {
    CUSTODY_TOKEN.save(deps.storage, &deps.api.addr_validate(&msg.token)?)?;
    Ok(Response::new())
}

fn custody_execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: CustodyExecuteMsg,
) -> StdResult<Response> {
    match msg {
        CustodyExecuteMsg::Mint { recipient, amount } => {
            let token = CUSTODY_TOKEN.load(deps.storage)?;
            Ok(Response::new().add_message(WasmMsg::Execute {
                contract_addr: token.to_string(),
                msg: to_json_binary(&cw20::Cw20ExecuteMsg::Mint { recipient, amount })?,
                funds: vec![],
            }))
        }
    }
}

fn custody_query(deps: Deps, _env: Env, msg: CustodyQueryMsg) -> StdResult<Binary> {
    match msg {
        CustodyQueryMsg::Asset {} => to_json_binary(&AssetResponse {
            token: CUSTODY_TOKEN.load(deps.storage)?.to_string(),
        }),
    }
}

// ============================================================================
// Contract Wrappers
// ============================================================================

pub fn contract_transfer_manager() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        transfer_manager::contract::execute,
        transfer_manager::contract::instantiate,
        transfer_manager::contract::query,
    ))
}

pub fn contract_transceiver_manager() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        transceiver_manager::contract::execute,
        transceiver_manager::contract::instantiate,
        transceiver_manager::contract::query,
    ))
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    ))
}

pub fn contract_mock_transceiver() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        transceiver_execute,
        transceiver_instantiate,
        transceiver_query,
    ))
}

pub fn contract_mock_custody() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        custody_execute,
        custody_instantiate,
        custody_query,
    ))
}

// ============================================================================
// Deployment
// ============================================================================

pub struct TestEnv {
    pub app: App,
    pub admin: Addr,
    pub user: Addr,
    pub manager: Addr,
    pub transceiver_manager: Addr,
    pub custody: Addr,
    pub token: Addr,
    pub transceivers: Vec<Addr>,
}

/// One million whole tokens at local decimals.
pub const USER_BALANCE: u128 = 1_000_000_000_000_000;

/// Deploy the full stack: cw20 token, custody as its minter, transceiver
/// manager, transfer manager registered as a handler, two mock
/// transceivers (quotes 25 and 75) and a registered peer chain.
pub fn setup(threshold: u64) -> TestEnv {
    let mut app = App::default();
    let admin = Addr::unchecked("adminaddr");
    let user = Addr::unchecked("useraddr");

    app.init_modules(|router, _, storage| {
        for account in [&admin, &user] {
            router
                .bank
                .init_balance(storage, account, coins(10_000_000_000, FEE_DENOM))
                .unwrap();
        }
    });

    let cw20_code = app.store_code(contract_cw20());
    let custody_code = app.store_code(contract_mock_custody());
    let transceiver_code = app.store_code(contract_mock_transceiver());
    let tm_code = app.store_code(contract_transceiver_manager());
    let manager_code = app.store_code(contract_transfer_manager());

    let token = app
        .instantiate_contract(
            cw20_code,
            admin.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Test Token".to_string(),
                symbol: "TEST".to_string(),
                decimals: LOCAL_DECIMALS,
                initial_balances: vec![Cw20Coin {
                    address: user.to_string(),
                    amount: Uint128::from(USER_BALANCE),
                }],
                mint: Some(MinterResponse {
                    minter: admin.to_string(),
                    cap: None,
                }),
                marketing: None,
            },
            &[],
            "test-token",
            Some(admin.to_string()),
        )
        .unwrap();

    let custody = app
        .instantiate_contract(
            custody_code,
            admin.clone(),
            &MockCustodyInstantiateMsg {
                token: token.to_string(),
            },
            &[],
            "mock-custody",
            None,
        )
        .unwrap();

    // hand minting over to the custody
    app.execute_contract(
        admin.clone(),
        token.clone(),
        &cw20_base::msg::ExecuteMsg::UpdateMinter {
            new_minter: Some(custody.to_string()),
        },
        &[],
    )
    .unwrap();

    let transceiver_manager = app
        .instantiate_contract(
            tm_code,
            admin.clone(),
            &transceiver_manager::msg::InstantiateMsg {
                fee_denom: FEE_DENOM.to_string(),
            },
            &[],
            "transceiver-manager",
            Some(admin.to_string()),
        )
        .unwrap();

    let manager = app
        .instantiate_contract(
            manager_code,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                transceiver_manager: transceiver_manager.to_string(),
                custody: custody.to_string(),
                chain_id: LOCAL_CHAIN,
                threshold,
                fee_denom: FEE_DENOM.to_string(),
            },
            &[],
            "transfer-manager",
            Some(admin.to_string()),
        )
        .unwrap();

    let mut transceivers = vec![];
    for fee in [25u128, 75] {
        let transceiver = app
            .instantiate_contract(
                transceiver_code,
                admin.clone(),
                &MockTransceiverInstantiateMsg {
                    manager: transceiver_manager.to_string(),
                    fee: Uint128::from(fee),
                },
                &[],
                "mock-transceiver",
                None,
            )
            .unwrap();
        app.execute_contract(
            admin.clone(),
            transceiver_manager.clone(),
            &transceiver_manager::msg::ExecuteMsg::AddTransceiver {
                handler: manager.to_string(),
                transceiver: transceiver.to_string(),
            },
            &[],
        )
        .unwrap();
        transceivers.push(transceiver);
    }

    app.execute_contract(
        admin.clone(),
        manager.clone(),
        &transfer_manager::msg::ExecuteMsg::SetPeer {
            chain_id: PEER_CHAIN,
            contract: Binary::from(PEER_CONTRACT.as_bytes().as_slice()),
            decimals: PEER_DECIMALS,
        },
        &[],
    )
    .unwrap();

    // blanket allowance so transfers can pull tokens into custody
    app.execute_contract(
        user.clone(),
        token.clone(),
        &cw20_base::msg::ExecuteMsg::IncreaseAllowance {
            spender: manager.to_string(),
            amount: Uint128::from(USER_BALANCE),
            expires: None,
        },
        &[],
    )
    .unwrap();

    TestEnv {
        app,
        admin,
        user,
        manager,
        transceiver_manager,
        custody,
        token,
        transceivers,
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub fn universal(addr: &Addr) -> UniversalAddress {
    UniversalAddress::from_addr(&MockApi::default(), addr).unwrap()
}

pub fn attr_value(res: &AppResponse, key: &str) -> Option<String> {
    res.events.iter().find_map(|event| {
        event
            .attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.clone())
    })
}

pub fn cw20_balance(env: &TestEnv, account: &Addr) -> Uint128 {
    let response: cw20::BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.token,
            &cw20::Cw20QueryMsg::Balance {
                address: account.to_string(),
            },
        )
        .unwrap();
    response.balance
}

pub fn native_balance(env: &TestEnv, account: &Addr) -> Uint128 {
    env.app
        .wrap()
        .query_balance(account, FEE_DENOM)
        .unwrap()
        .amount
}

/// An inbound message from the registered peer carrying a transfer of
/// `trimmed_amount` (at wire precision) to `recipient`.
pub fn inbound_message(env: &TestEnv, id_byte: u8, trimmed_amount: u64, recipient: &Addr) -> MessageReceived {
    let amount = TrimmedAmount {
        amount: trimmed_amount,
        decimals: 8,
    };
    let payload = encode_transfer_payload(
        &amount,
        &UniversalAddress([0xAA; 32]),
        &universal(recipient),
        LOCAL_CHAIN,
    );
    MessageReceived {
        id: [id_byte; 32],
        user_address: UniversalAddress([0xBB; 32]),
        source_chain_id: PEER_CHAIN,
        source_address: PEER_CONTRACT,
        handler_address: universal(&env.manager),
        payload: Binary::from(payload),
    }
}

/// Deliver a message through the given mock transceivers, producing one
/// attestation each.
pub fn attest(env: &mut TestEnv, message: &MessageReceived, transceiver_indices: &[usize]) {
    for index in transceiver_indices {
        let transceiver = env.transceivers[*index].clone();
        env.app
            .execute_contract(
                Addr::unchecked("relayeraddr"),
                transceiver,
                &MockTransceiverExecuteMsg::Deliver {
                    message: message.clone(),
                },
                &[],
            )
            .unwrap();
    }
}

pub fn message_digest(env: &TestEnv, message: &MessageReceived) -> Binary {
    let response: transceiver_manager::msg::MessageDigestResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.transceiver_manager,
            &transceiver_manager::msg::QueryMsg::MessageDigest {
                message: message.clone(),
            },
        )
        .unwrap();
    response.digest
}
