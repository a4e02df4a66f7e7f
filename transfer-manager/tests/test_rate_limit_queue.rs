//! Integration tests for outbound rate limiting and the queued-transfer
//! lifecycle.

use cosmwasm_std::{coins, Addr, Binary, Uint128};
use cw_multi_test::Executor;

use transfer_manager::msg::{
    CapacityResponse, ExecuteMsg, OutboundQueuedTransferResponse, QueryMsg,
};

mod helpers;
use helpers::{
    attr_value, cw20_balance, inbound_message, attest, native_balance, setup, LastSendResponse,
    MockTransceiverQueryMsg, TestEnv, FEE_DENOM, PEER_CHAIN, USER_BALANCE,
};

/// 100 whole tokens at local decimals (9).
const AMOUNT: u128 = 100_000_000_000;

/// Outbound limit of 150 whole tokens.
const LIMIT: u128 = 150_000_000_000;

const DURATION: u64 = 3600;

const TOTAL_FEE: u128 = 100;

fn recipient() -> Binary {
    Binary::from([0xCC; 32].as_slice())
}

fn configure_outbound_limit(env: &mut TestEnv) {
    let admin = env.admin.clone();
    let manager = env.manager.clone();
    env.app
        .execute_contract(
            admin.clone(),
            manager.clone(),
            &ExecuteMsg::SetOutboundRateLimit {
                limit: Uint128::from(LIMIT),
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            admin,
            manager,
            &ExecuteMsg::SetOutboundRateDuration {
                duration_secs: DURATION,
            },
            &[],
        )
        .unwrap();
}

fn transfer(env: &mut TestEnv, should_queue: bool) -> Result<cw_multi_test::AppResponse, anyhow::Error> {
    let user = env.user.clone();
    let manager = env.manager.clone();
    env.app.execute_contract(
        user,
        manager,
        &ExecuteMsg::TransferFull {
            amount: Uint128::from(AMOUNT),
            recipient_chain: PEER_CHAIN,
            recipient: recipient(),
            should_queue,
            transceiver_instructions: vec![],
        },
        &coins(TOTAL_FEE, FEE_DENOM),
    )
}

fn queued_message_id(res: &cw_multi_test::AppResponse) -> Binary {
    let hex_id = attr_value(res, "message_id").unwrap();
    Binary::from(hex::decode(hex_id.trim_start_matches("0x")).unwrap())
}

fn outbound_capacity(env: &TestEnv) -> Uint128 {
    let response: CapacityResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.manager, &QueryMsg::OutboundCapacity {})
        .unwrap();
    response.capacity
}

// ============================================================================
// Capacity Tests
// ============================================================================

#[test]
fn test_outbound_capacity_consumed_and_refilled() {
    let mut env = setup(1);
    configure_outbound_limit(&mut env);
    assert_eq!(outbound_capacity(&env), Uint128::from(LIMIT));

    transfer(&mut env, false).unwrap();
    assert_eq!(outbound_capacity(&env), Uint128::from(LIMIT - AMOUNT));

    // linear refill: half the duration restores half the limit
    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(DURATION / 2);
        block.height += 1;
    });
    assert_eq!(
        outbound_capacity(&env),
        Uint128::from(LIMIT - AMOUNT + LIMIT / 2)
    );
}

#[test]
fn test_transfer_without_queueing_fails_on_rate_limit() {
    let mut env = setup(1);
    configure_outbound_limit(&mut env);

    transfer(&mut env, false).unwrap();
    let err = transfer(&mut env, false).unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Insufficient capacity"));
}

// ============================================================================
// Queued Transfer Lifecycle
// ============================================================================

#[test]
fn test_queued_transfer_refunds_fee_and_locks_tokens() {
    let mut env = setup(1);
    configure_outbound_limit(&mut env);

    transfer(&mut env, false).unwrap();
    let res = transfer(&mut env, true).unwrap();
    assert_eq!(attr_value(&res, "queued").unwrap(), "true".to_string());

    // both transfers pulled tokens; only the first paid a delivery fee
    assert_eq!(
        cw20_balance(&env, &env.user),
        Uint128::from(USER_BALANCE - 2 * AMOUNT)
    );
    assert_eq!(
        native_balance(&env, &env.user),
        Uint128::from(10_000_000_000u128 - TOTAL_FEE)
    );

    let message_id = queued_message_id(&res);
    let queued: OutboundQueuedTransferResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.manager,
            &QueryMsg::OutboundQueuedTransfer {
                message_id: message_id.clone(),
            },
        )
        .unwrap();
    assert!(!queued.can_complete);
    assert_eq!(queued.transfer.sender, env.user);
    assert_eq!(queued.transfer.recipient_chain, PEER_CHAIN);
}

#[test]
fn test_queued_transfer_cannot_complete_early() {
    let mut env = setup(1);
    configure_outbound_limit(&mut env);

    transfer(&mut env, false).unwrap();
    let res = transfer(&mut env, true).unwrap();
    let message_id = queued_message_id(&res);

    let user = env.user.clone();
    let manager = env.manager.clone();
    let err = env
        .app
        .execute_contract(
            user,
            manager,
            &ExecuteMsg::CompleteOutboundQueuedTransfer { message_id },
            &coins(TOTAL_FEE, FEE_DENOM),
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("still locked"));
}

#[test]
fn test_queued_transfer_completes_after_delay() {
    let mut env = setup(1);
    configure_outbound_limit(&mut env);

    transfer(&mut env, false).unwrap();
    let res = transfer(&mut env, true).unwrap();
    let message_id = queued_message_id(&res);

    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(DURATION);
        block.height += 1;
    });

    let queued: OutboundQueuedTransferResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.manager,
            &QueryMsg::OutboundQueuedTransfer {
                message_id: message_id.clone(),
            },
        )
        .unwrap();
    assert!(queued.can_complete);

    // anyone may complete; the caller pays the delivery fee
    let completer = Addr::unchecked("completeraddr");
    env.app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &completer, coins(1_000, FEE_DENOM))
            .unwrap();
    });
    let res = env
        .app
        .execute_contract(
            completer,
            env.manager.clone(),
            &ExecuteMsg::CompleteOutboundQueuedTransfer {
                message_id: message_id.clone(),
            },
            &coins(TOTAL_FEE, FEE_DENOM),
        )
        .unwrap();
    assert_eq!(attr_value(&res, "fee").unwrap(), TOTAL_FEE.to_string());

    // the queue entry is gone
    let err = env
        .app
        .wrap()
        .query_wasm_smart::<OutboundQueuedTransferResponse>(
            &env.manager,
            &QueryMsg::OutboundQueuedTransfer { message_id },
        )
        .unwrap_err();
    assert!(err.to_string().contains("unknown outbound queued transfer"));

    // the message reached the transceivers
    let last: LastSendResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.transceivers[0], &MockTransceiverQueryMsg::LastSend {})
        .unwrap();
    assert!(last.message.is_some());
}

#[test]
fn test_only_original_sender_can_cancel() {
    let mut env = setup(1);
    configure_outbound_limit(&mut env);

    transfer(&mut env, false).unwrap();
    let res = transfer(&mut env, true).unwrap();
    let message_id = queued_message_id(&res);

    let manager = env.manager.clone();
    let err = env
        .app
        .execute_contract(
            Addr::unchecked("strangeraddr"),
            manager.clone(),
            &ExecuteMsg::CancelOutboundQueuedTransfer {
                message_id: message_id.clone(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("original sender"));

    // the sender gets the tokens minted back
    let user = env.user.clone();
    env.app
        .execute_contract(
            user,
            manager,
            &ExecuteMsg::CancelOutboundQueuedTransfer { message_id },
            &[],
        )
        .unwrap();
    assert_eq!(
        cw20_balance(&env, &env.user),
        Uint128::from(USER_BALANCE - AMOUNT)
    );
}

#[test]
fn test_unknown_queued_transfer_rejected() {
    let mut env = setup(1);
    let user = env.user.clone();
    let manager = env.manager.clone();

    let err = env
        .app
        .execute_contract(
            user,
            manager,
            &ExecuteMsg::CompleteOutboundQueuedTransfer {
                message_id: Binary::from([0x77; 32].as_slice()),
            },
            &[],
        )
        .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("Unknown outbound queued transfer"));
}

// ============================================================================
// Flow Conservation
// ============================================================================

#[test]
fn test_inbound_execution_backfills_outbound_capacity() {
    let mut env = setup(1);
    configure_outbound_limit(&mut env);

    // consume 100 of the 150 outbound capacity
    transfer(&mut env, false).unwrap();
    assert_eq!(outbound_capacity(&env), Uint128::from(LIMIT - AMOUNT));

    // an executed inbound transfer of 100 backfills the outbound bucket
    let message = inbound_message(&env, 0x01, (AMOUNT / 10) as u64, &Addr::unchecked("recipaddr"));
    attest(&mut env, &message, &[0]);
    let manager = env.manager.clone();
    env.app
        .execute_contract(
            Addr::unchecked("relayeraddr"),
            manager,
            &ExecuteMsg::ExecuteMessage { message },
            &[],
        )
        .unwrap();

    assert_eq!(outbound_capacity(&env), Uint128::from(LIMIT));
}
