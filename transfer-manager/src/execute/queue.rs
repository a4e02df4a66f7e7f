//! Queued-transfer lifecycle handlers.
//!
//! A queued transfer becomes completable once the relevant bucket's full
//! refill duration has elapsed since enqueue; completion then bypasses the
//! capacity check entirely. Eligibility is a stateless comparison against
//! the current block time, re-evaluated on every attempt.

use cosmwasm_std::{to_json_binary, Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, WasmMsg};

use common::custody::CustodyExecuteMsg;
use common::hash::bytes32_to_hex;
use common::trimmed::untrim;

use crate::error::ContractError;
use crate::rate_limit::{inbound_bucket_id, load_bucket, outbound_bucket_id};
use crate::state::{INBOUND_QUEUE, OUTBOUND_QUEUE};

use super::outbound::send_transfer;
use super::{load_config_not_paused, to_bytes32};

/// Execute handler for sending a queued outbound transfer after its delay.
pub fn execute_complete_outbound_queued_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message_id: Binary,
) -> Result<Response, ContractError> {
    let config = load_config_not_paused(deps.storage)?;
    let message_id = to_bytes32(&message_id)?;

    let transfer = OUTBOUND_QUEUE
        .may_load(deps.storage, message_id.as_slice())?
        .ok_or(ContractError::UnknownOutboundQueuedTransfer)?;

    let duration = load_bucket(deps.storage, &outbound_bucket_id(), None)?.duration_secs;
    ensure_delay_elapsed(&env, transfer.enqueued_at.seconds(), duration)?;

    OUTBOUND_QUEUE.remove(deps.storage, message_id.as_slice());

    // the rate check is skipped here; the delay already bounded the flow
    let sent = send_transfer(
        deps.as_ref(),
        &env,
        &config,
        &info.funds,
        &info.sender,
        message_id,
        transfer.amount,
        transfer.recipient_chain,
        transfer.recipient,
        &transfer.sender,
        transfer.instructions,
    )?;

    Ok(Response::new()
        .add_messages(sent.messages)
        .add_attribute("method", "complete_outbound_queued_transfer")
        .add_attribute("message_id", bytes32_to_hex(&message_id))
        .add_attribute("sender", transfer.sender)
        .add_attribute("recipient_chain", transfer.recipient_chain.to_string())
        .add_attribute("fee", sent.fee.to_string()))
}

/// Execute handler for cancelling a queued outbound transfer. Only the
/// original sender may cancel; the custody re-mints the funds to them.
pub fn execute_cancel_outbound_queued_transfer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    message_id: Binary,
) -> Result<Response, ContractError> {
    let config = load_config_not_paused(deps.storage)?;
    let message_id = to_bytes32(&message_id)?;

    let transfer = OUTBOUND_QUEUE
        .may_load(deps.storage, message_id.as_slice())?
        .ok_or(ContractError::UnknownOutboundQueuedTransfer)?;

    if info.sender != transfer.sender {
        return Err(ContractError::OnlyOriginalSenderCanCancel);
    }

    OUTBOUND_QUEUE.remove(deps.storage, message_id.as_slice());

    let amount = untrim(&transfer.amount, config.token_decimals)?;
    let refund = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.custody.to_string(),
        msg: to_json_binary(&CustodyExecuteMsg::Mint {
            recipient: transfer.sender.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(refund)
        .add_attribute("method", "cancel_outbound_queued_transfer")
        .add_attribute("message_id", bytes32_to_hex(&message_id))
        .add_attribute("sender", transfer.sender)
        .add_attribute("amount", amount.to_string()))
}

/// Execute handler for crediting a queued inbound transfer after its delay.
pub fn execute_complete_inbound_queued_transfer(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    digest: Binary,
) -> Result<Response, ContractError> {
    let config = load_config_not_paused(deps.storage)?;
    let digest = to_bytes32(&digest)?;

    let transfer = INBOUND_QUEUE
        .may_load(deps.storage, digest.as_slice())?
        .ok_or(ContractError::UnknownInboundQueuedTransfer)?;

    let duration = load_bucket(
        deps.storage,
        &inbound_bucket_id(transfer.source_chain),
        Some(transfer.source_chain),
    )?
    .duration_secs;
    ensure_delay_elapsed(&env, transfer.enqueued_at.seconds(), duration)?;

    INBOUND_QUEUE.remove(deps.storage, digest.as_slice());

    let amount = untrim(&transfer.amount, config.token_decimals)?;
    let credit = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.custody.to_string(),
        msg: to_json_binary(&CustodyExecuteMsg::Mint {
            recipient: transfer.recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(credit)
        .add_attribute("method", "complete_inbound_queued_transfer")
        .add_attribute("message_digest", bytes32_to_hex(&digest))
        .add_attribute("recipient", transfer.recipient)
        .add_attribute("source_chain", transfer.source_chain.to_string())
        .add_attribute("amount", amount.to_string()))
}

fn ensure_delay_elapsed(env: &Env, enqueued_at: u64, duration: u64) -> Result<(), ContractError> {
    let elapsed = env.block.time.seconds().saturating_sub(enqueued_at);
    if elapsed < duration {
        return Err(ContractError::TransferStillQueued {
            remaining_seconds: duration - elapsed,
        });
    }
    Ok(())
}
