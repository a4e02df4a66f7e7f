//! Outbound transfer handlers.
//!
//! A transfer pulls the tokens into custody, trims the amount to wire
//! precision, and either sends immediately or parks the transfer in the
//! outbound queue when the rate limit is hit. The send path is shared with
//! queued-transfer completion, which skips the rate check.

use cosmwasm_std::{
    coins, to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Env,
    MessageInfo, Response, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use common::address::UniversalAddress;
use common::funds::fee_paid;
use common::hash::{bytes32_to_hex, keccak256};
use common::instructions::TransceiverInstruction;
use common::trimmed::{trim, untrim, TrimmedAmount};
use common::types::{MessageId, MessageToSend};
use common::wire::encode_transfer_payload;

use transceiver_manager::msg::{
    ExecuteMsg as ManagerExecuteMsg, QueryMsg as ManagerQueryMsg, QuoteDeliveryPricesResponse,
};

use crate::error::ContractError;
use crate::rate_limit::{inbound_bucket_id, load_bucket, outbound_bucket_id, save_bucket};
use crate::state::{Config, OutboundQueuedTransfer, MESSAGE_SEQUENCE, OUTBOUND_QUEUE};

use super::{load_config_not_paused, load_peer};

/// Execute handler for a transfer with default parameters.
pub fn execute_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    recipient_chain: u16,
    recipient: Binary,
) -> Result<Response, ContractError> {
    transfer_entry_point(
        deps,
        env,
        info,
        amount,
        recipient_chain,
        recipient,
        false,
        vec![],
    )
}

/// Execute handler for a transfer with the full parameter surface.
pub fn execute_transfer_full(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    recipient_chain: u16,
    recipient: Binary,
    should_queue: bool,
    transceiver_instructions: Vec<TransceiverInstruction>,
) -> Result<Response, ContractError> {
    transfer_entry_point(
        deps,
        env,
        info,
        amount,
        recipient_chain,
        recipient,
        should_queue,
        transceiver_instructions,
    )
}

#[allow(clippy::too_many_arguments)]
fn transfer_entry_point(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    recipient_chain: u16,
    recipient: Binary,
    should_queue: bool,
    instructions: Vec<TransceiverInstruction>,
) -> Result<Response, ContractError> {
    let config = load_config_not_paused(deps.storage)?;

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let recipient = UniversalAddress::from_binary(&recipient)?;
    if recipient.is_zero() {
        return Err(ContractError::InvalidRecipient);
    }

    // also checks the recipient chain is known
    let peer = load_peer(deps.storage, recipient_chain)?;
    let trimmed = trim_transfer_amount(&config, amount, peer.decimals)?;
    let message_id = next_message_id(deps.storage)?;

    // move the tokens into custody; fails atomically without an allowance
    let pull_tokens = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: config.custody.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    let now = env.block.time;
    let outbound_id = outbound_bucket_id();
    let mut outbound = load_bucket(deps.storage, &outbound_id, None)?;

    if !outbound.has_capacity(now, amount) {
        if !should_queue {
            return Err(ContractError::InsufficientCapacity {
                capacity: outbound.current_capacity(now),
                requested: amount,
            });
        }

        OUTBOUND_QUEUE.save(
            deps.storage,
            message_id.as_slice(),
            &OutboundQueuedTransfer {
                enqueued_at: now,
                amount: trimmed,
                recipient_chain,
                recipient,
                sender: info.sender.clone(),
                instructions,
            },
        )?;

        // the delivery fee is not owed until the transfer is sent
        let mut messages = vec![pull_tokens];
        if !info.funds.is_empty() {
            messages.push(CosmosMsg::Bank(BankMsg::Send {
                to_address: info.sender.to_string(),
                amount: info.funds,
            }));
        }

        return Ok(Response::new()
            .add_messages(messages)
            .add_attribute("method", "transfer")
            .add_attribute("message_id", bytes32_to_hex(&message_id))
            .add_attribute("queued", "true")
            .add_attribute("sender", info.sender)
            .add_attribute("recipient_chain", recipient_chain.to_string())
            .add_attribute("amount", amount.to_string())
            .add_attribute(
                "current_capacity",
                outbound.current_capacity(now).to_string(),
            ))
    }

    // consume outbound capacity and backfill the destination's inbound side
    outbound.consume(now, amount)?;
    save_bucket(deps.storage, &outbound_id, &outbound)?;
    let inbound_id = inbound_bucket_id(recipient_chain);
    let mut inbound = load_bucket(deps.storage, &inbound_id, Some(recipient_chain))?;
    inbound.fill(now, amount);
    save_bucket(deps.storage, &inbound_id, &inbound)?;

    let sent = send_transfer(
        deps.as_ref(),
        &env,
        &config,
        &info.funds,
        &info.sender,
        message_id,
        trimmed,
        recipient_chain,
        recipient,
        &info.sender,
        instructions,
    )?;

    Ok(Response::new()
        .add_message(pull_tokens)
        .add_messages(sent.messages)
        .add_attribute("method", "transfer")
        .add_attribute("message_id", bytes32_to_hex(&message_id))
        .add_attribute("queued", "false")
        .add_attribute("sender", info.sender)
        .add_attribute("recipient", recipient.to_hex())
        .add_attribute("recipient_chain", recipient_chain.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("fee", sent.fee.to_string()))
}

/// Allocate the next message id: keccak256 of the big-endian sequence.
fn next_message_id(storage: &mut dyn cosmwasm_std::Storage) -> Result<MessageId, ContractError> {
    let sequence = MESSAGE_SEQUENCE.load(storage)? + 1;
    MESSAGE_SEQUENCE.save(storage, &sequence)?;
    Ok(keccak256(&sequence.to_be_bytes()))
}

/// Trim to wire precision and reject amounts that would lose dust.
pub(crate) fn trim_transfer_amount(
    config: &Config,
    amount: Uint128,
    peer_decimals: u8,
) -> Result<TrimmedAmount, ContractError> {
    let trimmed = trim(amount, config.token_decimals, peer_decimals)?;
    if untrim(&trimmed, config.token_decimals)? != amount {
        return Err(ContractError::TransferAmountHasDust);
    }
    Ok(trimmed)
}

pub(crate) struct SentTransfer {
    pub messages: Vec<CosmosMsg>,
    pub fee: Uint128,
}

/// Build the wire payload and fan the message out through the transceiver
/// manager, settling the delivery fee from `funds`.
///
/// The fan-out layer requires exact payment, so exactly the quoted total is
/// forwarded; this layer accepts overpayment and refunds the excess to
/// `payer`, while a deficit aborts the whole transfer.
#[allow(clippy::too_many_arguments)]
pub(crate) fn send_transfer(
    deps: Deps,
    env: &Env,
    config: &Config,
    funds: &[Coin],
    payer: &Addr,
    message_id: MessageId,
    trimmed: TrimmedAmount,
    recipient_chain: u16,
    recipient: UniversalAddress,
    user: &Addr,
    instructions: Vec<TransceiverInstruction>,
) -> Result<SentTransfer, ContractError> {
    // also checks the recipient chain is known
    let peer = load_peer(deps.storage, recipient_chain)?;

    let payload = encode_transfer_payload(
        &trimmed,
        &UniversalAddress::from_addr(deps.api, &config.token)?,
        &recipient,
        recipient_chain,
    );
    let message = MessageToSend {
        id: message_id,
        user_address: UniversalAddress::from_addr(deps.api, user)?,
        source_address: UniversalAddress::from_addr(deps.api, &env.contract.address)?,
        destination_chain_id: recipient_chain,
        handler_address: peer.contract,
        payload: Binary::from(payload),
    };

    let quote: QuoteDeliveryPricesResponse = deps.querier.query_wasm_smart(
        &config.transceiver_manager,
        &ManagerQueryMsg::QuoteDeliveryPrices {
            handler: env.contract.address.to_string(),
            message: message.clone(),
            instructions: instructions.clone(),
        },
    )?;
    let total = quote.total;

    let paid = fee_paid(funds, &config.fee_denom)?;
    if paid < total {
        return Err(ContractError::InsufficientFeePayment {
            expected: total,
            got: paid,
        });
    }

    let mut messages = vec![CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.transceiver_manager.to_string(),
        msg: to_json_binary(&ManagerExecuteMsg::SendMessageToTransceivers {
            message,
            instructions,
        })?,
        funds: if total.is_zero() {
            vec![]
        } else {
            coins(total.u128(), &config.fee_denom)
        },
    })];

    let excess = paid - total;
    if !excess.is_zero() {
        messages.push(CosmosMsg::Bank(BankMsg::Send {
            to_address: payer.to_string(),
            amount: coins(excess.u128(), &config.fee_denom),
        }));
    }

    Ok(SentTransfer {
        messages,
        fee: total,
    })
}
