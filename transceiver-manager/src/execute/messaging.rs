//! Messaging handlers: outbound fan-out and inbound attestations.

use cosmwasm_std::{
    coins, to_json_binary, Addr, Attribute, Binary, CosmosMsg, Deps, DepsMut, MessageInfo,
    Response, Uint128, WasmMsg,
};

use common::address::UniversalAddress;
use common::funds::fee_paid;
use common::hash::bytes32_to_hex;
use common::instructions::{resolve, TransceiverInstruction};
use common::transceiver::{DeliveryPriceResponse, TransceiverExecuteMsg, TransceiverQueryMsg};
use common::types::{MessageReceived, MessageToSend};
use common::wire::message_digest;

use crate::error::ContractError;
use crate::state::{ATTESTATIONS, CONFIG, HANDLER_BY_UNIVERSAL, NUM_ATTESTATIONS};

use super::registry::{ensure_handler_not_paused, load_transceivers};

/// Execute handler for fanning a message out through the calling handler's
/// transceivers. Attached funds must equal the aggregate quote exactly.
pub fn execute_send_message_to_transceivers(
    deps: DepsMut,
    info: MessageInfo,
    message: MessageToSend,
    instructions: Vec<TransceiverInstruction>,
) -> Result<Response, ContractError> {
    let handler = info.sender.clone();
    let transceivers = load_transceivers(deps.storage, &handler)?;
    ensure_handler_not_paused(deps.storage, &handler)?;

    // the message must be sent in the handler's own name
    let caller_universal = UniversalAddress::from_addr(deps.api, &handler)?;
    if message.source_address != caller_universal {
        return Err(ContractError::SourceAddressMismatch);
    }

    let config = CONFIG.load(deps.storage)?;
    let quotes = quote_transceivers(deps.as_ref(), &transceivers, &message, &instructions)?;

    let mut total = Uint128::zero();
    let mut messages: Vec<CosmosMsg> = vec![];
    let mut sent: Vec<Attribute> = vec![];
    for ((transceiver, instruction), price) in quotes {
        total += price;
        let funds = if price.is_zero() {
            vec![]
        } else {
            coins(price.u128(), &config.fee_denom)
        };
        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: transceiver.to_string(),
            msg: to_json_binary(&TransceiverExecuteMsg::SendMessage {
                message: message.clone(),
                instruction,
            })?,
            funds,
        }));
        sent.push(Attribute::new("message_sent", transceiver));
    }

    // the fan-out layer settles at the exact aggregate quote
    let paid = fee_paid(&info.funds, &config.fee_denom)?;
    if paid != total {
        return Err(ContractError::FeePaymentIncorrect {
            expected: total,
            got: paid,
        });
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "send_message_to_transceivers")
        .add_attribute("handler", handler)
        .add_attribute("message_id", bytes32_to_hex(&message.id))
        .add_attribute("total_delivery_price", total.to_string())
        .add_attributes(sent))
}

/// Execute handler for recording the calling transceiver's attestation.
pub fn execute_attestation_received(
    deps: DepsMut,
    info: MessageInfo,
    message: MessageReceived,
) -> Result<Response, ContractError> {
    let transceiver = info.sender;

    // resolve the handler this message is addressed to
    let handler = HANDLER_BY_UNIVERSAL
        .may_load(deps.storage, message.handler_address.as_bytes())?
        .ok_or_else(|| ContractError::HandlerNotRegistered {
            handler: message.handler_address.to_hex(),
        })?;

    let transceivers = load_transceivers(deps.storage, &handler)?;
    if !transceivers.contains(&transceiver) {
        return Err(ContractError::TransceiverNotConfigured {
            handler: handler.to_string(),
        });
    }
    ensure_handler_not_paused(deps.storage, &handler)?;

    // replay protection is keyed by digest, not the caller-chosen id
    let digest = message_digest(&message);
    let attestation_key = (digest.as_slice(), &transceiver);
    if ATTESTATIONS
        .may_load(deps.storage, attestation_key)?
        .unwrap_or(false)
    {
        return Err(ContractError::AttestationAlreadyReceived);
    }
    ATTESTATIONS.save(deps.storage, attestation_key, &true)?;

    let count = NUM_ATTESTATIONS
        .may_load(deps.storage, digest.as_slice())?
        .unwrap_or(0)
        + 1;
    NUM_ATTESTATIONS.save(deps.storage, digest.as_slice(), &count)?;

    Ok(Response::new()
        .add_attribute("method", "attestation_received")
        .add_attribute("handler", handler)
        .add_attribute("transceiver", transceiver)
        .add_attribute("message_id", bytes32_to_hex(&message.id))
        .add_attribute("source_chain_id", message.source_chain_id.to_string())
        .add_attribute("message_digest", bytes32_to_hex(&digest))
        .add_attribute("attestations", count.to_string()))
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Resolve instructions against the configured order and quote every
/// transceiver. Shared by the quote query and the fan-out send.
pub(crate) fn quote_transceivers(
    deps: Deps,
    transceivers: &[Addr],
    message: &MessageToSend,
    instructions: &[TransceiverInstruction],
) -> Result<Vec<((Addr, Binary), Uint128)>, ContractError> {
    if transceivers.is_empty() {
        return Err(ContractError::NoTransceiversConfigured);
    }
    let resolved = resolve(transceivers, instructions)?;

    let mut quotes = Vec::with_capacity(transceivers.len());
    for (transceiver, instruction) in transceivers.iter().zip(resolved) {
        let response: DeliveryPriceResponse = deps.querier.query_wasm_smart(
            transceiver,
            &TransceiverQueryMsg::QuoteDeliveryPrice {
                message: message.clone(),
                instruction: instruction.clone(),
            },
        )?;
        quotes.push(((transceiver.clone(), instruction), response.price));
    }
    Ok(quotes)
}
