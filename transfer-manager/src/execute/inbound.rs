//! Quorum-gated execution of inbound messages.

use cosmwasm_std::{
    to_json_binary, Attribute, CosmosMsg, DepsMut, Env, Response, WasmMsg,
};

use common::address::UniversalAddress;
use common::custody::CustodyExecuteMsg;
use common::hash::bytes32_to_hex;
use common::trimmed::untrim;
use common::types::{MessageDigest, MessageReceived};
use common::wire::parse_transfer_payload;

use transceiver_manager::msg::{
    MessageAttestationsResponse, MessageDigestResponse, QueryMsg as ManagerQueryMsg,
};

use crate::error::ContractError;
use crate::rate_limit::{inbound_bucket_id, load_bucket, outbound_bucket_id, save_bucket};
use crate::state::{Config, InboundQueuedTransfer, CONFIG, EXECUTED_MESSAGES, INBOUND_QUEUE, THRESHOLD};

use super::{load_peer, to_bytes32};

/// Execute handler for a message that has reached the attestation
/// threshold.
///
/// The digest is marked executed before the transfer is applied. The whole
/// call is atomic, so a failure in the apply step reverts the mark along
/// with everything else; what the ordering rules out is the apply step
/// observing its own digest as unexecuted and re-entering.
pub fn execute_execute_message(
    deps: DepsMut,
    env: Env,
    message: MessageReceived,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    // the digest is the unique replay-protection key for this message
    let digest_response: MessageDigestResponse = deps.querier.query_wasm_smart(
        &config.transceiver_manager,
        &ManagerQueryMsg::MessageDigest {
            message: message.clone(),
        },
    )?;
    let digest = to_bytes32(&digest_response.digest)?;

    // the message must be addressed to this handler
    let own_address = UniversalAddress::from_addr(deps.api, &env.contract.address)?;
    if message.handler_address != own_address {
        return Err(ContractError::HandlerAddressMismatch);
    }

    let attestations: MessageAttestationsResponse = deps.querier.query_wasm_smart(
        &config.transceiver_manager,
        &ManagerQueryMsg::MessageAttestations {
            digest: digest_response.digest,
        },
    )?;
    let threshold = THRESHOLD.load(deps.storage)?;
    if attestations.count == 0 || attestations.count < threshold {
        return Err(ContractError::MessageNotApproved {
            attestations: attestations.count,
            threshold,
        });
    }

    if EXECUTED_MESSAGES
        .may_load(deps.storage, digest.as_slice())?
        .unwrap_or(false)
    {
        return Err(ContractError::MessageAlreadyExecuted);
    }
    EXECUTED_MESSAGES.save(deps.storage, digest.as_slice(), &true)?;

    let (messages, attributes) = handle_transfer_message(deps, &env, &config, digest, &message)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "execute_message")
        .add_attribute("message_id", bytes32_to_hex(&message.id))
        .add_attribute("message_digest", bytes32_to_hex(&digest))
        .add_attribute("source_chain", message.source_chain_id.to_string())
        .add_attributes(attributes))
}

/// Apply an executed transfer message: verify the peer, parse the payload,
/// untrim the amount and either credit the recipient or queue on the
/// inbound rate limit. The caller has already validated the digest.
fn handle_transfer_message(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    digest: MessageDigest,
    message: &MessageReceived,
) -> Result<(Vec<CosmosMsg>, Vec<Attribute>), ContractError> {
    if config.paused {
        return Err(ContractError::ContractPaused);
    }

    // the message must come from the registered peer for its source chain
    let peer = load_peer(deps.storage, message.source_chain_id)?;
    if message.source_address != peer.contract {
        return Err(ContractError::PeerAddressMismatch);
    }

    let payload = parse_transfer_payload(message.payload.as_slice())?;
    if payload.destination_chain_id != config.chain_id {
        return Err(ContractError::InvalidTargetChain {
            encoded: payload.destination_chain_id,
            local: config.chain_id,
        });
    }

    let amount = untrim(&payload.amount, config.token_decimals)?;
    let recipient = payload.recipient.to_addr(deps.api)?;

    let now = env.block.time;
    let inbound_id = inbound_bucket_id(message.source_chain_id);
    let mut inbound = load_bucket(deps.storage, &inbound_id, Some(message.source_chain_id))?;

    // inbound transfers always queue on insufficient capacity; the value is
    // already committed on the source chain
    if !inbound.has_capacity(now, amount) {
        INBOUND_QUEUE.save(
            deps.storage,
            digest.as_slice(),
            &InboundQueuedTransfer {
                enqueued_at: now,
                amount: payload.amount,
                source_chain: message.source_chain_id,
                recipient: recipient.clone(),
            },
        )?;

        return Ok((
            vec![],
            vec![
                Attribute::new("queued", "true"),
                Attribute::new("recipient", recipient),
                Attribute::new("amount", amount.to_string()),
                Attribute::new("current_capacity", inbound.current_capacity(now).to_string()),
            ],
        ));
    }

    // consume inbound capacity and backfill the outbound side
    inbound.consume(now, amount)?;
    save_bucket(deps.storage, &inbound_id, &inbound)?;
    let outbound_id = outbound_bucket_id();
    let mut outbound = load_bucket(deps.storage, &outbound_id, None)?;
    outbound.fill(now, amount);
    save_bucket(deps.storage, &outbound_id, &outbound)?;

    let credit = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.custody.to_string(),
        msg: to_json_binary(&CustodyExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    Ok((
        vec![credit],
        vec![
            Attribute::new("queued", "false"),
            Attribute::new("recipient", recipient),
            Attribute::new("amount", amount.to_string()),
        ],
    ))
}
