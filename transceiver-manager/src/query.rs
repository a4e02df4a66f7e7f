//! Query handlers for the Transceiver Manager contract.

use cosmwasm_std::{Binary, Deps, StdError, StdResult, Uint128};

use common::access;
use common::instructions::TransceiverInstruction;
use common::types::{MessageReceived, MessageToSend};
use common::wire::message_digest;

use crate::execute::quote_transceivers;
use crate::msg::{
    ConfigResponse, HandlerTransceiversResponse, HasRoleResponse, HasTransceiverAttestedResponse,
    IsHandlerPausedResponse, IsHandlerRegisteredResponse, IsTransceiverConfiguredResponse,
    MessageAttestationsResponse, MessageDigestResponse, QuoteDeliveryPricesResponse, RoleResponse,
};
use crate::roles::{handler_admin_role, handler_pauser_role, handler_unpauser_role};
use crate::state::{ATTESTATIONS, CONFIG, HANDLER_PAUSED, HANDLER_TRANSCEIVERS, NUM_ATTESTATIONS};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        fee_denom: config.fee_denom,
    })
}

pub fn query_is_handler_registered(
    deps: Deps,
    handler: String,
) -> StdResult<IsHandlerRegisteredResponse> {
    let handler = deps.api.addr_validate(&handler)?;
    Ok(IsHandlerRegisteredResponse {
        registered: HANDLER_TRANSCEIVERS.has(deps.storage, &handler),
    })
}

pub fn query_is_handler_paused(deps: Deps, handler: String) -> StdResult<IsHandlerPausedResponse> {
    let handler = deps.api.addr_validate(&handler)?;
    Ok(IsHandlerPausedResponse {
        paused: HANDLER_PAUSED
            .may_load(deps.storage, &handler)?
            .unwrap_or(false),
    })
}

pub fn query_handler_transceivers(
    deps: Deps,
    handler: String,
) -> StdResult<HandlerTransceiversResponse> {
    let handler = deps.api.addr_validate(&handler)?;
    let transceivers = HANDLER_TRANSCEIVERS
        .may_load(deps.storage, &handler)?
        .ok_or_else(|| StdError::generic_err(format!("handler not registered: {handler}")))?;
    Ok(HandlerTransceiversResponse { transceivers })
}

pub fn query_is_transceiver_configured(
    deps: Deps,
    handler: String,
    transceiver: String,
) -> StdResult<IsTransceiverConfiguredResponse> {
    let transceiver = deps.api.addr_validate(&transceiver)?;
    let transceivers = query_handler_transceivers(deps, handler)?.transceivers;
    Ok(IsTransceiverConfiguredResponse {
        configured: transceivers.contains(&transceiver),
    })
}

pub fn query_message_digest(message: MessageReceived) -> StdResult<MessageDigestResponse> {
    Ok(MessageDigestResponse {
        digest: Binary::from(message_digest(&message).as_slice()),
    })
}

pub fn query_message_attestations(
    deps: Deps,
    digest: Binary,
) -> StdResult<MessageAttestationsResponse> {
    Ok(MessageAttestationsResponse {
        count: NUM_ATTESTATIONS
            .may_load(deps.storage, digest.as_slice())?
            .unwrap_or(0),
    })
}

pub fn query_has_transceiver_attested(
    deps: Deps,
    digest: Binary,
    transceiver: String,
) -> StdResult<HasTransceiverAttestedResponse> {
    let transceiver = deps.api.addr_validate(&transceiver)?;
    Ok(HasTransceiverAttestedResponse {
        attested: ATTESTATIONS
            .may_load(deps.storage, (digest.as_slice(), &transceiver))?
            .unwrap_or(false),
    })
}

pub fn query_quote_delivery_prices(
    deps: Deps,
    handler: String,
    message: MessageToSend,
    instructions: Vec<TransceiverInstruction>,
) -> StdResult<QuoteDeliveryPricesResponse> {
    let handler = deps.api.addr_validate(&handler)?;
    let transceivers = HANDLER_TRANSCEIVERS
        .may_load(deps.storage, &handler)?
        .ok_or_else(|| StdError::generic_err(format!("handler not registered: {handler}")))?;

    let quotes = quote_transceivers(deps, &transceivers, &message, &instructions)
        .map_err(|err| StdError::generic_err(err.to_string()))?;
    let total = quotes
        .iter()
        .fold(Uint128::zero(), |acc, (_, price)| acc + *price);
    Ok(QuoteDeliveryPricesResponse { total })
}

pub fn query_handler_admin_role(deps: Deps, handler: String) -> StdResult<RoleResponse> {
    let handler = deps.api.addr_validate(&handler)?;
    Ok(RoleResponse {
        role: Binary::from(handler_admin_role(&handler).as_slice()),
    })
}

pub fn query_handler_pauser_role(deps: Deps, handler: String) -> StdResult<RoleResponse> {
    let handler = deps.api.addr_validate(&handler)?;
    Ok(RoleResponse {
        role: Binary::from(handler_pauser_role(&handler).as_slice()),
    })
}

pub fn query_handler_unpauser_role(deps: Deps, handler: String) -> StdResult<RoleResponse> {
    let handler = deps.api.addr_validate(&handler)?;
    Ok(RoleResponse {
        role: Binary::from(handler_unpauser_role(&handler).as_slice()),
    })
}

pub fn query_has_role(deps: Deps, role: Binary, account: String) -> StdResult<HasRoleResponse> {
    let account = deps.api.addr_validate(&account)?;
    let role: [u8; 16] = role
        .to_vec()
        .try_into()
        .map_err(|_| StdError::generic_err("invalid role length"))?;
    Ok(HasRoleResponse {
        has_role: access::has_role(deps.storage, &role, &account)?,
    })
}
