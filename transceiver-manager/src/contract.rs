//! Transceiver Manager Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_add_transceiver, execute_attestation_received, execute_grant_role, execute_pause,
    execute_register_handler, execute_remove_transceiver, execute_revoke_role,
    execute_send_message_to_transceivers, execute_unpause,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_handler_admin_role, query_handler_pauser_role, query_handler_transceivers,
    query_handler_unpauser_role, query_has_role, query_has_transceiver_attested,
    query_is_handler_paused, query_is_handler_registered, query_is_transceiver_configured,
    query_message_attestations, query_message_digest, query_quote_delivery_prices,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        fee_denom: msg.fee_denom,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("fee_denom", config.fee_denom))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Handler registry
        ExecuteMsg::RegisterHandler { admin } => execute_register_handler(deps, info, admin),
        ExecuteMsg::AddTransceiver {
            handler,
            transceiver,
        } => execute_add_transceiver(deps, info, handler, transceiver),
        ExecuteMsg::RemoveTransceiver {
            handler,
            transceiver,
        } => execute_remove_transceiver(deps, info, handler, transceiver),
        ExecuteMsg::Pause { handler } => execute_pause(deps, info, handler),
        ExecuteMsg::Unpause { handler } => execute_unpause(deps, info, handler),

        // Messaging
        ExecuteMsg::SendMessageToTransceivers {
            message,
            instructions,
        } => execute_send_message_to_transceivers(deps, info, message, instructions),
        ExecuteMsg::AttestationReceived { message } => {
            execute_attestation_received(deps, info, message)
        }

        // Role administration
        ExecuteMsg::GrantRole { role, account } => execute_grant_role(deps, info, role, account),
        ExecuteMsg::RevokeRole { role, account } => execute_revoke_role(deps, info, role, account),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::IsHandlerRegistered { handler } => {
            to_json_binary(&query_is_handler_registered(deps, handler)?)
        }
        QueryMsg::IsHandlerPaused { handler } => {
            to_json_binary(&query_is_handler_paused(deps, handler)?)
        }
        QueryMsg::HandlerTransceivers { handler } => {
            to_json_binary(&query_handler_transceivers(deps, handler)?)
        }
        QueryMsg::IsTransceiverConfigured {
            handler,
            transceiver,
        } => to_json_binary(&query_is_transceiver_configured(deps, handler, transceiver)?),
        QueryMsg::MessageDigest { message } => to_json_binary(&query_message_digest(message)?),
        QueryMsg::MessageAttestations { digest } => {
            to_json_binary(&query_message_attestations(deps, digest)?)
        }
        QueryMsg::HasTransceiverAttested {
            digest,
            transceiver,
        } => to_json_binary(&query_has_transceiver_attested(deps, digest, transceiver)?),
        QueryMsg::QuoteDeliveryPrices {
            handler,
            message,
            instructions,
        } => to_json_binary(&query_quote_delivery_prices(
            deps,
            handler,
            message,
            instructions,
        )?),
        QueryMsg::HandlerAdminRole { handler } => {
            to_json_binary(&query_handler_admin_role(deps, handler)?)
        }
        QueryMsg::HandlerPauserRole { handler } => {
            to_json_binary(&query_handler_pauser_role(deps, handler)?)
        }
        QueryMsg::HandlerUnpauserRole { handler } => {
            to_json_binary(&query_handler_unpauser_role(deps, handler)?)
        }
        QueryMsg::HasRole { role, account } => to_json_binary(&query_has_role(deps, role, account)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
