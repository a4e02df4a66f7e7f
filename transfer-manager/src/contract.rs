//! Transfer Manager Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response,
    StdResult, WasmMsg,
};
use cw2::set_contract_version;
use cw20::{Cw20QueryMsg, TokenInfoResponse};

use common::access;
use common::access::DEFAULT_ADMIN_ROLE;
use common::custody::{AssetResponse, CustodyQueryMsg};

use transceiver_manager::msg::ExecuteMsg as ManagerExecuteMsg;

use crate::error::ContractError;
use crate::execute::{
    execute_cancel_outbound_queued_transfer, execute_complete_inbound_queued_transfer,
    execute_complete_outbound_queued_transfer, execute_execute_message, execute_grant_role,
    execute_pause, execute_revoke_role, execute_set_inbound_rate_duration,
    execute_set_inbound_rate_limit, execute_set_outbound_rate_duration,
    execute_set_outbound_rate_limit, execute_set_peer, execute_set_threshold,
    execute_set_transceiver_manager, execute_transfer, execute_transfer_full, execute_unpause,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_has_role, query_inbound_capacity, query_inbound_queued_transfer,
    query_inbound_rate_duration, query_is_message_approved, query_is_message_executed,
    query_outbound_capacity, query_outbound_queued_transfer, query_outbound_rate_duration,
    query_peer, query_roles, query_threshold,
};
use crate::rate_limit::{outbound_bucket_id, save_bucket, Bucket};
use crate::roles::{rate_limiter_manager_role, transfer_manager_admin_role};
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, MESSAGE_SEQUENCE, THRESHOLD,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.threshold == 0 {
        return Err(ContractError::ZeroThreshold);
    }

    let admin = deps.api.addr_validate(&msg.admin)?;
    let transceiver_manager = deps.api.addr_validate(&msg.transceiver_manager)?;
    let custody = deps.api.addr_validate(&msg.custody)?;

    // resolve the managed token and its decimals through the custody
    let asset: AssetResponse = deps
        .querier
        .query_wasm_smart(&custody, &CustodyQueryMsg::Asset {})?;
    let token = deps.api.addr_validate(&asset.token)?;
    let token_info: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(&token, &Cw20QueryMsg::TokenInfo {})?;

    let config = Config {
        transceiver_manager: transceiver_manager.clone(),
        custody,
        token,
        token_decimals: token_info.decimals,
        chain_id: msg.chain_id,
        fee_denom: msg.fee_denom,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    THRESHOLD.save(deps.storage, &msg.threshold)?;
    MESSAGE_SEQUENCE.save(deps.storage, &0u64)?;

    // outbound bucket starts unlimited; inbound buckets are created with
    // their peers
    save_bucket(
        deps.storage,
        &outbound_bucket_id(),
        &Bucket::unlimited(env.block.time),
    )?;

    access::grant_role(deps.storage, &DEFAULT_ADMIN_ROLE, &admin)?;
    access::grant_role(deps.storage, &transfer_manager_admin_role(), &admin)?;
    access::grant_role(deps.storage, &rate_limiter_manager_role(), &admin)?;

    // register this contract as a handler with the transceiver manager
    let register = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: transceiver_manager.to_string(),
        msg: to_json_binary(&ManagerExecuteMsg::RegisterHandler {
            admin: admin.to_string(),
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(register)
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("transceiver_manager", transceiver_manager)
        .add_attribute("token", config.token)
        .add_attribute("token_decimals", config.token_decimals.to_string())
        .add_attribute("chain_id", config.chain_id.to_string())
        .add_attribute("threshold", msg.threshold.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outbound transfers
        ExecuteMsg::Transfer {
            amount,
            recipient_chain,
            recipient,
        } => execute_transfer(deps, env, info, amount, recipient_chain, recipient),
        ExecuteMsg::TransferFull {
            amount,
            recipient_chain,
            recipient,
            should_queue,
            transceiver_instructions,
        } => execute_transfer_full(
            deps,
            env,
            info,
            amount,
            recipient_chain,
            recipient,
            should_queue,
            transceiver_instructions,
        ),
        ExecuteMsg::CompleteOutboundQueuedTransfer { message_id } => {
            execute_complete_outbound_queued_transfer(deps, env, info, message_id)
        }
        ExecuteMsg::CancelOutboundQueuedTransfer { message_id } => {
            execute_cancel_outbound_queued_transfer(deps, env, info, message_id)
        }

        // Inbound transfers
        ExecuteMsg::ExecuteMessage { message } => execute_execute_message(deps, env, message),
        ExecuteMsg::CompleteInboundQueuedTransfer { digest } => {
            execute_complete_inbound_queued_transfer(deps, env, info, digest)
        }

        // Administration
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::SetPeer {
            chain_id,
            contract,
            decimals,
        } => execute_set_peer(deps, env, info, chain_id, contract, decimals),
        ExecuteMsg::SetThreshold { threshold } => execute_set_threshold(deps, info, threshold),
        ExecuteMsg::SetTransceiverManager {
            transceiver_manager,
            admin,
        } => execute_set_transceiver_manager(deps, info, transceiver_manager, admin),

        // Rate limit configuration
        ExecuteMsg::SetOutboundRateLimit { limit } => {
            execute_set_outbound_rate_limit(deps, env, info, limit)
        }
        ExecuteMsg::SetOutboundRateDuration { duration_secs } => {
            execute_set_outbound_rate_duration(deps, env, info, duration_secs)
        }
        ExecuteMsg::SetInboundRateLimit { chain_id, limit } => {
            execute_set_inbound_rate_limit(deps, env, info, chain_id, limit)
        }
        ExecuteMsg::SetInboundRateDuration {
            chain_id,
            duration_secs,
        } => execute_set_inbound_rate_duration(deps, env, info, chain_id, duration_secs),

        // Role administration
        ExecuteMsg::GrantRole { role, account } => execute_grant_role(deps, info, role, account),
        ExecuteMsg::RevokeRole { role, account } => execute_revoke_role(deps, info, role, account),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Threshold {} => to_json_binary(&query_threshold(deps)?),
        QueryMsg::Peer { chain_id } => to_json_binary(&query_peer(deps, chain_id)?),
        QueryMsg::OutboundCapacity {} => to_json_binary(&query_outbound_capacity(deps, env)?),
        QueryMsg::InboundCapacity { chain_id } => {
            to_json_binary(&query_inbound_capacity(deps, env, chain_id)?)
        }
        QueryMsg::OutboundRateDuration {} => to_json_binary(&query_outbound_rate_duration(deps)?),
        QueryMsg::InboundRateDuration { chain_id } => {
            to_json_binary(&query_inbound_rate_duration(deps, chain_id)?)
        }
        QueryMsg::OutboundQueuedTransfer { message_id } => {
            to_json_binary(&query_outbound_queued_transfer(deps, env, message_id)?)
        }
        QueryMsg::InboundQueuedTransfer { digest } => {
            to_json_binary(&query_inbound_queued_transfer(deps, env, digest)?)
        }
        QueryMsg::IsMessageApproved { digest } => {
            to_json_binary(&query_is_message_approved(deps, digest)?)
        }
        QueryMsg::IsMessageExecuted { digest } => {
            to_json_binary(&query_is_message_executed(deps, digest)?)
        }
        QueryMsg::Roles {} => to_json_binary(&query_roles()?),
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
