//! Administrative handlers: pause control, peers, threshold, transceiver
//! manager wiring, rate limits and roles.

use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, Uint128, WasmMsg,
};

use common::access;
use common::address::UniversalAddress;

use transceiver_manager::msg::ExecuteMsg as ManagerExecuteMsg;

use crate::error::ContractError;
use crate::rate_limit::{inbound_bucket_id, load_bucket, outbound_bucket_id, save_bucket, Bucket};
use crate::roles::{pauser_role, rate_limiter_manager_role, transfer_manager_admin_role, unpauser_role};
use crate::state::{Peer, CONFIG, PEERS, THRESHOLD};

use super::parse_role;

/// Execute handler for pausing all transfers.
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    access::ensure_role(deps.storage, &pauser_role(), &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::ContractPaused);
    }
    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "pause")
        .add_attribute("paused", "true"))
}

/// Execute handler for resuming transfers.
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    access::ensure_role(deps.storage, &unpauser_role(), &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    if !config.paused {
        return Err(ContractError::ContractNotPaused);
    }
    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "unpause")
        .add_attribute("paused", "false"))
}

/// Execute handler for registering or overwriting a peer chain. The first
/// registration also creates that chain's inbound bucket, unlimited.
pub fn execute_set_peer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    chain_id: u16,
    contract: Binary,
    decimals: u8,
) -> Result<Response, ContractError> {
    access::ensure_role(deps.storage, &transfer_manager_admin_role(), &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    if chain_id == config.chain_id {
        return Err(ContractError::PeerCannotBeSelf);
    }
    if decimals == 0 {
        return Err(ContractError::InvalidPeerDecimals);
    }
    let contract = UniversalAddress::from_binary(&contract)?;

    let is_new = !PEERS.has(deps.storage, chain_id);
    if is_new {
        save_bucket(
            deps.storage,
            &inbound_bucket_id(chain_id),
            &Bucket::unlimited(env.block.time),
        )?;
    }

    PEERS.save(deps.storage, chain_id, &Peer { contract, decimals })?;

    Ok(Response::new()
        .add_attribute("method", "set_peer")
        .add_attribute("peer_chain_id", chain_id.to_string())
        .add_attribute("peer_contract", contract.to_hex())
        .add_attribute("peer_decimals", decimals.to_string())
        .add_attribute("is_new", is_new.to_string()))
}

/// Execute handler for updating the attestation threshold.
pub fn execute_set_threshold(
    deps: DepsMut,
    info: MessageInfo,
    threshold: u64,
) -> Result<Response, ContractError> {
    access::ensure_role(deps.storage, &transfer_manager_admin_role(), &info.sender)?;

    if threshold == 0 {
        return Err(ContractError::ZeroThreshold);
    }
    THRESHOLD.save(deps.storage, &threshold)?;

    Ok(Response::new()
        .add_attribute("method", "set_threshold")
        .add_attribute("threshold", threshold.to_string()))
}

/// Execute handler for switching to a new transceiver manager. Registers
/// this handler at the new manager in the same transaction.
pub fn execute_set_transceiver_manager(
    deps: DepsMut,
    info: MessageInfo,
    transceiver_manager: String,
    admin: String,
) -> Result<Response, ContractError> {
    access::ensure_role(deps.storage, &transfer_manager_admin_role(), &info.sender)?;

    let transceiver_manager = deps.api.addr_validate(&transceiver_manager)?;
    deps.api.addr_validate(&admin)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.transceiver_manager = transceiver_manager.clone();
    CONFIG.save(deps.storage, &config)?;

    let register = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: transceiver_manager.to_string(),
        msg: to_json_binary(&ManagerExecuteMsg::RegisterHandler { admin })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(register)
        .add_attribute("method", "set_transceiver_manager")
        .add_attribute("transceiver_manager", transceiver_manager))
}

// ============================================================================
// Rate Limit Configuration
// ============================================================================

/// Execute handler for setting the outbound bucket's limit.
pub fn execute_set_outbound_rate_limit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    limit: Uint128,
) -> Result<Response, ContractError> {
    access::ensure_role(deps.storage, &rate_limiter_manager_role(), &info.sender)?;

    let id = outbound_bucket_id();
    let mut bucket = load_bucket(deps.storage, &id, None)?;
    bucket.set_limit(env.block.time, limit);
    save_bucket(deps.storage, &id, &bucket)?;

    Ok(Response::new()
        .add_attribute("method", "set_outbound_rate_limit")
        .add_attribute("limit", limit.to_string()))
}

/// Execute handler for setting the outbound bucket's refill duration.
pub fn execute_set_outbound_rate_duration(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    duration_secs: u64,
) -> Result<Response, ContractError> {
    access::ensure_role(deps.storage, &rate_limiter_manager_role(), &info.sender)?;

    let id = outbound_bucket_id();
    let mut bucket = load_bucket(deps.storage, &id, None)?;
    bucket.set_duration(env.block.time, duration_secs);
    save_bucket(deps.storage, &id, &bucket)?;

    Ok(Response::new()
        .add_attribute("method", "set_outbound_rate_duration")
        .add_attribute("duration_secs", duration_secs.to_string()))
}

/// Execute handler for setting a peer chain's inbound bucket limit.
/// Fails if the chain has no registered peer.
pub fn execute_set_inbound_rate_limit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    chain_id: u16,
    limit: Uint128,
) -> Result<Response, ContractError> {
    access::ensure_role(deps.storage, &rate_limiter_manager_role(), &info.sender)?;

    let id = inbound_bucket_id(chain_id);
    let mut bucket = load_bucket(deps.storage, &id, Some(chain_id))?;
    bucket.set_limit(env.block.time, limit);
    save_bucket(deps.storage, &id, &bucket)?;

    Ok(Response::new()
        .add_attribute("method", "set_inbound_rate_limit")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("limit", limit.to_string()))
}

/// Execute handler for setting a peer chain's inbound refill duration.
/// Fails if the chain has no registered peer.
pub fn execute_set_inbound_rate_duration(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    chain_id: u16,
    duration_secs: u64,
) -> Result<Response, ContractError> {
    access::ensure_role(deps.storage, &rate_limiter_manager_role(), &info.sender)?;

    let id = inbound_bucket_id(chain_id);
    let mut bucket = load_bucket(deps.storage, &id, Some(chain_id))?;
    bucket.set_duration(env.block.time, duration_secs);
    save_bucket(deps.storage, &id, &bucket)?;

    Ok(Response::new()
        .add_attribute("method", "set_inbound_rate_duration")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("duration_secs", duration_secs.to_string()))
}

// ============================================================================
// Role Administration
// ============================================================================

/// Execute handler for granting a role.
pub fn execute_grant_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Binary,
    account: String,
) -> Result<Response, ContractError> {
    let role = parse_role(&role)?;
    let account = deps.api.addr_validate(&account)?;

    access::ensure_role_admin(deps.storage, &role, &info.sender)?;
    access::grant_role(deps.storage, &role, &account)?;

    Ok(Response::new()
        .add_attribute("method", "grant_role")
        .add_attribute("role", format!("0x{}", hex::encode(role)))
        .add_attribute("account", account))
}

/// Execute handler for revoking a role.
pub fn execute_revoke_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Binary,
    account: String,
) -> Result<Response, ContractError> {
    let role = parse_role(&role)?;
    let account = deps.api.addr_validate(&account)?;

    access::ensure_role_admin(deps.storage, &role, &info.sender)?;
    access::revoke_role(deps.storage, &role, &account);

    Ok(Response::new()
        .add_attribute("method", "revoke_role")
        .add_attribute("role", format!("0x{}", hex::encode(role)))
        .add_attribute("account", account))
}
