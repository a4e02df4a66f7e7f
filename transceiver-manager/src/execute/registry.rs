//! Handler registry handlers: registration, transceiver set management,
//! pause control and role administration.

use cosmwasm_std::{Addr, Binary, DepsMut, MessageInfo, Response, Storage};

use common::access;
use common::access::Role;
use common::address::UniversalAddress;

use crate::error::ContractError;
use crate::roles::{handler_admin_role, handler_pauser_role, handler_unpauser_role};
use crate::state::{HANDLER_BY_UNIVERSAL, HANDLER_PAUSED, HANDLER_TRANSCEIVERS, MAX_TRANSCEIVERS};

/// Execute handler for registering the calling contract as a handler.
pub fn execute_register_handler(
    deps: DepsMut,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    let handler = info.sender;
    let admin = deps.api.addr_validate(&admin)?;

    // registering twice is a no-op
    if HANDLER_TRANSCEIVERS.has(deps.storage, &handler) {
        return Ok(Response::new()
            .add_attribute("method", "register_handler")
            .add_attribute("handler", handler)
            .add_attribute("newly_registered", "false"));
    }

    // the admin role administers itself and the pauser/unpauser roles
    let admin_role = handler_admin_role(&handler);
    access::grant_role(deps.storage, &admin_role, &admin)?;
    access::set_role_admin(deps.storage, &admin_role, &admin_role)?;
    access::set_role_admin(deps.storage, &handler_pauser_role(&handler), &admin_role)?;
    access::set_role_admin(deps.storage, &handler_unpauser_role(&handler), &admin_role)?;

    let universal = UniversalAddress::from_addr(deps.api, &handler)?;
    HANDLER_BY_UNIVERSAL.save(deps.storage, universal.as_bytes(), &handler)?;
    HANDLER_TRANSCEIVERS.save(deps.storage, &handler, &Vec::new())?;

    Ok(Response::new()
        .add_attribute("method", "register_handler")
        .add_attribute("handler", handler)
        .add_attribute("admin", admin)
        .add_attribute("newly_registered", "true"))
}

/// Execute handler for appending a transceiver to a handler's list.
pub fn execute_add_transceiver(
    deps: DepsMut,
    info: MessageInfo,
    handler: String,
    transceiver: String,
) -> Result<Response, ContractError> {
    let handler = deps.api.addr_validate(&handler)?;
    let transceiver = deps.api.addr_validate(&transceiver)?;

    let mut transceivers = load_transceivers(deps.storage, &handler)?;
    access::ensure_role(deps.storage, &handler_admin_role(&handler), &info.sender)?;

    if transceivers.len() >= MAX_TRANSCEIVERS {
        return Err(ContractError::MaxTransceiversExceeded {
            max: MAX_TRANSCEIVERS,
        });
    }
    if transceivers.contains(&transceiver) {
        return Err(ContractError::TransceiverAlreadyAdded {
            transceiver: transceiver.to_string(),
        });
    }

    transceivers.push(transceiver.clone());
    HANDLER_TRANSCEIVERS.save(deps.storage, &handler, &transceivers)?;

    Ok(Response::new()
        .add_attribute("method", "add_transceiver")
        .add_attribute("handler", handler)
        .add_attribute("transceiver", transceiver)
        .add_attribute("transceiver_count", transceivers.len().to_string()))
}

/// Execute handler for removing a transceiver from a handler's list.
pub fn execute_remove_transceiver(
    deps: DepsMut,
    info: MessageInfo,
    handler: String,
    transceiver: String,
) -> Result<Response, ContractError> {
    let handler = deps.api.addr_validate(&handler)?;
    let transceiver = deps.api.addr_validate(&transceiver)?;

    let mut transceivers = load_transceivers(deps.storage, &handler)?;
    access::ensure_role(deps.storage, &handler_admin_role(&handler), &info.sender)?;

    let position = transceivers.iter().position(|t| *t == transceiver).ok_or(
        ContractError::UnknownTransceiver {
            transceiver: transceiver.to_string(),
        },
    )?;
    transceivers.remove(position);
    HANDLER_TRANSCEIVERS.save(deps.storage, &handler, &transceivers)?;

    Ok(Response::new()
        .add_attribute("method", "remove_transceiver")
        .add_attribute("handler", handler)
        .add_attribute("transceiver", transceiver)
        .add_attribute("transceiver_count", transceivers.len().to_string()))
}

/// Execute handler for pausing a handler's sends and attestations.
pub fn execute_pause(
    deps: DepsMut,
    info: MessageInfo,
    handler: String,
) -> Result<Response, ContractError> {
    let handler = deps.api.addr_validate(&handler)?;

    ensure_handler_registered(deps.storage, &handler)?;
    access::ensure_role(deps.storage, &handler_pauser_role(&handler), &info.sender)?;

    if is_handler_paused(deps.storage, &handler)? {
        return Err(ContractError::HandlerAlreadyPaused);
    }
    HANDLER_PAUSED.save(deps.storage, &handler, &true)?;

    Ok(Response::new()
        .add_attribute("method", "pause")
        .add_attribute("handler", handler)
        .add_attribute("paused", "true"))
}

/// Execute handler for unpausing a handler.
pub fn execute_unpause(
    deps: DepsMut,
    info: MessageInfo,
    handler: String,
) -> Result<Response, ContractError> {
    let handler = deps.api.addr_validate(&handler)?;

    ensure_handler_registered(deps.storage, &handler)?;
    access::ensure_role(deps.storage, &handler_unpauser_role(&handler), &info.sender)?;

    if !is_handler_paused(deps.storage, &handler)? {
        return Err(ContractError::HandlerNotPaused);
    }
    HANDLER_PAUSED.save(deps.storage, &handler, &false)?;

    Ok(Response::new()
        .add_attribute("method", "unpause")
        .add_attribute("handler", handler)
        .add_attribute("paused", "false"))
}

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

// ============================================================================
// Shared helpers
// ============================================================================

pub(crate) fn load_transceivers(
    storage: &dyn Storage,
    handler: &Addr,
) -> Result<Vec<Addr>, ContractError> {
    HANDLER_TRANSCEIVERS
        .may_load(storage, handler)?
        .ok_or_else(|| ContractError::HandlerNotRegistered {
            handler: handler.to_string(),
        })
}

pub(crate) fn ensure_handler_registered(
    storage: &dyn Storage,
    handler: &Addr,
) -> Result<(), ContractError> {
    load_transceivers(storage, handler).map(|_| ())
}

pub(crate) fn is_handler_paused(
    storage: &dyn Storage,
    handler: &Addr,
) -> Result<bool, ContractError> {
    Ok(HANDLER_PAUSED.may_load(storage, handler)?.unwrap_or(false))
}

pub(crate) fn ensure_handler_not_paused(
    storage: &dyn Storage,
    handler: &Addr,
) -> Result<(), ContractError> {
    if is_handler_paused(storage, handler)? {
        return Err(ContractError::HandlerPaused);
    }
    Ok(())
}

pub(crate) fn parse_role(role: &Binary) -> Result<Role, ContractError> {
    role.to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidRoleLength { got: role.len() })
}
