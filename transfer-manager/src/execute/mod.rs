//! Execute handlers for the Transfer Manager contract.
//!
//! - `outbound` - Transfer entry points and the shared send path
//! - `inbound` - Quorum-gated message execution
//! - `queue` - Completion and cancellation of queued transfers
//! - `admin` - Pause, peers, threshold, rate limits and roles

mod admin;
mod inbound;
mod outbound;
mod queue;

pub use admin::*;
pub use inbound::*;
pub use outbound::*;
pub use queue::*;

use cosmwasm_std::{Binary, Storage};

use common::access::Role;

use crate::error::ContractError;
use crate::state::{Config, Peer, CONFIG, PEERS};

pub(crate) fn load_config_not_paused(storage: &dyn Storage) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if config.paused {
        return Err(ContractError::ContractPaused);
    }
    Ok(config)
}

pub(crate) fn load_peer(storage: &dyn Storage, chain_id: u16) -> Result<Peer, ContractError> {
    PEERS
        .may_load(storage, chain_id)?
        .ok_or(ContractError::PeerNotRegistered { chain_id })
}

pub(crate) fn to_bytes32(value: &Binary) -> Result<[u8; 32], ContractError> {
    value
        .to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength { got: value.len() })
}

pub(crate) fn parse_role(role: &Binary) -> Result<Role, ContractError> {
    role.to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidRoleLength { got: role.len() })
}
