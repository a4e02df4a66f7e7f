//! State definitions for the Transceiver Manager contract.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Native denom delivery fees are paid in
    pub fee_denom: String,
}

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:transceiver-manager";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "0.1.0";

/// Maximum number of transceivers a handler may configure
pub const MAX_TRANSCEIVERS: usize = 32;

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Configured transceivers per handler, in configuration order.
/// Presence of the key is what makes a handler "registered".
pub const HANDLER_TRANSCEIVERS: Map<&Addr, Vec<Addr>> = Map::new("handler_transceivers");

/// Handlers indexed by their 32-byte universal address, for resolving the
/// handler a received message is addressed to.
pub const HANDLER_BY_UNIVERSAL: Map<&[u8], Addr> = Map::new("handler_by_universal");

/// Whether a handler is paused
pub const HANDLER_PAUSED: Map<&Addr, bool> = Map::new("handler_paused");

/// (message digest, transceiver) -> whether the transceiver has attested
pub const ATTESTATIONS: Map<(&[u8], &Addr), bool> = Map::new("attestations");

/// message digest -> number of distinct attestations
pub const NUM_ATTESTATIONS: Map<&[u8], u64> = Map::new("num_attestations");
