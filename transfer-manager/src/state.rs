//! State definitions for the Transfer Manager contract.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

use common::address::UniversalAddress;
use common::instructions::TransceiverInstruction;
use common::trimmed::TrimmedAmount;

use crate::rate_limit::Bucket;

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Transceiver manager this handler is registered with
    pub transceiver_manager: Addr,
    /// Token custody contract holding the transferable asset
    pub custody: Addr,
    /// The cw20 token managed by the custody
    pub token: Addr,
    /// Decimals of the local token
    pub token_decimals: u8,
    /// This chain's protocol chain id
    pub chain_id: u16,
    /// Native denom delivery fees are paid in
    pub fee_denom: String,
    /// Whether transfers are currently paused
    pub paused: bool,
}

/// Registered counterpart on a remote chain
#[cw_serde]
pub struct Peer {
    /// Transfer manager contract on the peer chain (32-byte universal form)
    pub contract: UniversalAddress,
    /// Decimals of the token on the peer chain
    pub decimals: u8,
}

/// An outbound transfer deferred because the outbound bucket lacked capacity
#[cw_serde]
pub struct OutboundQueuedTransfer {
    /// Block time the transfer was enqueued
    pub enqueued_at: Timestamp,
    /// Amount at wire precision
    pub amount: TrimmedAmount,
    pub recipient_chain: u16,
    pub recipient: UniversalAddress,
    /// Original sender; the only account allowed to cancel
    pub sender: Addr,
    pub instructions: Vec<TransceiverInstruction>,
}

/// An inbound transfer deferred because the source chain's inbound bucket
/// lacked capacity
#[cw_serde]
pub struct InboundQueuedTransfer {
    /// Block time the transfer was enqueued
    pub enqueued_at: Timestamp,
    /// Amount at wire precision
    pub amount: TrimmedAmount,
    pub source_chain: u16,
    pub recipient: Addr,
}

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:transfer-manager";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "0.1.0";

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Attestation threshold for message execution
pub const THRESHOLD: Item<u64> = Item::new("threshold");

/// Strictly increasing sequence that message ids are derived from
pub const MESSAGE_SEQUENCE: Item<u64> = Item::new("message_sequence");

/// message digest -> whether it has been executed
pub const EXECUTED_MESSAGES: Map<&[u8], bool> = Map::new("executed_messages");

/// peer chain id -> peer record
pub const PEERS: Map<u16, Peer> = Map::new("peers");

/// bucket id (32 bytes) -> token bucket
pub const BUCKETS: Map<&[u8], Bucket> = Map::new("buckets");

/// message id -> outbound queued transfer
pub const OUTBOUND_QUEUE: Map<&[u8], OutboundQueuedTransfer> = Map::new("outbound_queue");

/// message digest -> inbound queued transfer
pub const INBOUND_QUEUE: Map<&[u8], InboundQueuedTransfer> = Map::new("inbound_queue");
