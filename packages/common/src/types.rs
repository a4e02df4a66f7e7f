//! Message envelope types.
//!
//! A message is constructed by the transfer manager on the sending side,
//! carried across chains by transceiver adapters, and consumed by the
//! transfer manager on the receiving side. The transceiver manager only
//! reads the envelope fields it needs for attestation bookkeeping; the
//! payload stays opaque to it.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;

use crate::address::UniversalAddress;

/// Identifier chosen by the sending handler to group the deliveries of one
/// message across transceivers. Caller-defined, so it carries no uniqueness
/// guarantee; replay protection is keyed by [`MessageDigest`] instead.
pub type MessageId = [u8; 32];

/// keccak256 over the canonical byte concatenation of a received message's
/// fields. The unique key for attestation and execution state.
pub type MessageDigest = [u8; 32];

/// An outbound message, addressed to a handler on the destination chain.
#[cw_serde]
pub struct MessageToSend {
    pub id: MessageId,
    /// The user on whose behalf the message is sent.
    pub user_address: UniversalAddress,
    /// The sending handler. Checked against the caller on fan-out.
    pub source_address: UniversalAddress,
    pub destination_chain_id: u16,
    /// The receiving handler on the destination chain.
    pub handler_address: UniversalAddress,
    pub payload: Binary,
}

/// An inbound message as reconstructed by a transceiver adapter.
#[cw_serde]
pub struct MessageReceived {
    pub id: MessageId,
    pub user_address: UniversalAddress,
    pub source_chain_id: u16,
    /// The sending handler on the source chain. Checked against the
    /// registered peer before the transfer is applied.
    pub source_address: UniversalAddress,
    /// The local handler this message is addressed to.
    pub handler_address: UniversalAddress,
    pub payload: Binary,
}
