//! Byte-exact wire formats owned by the protocol.
//!
//! Two layouts live here: the message envelope used by transceiver adapters
//! to carry a message between chains, and the transfer payload embedded in
//! the envelope. Both are fixed big-endian layouts that every chain
//! implementation must reproduce bit for bit, so they are hand-encoded and
//! never go through JSON.
//!
//! # Envelope layout
//! ```text
//! | id (32) | user (32) | source (32) | dest chain (2, BE) | handler (32) | payload len (2, BE) | payload |
//! ```
//!
//! # Transfer payload layout (79 bytes + reserved tail)
//! ```text
//! | 0x99 'N' 'T' 'T' | decimals (1) | amount (8, BE) | source token (32) | recipient (32) | dest chain (2, BE) |
//! ```
//! Trailing bytes after the destination chain are reserved and ignored.

use cosmwasm_std::Binary;
use thiserror::Error;

use crate::address::UniversalAddress;
use crate::hash::keccak256;
use crate::trimmed::TrimmedAmount;
use crate::types::{MessageDigest, MessageReceived, MessageToSend};

/// Magic prefix identifying a token-transfer payload.
pub const TRANSFER_PAYLOAD_PREFIX: [u8; 4] = [0x99, 0x4E, 0x54, 0x54];

/// Fixed portion of the transfer payload, before the reserved tail.
const TRANSFER_PAYLOAD_LEN: usize = 4 + 1 + 8 + 32 + 32 + 2;

/// Fixed portion of the envelope, before the variable-length payload.
const ENVELOPE_HEADER_LEN: usize = 32 + 32 + 32 + 2 + 32 + 2;

#[derive(Error, Debug, PartialEq)]
pub enum WireError {
    #[error("incorrect payload prefix")]
    IncorrectPrefix,

    #[error("truncated encoding: expected at least {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },
}

/// A parsed transfer payload.
#[derive(Debug)]
pub struct TransferPayload {
    pub amount: TrimmedAmount,
    /// Token identifier on the source chain. Carried for auditability,
    /// not consulted when crediting the recipient.
    pub source_token: UniversalAddress,
    pub recipient: UniversalAddress,
    pub destination_chain_id: u16,
}

/// Compute the digest of a received message: keccak256 over the canonical
/// concatenation of its fields. The caller-chosen id alone offers no
/// uniqueness guarantee, so this digest keys all attestation and execution
/// state.
pub fn message_digest(message: &MessageReceived) -> MessageDigest {
    let payload = message.payload.as_slice();
    let mut data = Vec::with_capacity(32 + 32 + 2 + 32 + 32 + payload.len());
    data.extend_from_slice(&message.id);
    data.extend_from_slice(message.user_address.as_bytes());
    data.extend_from_slice(&message.source_chain_id.to_be_bytes());
    data.extend_from_slice(message.source_address.as_bytes());
    data.extend_from_slice(message.handler_address.as_bytes());
    data.extend_from_slice(payload);
    keccak256(&data)
}

/// Encode a transfer payload.
pub fn encode_transfer_payload(
    amount: &TrimmedAmount,
    source_token: &UniversalAddress,
    recipient: &UniversalAddress,
    destination_chain_id: u16,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(TRANSFER_PAYLOAD_LEN);
    data.extend_from_slice(&TRANSFER_PAYLOAD_PREFIX);
    data.push(amount.decimals);
    data.extend_from_slice(&amount.amount.to_be_bytes());
    data.extend_from_slice(source_token.as_bytes());
    data.extend_from_slice(recipient.as_bytes());
    data.extend_from_slice(&destination_chain_id.to_be_bytes());
    data
}

/// Parse a transfer payload. Trailing bytes are ignored.
pub fn parse_transfer_payload(payload: &[u8]) -> Result<TransferPayload, WireError> {
    if payload.len() < TRANSFER_PAYLOAD_LEN {
        return Err(WireError::Truncated {
            expected: TRANSFER_PAYLOAD_LEN,
            got: payload.len(),
        });
    }
    if payload[0..4] != TRANSFER_PAYLOAD_PREFIX {
        return Err(WireError::IncorrectPrefix);
    }

    let decimals = payload[4];
    let amount = u64::from_be_bytes(payload[5..13].try_into().unwrap());
    let source_token = UniversalAddress(payload[13..45].try_into().unwrap());
    let recipient = UniversalAddress(payload[45..77].try_into().unwrap());
    let destination_chain_id = u16::from_be_bytes(payload[77..79].try_into().unwrap());

    Ok(TransferPayload {
        amount: TrimmedAmount { amount, decimals },
        source_token,
        recipient,
        destination_chain_id,
    })
}

/// Encode an outbound envelope for transport by a transceiver adapter.
pub fn encode_envelope(message: &MessageToSend) -> Vec<u8> {
    let payload = message.payload.as_slice();
    let mut data = Vec::with_capacity(ENVELOPE_HEADER_LEN + payload.len());
    data.extend_from_slice(&message.id);
    data.extend_from_slice(message.user_address.as_bytes());
    data.extend_from_slice(message.source_address.as_bytes());
    data.extend_from_slice(&message.destination_chain_id.to_be_bytes());
    data.extend_from_slice(message.handler_address.as_bytes());
    data.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    data.extend_from_slice(payload);
    data
}

/// Decode a transported envelope into a received message. The source chain
/// id comes from the transport layer, not the envelope; the envelope's
/// embedded destination chain id is returned so the adapter can verify it
/// delivered to the right chain.
pub fn decode_envelope(
    data: &[u8],
    source_chain_id: u16,
) -> Result<(MessageReceived, u16), WireError> {
    if data.len() < ENVELOPE_HEADER_LEN {
        return Err(WireError::Truncated {
            expected: ENVELOPE_HEADER_LEN,
            got: data.len(),
        });
    }

    let id: [u8; 32] = data[0..32].try_into().unwrap();
    let user_address = UniversalAddress(data[32..64].try_into().unwrap());
    let source_address = UniversalAddress(data[64..96].try_into().unwrap());
    let destination_chain_id = u16::from_be_bytes(data[96..98].try_into().unwrap());
    let handler_address = UniversalAddress(data[98..130].try_into().unwrap());
    let payload_len = u16::from_be_bytes(data[130..132].try_into().unwrap()) as usize;

    if data.len() < ENVELOPE_HEADER_LEN + payload_len {
        return Err(WireError::Truncated {
            expected: ENVELOPE_HEADER_LEN + payload_len,
            got: data.len(),
        });
    }
    let payload = data[132..132 + payload_len].to_vec();

    Ok((
        MessageReceived {
            id,
            user_address,
            source_chain_id,
            source_address,
            handler_address,
            payload: Binary::from(payload),
        },
        destination_chain_id,
    ))
}
