//! Common - Shared Types and Utilities for the Transfer Protocol Contracts
//!
//! This package provides the vocabulary shared between the transceiver
//! manager and the transfer manager: universal 32-byte addresses, keccak-256
//! hashing, the byte-exact wire codec, trimmed amounts, per-transceiver
//! instructions, role-based access control storage, and the interfaces of
//! the external collaborator contracts (transceiver adapters and the token
//! custody).

pub mod access;
pub mod address;
pub mod custody;
pub mod funds;
pub mod hash;
pub mod instructions;
pub mod transceiver;
pub mod trimmed;
pub mod types;
pub mod wire;

pub use crate::address::UniversalAddress;
pub use crate::hash::{bytes32_to_hex, keccak256};
pub use crate::instructions::TransceiverInstruction;
pub use crate::trimmed::TrimmedAmount;
pub use crate::types::{MessageDigest, MessageId, MessageReceived, MessageToSend};
