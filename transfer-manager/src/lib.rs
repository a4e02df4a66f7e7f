//! Transfer Manager Contract
//!
//! Orchestrates a cross-chain token transfer end to end and consumes
//! quorum-approved inbound messages.
//!
//! # Outbound Flow
//! 1. User grants a cw20 allowance and calls `Transfer`, attaching the
//!    delivery fee in native funds
//! 2. Tokens are pulled into the custody contract; the amount is trimmed to
//!    the common wire precision, rejecting dust
//! 3. The outbound token bucket decides immediate send vs. queue-and-delay
//! 4. On send, the wire payload is built and fanned out through the
//!    transceiver manager; excess fee payment is refunded
//!
//! # Inbound Flow
//! 1. Transceivers attest the message at the transceiver manager
//! 2. Once attestations reach the threshold, anyone calls `ExecuteMessage`
//! 3. The digest is marked executed exactly once, the payload is parsed and
//!    verified against the registered peer, and the inbound token bucket
//!    decides immediate credit vs. queue-and-delay
//!
//! # Security
//! - Replay protection keyed by message digest, never the caller-chosen id
//! - Token buckets with linear refill per direction and per peer chain
//! - Queued transfers completable only after the bucket's full duration
//! - Role-gated administration with derived role identifiers
//! - Emergency pause for all transfer operations

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod rate_limit;
pub mod roles;
pub mod state;

pub use crate::error::ContractError;
