//! Transceiver Manager Contract
//!
//! Registry and dispatch hub between message handlers and their
//! transceivers. A handler contract registers itself here, configures an
//! ordered set of up to 32 transceiver adapters, and then:
//!
//! # Outbound
//! 1. Handler asks for an aggregate delivery quote across its transceivers
//! 2. Handler executes the fan-out, paying the exact aggregate fee
//! 3. Each transceiver is paid its own quote and relays the message
//!
//! # Inbound
//! 1. A transceiver delivers a message observed on another chain
//! 2. This contract computes the message digest and records one attestation
//!    per (digest, transceiver) pair, rejecting replays
//! 3. The handler reads the attestation count to decide quorum
//!
//! # Security
//! - Per-handler admin/pauser/unpauser roles with derived identifiers
//! - Pause switch blocking sends and attestations per handler
//! - Attestation state keyed by digest, never by the caller-chosen id

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod roles;
pub mod state;

pub use crate::error::ContractError;
