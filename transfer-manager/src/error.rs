//! Error types for the Transfer Manager contract.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

use common::access::AccessError;
use common::funds::FundsError;
use common::trimmed::TrimError;
use common::wire::WireError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Access(#[from] AccessError),

    #[error("{0}")]
    Funds(#[from] FundsError),

    #[error("{0}")]
    Wire(#[from] WireError),

    #[error("{0}")]
    Trim(#[from] TrimError),

    // ========================================================================
    // Contract State Errors
    // ========================================================================

    #[error("Contract is paused")]
    ContractPaused,

    #[error("Contract is not paused")]
    ContractNotPaused,

    // ========================================================================
    // Peer Errors
    // ========================================================================

    #[error("No peer registered for chain {chain_id}")]
    PeerNotRegistered { chain_id: u16 },

    #[error("Cannot set the local chain as a peer")]
    PeerCannotBeSelf,

    #[error("Peer decimals must be nonzero")]
    InvalidPeerDecimals,

    #[error("Message source address does not match the registered peer")]
    PeerAddressMismatch,

    // ========================================================================
    // Transfer Validation Errors
    // ========================================================================

    #[error("Cannot transfer zero amount")]
    ZeroAmount,

    #[error("Invalid recipient address")]
    InvalidRecipient,

    #[error("Transfer amount has dust below the wire precision")]
    TransferAmountHasDust,

    #[error("Insufficient fee payment: expected {expected}, got {got}")]
    InsufficientFeePayment { expected: Uint128, got: Uint128 },

    // ========================================================================
    // Message Execution Errors
    // ========================================================================

    #[error("Message is not addressed to this handler")]
    HandlerAddressMismatch,

    #[error("Message not approved: {attestations} of {threshold} attestations")]
    MessageNotApproved { attestations: u64, threshold: u64 },

    #[error("Message already executed")]
    MessageAlreadyExecuted,

    #[error("Encoded destination chain {encoded} is not the local chain {local}")]
    InvalidTargetChain { encoded: u16, local: u16 },

    #[error("Cannot set zero threshold")]
    ZeroThreshold,

    // ========================================================================
    // Rate Limit & Queue Errors
    // ========================================================================

    #[error("Insufficient capacity: {capacity} available, {requested} requested")]
    InsufficientCapacity {
        capacity: Uint128,
        requested: Uint128,
    },

    #[error("Unknown outbound queued transfer")]
    UnknownOutboundQueuedTransfer,

    #[error("Unknown inbound queued transfer")]
    UnknownInboundQueuedTransfer,

    #[error("Queued transfer is still locked: {remaining_seconds} seconds remaining")]
    TransferStillQueued { remaining_seconds: u64 },

    #[error("Only the original sender can cancel a queued transfer")]
    OnlyOriginalSenderCanCancel,

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    #[error("Invalid role length: expected 16 bytes, got {got}")]
    InvalidRoleLength { got: usize },
}
