//! Error types for the Transceiver Manager contract.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

use common::access::AccessError;
use common::funds::FundsError;
use common::instructions::InstructionError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Access(#[from] AccessError),

    #[error("{0}")]
    Funds(#[from] FundsError),

    // ========================================================================
    // Handler Registry Errors
    // ========================================================================

    #[error("Handler not registered: {handler}")]
    HandlerNotRegistered { handler: String },

    #[error("Handler is paused")]
    HandlerPaused,

    #[error("Handler is not paused")]
    HandlerNotPaused,

    #[error("Handler is already paused")]
    HandlerAlreadyPaused,

    // ========================================================================
    // Transceiver Registry Errors
    // ========================================================================

    #[error("Maximum of {max} transceivers exceeded")]
    MaxTransceiversExceeded { max: usize },

    #[error("Transceiver already added: {transceiver}")]
    TransceiverAlreadyAdded { transceiver: String },

    #[error("Unknown transceiver: {transceiver}")]
    UnknownTransceiver { transceiver: String },

    #[error("Caller is not a configured transceiver for handler {handler}")]
    TransceiverNotConfigured { handler: String },

    #[error("Handler has zero transceivers")]
    NoTransceiversConfigured,

    // ========================================================================
    // Messaging Errors
    // ========================================================================

    #[error("Message source address does not match caller")]
    SourceAddressMismatch,

    #[error("{0}")]
    Instructions(#[from] InstructionError),

    #[error("Incorrect fee payment: expected {expected}, got {got}")]
    FeePaymentIncorrect { expected: Uint128, got: Uint128 },

    #[error("Attestation already received")]
    AttestationAlreadyReceived,

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid role length: expected 16 bytes, got {got}")]
    InvalidRoleLength { got: usize },
}
