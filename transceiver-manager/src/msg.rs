//! Message types for the Transceiver Manager contract.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use common::instructions::TransceiverInstruction;
use common::types::{MessageReceived, MessageToSend};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Native denom delivery fees are paid in
    pub fee_denom: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    /// Register the calling contract as a message handler.
    ///
    /// Authorization: Anyone; the caller itself becomes the handler key.
    ///
    /// Idempotent: registering twice is a no-op reported through the
    /// `newly_registered` attribute. Grants the handler admin role to
    /// `admin` and wires up the pauser/unpauser role admins.
    RegisterHandler {
        /// Account receiving the handler admin role
        admin: String,
    },

    /// Append a transceiver to a handler's configured list.
    ///
    /// Authorization: Handler admin role
    AddTransceiver { handler: String, transceiver: String },

    /// Remove a transceiver from a handler's configured list.
    ///
    /// Authorization: Handler admin role
    RemoveTransceiver { handler: String, transceiver: String },

    /// Pause outgoing messages and received attestations for a handler.
    ///
    /// Authorization: Handler pauser role
    Pause { handler: String },

    /// Resume outgoing messages and received attestations after a pause.
    ///
    /// Authorization: Handler unpauser role
    Unpause { handler: String },

    /// Fan a message out through every transceiver configured for the
    /// calling handler, paying each its quoted delivery price.
    ///
    /// Authorization: A registered, unpaused handler; the message's source
    /// address must be the caller's universal address.
    ///
    /// Attached funds must equal the aggregate quote exactly.
    SendMessageToTransceivers {
        message: MessageToSend,
        instructions: Vec<TransceiverInstruction>,
    },

    /// Record the calling transceiver's attestation of a received message.
    ///
    /// Authorization: A transceiver configured for the handler the message
    /// is addressed to; the handler must not be paused.
    ///
    /// A second attestation for the same (digest, transceiver) pair is
    /// rejected.
    AttestationReceived { message: MessageReceived },

    /// Grant a role to an account.
    ///
    /// Authorization: Holder of the role's admin role
    GrantRole {
        /// 16-byte role identifier
        role: Binary,
        account: String,
    },

    /// Revoke a role from an account.
    ///
    /// Authorization: Holder of the role's admin role
    RevokeRole { role: Binary, account: String },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(IsHandlerRegisteredResponse)]
    IsHandlerRegistered { handler: String },

    #[returns(IsHandlerPausedResponse)]
    IsHandlerPaused { handler: String },

    #[returns(HandlerTransceiversResponse)]
    HandlerTransceivers { handler: String },

    #[returns(IsTransceiverConfiguredResponse)]
    IsTransceiverConfigured { handler: String, transceiver: String },

    /// Digest of a received message: the key for all attestation state.
    #[returns(MessageDigestResponse)]
    MessageDigest { message: MessageReceived },

    /// Number of distinct transceivers that attested a digest.
    #[returns(MessageAttestationsResponse)]
    MessageAttestations { digest: Binary },

    #[returns(HasTransceiverAttestedResponse)]
    HasTransceiverAttested { digest: Binary, transceiver: String },

    /// Aggregate delivery quote across a handler's transceivers, applying
    /// the same instruction resolution as the fan-out send.
    #[returns(QuoteDeliveryPricesResponse)]
    QuoteDeliveryPrices {
        handler: String,
        message: MessageToSend,
        instructions: Vec<TransceiverInstruction>,
    },

    #[returns(RoleResponse)]
    HandlerAdminRole { handler: String },

    #[returns(RoleResponse)]
    HandlerPauserRole { handler: String },

    #[returns(RoleResponse)]
    HandlerUnpauserRole { handler: String },

    #[returns(HasRoleResponse)]
    HasRole { role: Binary, account: String },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub fee_denom: String,
}

#[cw_serde]
pub struct IsHandlerRegisteredResponse {
    pub registered: bool,
}

#[cw_serde]
pub struct IsHandlerPausedResponse {
    pub paused: bool,
}

#[cw_serde]
pub struct HandlerTransceiversResponse {
    pub transceivers: Vec<Addr>,
}

#[cw_serde]
pub struct IsTransceiverConfiguredResponse {
    pub configured: bool,
}

#[cw_serde]
pub struct MessageDigestResponse {
    /// 32-byte digest
    pub digest: Binary,
}

#[cw_serde]
pub struct MessageAttestationsResponse {
    pub count: u64,
}

#[cw_serde]
pub struct HasTransceiverAttestedResponse {
    pub attested: bool,
}

#[cw_serde]
pub struct QuoteDeliveryPricesResponse {
    pub total: Uint128,
}

#[cw_serde]
pub struct RoleResponse {
    /// 16-byte role identifier
    pub role: Binary,
}

#[cw_serde]
pub struct HasRoleResponse {
    pub has_role: bool,
}
