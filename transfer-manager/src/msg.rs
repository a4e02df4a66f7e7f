//! Message types for the Transfer Manager contract.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use common::instructions::TransceiverInstruction;
use common::types::MessageReceived;

use crate::state::{InboundQueuedTransfer, OutboundQueuedTransfer};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Account granted the admin, rate-limiter-manager and default admin
    /// roles, and the handler admin role at the transceiver manager
    pub admin: String,
    /// Transceiver manager to register this handler with
    pub transceiver_manager: String,
    /// Token custody contract holding the transferable asset
    pub custody: String,
    /// This chain's protocol chain id
    pub chain_id: u16,
    /// Attestation threshold for message execution (must be nonzero)
    pub threshold: u64,
    /// Native denom delivery fees are paid in
    pub fee_denom: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outbound Transfers
    // ========================================================================
    /// Transfer tokens to a recipient on a peer chain, with defaults: no
    /// queuing on rate limit, no transceiver instruction overrides.
    ///
    /// Requires a cw20 allowance for the amount and the delivery fee in
    /// attached native funds. Excess fee is refunded.
    Transfer {
        amount: Uint128,
        recipient_chain: u16,
        /// 32-byte universal address on the recipient chain
        recipient: Binary,
    },

    /// Transfer with the full parameter surface.
    ///
    /// With `should_queue`, a transfer hitting the outbound rate limit is
    /// enqueued instead of rejected and the attached fee is refunded in
    /// full; complete it later with `CompleteOutboundQueuedTransfer`.
    TransferFull {
        amount: Uint128,
        recipient_chain: u16,
        recipient: Binary,
        should_queue: bool,
        /// Per-transceiver overrides, in configured transceiver order
        transceiver_instructions: Vec<TransceiverInstruction>,
    },

    /// Send a queued outbound transfer after its delay elapsed.
    ///
    /// Authorization: Anyone; the caller pays the delivery fee.
    ///
    /// Bypasses the rate-limit check: the delay already bounded the flow.
    CompleteOutboundQueuedTransfer {
        /// 32-byte message id returned by the original transfer
        message_id: Binary,
    },

    /// Cancel a queued outbound transfer and return the funds.
    ///
    /// Authorization: The original sender only.
    CancelOutboundQueuedTransfer { message_id: Binary },

    // ========================================================================
    // Inbound Transfers
    // ========================================================================
    /// Execute a message once its attestations reach the threshold.
    ///
    /// Authorization: Anyone.
    ///
    /// Exactly-once per digest: the digest is marked executed before the
    /// transfer is applied, and the mark commits atomically with the
    /// apply, so no interleaving can spend a digest twice.
    ExecuteMessage { message: MessageReceived },

    /// Credit a queued inbound transfer after its delay elapsed.
    ///
    /// Authorization: Anyone.
    CompleteInboundQueuedTransfer {
        /// 32-byte message digest
        digest: Binary,
    },

    // ========================================================================
    // Administration
    // ========================================================================
    /// Pause incoming and outgoing transfers in case of emergency.
    ///
    /// Authorization: Pauser role
    Pause {},

    /// Resume transfers after a pause.
    ///
    /// Authorization: Unpauser role
    Unpause {},

    /// Register or overwrite the peer for a chain. First registration also
    /// creates that chain's inbound rate bucket (unlimited).
    ///
    /// Authorization: Admin role
    SetPeer {
        chain_id: u16,
        /// Peer transfer manager (32-byte universal address)
        contract: Binary,
        /// Token decimals on the peer chain
        decimals: u8,
    },

    /// Update the attestation threshold. Takes effect immediately for all
    /// unexecuted messages; sequence increases so in-flight messages sent
    /// under the old configuration can still reach quorum.
    ///
    /// Authorization: Admin role
    SetThreshold { threshold: u64 },

    /// Switch to a new transceiver manager and register this handler there.
    /// Messages attested at the old manager cannot reach quorum at the new
    /// one, so drain in-flight traffic first.
    ///
    /// Authorization: Admin role
    SetTransceiverManager {
        transceiver_manager: String,
        /// Account receiving the handler admin role at the new manager
        admin: String,
    },

    // ========================================================================
    // Rate Limit Configuration
    // ========================================================================
    /// Authorization: Rate limiter manager role
    SetOutboundRateLimit { limit: Uint128 },

    /// Authorization: Rate limiter manager role
    SetOutboundRateDuration { duration_secs: u64 },

    /// Authorization: Rate limiter manager role. Fails if the chain has no
    /// registered peer.
    SetInboundRateLimit { chain_id: u16, limit: Uint128 },

    /// Authorization: Rate limiter manager role. Fails if the chain has no
    /// registered peer.
    SetInboundRateDuration { chain_id: u16, duration_secs: u64 },

    // ========================================================================
    // Role Administration
    // ========================================================================
    /// Authorization: Holder of the role's admin role
    GrantRole { role: Binary, account: String },

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

    #[returns(ThresholdResponse)]
    Threshold {},

    #[returns(PeerResponse)]
    Peer { chain_id: u16 },

    #[returns(CapacityResponse)]
    OutboundCapacity {},

    #[returns(CapacityResponse)]
    InboundCapacity { chain_id: u16 },

    #[returns(RateDurationResponse)]
    OutboundRateDuration {},

    #[returns(RateDurationResponse)]
    InboundRateDuration { chain_id: u16 },

    /// A queued outbound transfer and whether its delay has elapsed.
    #[returns(OutboundQueuedTransferResponse)]
    OutboundQueuedTransfer { message_id: Binary },

    /// A queued inbound transfer and whether its delay has elapsed.
    #[returns(InboundQueuedTransferResponse)]
    InboundQueuedTransfer { digest: Binary },

    /// Whether a digest has reached the attestation threshold.
    #[returns(IsMessageApprovedResponse)]
    IsMessageApproved { digest: Binary },

    /// Whether a digest has been executed. A message can stay executed
    /// without being approved if the threshold is raised afterwards.
    #[returns(IsMessageExecutedResponse)]
    IsMessageExecuted { digest: Binary },

    /// The derived role identifiers of this contract.
    #[returns(RolesResponse)]
    Roles {},

    #[returns(HasRoleResponse)]
    HasRole { role: Binary, account: String },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub transceiver_manager: Addr,
    pub custody: Addr,
    pub token: Addr,
    pub token_decimals: u8,
    pub chain_id: u16,
    pub fee_denom: String,
    pub paused: bool,
}

#[cw_serde]
pub struct ThresholdResponse {
    pub threshold: u64,
}

#[cw_serde]
pub struct PeerResponse {
    /// 32-byte universal address
    pub contract: Binary,
    pub decimals: u8,
}

#[cw_serde]
pub struct CapacityResponse {
    pub capacity: Uint128,
    pub unlimited: bool,
}

#[cw_serde]
pub struct RateDurationResponse {
    pub duration_secs: u64,
}

#[cw_serde]
pub struct OutboundQueuedTransferResponse {
    pub can_complete: bool,
    pub transfer: OutboundQueuedTransfer,
}

#[cw_serde]
pub struct InboundQueuedTransferResponse {
    pub can_complete: bool,
    pub transfer: InboundQueuedTransfer,
}

#[cw_serde]
pub struct IsMessageApprovedResponse {
    pub approved: bool,
}

#[cw_serde]
pub struct IsMessageExecutedResponse {
    pub executed: bool,
}

#[cw_serde]
pub struct RolesResponse {
    pub admin: Binary,
    pub pauser: Binary,
    pub unpauser: Binary,
    pub rate_limiter_manager: Binary,
}

#[cw_serde]
pub struct HasRoleResponse {
    pub has_role: bool,
}
