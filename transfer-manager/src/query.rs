//! Query handlers for the Transfer Manager contract.

use cosmwasm_std::{Binary, Deps, Env, StdError, StdResult};

use common::access;

use transceiver_manager::msg::{
    MessageAttestationsResponse, QueryMsg as ManagerQueryMsg,
};

use crate::msg::{
    CapacityResponse, ConfigResponse, HasRoleResponse, InboundQueuedTransferResponse,
    IsMessageApprovedResponse, IsMessageExecutedResponse, OutboundQueuedTransferResponse,
    PeerResponse, RateDurationResponse, RolesResponse, ThresholdResponse,
};
use crate::rate_limit::{inbound_bucket_id, outbound_bucket_id, Bucket};
use crate::roles::{
    pauser_role, rate_limiter_manager_role, transfer_manager_admin_role, unpauser_role,
};
use crate::state::{
    BUCKETS, CONFIG, EXECUTED_MESSAGES, INBOUND_QUEUE, OUTBOUND_QUEUE, PEERS, THRESHOLD,
};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        transceiver_manager: config.transceiver_manager,
        custody: config.custody,
        token: config.token,
        token_decimals: config.token_decimals,
        chain_id: config.chain_id,
        fee_denom: config.fee_denom,
        paused: config.paused,
    })
}

pub fn query_threshold(deps: Deps) -> StdResult<ThresholdResponse> {
    Ok(ThresholdResponse {
        threshold: THRESHOLD.load(deps.storage)?,
    })
}

pub fn query_peer(deps: Deps, chain_id: u16) -> StdResult<PeerResponse> {
    let peer = PEERS
        .may_load(deps.storage, chain_id)?
        .ok_or_else(|| StdError::generic_err(format!("no peer registered for chain {chain_id}")))?;
    Ok(PeerResponse {
        contract: Binary::from(peer.contract.as_bytes().as_slice()),
        decimals: peer.decimals,
    })
}

pub fn query_outbound_capacity(deps: Deps, env: Env) -> StdResult<CapacityResponse> {
    let bucket = load_bucket(deps, &outbound_bucket_id())?;
    Ok(CapacityResponse {
        capacity: bucket.current_capacity(env.block.time),
        unlimited: bucket.is_unlimited(),
    })
}

pub fn query_inbound_capacity(deps: Deps, env: Env, chain_id: u16) -> StdResult<CapacityResponse> {
    let bucket = load_bucket(deps, &inbound_bucket_id(chain_id))?;
    Ok(CapacityResponse {
        capacity: bucket.current_capacity(env.block.time),
        unlimited: bucket.is_unlimited(),
    })
}

pub fn query_outbound_rate_duration(deps: Deps) -> StdResult<RateDurationResponse> {
    Ok(RateDurationResponse {
        duration_secs: load_bucket(deps, &outbound_bucket_id())?.duration_secs,
    })
}

pub fn query_inbound_rate_duration(deps: Deps, chain_id: u16) -> StdResult<RateDurationResponse> {
    Ok(RateDurationResponse {
        duration_secs: load_bucket(deps, &inbound_bucket_id(chain_id))?.duration_secs,
    })
}

pub fn query_outbound_queued_transfer(
    deps: Deps,
    env: Env,
    message_id: Binary,
) -> StdResult<OutboundQueuedTransferResponse> {
    let transfer = OUTBOUND_QUEUE
        .may_load(deps.storage, message_id.as_slice())?
        .ok_or_else(|| StdError::generic_err("unknown outbound queued transfer"))?;

    let duration = load_bucket(deps, &outbound_bucket_id())?.duration_secs;
    let elapsed = env
        .block
        .time
        .seconds()
        .saturating_sub(transfer.enqueued_at.seconds());

    Ok(OutboundQueuedTransferResponse {
        can_complete: elapsed >= duration,
        transfer,
    })
}

pub fn query_inbound_queued_transfer(
    deps: Deps,
    env: Env,
    digest: Binary,
) -> StdResult<InboundQueuedTransferResponse> {
    let transfer = INBOUND_QUEUE
        .may_load(deps.storage, digest.as_slice())?
        .ok_or_else(|| StdError::generic_err("unknown inbound queued transfer"))?;

    let duration = load_bucket(deps, &inbound_bucket_id(transfer.source_chain))?.duration_secs;
    let elapsed = env
        .block
        .time
        .seconds()
        .saturating_sub(transfer.enqueued_at.seconds());

    Ok(InboundQueuedTransferResponse {
        can_complete: elapsed >= duration,
        transfer,
    })
}

pub fn query_is_message_approved(deps: Deps, digest: Binary) -> StdResult<IsMessageApprovedResponse> {
    let config = CONFIG.load(deps.storage)?;
    let threshold = THRESHOLD.load(deps.storage)?;

    let attestations: MessageAttestationsResponse = deps.querier.query_wasm_smart(
        config.transceiver_manager,
        &ManagerQueryMsg::MessageAttestations { digest },
    )?;

    Ok(IsMessageApprovedResponse {
        approved: attestations.count > 0 && attestations.count >= threshold,
    })
}

pub fn query_is_message_executed(deps: Deps, digest: Binary) -> StdResult<IsMessageExecutedResponse> {
    Ok(IsMessageExecutedResponse {
        executed: EXECUTED_MESSAGES
            .may_load(deps.storage, digest.as_slice())?
            .unwrap_or(false),
    })
}

pub fn query_roles() -> StdResult<RolesResponse> {
    Ok(RolesResponse {
        admin: Binary::from(transfer_manager_admin_role().as_slice()),
        pauser: Binary::from(pauser_role().as_slice()),
        unpauser: Binary::from(unpauser_role().as_slice()),
        rate_limiter_manager: Binary::from(rate_limiter_manager_role().as_slice()),
    })
}

pub fn query_has_role(deps: Deps, role: Binary, account: String) -> StdResult<HasRoleResponse> {
    let account = deps.api.addr_validate(&account)?;
    let role: [u8; 16] = role
        .to_vec()
        .try_into()
        .map_err(|_| StdError::generic_err("invalid role length"))?;
    Ok(HasRoleResponse {
        has_role: access::has_role(deps.storage, &role, &account)?,
    })
}

fn load_bucket(deps: Deps, id: &[u8; 32]) -> StdResult<Bucket> {
    BUCKETS
        .may_load(deps.storage, id.as_slice())?
        .ok_or_else(|| StdError::generic_err("unknown rate limit bucket"))
}
