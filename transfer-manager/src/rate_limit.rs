//! Token-bucket rate limiting.
//!
//! A bucket holds up to `limit` units and refills linearly over
//! `duration_secs`: capacity at any instant is
//! `min(limit, capacity_at_last_refill + limit * elapsed / duration)`.
//! A limit of zero is the "unlimited" sentinel: capacity checks always pass
//! and no refill bookkeeping is kept.
//!
//! The transfer manager keeps one outbound bucket and one inbound bucket
//! per peer chain. Consuming from one direction backfills the complementary
//! direction so that aggregate flow between a chain pair is conserved.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Storage, Timestamp, Uint128, Uint256};

use common::hash::keccak256;

use crate::error::ContractError;
use crate::state::BUCKETS;

/// A token bucket with linear refill.
#[cw_serde]
pub struct Bucket {
    /// Maximum capacity; zero means unlimited
    pub limit: Uint128,
    /// Capacity as of `last_refill`
    pub capacity: Uint128,
    /// Time to refill from empty to `limit`. Zero means instant refill.
    pub duration_secs: u64,
    /// Block time of the last capacity adjustment
    pub last_refill: Timestamp,
}

impl Bucket {
    /// A bucket that never limits flow.
    pub fn unlimited(now: Timestamp) -> Self {
        Bucket {
            limit: Uint128::zero(),
            capacity: Uint128::zero(),
            duration_secs: 0,
            last_refill: now,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.limit.is_zero()
    }

    /// Capacity at `now`, refilled linearly and saturating at the limit.
    pub fn current_capacity(&self, now: Timestamp) -> Uint128 {
        if self.is_unlimited() {
            return Uint128::MAX;
        }
        if self.duration_secs == 0 {
            return self.limit;
        }

        let elapsed = now.seconds().saturating_sub(self.last_refill.seconds());
        // widened so limit * elapsed cannot overflow
        let refilled = Uint256::from(self.capacity)
            + self.limit.full_mul(Uint128::from(elapsed)) / Uint256::from(self.duration_secs);
        let capacity = refilled.min(Uint256::from(self.limit));
        Uint128::try_from(capacity).unwrap_or(self.limit)
    }

    pub fn has_capacity(&self, now: Timestamp, amount: Uint128) -> bool {
        self.is_unlimited() || amount <= self.current_capacity(now)
    }

    /// Decrease capacity by `amount`, refilling first.
    pub fn consume(&mut self, now: Timestamp, amount: Uint128) -> Result<(), ContractError> {
        if self.is_unlimited() {
            return Ok(());
        }
        self.refill(now);
        if amount > self.capacity {
            return Err(ContractError::InsufficientCapacity {
                capacity: self.capacity,
                requested: amount,
            });
        }
        self.capacity -= amount;
        Ok(())
    }

    /// Increase capacity by `amount`, refilling first and saturating at the
    /// limit. Used to conserve aggregate flow with the complementary bucket.
    pub fn fill(&mut self, now: Timestamp, amount: Uint128) {
        if self.is_unlimited() {
            return;
        }
        self.refill(now);
        self.capacity = (self.capacity + amount).min(self.limit);
    }

    /// Change the limit. A bucket leaving the unlimited state starts full;
    /// raising the limit grants the difference, lowering it clamps.
    pub fn set_limit(&mut self, now: Timestamp, new_limit: Uint128) {
        if self.is_unlimited() {
            self.capacity = new_limit;
        } else {
            self.refill(now);
            if new_limit > self.limit {
                self.capacity += new_limit - self.limit;
            }
            self.capacity = self.capacity.min(new_limit);
        }
        self.limit = new_limit;
        self.last_refill = now;
    }

    /// Change the refill duration. Capacity accrued under the old duration
    /// is settled first.
    pub fn set_duration(&mut self, now: Timestamp, duration_secs: u64) {
        if !self.is_unlimited() {
            self.refill(now);
        }
        self.duration_secs = duration_secs;
    }

    fn refill(&mut self, now: Timestamp) {
        self.capacity = self.current_capacity(now);
        self.last_refill = now;
    }
}

/// Bucket id for the single outbound bucket.
pub fn outbound_bucket_id() -> [u8; 32] {
    keccak256(b"OUTBOUND")
}

/// Bucket id for the inbound bucket of a peer chain.
pub fn inbound_bucket_id(chain_id: u16) -> [u8; 32] {
    let mut name = Vec::with_capacity(10);
    name.extend_from_slice(b"INBOUND_");
    name.extend_from_slice(&chain_id.to_be_bytes());
    keccak256(&name)
}

/// Load a bucket, failing with a peer error for an absent inbound bucket
/// (it is created when the peer chain is registered).
pub fn load_bucket(
    storage: &dyn Storage,
    id: &[u8; 32],
    chain_id: Option<u16>,
) -> Result<Bucket, ContractError> {
    BUCKETS
        .may_load(storage, id.as_slice())?
        .ok_or(match chain_id {
            Some(chain_id) => ContractError::PeerNotRegistered { chain_id },
            None => ContractError::Std(cosmwasm_std::StdError::not_found("bucket")),
        })
}

pub fn save_bucket(
    storage: &mut dyn Storage,
    id: &[u8; 32],
    bucket: &Bucket,
) -> Result<(), ContractError> {
    BUCKETS.save(storage, id.as_slice(), bucket)?;
    Ok(())
}
