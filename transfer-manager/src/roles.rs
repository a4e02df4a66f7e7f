//! Role identifiers for the Transfer Manager contract.
//!
//! Derived from fixed labels so they are stable across deployments. All are
//! administered by the default admin role unless reconfigured.

use common::access::{role_id, Role};

/// Administers peers, threshold and the transceiver manager wiring.
pub fn transfer_manager_admin_role() -> Role {
    role_id(b"TRANSFER_MANAGER_ADMIN")
}

pub fn pauser_role() -> Role {
    role_id(b"PAUSER")
}

pub fn unpauser_role() -> Role {
    role_id(b"UNPAUSER")
}

/// Administers bucket limits and refill durations.
pub fn rate_limiter_manager_role() -> Role {
    role_id(b"RATE_LIMITER_MANAGER")
}
