//! Per-handler role identifiers.
//!
//! Role ids are derived from a fixed label and the handler address, so a
//! handler's roles are deterministic and cannot collide with another
//! handler's.

use cosmwasm_std::Addr;

use common::access::{scoped_role_id, Role};

/// Administers a handler's transceiver set and its pauser/unpauser roles.
/// Self-administered: only a holder can grant it further.
pub fn handler_admin_role(handler: &Addr) -> Role {
    scoped_role_id(b"HANDLER_ADMIN_", handler.as_bytes())
}

pub fn handler_pauser_role(handler: &Addr) -> Role {
    scoped_role_id(b"HANDLER_PAUSER_", handler.as_bytes())
}

pub fn handler_unpauser_role(handler: &Addr) -> Role {
    scoped_role_id(b"HANDLER_UNPAUSER_", handler.as_bytes())
}
