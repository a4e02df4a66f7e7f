//! Role-based access control storage.
//!
//! Roles are 16-byte identifiers derived from keccak-256 of a fixed label
//! (optionally suffixed with a scoping key such as a handler address), so
//! they are deterministic across deployments rather than free-form strings.
//! Each role has an admin role that gates granting and revoking it; the
//! default admin role is all zeroes and administers any role without an
//! explicit admin.
//!
//! Both contracts embed this module's maps in their own storage, so the
//! role namespaces of different contracts never overlap.

use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::Map;
use thiserror::Error;

use crate::hash::keccak256;

/// A role identifier: the first 16 bytes of a keccak-256 hash.
pub type Role = [u8; 16];

/// Administers any role that has no explicit admin role.
pub const DEFAULT_ADMIN_ROLE: Role = [0u8; 16];

/// (role, account) -> membership
pub const ROLE_MEMBERS: Map<(&[u8], &Addr), bool> = Map::new("role_members");

/// role -> admin role (absent means [`DEFAULT_ADMIN_ROLE`])
pub const ROLE_ADMINS: Map<&[u8], Role> = Map::new("role_admins");

#[derive(Error, Debug, PartialEq)]
pub enum AccessError {
    #[error("Unauthorized: {account} is missing role 0x{}", hex::encode(.role))]
    MissingRole { role: Role, account: Addr },
}

/// Derive a role identifier from a label.
pub fn role_id(label: &[u8]) -> Role {
    keccak256(label)[..16].try_into().unwrap()
}

/// Derive a role identifier from a label scoped by a key.
pub fn scoped_role_id(label: &[u8], scope: &[u8]) -> Role {
    let mut name = Vec::with_capacity(label.len() + scope.len());
    name.extend_from_slice(label);
    name.extend_from_slice(scope);
    role_id(&name)
}

pub fn has_role(storage: &dyn Storage, role: &Role, account: &Addr) -> StdResult<bool> {
    Ok(ROLE_MEMBERS
        .may_load(storage, (role.as_slice(), account))?
        .unwrap_or(false))
}

pub fn ensure_role(storage: &dyn Storage, role: &Role, account: &Addr) -> Result<(), AccessError> {
    match has_role(storage, role, account) {
        Ok(true) => Ok(()),
        _ => Err(AccessError::MissingRole {
            role: *role,
            account: account.clone(),
        }),
    }
}

/// Grant without an authorization check. Callers gate on
/// [`ensure_role_admin`] except during instantiation.
pub fn grant_role(storage: &mut dyn Storage, role: &Role, account: &Addr) -> StdResult<()> {
    ROLE_MEMBERS.save(storage, (role.as_slice(), account), &true)
}

pub fn revoke_role(storage: &mut dyn Storage, role: &Role, account: &Addr) {
    ROLE_MEMBERS.remove(storage, (role.as_slice(), account));
}

pub fn role_admin(storage: &dyn Storage, role: &Role) -> StdResult<Role> {
    Ok(ROLE_ADMINS
        .may_load(storage, role.as_slice())?
        .unwrap_or(DEFAULT_ADMIN_ROLE))
}

pub fn set_role_admin(storage: &mut dyn Storage, role: &Role, admin_role: &Role) -> StdResult<()> {
    ROLE_ADMINS.save(storage, role.as_slice(), admin_role)
}

/// Require that `account` holds the admin role of `role`.
pub fn ensure_role_admin(
    storage: &dyn Storage,
    role: &Role,
    account: &Addr,
) -> Result<(), AccessError> {
    let admin = role_admin(storage, role).map_err(|_| AccessError::MissingRole {
        role: *role,
        account: account.clone(),
    })?;
    ensure_role(storage, &admin, account)
}
