//! Universal cross-chain address encoding.
//!
//! Every address that crosses a chain boundary is carried as 32 bytes.
//! Local (bech32) addresses are canonicalized and left-padded with zeros;
//! remote addresses arrive already in 32-byte form and are treated as
//! opaque. Converting back to a local address strips the zero padding, so
//! canonical addresses must not begin with a zero byte.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, Binary, CanonicalAddr, StdError, StdResult};

/// A chain-agnostic 32-byte address.
#[cw_serde]
#[derive(Copy, Eq)]
pub struct UniversalAddress(pub [u8; 32]);

impl UniversalAddress {
    pub const ZERO: UniversalAddress = UniversalAddress([0u8; 32]);

    /// Encode a local address by canonicalizing and left-padding to 32 bytes.
    pub fn from_addr(api: &dyn Api, addr: &Addr) -> StdResult<Self> {
        let canonical = api.addr_canonicalize(addr.as_str())?;
        let bytes = canonical.as_slice();
        if bytes.len() > 32 {
            return Err(StdError::generic_err(format!(
                "canonical address too long: {} bytes",
                bytes.len()
            )));
        }

        let mut result = [0u8; 32];
        result[32 - bytes.len()..].copy_from_slice(bytes);
        Ok(UniversalAddress(result))
    }

    /// Decode back into a local address. The inverse of [`from_addr`]:
    /// leading zero padding is stripped before humanizing.
    ///
    /// [`from_addr`]: UniversalAddress::from_addr
    pub fn to_addr(&self, api: &dyn Api) -> StdResult<Addr> {
        let start = self.0.iter().position(|b| *b != 0).ok_or_else(|| {
            StdError::generic_err("cannot decode zero universal address")
        })?;
        api.addr_humanize(&CanonicalAddr::from(&self.0[start..]))
    }

    /// Parse from a `Binary` of exactly 32 bytes.
    pub fn from_binary(bin: &Binary) -> StdResult<Self> {
        let bytes: [u8; 32] = bin.to_vec().try_into().map_err(|_| {
            StdError::generic_err(format!(
                "invalid universal address length: expected 32 bytes, got {}",
                bin.len()
            ))
        })?;
        Ok(UniversalAddress(bytes))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::hash::bytes32_to_hex(&self.0)
    }
}
