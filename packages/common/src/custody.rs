//! Interface of the token custody contract.
//!
//! The custody holds (or burns and mints) the transferable asset. The core
//! only ever asks it to mint after rate-limit and quorum checks have
//! passed; outbound transfers move user tokens into custody via a cw20
//! transfer executed by the transfer manager.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

#[cw_serde]
pub enum CustodyExecuteMsg {
    /// Credit `amount` of the managed asset to `recipient`.
    ///
    /// The transfer manager calls this for an approved inbound transfer, a
    /// completed inbound queued transfer, or a cancelled outbound queued
    /// transfer. Quorum and rate limits have already been enforced by the
    /// caller.
    Mint { recipient: String, amount: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum CustodyQueryMsg {
    /// The cw20 token this custody manages.
    #[returns(AssetResponse)]
    Asset {},
}

#[cw_serde]
pub struct AssetResponse {
    pub token: String,
}
