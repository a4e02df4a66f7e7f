//! Interface of a transceiver adapter contract.
//!
//! A transceiver quotes the delivery cost of a message and physically
//! relays it through one specific interchain messaging network. The core
//! depends only on this interface; a concrete adapter's transport and
//! verification logic lives outside this workspace.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

use crate::types::MessageToSend;

#[cw_serde]
pub enum TransceiverExecuteMsg {
    /// Relay a message to its destination chain.
    ///
    /// Called only by the transceiver manager, which attaches exactly the
    /// quoted delivery price as native funds. The adapter must treat the
    /// instruction bytes as opaque caller input and may reject ones it does
    /// not understand.
    SendMessage {
        message: MessageToSend,
        instruction: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum TransceiverQueryMsg {
    /// Quote the delivery price for a message. Must be side-effect free and
    /// stable within a block: the manager quotes before paying a send.
    #[returns(DeliveryPriceResponse)]
    QuoteDeliveryPrice {
        message: MessageToSend,
        instruction: Binary,
    },
}

#[cw_serde]
pub struct DeliveryPriceResponse {
    pub price: Uint128,
}
