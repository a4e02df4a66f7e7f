//! Token amounts at reduced, chain-agnostic precision.
//!
//! Amounts on the wire are capped at 8 decimals. An amount with more
//! decimals is scaled down before transport and scaled back up on arrival.
//! The sending side must verify the round trip reproduces the original
//! amount exactly; a remainder ("dust") rejects the transfer.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use thiserror::Error;

/// Maximum number of decimals carried across chains.
pub const TRIMMED_DECIMALS: u8 = 8;

/// An amount re-expressed at `decimals` precision,
/// where `decimals = min(8, source decimals, destination decimals)`.
#[cw_serde]
#[derive(Copy, Eq)]
pub struct TrimmedAmount {
    pub amount: u64,
    pub decimals: u8,
}

#[derive(Error, Debug, PartialEq)]
pub enum TrimError {
    #[error("amount overflows when scaled from {from_decimals} to {to_decimals} decimals")]
    Overflow { from_decimals: u8, to_decimals: u8 },
}

/// Rescale `amount` between decimal precisions.
/// Scaling down truncates; scaling up errors on overflow.
pub fn scale(amount: u128, from_decimals: u8, to_decimals: u8) -> Result<u128, TrimError> {
    if from_decimals == to_decimals {
        return Ok(amount);
    }
    let overflow = || TrimError::Overflow {
        from_decimals,
        to_decimals,
    };
    if from_decimals > to_decimals {
        let divisor = 10u128
            .checked_pow((from_decimals - to_decimals) as u32)
            .ok_or_else(overflow)?;
        Ok(amount / divisor)
    } else {
        let multiplier = 10u128
            .checked_pow((to_decimals - from_decimals) as u32)
            .ok_or_else(overflow)?;
        amount.checked_mul(multiplier).ok_or_else(overflow)
    }
}

/// Trim an amount for transport. The resulting decimals is the minimum of
/// `from_decimals`, `to_decimals` and [`TRIMMED_DECIMALS`], so trimming only
/// ever scales down. Truncation here is detected by the caller's round-trip
/// check, not by this function.
pub fn trim(amount: Uint128, from_decimals: u8, to_decimals: u8) -> Result<TrimmedAmount, TrimError> {
    let target_decimals = TRIMMED_DECIMALS.min(from_decimals).min(to_decimals);
    let scaled = scale(amount.u128(), from_decimals, target_decimals)?;
    let amount = u64::try_from(scaled).map_err(|_| TrimError::Overflow {
        from_decimals,
        to_decimals: target_decimals,
    })?;
    Ok(TrimmedAmount {
        amount,
        decimals: target_decimals,
    })
}

/// Scale a trimmed amount back up to `to_decimals`.
pub fn untrim(trimmed: &TrimmedAmount, to_decimals: u8) -> Result<Uint128, TrimError> {
    let scaled = scale(trimmed.amount as u128, trimmed.decimals, to_decimals)?;
    Ok(Uint128::from(scaled))
}
