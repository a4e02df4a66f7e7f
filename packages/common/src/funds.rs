//! Attached-funds accounting.

use cosmwasm_std::{Coin, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FundsError {
    #[error("unexpected denom in attached funds: {denom}")]
    UnexpectedDenom { denom: String },
}

/// Total amount of `denom` in the attached funds. Any coin of another denom
/// is rejected outright so it cannot get stranded in the contract.
pub fn fee_paid(funds: &[Coin], denom: &str) -> Result<Uint128, FundsError> {
    let mut total = Uint128::zero();
    for coin in funds {
        if coin.denom != denom {
            return Err(FundsError::UnexpectedDenom {
                denom: coin.denom.clone(),
            });
        }
        total += coin.amount;
    }
    Ok(total)
}
