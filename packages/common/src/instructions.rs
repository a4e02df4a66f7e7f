//! Per-transceiver instruction lists.
//!
//! A caller may override the opaque instruction bytes handed to individual
//! transceivers during fan-out. Overrides must name transceivers in the
//! same order they are configured: the instruction list has to be a
//! strictly increasing subsequence of the configured transceiver order, and
//! every entry must be consumed. Transceivers without an override receive
//! an empty default instruction.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary};
use thiserror::Error;

/// An instruction override for a single transceiver.
#[cw_serde]
pub struct TransceiverInstruction {
    /// Address of the transceiver this instruction is for.
    pub transceiver: String,
    /// Opaque bytes forwarded to the transceiver.
    pub instruction: Binary,
}

#[derive(Error, Debug, PartialEq)]
pub enum InstructionError {
    #[error("instructions out of order or naming an unconfigured transceiver")]
    Misaligned,
}

/// Resolve an instruction list against the configured transceiver order.
///
/// Walks `configured` with a cursor into `instructions`; an entry at the
/// cursor naming the current transceiver is consumed, every other position
/// gets the empty default. Any unconsumed entry afterwards means the list
/// was out of order, named an unconfigured transceiver, or duplicated one.
pub fn resolve(
    configured: &[Addr],
    instructions: &[TransceiverInstruction],
) -> Result<Vec<Binary>, InstructionError> {
    let mut cursor = 0usize;
    let mut resolved = Vec::with_capacity(configured.len());

    for transceiver in configured {
        let instruction = match instructions.get(cursor) {
            Some(entry) if entry.transceiver == transceiver.as_str() => {
                cursor += 1;
                entry.instruction.clone()
            }
            _ => Binary::default(),
        };
        resolved.push(instruction);
    }

    if cursor != instructions.len() {
        return Err(InstructionError::Misaligned);
    }
    Ok(resolved)
}
