//! Instruction processing for the timelock.

use {
    crate::{
        error::TimelockError,
        instruction::TimelockInstruction,
        timelock::{execute, execute_in_place, TimelockHost},
    },
    log::*,
    solana_bincode::limited_deserialize,
    solana_clock::Clock,
    solana_hash::Hash,
    solana_pubkey::Pubkey,
    trv1_access_control::{processor::MAX_INSTRUCTION_DATA_LEN, Call},
};

type ExecuteFn<H> =
    fn(&mut H, &Pubkey, &[Call], Option<Hash>, Hash, &Clock) -> Result<Hash, TimelockError>;

/// Decode `payload` as a [`TimelockInstruction`] and run it as `caller`.
/// An `Execute` is staged on a copy of `host` and committed only on success.
pub fn process_instruction<H: TimelockHost>(
    host: &mut H,
    caller: &Pubkey,
    payload: &[u8],
    clock: &Clock,
) -> Result<(), TimelockError> {
    process(host, caller, payload, clock, execute)
}

/// [`process_instruction`] for a host that is already staged, as when the
/// gateway dispatches a call to the timelock.  An `Execute` runs in place and
/// the caller discards `host` on error.
pub fn process_staged_instruction<H: TimelockHost>(
    host: &mut H,
    caller: &Pubkey,
    payload: &[u8],
    clock: &Clock,
) -> Result<(), TimelockError> {
    process(host, caller, payload, clock, execute_in_place)
}

fn process<H: TimelockHost>(
    host: &mut H,
    caller: &Pubkey,
    payload: &[u8],
    clock: &Clock,
    execute_with: ExecuteFn<H>,
) -> Result<(), TimelockError> {
    let instruction: TimelockInstruction = limited_deserialize(payload, MAX_INSTRUCTION_DATA_LEN)
        .map_err(|_| TimelockError::InvalidInstruction)?;

    trace!("timelock process_instruction: {instruction:?}");

    match instruction {
        TimelockInstruction::Schedule {
            calls,
            predecessor,
            salt,
            delay,
        } => {
            let (registry, timelock) = host.timelock_parts();
            timelock
                .schedule(registry, caller, calls, predecessor, salt, delay, clock)
                .map(|_| ())
        }
        TimelockInstruction::Execute {
            calls,
            predecessor,
            salt,
        } => execute_with(host, caller, &calls, predecessor, salt, clock).map(|_| ()),
        TimelockInstruction::Cancel { id } => {
            let (registry, timelock) = host.timelock_parts();
            timelock.cancel(registry, caller, &id, clock)
        }
        TimelockInstruction::UpdateDelay { min_delay } => {
            let (_, timelock) = host.timelock_parts();
            timelock.update_delay(caller, min_delay)
        }
    }
}
