//! Execution gateway.
//!
//! Every call in a batch is authorized against the registry *as it stands at
//! that point in the batch* (an earlier call may grant the roles a later one
//! needs) and then dispatched.  The first unauthorized or failing call aborts
//! the batch and nothing it did before is kept.

use {
    crate::{
        call::{Call, CallHost},
        error::GatewayError,
    },
    log::*,
    solana_clock::Clock,
    solana_pubkey::Pubkey,
};

/// Run `calls` as `caller`, all-or-nothing.
///
/// The batch runs against a staged clone of `host`, which replaces `host`
/// only when every call succeeded.
pub fn execute_batch<H: CallHost + Clone>(
    host: &mut H,
    caller: &Pubkey,
    calls: &[Call],
    clock: &Clock,
) -> Result<(), GatewayError> {
    let mut staged = host.clone();
    execute_batch_in_place(&mut staged, caller, calls, clock)?;
    *host = staged;
    Ok(())
}

/// Run `calls` directly against `host`.
///
/// For hosts that are already staged by an enclosing batch: on error `host`
/// may be partially mutated and must be discarded by the caller.
pub fn execute_batch_in_place<H: CallHost + ?Sized>(
    host: &mut H,
    caller: &Pubkey,
    calls: &[Call],
    clock: &Clock,
) -> Result<(), GatewayError> {
    for (index, call) in calls.iter().enumerate() {
        let action = call
            .action()
            .ok_or(GatewayError::MissingSelector { index })?;

        if !host.registry().is_authorized(&call.target, action, caller) {
            warn!(
                "Gateway: call {index} rejected, {caller} may not invoke {action} on {}",
                call.target
            );
            return Err(GatewayError::NotAuthorized {
                index,
                caller: *caller,
                target: call.target,
                action,
            });
        }

        debug!(
            "Gateway: call {index} {action} on {} (value {}) by {caller}",
            call.target, call.value
        );
        host.dispatch(caller, call, clock)
            .map_err(|source| GatewayError::CallFailed { index, source })?;
    }
    Ok(())
}
