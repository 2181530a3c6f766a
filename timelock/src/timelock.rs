//! The delay queue.

use {
    crate::{
        config::TimelockConfig,
        error::TimelockError,
        event::TimelockEvent,
        instruction::TimelockInstruction,
        operation::{hash_operation, DelayedOperation, OperationState},
    },
    log::*,
    solana_clock::Clock,
    solana_hash::Hash,
    solana_pubkey::Pubkey,
    std::collections::HashMap,
    trv1_access_control::{gateway, ActionId, Call, CallHost, PermissionRegistry},
};

/// A world that owns a [`Timelock`] next to the registry authorizing it.
pub trait TimelockHost: CallHost + Clone {
    fn timelock(&self) -> &Timelock;

    /// The timelock, mutably, alongside the registry.
    fn timelock_parts(&mut self) -> (&PermissionRegistry, &mut Timelock);
}

#[derive(Debug, Clone)]
pub struct Timelock {
    address: Pubkey,
    config: TimelockConfig,
    operations: HashMap<Hash, DelayedOperation>,
    events: Vec<TimelockEvent>,
}

impl Timelock {
    pub fn new(address: Pubkey, config: TimelockConfig) -> Result<Self, TimelockError> {
        config.validate()?;
        Ok(Self {
            address,
            config,
            operations: HashMap::new(),
            events: Vec::new(),
        })
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn min_delay(&self) -> u64 {
        self.config.min_delay
    }

    pub fn config(&self) -> &TimelockConfig {
        &self.config
    }

    pub fn operation(&self, id: &Hash) -> Option<&DelayedOperation> {
        self.operations.get(id)
    }

    pub fn operation_state(&self, id: &Hash, clock: &Clock) -> OperationState {
        self.operations
            .get(id)
            .map(|operation| operation.state(clock.slot))
            .unwrap_or(OperationState::Unset)
    }

    /// Scheduled and neither executed nor canceled.
    pub fn is_operation_pending(&self, id: &Hash) -> bool {
        self.operations
            .get(id)
            .map(|operation| !operation.is_finalized())
            .unwrap_or(false)
    }

    pub fn is_operation_ready(&self, id: &Hash, clock: &Clock) -> bool {
        self.operation_state(id, clock) == OperationState::Ready
    }

    pub fn is_operation_done(&self, id: &Hash) -> bool {
        self.operations
            .get(id)
            .map(|operation| operation.executed_at.is_some())
            .unwrap_or(false)
    }

    pub fn is_operation_canceled(&self, id: &Hash) -> bool {
        self.operations
            .get(id)
            .map(|operation| operation.canceled_at.is_some())
            .unwrap_or(false)
    }

    /// Queue `calls` to become executable `delay` slots from now.
    #[allow(clippy::too_many_arguments)]
    pub fn schedule(
        &mut self,
        registry: &PermissionRegistry,
        caller: &Pubkey,
        calls: Vec<Call>,
        predecessor: Option<Hash>,
        salt: Hash,
        delay: u64,
        clock: &Clock,
    ) -> Result<Hash, TimelockError> {
        self.require_action(registry, TimelockInstruction::SCHEDULE_ACTION, caller)?;
        if delay < self.config.min_delay {
            return Err(TimelockError::DelayTooShort {
                delay,
                min_delay: self.config.min_delay,
            });
        }
        let id = hash_operation(&calls, predecessor.as_ref(), &salt)?;
        if self.operations.contains_key(&id) {
            return Err(TimelockError::OperationAlreadyScheduled(id));
        }
        let ready_at = clock
            .slot
            .checked_add(delay)
            .ok_or(TimelockError::ArithmeticOverflow)?;

        info!(
            "Timelock {}: scheduled {id} ({} call(s)), ready at slot {ready_at}",
            self.address,
            calls.len()
        );
        self.events.push(TimelockEvent::OperationScheduled {
            id,
            calls: calls.clone(),
            predecessor,
            delay,
            ready_at,
        });
        self.operations.insert(
            id,
            DelayedOperation {
                id,
                calls,
                predecessor,
                salt,
                scheduled_at: clock.slot,
                ready_at,
                executed_at: None,
                canceled_at: None,
            },
        );
        Ok(id)
    }

    /// [`Self::schedule`] taking the batch as parallel arrays.
    #[allow(clippy::too_many_arguments)]
    pub fn schedule_batch(
        &mut self,
        registry: &PermissionRegistry,
        caller: &Pubkey,
        targets: &[Pubkey],
        values: &[u64],
        payloads: &[Vec<u8>],
        predecessor: Option<Hash>,
        salt: Hash,
        delay: u64,
        clock: &Clock,
    ) -> Result<Hash, TimelockError> {
        let calls = Call::zip(targets, values, payloads)?;
        self.schedule(registry, caller, calls, predecessor, salt, delay, clock)
    }

    pub fn cancel(
        &mut self,
        registry: &PermissionRegistry,
        caller: &Pubkey,
        id: &Hash,
        clock: &Clock,
    ) -> Result<(), TimelockError> {
        self.require_action(registry, TimelockInstruction::CANCEL_ACTION, caller)?;
        let operation = self
            .operations
            .get_mut(id)
            .ok_or(TimelockError::UnknownOperation(*id))?;
        if operation.is_finalized() {
            return Err(TimelockError::OperationAlreadyFinalized(*id));
        }
        operation.canceled_at = Some(clock.slot);

        info!("Timelock {}: canceled {id}", self.address);
        self.events.push(TimelockEvent::OperationCanceled { id: *id });
        Ok(())
    }

    /// Change the minimum delay.  `caller` must be the timelock itself.
    pub fn update_delay(&mut self, caller: &Pubkey, min_delay: u64) -> Result<(), TimelockError> {
        if *caller != self.address {
            warn!("Timelock {}: delay update attempted by {caller}", self.address);
            return Err(TimelockError::OnlyTimelock { caller: *caller });
        }
        let config = TimelockConfig { min_delay };
        config.validate()?;

        let old_delay = std::mem::replace(&mut self.config, config).min_delay;
        info!("Timelock {}: min delay {old_delay} -> {min_delay}", self.address);
        self.events.push(TimelockEvent::MinDelayChanged {
            old_delay,
            new_delay: min_delay,
        });
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<TimelockEvent> {
        std::mem::take(&mut self.events)
    }

    fn require_action(
        &self,
        registry: &PermissionRegistry,
        action: ActionId,
        caller: &Pubkey,
    ) -> Result<(), TimelockError> {
        if !registry.is_authorized(&self.address, action, caller) {
            warn!(
                "Timelock {}: {caller} is not authorized for {action}",
                self.address
            );
            return Err(TimelockError::NotAuthorized {
                caller: *caller,
                action,
            });
        }
        Ok(())
    }

    /// Validate that the operation is executable and mark it executed.
    fn begin_execution(&mut self, id: &Hash, clock: &Clock) -> Result<(), TimelockError> {
        let operation = self
            .operations
            .get(id)
            .ok_or(TimelockError::UnknownOperation(*id))?;
        if operation.is_finalized() {
            return Err(TimelockError::OperationAlreadyFinalized(*id));
        }
        if clock.slot < operation.ready_at {
            return Err(TimelockError::OperationNotReady {
                id: *id,
                ready_at: operation.ready_at,
                now: clock.slot,
            });
        }
        if let Some(predecessor) = operation.predecessor {
            if !self.is_operation_done(&predecessor) {
                return Err(TimelockError::PredecessorNotExecuted(predecessor));
            }
        }
        if let Some(operation) = self.operations.get_mut(id) {
            operation.executed_at = Some(clock.slot);
        }
        Ok(())
    }
}

/// Execute a ready operation, all-or-nothing.
///
/// The operation is marked executed before its calls run, so a call batch
/// cannot execute its own operation again.  Every call is forwarded through
/// the gateway with the timelock's address as the caller.
pub fn execute<H: TimelockHost>(
    host: &mut H,
    caller: &Pubkey,
    calls: &[Call],
    predecessor: Option<Hash>,
    salt: Hash,
    clock: &Clock,
) -> Result<Hash, TimelockError> {
    let mut staged = host.clone();
    let id = execute_in_place(&mut staged, caller, calls, predecessor, salt, clock)?;
    *host = staged;
    Ok(id)
}

/// [`execute`] taking the batch as parallel arrays.
#[allow(clippy::too_many_arguments)]
pub fn execute_batch<H: TimelockHost>(
    host: &mut H,
    caller: &Pubkey,
    targets: &[Pubkey],
    values: &[u64],
    payloads: &[Vec<u8>],
    predecessor: Option<Hash>,
    salt: Hash,
    clock: &Clock,
) -> Result<Hash, TimelockError> {
    let calls = Call::zip(targets, values, payloads)?;
    execute(host, caller, &calls, predecessor, salt, clock)
}

/// [`execute`] without staging: on error `host` may be partially updated.
pub(crate) fn execute_in_place<H: TimelockHost>(
    host: &mut H,
    caller: &Pubkey,
    calls: &[Call],
    predecessor: Option<Hash>,
    salt: Hash,
    clock: &Clock,
) -> Result<Hash, TimelockError> {
    let id = hash_operation(calls, predecessor.as_ref(), &salt)?;
    let (registry, timelock) = host.timelock_parts();
    timelock.require_action(registry, TimelockInstruction::EXECUTE_ACTION, caller)?;
    timelock.begin_execution(&id, clock)?;
    let address = timelock.address;

    gateway::execute_batch_in_place(host, &address, calls, clock)?;

    let (_, timelock) = host.timelock_parts();
    info!("Timelock {address}: executed {id}");
    timelock
        .events
        .push(TimelockEvent::OperationExecuted { id });
    Ok(id)
}
