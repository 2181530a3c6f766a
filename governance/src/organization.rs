//! The governed world: everything a call batch can touch.

use {
    crate::governor::Governor,
    log::*,
    solana_clock::Clock,
    solana_pubkey::Pubkey,
    std::collections::BTreeMap,
    trv1_access_control::{Call, CallError, CallHost, CallTarget, PermissionRegistry},
    trv1_timelock::{Timelock, TimelockHost},
};

/// Registry, timelock, governor and external call targets of one organization.
///
/// Calls are routed by target address: the three built-in components decode
/// their own instructions, anything else goes to a registered [`CallTarget`].
/// The whole world is cloned to stage a batch, so a failed batch leaves no
/// trace in any component.
#[derive(Debug, Clone)]
pub struct Organization {
    pub(crate) registry: PermissionRegistry,
    pub(crate) timelock: Timelock,
    pub(crate) governor: Governor,
    targets: BTreeMap<Pubkey, Box<dyn CallTarget>>,
}

impl Organization {
    pub fn new(registry: PermissionRegistry, timelock: Timelock, governor: Governor) -> Self {
        Self {
            registry,
            timelock,
            governor,
            targets: BTreeMap::new(),
        }
    }

    pub fn governor(&self) -> &Governor {
        &self.governor
    }

    /// Returns the target previously registered at `address`, if any.
    pub fn register_target(
        &mut self,
        address: Pubkey,
        target: Box<dyn CallTarget>,
    ) -> Option<Box<dyn CallTarget>> {
        debug!("Organization: registered call target {address}");
        self.targets.insert(address, target)
    }

    pub fn target(&self, address: &Pubkey) -> Option<&dyn CallTarget> {
        self.targets.get(address).map(|target| &**target)
    }

    /// Downcast a registered target to its concrete type.
    pub fn target_as<T: 'static>(&self, address: &Pubkey) -> Option<&T> {
        self.target(address)?.as_any().downcast_ref::<T>()
    }
}

impl CallHost for Organization {
    fn registry(&self) -> &PermissionRegistry {
        &self.registry
    }

    fn dispatch(&mut self, caller: &Pubkey, call: &Call, clock: &Clock) -> Result<(), CallError> {
        let target = call.target;
        if target == self.registry.address() {
            return self
                .registry
                .process_instruction(caller, &call.payload)
                .map_err(CallError::from);
        }
        if target == self.timelock.address() {
            return trv1_timelock::process_staged_instruction(self, caller, &call.payload, clock)
                .map_err(|err| CallError::reverted(target, err));
        }
        if target == self.governor.address() {
            return self
                .governor
                .process_instruction(caller, &call.payload)
                .map_err(|err| CallError::reverted(target, err));
        }

        let handler = self
            .targets
            .get_mut(&target)
            .ok_or(CallError::UnknownTarget(target))?;
        handler
            .invoke(caller, call.value, &call.payload)
            .map_err(|source| CallError::Reverted { target, source })
    }
}

impl TimelockHost for Organization {
    fn timelock(&self) -> &Timelock {
        &self.timelock
    }

    fn timelock_parts(&mut self) -> (&PermissionRegistry, &mut Timelock) {
        (&self.registry, &mut self.timelock)
    }
}
