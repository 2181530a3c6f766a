//! Property-based tests for timelock ordering.
//!
//! Properties tested:
//! 1. Execution fails before `scheduled_at + delay`
//! 2. Execution succeeds at or after `scheduled_at + delay`, exactly once
//! 3. A delay below the minimum is always rejected

#[cfg(test)]
mod tests {
    use {
        proptest::prelude::*,
        solana_clock::Clock,
        solana_hash::Hash,
        solana_pubkey::Pubkey,
        trv1_access_control::{Call, PermissionRegistry},
        trv1_governance::{organization_genesis, Governor, GovernorConfig, GovernorInstruction, Organization},
        trv1_timelock::{Timelock, TimelockConfig, TimelockError, TimelockHost},
    };

    const REGISTRY: u8 = 200;
    const TIMELOCK: u8 = 201;
    const GOVERNOR: u8 = 202;
    const MIN_DELAY: u64 = 50;

    fn account(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn clock(slot: u64) -> Clock {
        Clock {
            slot,
            ..Clock::default()
        }
    }

    fn organization() -> Organization {
        let mut registry = PermissionRegistry::new(account(REGISTRY));
        organization_genesis(account(REGISTRY), account(TIMELOCK), account(GOVERNOR))
            .apply(&mut registry)
            .unwrap();
        let timelock = Timelock::new(account(TIMELOCK), TimelockConfig { min_delay: MIN_DELAY }).unwrap();
        let governor = Governor::new(account(GOVERNOR), account(TIMELOCK), GovernorConfig::default()).unwrap();
        Organization::new(registry, timelock, governor)
    }

    fn set_voting_delay(voting_delay: u64) -> Vec<Call> {
        vec![Call::instruction(
            account(GOVERNOR),
            0,
            &GovernorInstruction::SetVotingDelay { voting_delay },
        )
        .unwrap()]
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 1-2. Maturation and single execution
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn execution_respects_ready_slot(
            scheduled_at in 0..1_000_000u64,
            extra_delay in 0..1_000u64,
            attempt_offset in 0..2_000u64,
            voting_delay in 1..10_000u64,
            salt in any::<[u8; 32]>(),
        ) {
            let mut organization = organization();
            let governor = account(GOVERNOR);
            let calls = set_voting_delay(voting_delay);
            let salt = Hash::new_from_array(salt);
            let delay = MIN_DELAY + extra_delay;
            let ready_at = scheduled_at + delay;

            let (registry, timelock) = organization.timelock_parts();
            let id = timelock
                .schedule(registry, &governor, calls.clone(), None, salt, delay, &clock(scheduled_at))
                .unwrap();

            let attempt = scheduled_at + attempt_offset;
            let result = trv1_timelock::execute(&mut organization, &governor, &calls, None, salt, &clock(attempt));
            if attempt < ready_at {
                let is_not_ready = matches!(result, Err(TimelockError::OperationNotReady { .. }));
                prop_assert!(is_not_ready, "early execute at {} returned {:?}", attempt, result);
                prop_assert!(!organization.timelock().is_operation_done(&id));
                prop_assert_ne!(organization.governor().config().voting_delay, voting_delay);
                prop_assert!(trv1_timelock::execute(&mut organization, &governor, &calls, None, salt, &clock(ready_at)).is_ok());
            } else {
                prop_assert_eq!(result.unwrap(), id);
            }

            prop_assert!(organization.timelock().is_operation_done(&id));
            prop_assert_eq!(organization.governor().config().voting_delay, voting_delay);

            let again = trv1_timelock::execute(&mut organization, &governor, &calls, None, salt, &clock(ready_at + 1));
            let is_finalized = matches!(again, Err(TimelockError::OperationAlreadyFinalized(_)));
            prop_assert!(is_finalized, "second execute returned {:?}", again);
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 3. Minimum delay
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #[test]
        fn short_delays_are_rejected(delay in 0..MIN_DELAY, now in 0..1_000_000u64) {
            let mut organization = organization();
            let (registry, timelock) = organization.timelock_parts();
            let result = timelock.schedule(
                registry,
                &account(GOVERNOR),
                set_voting_delay(1),
                None,
                Hash::default(),
                delay,
                &clock(now),
            );
            let is_too_short = matches!(result, Err(TimelockError::DelayTooShort { .. }));
            prop_assert!(is_too_short, "delay {} returned {:?}", delay, result);
        }
    }
}
