//! Standard permission wiring for a governed organization.
//!
//! | Role | Held by | Gates |
//! |------|---------|-------|
//! | `ROOT` | timelock | registry mutations, timelock delay updates, governor settings |
//! | proposer | governor | timelock `Schedule` |
//! | executor | governor | timelock `Execute` |
//! | canceller | governor | timelock `Cancel` |
//!
//! Privileged actions of external targets (treasury, tokens) are added by the
//! embedder, normally gated by `ROOT` so that only matured proposals reach
//! them.

use {
    crate::{
        constants::{CANCELLER_ROLE_NAME, EXECUTOR_ROLE_NAME, PROPOSER_ROLE_NAME},
        instruction::GovernorInstruction,
    },
    solana_pubkey::Pubkey,
    trv1_access_control::{RegistryInstruction, Role, RoleGenesis},
    trv1_timelock::TimelockInstruction,
};

pub fn proposer_role() -> Role {
    Role::named(PROPOSER_ROLE_NAME)
}

pub fn executor_role() -> Role {
    Role::named(EXECUTOR_ROLE_NAME)
}

pub fn canceller_role() -> Role {
    Role::named(CANCELLER_ROLE_NAME)
}

/// Registry genesis wiring `registry`, `timelock` and `governor` together.
pub fn organization_genesis(registry: Pubkey, timelock: Pubkey, governor: Pubkey) -> RoleGenesis {
    let mut genesis = RoleGenesis::new(timelock)
        .with_role(proposer_role(), Role::ROOT, vec![governor])
        .with_role(executor_role(), Role::ROOT, vec![governor])
        .with_role(canceller_role(), Role::ROOT, vec![governor])
        .with_action(
            timelock,
            TimelockInstruction::SCHEDULE_ACTION,
            vec![proposer_role()],
        )
        .with_action(
            timelock,
            TimelockInstruction::EXECUTE_ACTION,
            vec![executor_role()],
        )
        .with_action(
            timelock,
            TimelockInstruction::CANCEL_ACTION,
            vec![canceller_role()],
        )
        .with_action(
            timelock,
            TimelockInstruction::UPDATE_DELAY_ACTION,
            vec![Role::ROOT],
        );
    for action in RegistryInstruction::ALL_ACTIONS {
        genesis = genesis.with_action(registry, action, vec![Role::ROOT]);
    }
    for action in GovernorInstruction::ALL_ACTIONS {
        genesis = genesis.with_action(governor, action, vec![Role::ROOT]);
    }
    genesis
}
