//! Observability events emitted by the permission registry.

use {
    crate::{action::ActionId, role::Role},
    solana_pubkey::Pubkey,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessControlEvent {
    RoleGranted {
        role: Role,
        account: Pubkey,
        sender: Pubkey,
    },
    RoleRevoked {
        role: Role,
        account: Pubkey,
        sender: Pubkey,
    },
    RoleAdminChanged {
        role: Role,
        previous_admin: Role,
        new_admin: Role,
    },
    ActionRolesAdded {
        target: Pubkey,
        action: ActionId,
        roles: Vec<Role>,
    },
    ActionRolesRemoved {
        target: Pubkey,
        action: ActionId,
        roles: Vec<Role>,
    },
}
