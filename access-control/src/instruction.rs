//! Registry instructions.
//!
//! Instructions are serialised via `bincode`, so the first four bytes of a
//! payload are the variant index.  The `*_ACTION` constants below are the
//! [`ActionId`]s to list in the registry's own action table.

use {
    crate::{action::ActionId, role::Role},
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryInstruction {
    /// Root-level bulk admin overwrite and membership grant.
    GrantRolesAndAdmins {
        roles: Vec<Role>,
        admins: Vec<Role>,
        members: Vec<Vec<Pubkey>>,
    },

    AdminGrantRole { role: Role, account: Pubkey },

    AdminRevokeRole { role: Role, account: Pubkey },

    /// `account` must be the caller.
    UserRenounceRole { role: Role, account: Pubkey },

    AddActionsRoles {
        targets: Vec<Pubkey>,
        actions: Vec<ActionId>,
        roles: Vec<Vec<Role>>,
    },

    RemoveActionsRoles {
        targets: Vec<Pubkey>,
        actions: Vec<ActionId>,
        roles: Vec<Vec<Role>>,
    },
}

impl RegistryInstruction {
    pub const GRANT_ROLES_AND_ADMINS_ACTION: ActionId = ActionId::from_index(0);
    pub const ADMIN_GRANT_ROLE_ACTION: ActionId = ActionId::from_index(1);
    pub const ADMIN_REVOKE_ROLE_ACTION: ActionId = ActionId::from_index(2);
    pub const USER_RENOUNCE_ROLE_ACTION: ActionId = ActionId::from_index(3);
    pub const ADD_ACTIONS_ROLES_ACTION: ActionId = ActionId::from_index(4);
    pub const REMOVE_ACTIONS_ROLES_ACTION: ActionId = ActionId::from_index(5);

    pub const ALL_ACTIONS: [ActionId; 6] = [
        Self::GRANT_ROLES_AND_ADMINS_ACTION,
        Self::ADMIN_GRANT_ROLE_ACTION,
        Self::ADMIN_REVOKE_ROLE_ACTION,
        Self::USER_RENOUNCE_ROLE_ACTION,
        Self::ADD_ACTIONS_ROLES_ACTION,
        Self::REMOVE_ACTIONS_ROLES_ACTION,
    ];

    pub fn action(&self) -> ActionId {
        match self {
            Self::GrantRolesAndAdmins { .. } => Self::GRANT_ROLES_AND_ADMINS_ACTION,
            Self::AdminGrantRole { .. } => Self::ADMIN_GRANT_ROLE_ACTION,
            Self::AdminRevokeRole { .. } => Self::ADMIN_REVOKE_ROLE_ACTION,
            Self::UserRenounceRole { .. } => Self::USER_RENOUNCE_ROLE_ACTION,
            Self::AddActionsRoles { .. } => Self::ADD_ACTIONS_ROLES_ACTION,
            Self::RemoveActionsRoles { .. } => Self::REMOVE_ACTIONS_ROLES_ACTION,
        }
    }
}
