//! Declarative registry bootstrap.
//!
//! A [`RoleGenesis`] can be loaded from JSON (or any serde format) by an
//! embedder and applied once to a fresh registry.

use {
    crate::{action::ActionId, error::AccessControlError, registry::PermissionRegistry, role::Role},
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub role: Role,
    /// Omitted means root.
    #[serde(default)]
    pub admin: Role,
    #[serde(default)]
    pub members: Vec<Pubkey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub target: Pubkey,
    pub action: ActionId,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGenesis {
    pub root_account: Pubkey,
    #[serde(default)]
    pub roles: Vec<RoleEntry>,
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

impl RoleGenesis {
    pub fn new(root_account: Pubkey) -> Self {
        Self {
            root_account,
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: Role, admin: Role, members: Vec<Pubkey>) -> Self {
        self.roles.push(RoleEntry {
            role,
            admin,
            members,
        });
        self
    }

    pub fn with_action(mut self, target: Pubkey, action: ActionId, roles: Vec<Role>) -> Self {
        self.actions.push(ActionEntry {
            target,
            action,
            roles,
        });
        self
    }

    /// Run [`PermissionRegistry::initialize`] with this description.
    pub fn apply(&self, registry: &mut PermissionRegistry) -> Result<(), AccessControlError> {
        let roles: Vec<Role> = self.roles.iter().map(|entry| entry.role).collect();
        let admins: Vec<Role> = self.roles.iter().map(|entry| entry.admin).collect();
        let members: Vec<Vec<Pubkey>> = self.roles.iter().map(|entry| entry.members.clone()).collect();
        let targets: Vec<Pubkey> = self.actions.iter().map(|entry| entry.target).collect();
        let actions: Vec<ActionId> = self.actions.iter().map(|entry| entry.action).collect();
        let action_roles: Vec<Vec<Role>> =
            self.actions.iter().map(|entry| entry.roles.clone()).collect();

        registry.initialize(
            self.root_account,
            &roles,
            &admins,
            &members,
            &targets,
            &actions,
            &action_roles,
        )
    }
}
