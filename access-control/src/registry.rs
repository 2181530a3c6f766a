//! The permission registry: single source of truth for "who may act as whom"
//! and "who may invoke what".

use {
    crate::{
        action::{ActionId, ActionKey, ActionTable},
        error::AccessControlError,
        event::AccessControlEvent,
        role::{Role, RoleTable},
    },
    log::*,
    solana_pubkey::Pubkey,
};

fn check_len(expected: usize, actual: usize) -> Result<(), AccessControlError> {
    if expected != actual {
        return Err(AccessControlError::ArrayLengthMismatch { expected, actual });
    }
    Ok(())
}

/// The open role never gets an admin or members, and root stays its own admin.
fn ensure_administrable(role: &Role, admin: &Role) -> Result<(), AccessControlError> {
    if role.is_open() || (role.is_root() && !admin.is_root()) {
        return Err(AccessControlError::ProtectedRole(*role));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct PermissionRegistry {
    /// Address calls use to target this registry.
    address: Pubkey,
    initialized: bool,
    roles: RoleTable,
    actions: ActionTable,
    events: Vec<AccessControlEvent>,
}

impl PermissionRegistry {
    pub fn new(address: Pubkey) -> Self {
        Self {
            address,
            initialized: false,
            roles: RoleTable::new(),
            actions: ActionTable::new(),
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// One-time setup.  Grants [`Role::ROOT`] to `root_account`, registers
    /// `roles[i]` with admin `admins[i]` (use [`Role::ROOT`] for "no explicit
    /// admin") and members `members[i]`, then authorizes `action_roles[j]` on
    /// `(action_targets[j], action_ids[j])`.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        &mut self,
        root_account: Pubkey,
        roles: &[Role],
        admins: &[Role],
        members: &[Vec<Pubkey>],
        action_targets: &[Pubkey],
        action_ids: &[ActionId],
        action_roles: &[Vec<Role>],
    ) -> Result<(), AccessControlError> {
        if self.initialized {
            return Err(AccessControlError::AlreadyInitialized);
        }
        check_len(roles.len(), admins.len())?;
        check_len(roles.len(), members.len())?;
        check_len(action_targets.len(), action_ids.len())?;
        check_len(action_targets.len(), action_roles.len())?;
        for (role, admin) in roles.iter().zip(admins) {
            ensure_administrable(role, admin)?;
        }

        self.initialized = true;
        let sender = self.address;
        self.grant(Role::ROOT, root_account, sender);
        for ((role, admin), accounts) in roles.iter().zip(admins).zip(members) {
            self.set_admin(*role, *admin);
            for account in accounts {
                self.grant(*role, *account, sender);
            }
        }
        for ((target, action), granted) in action_targets.iter().zip(action_ids).zip(action_roles) {
            self.add_action(ActionKey::new(*target, *action), granted);
        }

        info!(
            "PermissionRegistry {}: initialised, root={root_account}, roles={}, actions={}",
            self.address,
            roles.len(),
            action_targets.len()
        );
        Ok(())
    }

    /// Root-level bulk update: overwrite each role's admin and add members.
    ///
    /// The caller must hold the admin role of [`Role::ROOT`].
    pub fn grant_roles_and_admins(
        &mut self,
        caller: &Pubkey,
        roles: &[Role],
        admins: &[Role],
        members: &[Vec<Pubkey>],
    ) -> Result<(), AccessControlError> {
        self.require_controller_admin(caller)?;
        check_len(roles.len(), admins.len())?;
        check_len(roles.len(), members.len())?;
        for (role, admin) in roles.iter().zip(admins) {
            ensure_administrable(role, admin)?;
        }

        for ((role, admin), accounts) in roles.iter().zip(admins).zip(members) {
            self.set_admin(*role, *admin);
            for account in accounts {
                self.grant(*role, *account, *caller);
            }
        }
        Ok(())
    }

    pub fn admin_grant_role(
        &mut self,
        caller: &Pubkey,
        role: Role,
        account: Pubkey,
    ) -> Result<(), AccessControlError> {
        if role.is_open() {
            return Err(AccessControlError::ProtectedRole(role));
        }
        self.require_role(self.role_admin(&role), caller)?;
        self.grant(role, account, *caller);
        Ok(())
    }

    pub fn admin_revoke_role(
        &mut self,
        caller: &Pubkey,
        role: Role,
        account: Pubkey,
    ) -> Result<(), AccessControlError> {
        if role.is_open() {
            return Err(AccessControlError::ProtectedRole(role));
        }
        self.require_role(self.role_admin(&role), caller)?;
        self.revoke(role, account, *caller);
        Ok(())
    }

    /// Self-service removal.  Removal of other accounts goes through
    /// [`Self::admin_revoke_role`].
    pub fn user_renounce_role(
        &mut self,
        caller: &Pubkey,
        role: Role,
        account: Pubkey,
    ) -> Result<(), AccessControlError> {
        if *caller != account {
            warn!("PermissionRegistry: {caller} tried to renounce {role} on behalf of {account}");
            return Err(AccessControlError::OnlySelfRenounce {
                caller: *caller,
                account,
            });
        }
        if role.is_open() {
            return Err(AccessControlError::ProtectedRole(role));
        }
        self.revoke(role, account, *caller);
        Ok(())
    }

    pub fn add_actions_roles(
        &mut self,
        caller: &Pubkey,
        targets: &[Pubkey],
        actions: &[ActionId],
        roles: &[Vec<Role>],
    ) -> Result<(), AccessControlError> {
        self.require_controller(caller)?;
        check_len(targets.len(), actions.len())?;
        check_len(targets.len(), roles.len())?;

        for ((target, action), granted) in targets.iter().zip(actions).zip(roles) {
            self.add_action(ActionKey::new(*target, *action), granted);
        }
        Ok(())
    }

    pub fn remove_actions_roles(
        &mut self,
        caller: &Pubkey,
        targets: &[Pubkey],
        actions: &[ActionId],
        roles: &[Vec<Role>],
    ) -> Result<(), AccessControlError> {
        self.require_controller(caller)?;
        check_len(targets.len(), actions.len())?;
        check_len(targets.len(), roles.len())?;

        for ((target, action), revoked) in targets.iter().zip(actions).zip(roles) {
            let key = ActionKey::new(*target, *action);
            let removed = self.actions.remove(&key, revoked);
            if !removed.is_empty() {
                debug!("PermissionRegistry: action {action} on {target} lost {} role(s)", removed.len());
                self.events.push(AccessControlEvent::ActionRolesRemoved {
                    target: *target,
                    action: *action,
                    roles: removed,
                });
            }
        }
        Ok(())
    }

    // -- Queries --

    pub fn has_role(&self, role: &Role, account: &Pubkey) -> bool {
        self.roles.has_role(role, account)
    }

    pub fn role_admin(&self, role: &Role) -> Role {
        self.roles.admin_of(role)
    }

    pub fn action_roles(&self, target: &Pubkey, action: ActionId) -> &[Role] {
        self.actions.roles(&ActionKey::new(*target, action))
    }

    /// `role` is listed for the action, or the action is open to everyone.
    pub fn is_role_authorized(&self, target: &Pubkey, action: ActionId, role: &Role) -> bool {
        let roles = self.action_roles(target, action);
        roles.contains(role) || roles.contains(&Role::OPEN)
    }

    /// Some role `account` holds is authorized for the action.
    pub fn is_authorized(&self, target: &Pubkey, action: ActionId, account: &Pubkey) -> bool {
        self.action_roles(target, action)
            .iter()
            .any(|role| self.roles.has_role(role, account))
    }

    pub fn role_table(&self) -> &RoleTable {
        &self.roles
    }

    pub fn take_events(&mut self) -> Vec<AccessControlEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Internals --

    fn require_role(&self, role: Role, account: &Pubkey) -> Result<(), AccessControlError> {
        if !self.roles.has_role(&role, account) {
            warn!("PermissionRegistry: {account} is missing role {role}");
            return Err(AccessControlError::MissingRole {
                account: *account,
                role,
            });
        }
        Ok(())
    }

    fn require_controller(&self, account: &Pubkey) -> Result<(), AccessControlError> {
        if !self.roles.has_role(&Role::ROOT, account) {
            warn!("PermissionRegistry: {account} is not a controller");
            return Err(AccessControlError::Unauthorized { account: *account });
        }
        Ok(())
    }

    fn require_controller_admin(&self, account: &Pubkey) -> Result<(), AccessControlError> {
        let admin = self.roles.admin_of(&Role::ROOT);
        if !self.roles.has_role(&admin, account) {
            warn!("PermissionRegistry: {account} does not administer the controller role");
            return Err(AccessControlError::Unauthorized { account: *account });
        }
        Ok(())
    }

    fn set_admin(&mut self, role: Role, admin: Role) {
        let previous_admin = self.roles.set_admin(role, admin);
        self.events.push(AccessControlEvent::RoleAdminChanged {
            role,
            previous_admin,
            new_admin: admin,
        });
    }

    fn grant(&mut self, role: Role, account: Pubkey, sender: Pubkey) {
        if self.roles.grant(role, account) {
            info!("PermissionRegistry: granted {role} to {account}");
            self.events.push(AccessControlEvent::RoleGranted {
                role,
                account,
                sender,
            });
        }
    }

    fn revoke(&mut self, role: Role, account: Pubkey, sender: Pubkey) {
        if self.roles.revoke(&role, &account) {
            info!("PermissionRegistry: revoked {role} from {account}");
            self.events.push(AccessControlEvent::RoleRevoked {
                role,
                account,
                sender,
            });
        }
    }

    fn add_action(&mut self, key: ActionKey, roles: &[Role]) {
        let added = self.actions.add(key, roles);
        if !added.is_empty() {
            debug!(
                "PermissionRegistry: action {} on {} gained {} role(s)",
                key.action,
                key.target,
                added.len()
            );
            self.events.push(AccessControlEvent::ActionRolesAdded {
                target: key.target,
                action: key.action,
                roles: added,
            });
        }
    }
}
