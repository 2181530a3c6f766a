//! Instruction processing for the permission registry.

use {
    crate::{
        error::AccessControlError, instruction::RegistryInstruction, registry::PermissionRegistry,
    },
    log::*,
    solana_bincode::limited_deserialize,
    solana_pubkey::Pubkey,
};

/// Upper bound on a decoded instruction payload.
pub const MAX_INSTRUCTION_DATA_LEN: u64 = 64 * 1024;

impl PermissionRegistry {
    /// Decode `payload` as a [`RegistryInstruction`] and run it as `caller`.
    pub fn process_instruction(
        &mut self,
        caller: &Pubkey,
        payload: &[u8],
    ) -> Result<(), AccessControlError> {
        let instruction: RegistryInstruction =
            limited_deserialize(payload, MAX_INSTRUCTION_DATA_LEN)
                .map_err(|_| AccessControlError::InvalidInstruction)?;

        trace!("registry process_instruction: {instruction:?}");

        match instruction {
            RegistryInstruction::GrantRolesAndAdmins {
                roles,
                admins,
                members,
            } => self.grant_roles_and_admins(caller, &roles, &admins, &members),
            RegistryInstruction::AdminGrantRole { role, account } => {
                self.admin_grant_role(caller, role, account)
            }
            RegistryInstruction::AdminRevokeRole { role, account } => {
                self.admin_revoke_role(caller, role, account)
            }
            RegistryInstruction::UserRenounceRole { role, account } => {
                self.user_renounce_role(caller, role, account)
            }
            RegistryInstruction::AddActionsRoles {
                targets,
                actions,
                roles,
            } => self.add_actions_roles(caller, &targets, &actions, &roles),
            RegistryInstruction::RemoveActionsRoles {
                targets,
                actions,
                roles,
            } => self.remove_actions_roles(caller, &targets, &actions, &roles),
        }
    }
}
