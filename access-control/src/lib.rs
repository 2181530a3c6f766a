//! TRv1 Access Control
//!
//! Hierarchical, action-scoped permissions for a governed organization.
//!
//! ## Model
//!
//! - A [`Role`] is a fixed-width identifier with exactly one admin role.  The
//!   admin role's holders may grant and revoke membership of the role.
//! - [`Role::ROOT`] is the controller role.  It is its own admin and gates the
//!   bulk operations (`grant_roles_and_admins`, `add_actions_roles`,
//!   `remove_actions_roles`).
//! - [`Role::OPEN`] is held implicitly by every account.  It can be placed in
//!   an action's role list (or used as an admin role) to make something public,
//!   but it can never be granted, revoked or renounced.
//! - An *action* is a `(target, ActionId)` pair.  Each action carries an
//!   ordered set of roles allowed to invoke it.
//!
//! ## Execution
//!
//! Privileged calls are expressed as [`Call`]s and run through the
//! [`gateway`], which resolves each call's [`ActionId`] from the payload's
//! leading selector, checks [`PermissionRegistry::is_authorized`] and only
//! then dispatches.  A batch commits all of its effects or none of them.

pub mod action;
pub mod call;
pub mod error;
pub mod event;
pub mod gateway;
pub mod genesis;
pub mod instruction;
pub mod processor;
pub mod registry;
pub mod role;

// Re-exports for convenience
pub use action::{ActionId, ActionKey, ActionTable};
pub use call::{Call, CallError, CallHost, CallTarget, TargetError};
pub use error::{AccessControlError, ErrorKind, GatewayError};
pub use event::AccessControlEvent;
pub use genesis::RoleGenesis;
pub use instruction::RegistryInstruction;
pub use registry::PermissionRegistry;
pub use role::{Role, RoleTable};
