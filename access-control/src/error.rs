//! Errors for the access-control registry and the execution gateway.

use {
    crate::{action::ActionId, call::CallError, role::Role},
    solana_pubkey::Pubkey,
    thiserror::Error,
};

/// Coarse classification shared by every governance error type.
///
/// None of these are retried internally; recovery is always the caller's
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller lacks the role or admin relationship the operation needs.
    Authorization,
    /// The transition is invalid for the current lifecycle state.
    State,
    /// Malformed or insufficient input, rejected before any mutation.
    Input,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessControlError {
    #[error("Permission registry is already initialised")]
    AlreadyInitialized,

    #[error("Parallel input arrays differ in length: expected {expected}, got {actual}")]
    ArrayLengthMismatch { expected: usize, actual: usize },

    #[error("Account {account} does not hold the controller role")]
    Unauthorized { account: Pubkey },

    #[error("Account {account} is missing role {role}")]
    MissingRole { account: Pubkey, role: Role },

    #[error("Account {caller} can only renounce roles for itself, not for {account}")]
    OnlySelfRenounce { caller: Pubkey, account: Pubkey },

    #[error("Role {0} cannot be granted, revoked or re-administered")]
    ProtectedRole(Role),

    #[error("Registry instruction data is invalid")]
    InvalidInstruction,
}

impl AccessControlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } | Self::MissingRole { .. } | Self::OnlySelfRenounce { .. } => {
                ErrorKind::Authorization
            }
            Self::AlreadyInitialized => ErrorKind::State,
            Self::ArrayLengthMismatch { .. } | Self::ProtectedRole(_) | Self::InvalidInstruction => {
                ErrorKind::Input
            }
        }
    }
}

/// Errors surfaced by [`crate::gateway`] when running a call batch.
///
/// Any of these means the whole batch was discarded.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Call {index}: {caller} is not authorized for action {action} on {target}")]
    NotAuthorized {
        index: usize,
        caller: Pubkey,
        target: Pubkey,
        action: ActionId,
    },

    #[error("Call {index}: payload is too short to carry an action selector")]
    MissingSelector { index: usize },

    #[error("Call {index} failed: {source}")]
    CallFailed {
        index: usize,
        #[source]
        source: CallError,
    },
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthorized { .. } => ErrorKind::Authorization,
            Self::MissingSelector { .. } => ErrorKind::Input,
            Self::CallFailed { source, .. } => source.kind(),
        }
    }
}
