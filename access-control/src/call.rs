//! Calls and the seams they are dispatched through.

use {
    crate::{
        action::ActionId,
        error::{AccessControlError, ErrorKind},
        registry::PermissionRegistry,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    solana_clock::Clock,
    solana_pubkey::Pubkey,
    std::any::Any,
    thiserror::Error,
};

/// Error type returned by external call targets.
pub type TargetError = Box<dyn std::error::Error + Send + Sync>;

/// One privileged call: `payload` is delivered to `target` along with `value`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Call {
    pub target: Pubkey,
    pub value: u64,
    pub payload: Vec<u8>,
}

impl Call {
    pub fn new(target: Pubkey, value: u64, payload: Vec<u8>) -> Self {
        Self {
            target,
            value,
            payload,
        }
    }

    /// Build a call carrying a bincode-encoded instruction.
    pub fn instruction<T: Serialize>(
        target: Pubkey,
        value: u64,
        instruction: &T,
    ) -> bincode::Result<Self> {
        let payload = bincode::serialize(instruction)?;
        Ok(Self::new(target, value, payload))
    }

    /// Build a batch from parallel arrays.
    pub fn zip(
        targets: &[Pubkey],
        values: &[u64],
        payloads: &[Vec<u8>],
    ) -> Result<Vec<Call>, AccessControlError> {
        for len in [values.len(), payloads.len()] {
            if len != targets.len() {
                return Err(AccessControlError::ArrayLengthMismatch {
                    expected: targets.len(),
                    actual: len,
                });
            }
        }
        Ok(targets
            .iter()
            .zip(values)
            .zip(payloads)
            .map(|((target, value), payload)| Call::new(*target, *value, payload.clone()))
            .collect())
    }

    pub fn action(&self) -> Option<ActionId> {
        ActionId::from_payload(&self.payload)
    }
}

/// An external collaborator (treasury, token, ...) that receives forwarded
/// calls.  Implementations must be cloneable so a batch can run against a
/// staged copy of the world.
pub trait CallTarget: Send + Sync {
    fn invoke(&mut self, caller: &Pubkey, value: u64, payload: &[u8]) -> Result<(), TargetError>;

    fn clone_box(&self) -> Box<dyn CallTarget>;

    /// Downcast hook for embedders inspecting their own targets.
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn CallTarget> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for dyn CallTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CallTarget")
    }
}

/// The world a call batch runs against.
pub trait CallHost {
    fn registry(&self) -> &PermissionRegistry;

    /// Deliver one call, already authorized, on behalf of `caller`.
    fn dispatch(&mut self, caller: &Pubkey, call: &Call, clock: &Clock) -> Result<(), CallError>;
}

#[derive(Error, Debug)]
pub enum CallError {
    #[error("No call target registered at {0}")]
    UnknownTarget(Pubkey),

    #[error("Payload for {target} could not be decoded")]
    InvalidPayload { target: Pubkey },

    #[error("Call to {target} reverted: {source}")]
    Reverted {
        target: Pubkey,
        #[source]
        source: TargetError,
    },

    #[error(transparent)]
    AccessControl(#[from] AccessControlError),
}

impl CallError {
    pub fn reverted<E>(target: Pubkey, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Reverted {
            target,
            source: Box::new(err),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownTarget(_) | Self::InvalidPayload { .. } => ErrorKind::Input,
            Self::Reverted { .. } => ErrorKind::State,
            Self::AccessControl(err) => err.kind(),
        }
    }
}
