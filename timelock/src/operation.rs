//! Delayed operations and their content-derived ids.

use {
    crate::error::TimelockError,
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    solana_hash::Hash,
    trv1_access_control::Call,
};

/// Domain separator for operation ids.
const OPERATION_DOMAIN: &[u8] = b"trv1-timelock-operation";

/// Id of the operation running `calls` after `predecessor` with `salt`.
///
/// The batch is hashed in its Borsh encoding.  A batch or payload whose
/// length does not fit the `u32` prefix is rejected.
pub fn hash_operation(
    calls: &[Call],
    predecessor: Option<&Hash>,
    salt: &Hash,
) -> Result<Hash, TimelockError> {
    let encoded = borsh::to_vec(calls).map_err(TimelockError::Encoding)?;
    let predecessor = predecessor.copied().unwrap_or_default();
    Ok(solana_sha256_hasher::hashv(&[
        OPERATION_DOMAIN,
        &encoded,
        predecessor.as_ref(),
        salt.as_ref(),
    ]))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    /// Never scheduled.
    Unset,
    /// Scheduled, `ready_at` not yet reached.
    Waiting,
    /// Scheduled and executable.
    Ready,
    /// Executed.
    Done,
    Canceled,
}

/// A scheduled call batch.  Kept after execution or cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct DelayedOperation {
    pub id: Hash,
    pub calls: Vec<Call>,
    pub predecessor: Option<Hash>,
    pub salt: Hash,
    pub scheduled_at: u64,
    pub ready_at: u64,
    pub executed_at: Option<u64>,
    pub canceled_at: Option<u64>,
}

impl DelayedOperation {
    pub fn is_finalized(&self) -> bool {
        self.executed_at.is_some() || self.canceled_at.is_some()
    }

    pub fn state(&self, now: u64) -> OperationState {
        if self.executed_at.is_some() {
            OperationState::Done
        } else if self.canceled_at.is_some() {
            OperationState::Canceled
        } else if now < self.ready_at {
            OperationState::Waiting
        } else {
            OperationState::Ready
        }
    }
}
