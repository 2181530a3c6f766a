//! Timelock instructions, serialised via `bincode`.

use {
    serde::{Deserialize, Serialize},
    solana_hash::Hash,
    trv1_access_control::{ActionId, Call},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelockInstruction {
    /// Schedule `calls` to become executable after `delay` slots.
    Schedule {
        calls: Vec<Call>,
        predecessor: Option<Hash>,
        salt: Hash,
        delay: u64,
    },

    /// Execute a ready operation.  The batch is identified by its content.
    Execute {
        calls: Vec<Call>,
        predecessor: Option<Hash>,
        salt: Hash,
    },

    Cancel { id: Hash },

    /// Change the minimum delay.  Only accepted from the timelock itself.
    UpdateDelay { min_delay: u64 },
}

impl TimelockInstruction {
    pub const SCHEDULE_ACTION: ActionId = ActionId::from_index(0);
    pub const EXECUTE_ACTION: ActionId = ActionId::from_index(1);
    pub const CANCEL_ACTION: ActionId = ActionId::from_index(2);
    pub const UPDATE_DELAY_ACTION: ActionId = ActionId::from_index(3);

    pub fn action(&self) -> ActionId {
        match self {
            Self::Schedule { .. } => Self::SCHEDULE_ACTION,
            Self::Execute { .. } => Self::EXECUTE_ACTION,
            Self::Cancel { .. } => Self::CANCEL_ACTION,
            Self::UpdateDelay { .. } => Self::UPDATE_DELAY_ACTION,
        }
    }
}
