//! Governor settings instructions.
//!
//! Serialised via `bincode`.  The governor only accepts these from its
//! timelock, i.e. as calls of a proposal that passed and matured.

use {
    serde::{Deserialize, Serialize},
    trv1_access_control::ActionId,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernorInstruction {
    SetVotingDelay { voting_delay: u64 },
    SetVotingPeriod { voting_period: u64 },
    SetProposalThreshold { proposal_threshold: u64 },
    /// Affects proposals created afterwards only.
    UpdateQuorumNumerator { quorum_numerator: u64 },
    SetLateQuorumExtension { late_quorum_extension: u64 },
}

impl GovernorInstruction {
    pub const SET_VOTING_DELAY_ACTION: ActionId = ActionId::from_index(0);
    pub const SET_VOTING_PERIOD_ACTION: ActionId = ActionId::from_index(1);
    pub const SET_PROPOSAL_THRESHOLD_ACTION: ActionId = ActionId::from_index(2);
    pub const UPDATE_QUORUM_NUMERATOR_ACTION: ActionId = ActionId::from_index(3);
    pub const SET_LATE_QUORUM_EXTENSION_ACTION: ActionId = ActionId::from_index(4);

    pub const ALL_ACTIONS: [ActionId; 5] = [
        Self::SET_VOTING_DELAY_ACTION,
        Self::SET_VOTING_PERIOD_ACTION,
        Self::SET_PROPOSAL_THRESHOLD_ACTION,
        Self::UPDATE_QUORUM_NUMERATOR_ACTION,
        Self::SET_LATE_QUORUM_EXTENSION_ACTION,
    ];

    pub fn action(&self) -> ActionId {
        match self {
            Self::SetVotingDelay { .. } => Self::SET_VOTING_DELAY_ACTION,
            Self::SetVotingPeriod { .. } => Self::SET_VOTING_PERIOD_ACTION,
            Self::SetProposalThreshold { .. } => Self::SET_PROPOSAL_THRESHOLD_ACTION,
            Self::UpdateQuorumNumerator { .. } => Self::UPDATE_QUORUM_NUMERATOR_ACTION,
            Self::SetLateQuorumExtension { .. } => Self::SET_LATE_QUORUM_EXTENSION_ACTION,
        }
    }
}
