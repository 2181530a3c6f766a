use {
    crate::state::Vote,
    solana_hash::Hash,
    solana_pubkey::Pubkey,
    trv1_access_control::Call,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernanceEvent {
    ProposalCreated {
        id: Hash,
        proposer: Pubkey,
        calls: Vec<Call>,
        description: String,
        vote_start: u64,
        vote_end: u64,
    },
    VoteCast {
        id: Hash,
        voter: Pubkey,
        vote: Vote,
        weight: u64,
    },
    /// Late quorum pushed the deadline out.
    ProposalExtended {
        id: Hash,
        deadline: u64,
    },
    ProposalCanceled {
        id: Hash,
    },
    ProposalQueued {
        id: Hash,
        operation_id: Hash,
        eta: u64,
    },
    ProposalExecuted {
        id: Hash,
    },
    SettingUpdated {
        setting: &'static str,
        old_value: u64,
        new_value: u64,
    },
}
