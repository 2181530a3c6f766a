//! Errors for the TRv1 governance engine.

use {
    crate::{config::ConfigError, state::ProposalState},
    solana_hash::Hash,
    solana_pubkey::Pubkey,
    thiserror::Error,
    trv1_access_control::{AccessControlError, ErrorKind, GatewayError},
    trv1_timelock::TimelockError,
};

#[derive(Error, Debug)]
pub enum GovernanceError {
    #[error("Proposal {0} already exists and has not been resolved")]
    AlreadyExists(Hash),

    #[error("Proposal {0} does not exist or was never queued")]
    UnknownProposal(Hash),

    #[error("Proposal {id} is {state:?}, not open for this operation")]
    NotActive { id: Hash, state: ProposalState },

    #[error("Account {voter} already voted on proposal {id}")]
    AlreadyVoted { id: Hash, voter: Pubkey },

    #[error("Proposer weight {weight} is below the proposal threshold {threshold}")]
    BelowThreshold { weight: u64, threshold: u64 },

    #[error("Proposal {id} is {state:?}, not Succeeded")]
    ProposalNotSuccessful { id: Hash, state: ProposalState },

    #[error("Proposer of {id} still holds {weight} >= threshold {threshold}; only the proposer may cancel")]
    ProposerAboveThreshold {
        id: Hash,
        weight: u64,
        threshold: u64,
    },

    #[error("A proposal must contain at least one call")]
    EmptyProposal,

    #[error("Only the governance timelock may do this, called by {caller}")]
    OnlyGovernance { caller: Pubkey },

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Governor instruction data is invalid")]
    InvalidInstruction,

    #[error("Proposal calls cannot be encoded: {0}")]
    Encoding(std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Timelock(#[from] TimelockError),

    #[error(transparent)]
    AccessControl(#[from] AccessControlError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProposerAboveThreshold { .. } | Self::OnlyGovernance { .. } => {
                ErrorKind::Authorization
            }
            Self::AlreadyExists(_)
            | Self::UnknownProposal(_)
            | Self::NotActive { .. }
            | Self::AlreadyVoted { .. }
            | Self::ProposalNotSuccessful { .. } => ErrorKind::State,
            Self::BelowThreshold { .. }
            | Self::EmptyProposal
            | Self::ArithmeticOverflow
            | Self::InvalidInstruction
            | Self::Encoding(_)
            | Self::Config(_) => ErrorKind::Input,
            Self::Timelock(err) => err.kind(),
            Self::AccessControl(err) => err.kind(),
            Self::Gateway(err) => err.kind(),
        }
    }
}
