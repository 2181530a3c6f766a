//! Proposal and vote records.
//!
//! A proposal's lifecycle state is never stored: it is derived on read from
//! the timestamps, flags and tallies kept here plus the timelock's flags for
//! the proposal's operation (see [`crate::GovernanceEngine::state`]).

use {
    crate::{
        constants::{DESCRIPTION_DOMAIN, PROPOSAL_DOMAIN},
        error::GovernanceError,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    solana_hash::Hash,
    solana_pubkey::Pubkey,
    std::collections::BTreeMap,
    trv1_access_control::Call,
};

/// Content hash of a proposal description.
pub fn hash_description(description: &str) -> Hash {
    solana_sha256_hasher::hashv(&[DESCRIPTION_DOMAIN, description.as_bytes()])
}

/// Proposal id: a hash over the Borsh-encoded call batch and the
/// description hash.
pub fn hash_proposal(calls: &[Call], description_hash: &Hash) -> Result<Hash, GovernanceError> {
    let encoded = borsh::to_vec(calls).map_err(GovernanceError::Encoding)?;
    Ok(solana_sha256_hasher::hashv(&[
        PROPOSAL_DOMAIN,
        &encoded,
        description_hash.as_ref(),
    ]))
}

/// Derived lifecycle state of a proposal.
///
/// ```text
/// Pending → Active → {Canceled, Defeated, Succeeded} → Queued → Executed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    /// Voting has not started.
    Pending,
    Active,
    Canceled,
    /// Voting ended without a majority or without quorum.
    Defeated,
    /// Voting ended with a majority and quorum; not yet queued.
    Succeeded,
    /// Waiting out the timelock delay.
    Queued,
    Executed,
}

impl ProposalState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Canceled | Self::Defeated | Self::Executed)
    }
}

/// The vote choice a participant casts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
#[borsh(use_discriminant = true)]
pub enum Vote {
    Against = 0,
    For = 1,
    Abstain = 2,
}

/// A cast vote.  The weight is fixed when the vote is cast.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct VoteRecord {
    pub vote: Vote,
    pub weight: u64,
    pub cast_at: u64,
}

/// Weight sums per vote choice.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct VoteTally {
    pub against_votes: u64,
    pub for_votes: u64,
    pub abstain_votes: u64,
}

impl VoteTally {
    /// Returns `None` on overflow.
    pub fn checked_add(&self, vote: Vote, weight: u64) -> Option<Self> {
        let mut tally = *self;
        let bucket = match vote {
            Vote::Against => &mut tally.against_votes,
            Vote::For => &mut tally.for_votes,
            Vote::Abstain => &mut tally.abstain_votes,
        };
        *bucket = bucket.checked_add(weight)?;
        Some(tally)
    }

    /// Everything cast, including against and abstain.  Widened so the sum
    /// cannot overflow.
    pub fn turnout(&self) -> u128 {
        u128::from(self.for_votes)
            .saturating_add(u128::from(self.against_votes))
            .saturating_add(u128::from(self.abstain_votes))
    }

    /// Strictly more for than against; a tie is a defeat.
    pub fn majority_for(&self) -> bool {
        self.for_votes > self.against_votes
    }
}

/// A proposal record.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Proposal {
    pub id: Hash,
    pub proposer: Pubkey,
    pub calls: Vec<Call>,
    pub description_hash: Hash,

    pub created_at: u64,
    /// First slot of the voting window.
    pub vote_start: u64,
    /// Original end of the voting window (exclusive).
    pub vote_end: u64,
    /// Set once if quorum was first reached close to the deadline.
    pub extended_deadline: Option<u64>,

    /// Quorum numerator in force when the proposal was created.
    pub quorum_numerator: u64,
    pub quorum_reached: bool,

    pub tally: VoteTally,
    pub votes: BTreeMap<Pubkey, VoteRecord>,

    pub canceled: bool,
    /// Timelock operation, once queued.
    pub operation_id: Option<Hash>,
    /// Slot at which the queued operation matures.
    pub eta: Option<u64>,
}

impl Proposal {
    /// End of the voting window (exclusive), including any extension.
    pub fn deadline(&self) -> u64 {
        self.extended_deadline
            .map(|extended| extended.max(self.vote_end))
            .unwrap_or(self.vote_end)
    }

    /// Slot at which vote weights and the quorum supply are read: the last
    /// slot before voting opens, so no vote can share a slot with it.
    pub fn snapshot(&self) -> u64 {
        self.vote_start.saturating_sub(1)
    }

    pub fn has_voted(&self, account: &Pubkey) -> bool {
        self.votes.contains_key(account)
    }

    /// Salt for the timelock operation.  Distinct per proposal instance, so
    /// identical content proposed again does not collide with an earlier
    /// operation.
    pub fn timelock_salt(&self) -> Hash {
        solana_sha256_hasher::hashv(&[
            crate::constants::SALT_DOMAIN,
            self.description_hash.as_ref(),
            &self.vote_start.to_le_bytes(),
        ])
    }
}
