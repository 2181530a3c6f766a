//! Proposal storage.
//!
//! One live record per proposal id.  When identical content is proposed again
//! after the earlier proposal reached a terminal state, the earlier record is
//! moved to the archive untouched.

use {
    crate::{
        error::GovernanceError,
        state::{Proposal, Vote, VoteRecord},
    },
    solana_hash::Hash,
    solana_pubkey::Pubkey,
    std::collections::HashMap,
};

#[derive(Debug, Clone, Default)]
pub struct ProposalLedger {
    proposals: HashMap<Hash, Proposal>,
    archive: Vec<Proposal>,
}

impl ProposalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &Hash) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &Hash) -> Result<&mut Proposal, GovernanceError> {
        self.proposals
            .get_mut(id)
            .ok_or(GovernanceError::UnknownProposal(*id))
    }

    /// Store `proposal`, archiving any record it supersedes.  The caller has
    /// already checked that the superseded record is terminal.
    pub(crate) fn insert(&mut self, proposal: Proposal) {
        if let Some(previous) = self.proposals.insert(proposal.id, proposal) {
            self.archive.push(previous);
        }
    }

    /// Record a vote and add its weight to the tally.
    pub(crate) fn record_vote(
        &mut self,
        id: &Hash,
        voter: Pubkey,
        vote: Vote,
        weight: u64,
        now: u64,
    ) -> Result<&mut Proposal, GovernanceError> {
        let proposal = self.get_mut(id)?;
        if proposal.has_voted(&voter) {
            return Err(GovernanceError::AlreadyVoted { id: *id, voter });
        }
        proposal.tally = proposal
            .tally
            .checked_add(vote, weight)
            .ok_or(GovernanceError::ArithmeticOverflow)?;
        proposal.votes.insert(
            voter,
            VoteRecord {
                vote,
                weight,
                cast_at: now,
            },
        );
        Ok(proposal)
    }

    /// Superseded records for `id`, oldest first.
    pub fn archived<'a>(&'a self, id: &'a Hash) -> impl Iterator<Item = &'a Proposal> + 'a {
        self.archive.iter().filter(move |proposal| proposal.id == *id)
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }
}
