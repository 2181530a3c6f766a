//! TRv1 Governance
//!
//! Proposal-driven control of an organization.  Holders of voting weight
//! propose call batches, vote on them with their weight at a snapshot slot,
//! and a succeeded batch is queued on the timelock and executed once its
//! delay has elapsed.
//!
//! ## Components
//!
//! - [`Organization`]: the registry, timelock, governor and external call
//!   targets of one organization.  It routes calls by target address and is
//!   cloned to stage a batch.
//! - [`Governor`]: settings, proposal ledger and governance events.  Settings
//!   are changed only by batches the timelock executes.
//! - [`GovernanceEngine`]: the proposal lifecycle, reading weights from a
//!   [`VotingWeightSource`].
//! - [`organization_genesis`]: the standard role wiring between the three
//!   built-in components.
//!
//! All times are slots taken from the caller-supplied
//! [`solana_clock::Clock`].

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod event;
pub mod genesis;
pub mod governor;
pub mod instruction;
pub mod ledger;
pub mod organization;
pub mod state;
pub mod vote_weight;

// Re-exports for convenience
pub use config::{ConfigError, GovernorConfig};
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use event::GovernanceEvent;
pub use genesis::{canceller_role, executor_role, organization_genesis, proposer_role};
pub use governor::Governor;
pub use instruction::GovernorInstruction;
pub use ledger::ProposalLedger;
pub use organization::Organization;
pub use state::{hash_description, hash_proposal, Proposal, ProposalState, Vote, VoteRecord, VoteTally};
pub use vote_weight::{Checkpoint, CheckpointError, VotingWeightSource, WeightCheckpoints};
