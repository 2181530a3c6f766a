//! The governance engine: proposal lifecycle on top of an [`Organization`].
//!
//! ## Lifecycle
//!
//! ```text
//! propose ─▶ Pending ─(vote_start)─▶ Active ─(deadline)─▶ Defeated
//!                                        │                 Succeeded ─queue─▶ Queued ─execute─▶ Executed
//!    cancel from any non-final state ──▶ Canceled
//! ```
//!
//! | Transition | Rule |
//! |------------|------|
//! | propose    | proposer weight at `now - 1` ≥ `proposal_threshold` |
//! | cast_vote  | `snapshot < now < deadline`; weight read at `snapshot` |
//! | Defeated   | `for ≤ against`, or `for + against + abstain < quorum(snapshot)` |
//! | queue      | state is `Succeeded`; batch scheduled with the timelock's minimum delay |
//! | execute    | timelock operation has matured |
//! | cancel     | proposer any time before execution; others only once the proposer fell below threshold |
//!
//! The snapshot is the slot before `vote_start`.  It is already closed when
//! voting opens, so weight moved or minted while votes are cast never counts.
//!
//! `queue` and `execute` are permissionless: the governor address is the
//! caller the timelock sees, and the timelock is the caller every proposal
//! call is authorized as.

use {
    crate::{
        config::GovernorConfig,
        constants::QUORUM_DENOMINATOR,
        error::GovernanceError,
        event::GovernanceEvent,
        governor::Governor,
        organization::Organization,
        state::{hash_description, hash_proposal, Proposal, ProposalState, Vote, VoteTally},
        vote_weight::VotingWeightSource,
    },
    log::*,
    solana_clock::Clock,
    solana_hash::Hash,
    solana_pubkey::Pubkey,
    std::collections::BTreeMap,
    trv1_access_control::{gateway, Call, CallTarget, PermissionRegistry},
    trv1_timelock::{Timelock, TimelockHost},
};

/// `total_supply_at(snapshot) * numerator / 100`, rounded down.
fn quorum_at<W: VotingWeightSource>(
    weights: &W,
    snapshot: u64,
    numerator: u64,
) -> Result<u64, GovernanceError> {
    let quorum = u128::from(weights.total_supply_at(snapshot))
        .checked_mul(u128::from(numerator))
        .and_then(|scaled| scaled.checked_div(u128::from(QUORUM_DENOMINATOR)))
        .ok_or(GovernanceError::ArithmeticOverflow)?;
    u64::try_from(quorum).map_err(|_| GovernanceError::ArithmeticOverflow)
}

fn quorum_met(tally: &VoteTally, quorum: u64) -> bool {
    tally.turnout() >= u128::from(quorum)
}

pub struct GovernanceEngine<W> {
    organization: Organization,
    weights: W,
}

impl<W: VotingWeightSource> GovernanceEngine<W> {
    pub fn new(organization: Organization, weights: W) -> Self {
        Self {
            organization,
            weights,
        }
    }

    // -- Accessors --

    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    pub fn registry(&self) -> &PermissionRegistry {
        &self.organization.registry
    }

    pub fn registry_mut(&mut self) -> &mut PermissionRegistry {
        &mut self.organization.registry
    }

    pub fn timelock(&self) -> &Timelock {
        &self.organization.timelock
    }

    pub fn timelock_mut(&mut self) -> &mut Timelock {
        &mut self.organization.timelock
    }

    pub fn governor(&self) -> &Governor {
        &self.organization.governor
    }

    pub fn config(&self) -> &GovernorConfig {
        self.organization.governor.config()
    }

    pub fn weights(&self) -> &W {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut W {
        &mut self.weights
    }

    pub fn register_target(
        &mut self,
        address: Pubkey,
        target: Box<dyn CallTarget>,
    ) -> Option<Box<dyn CallTarget>> {
        self.organization.register_target(address, target)
    }

    /// Drain the governor's events.  Registry and timelock events are drained
    /// through [`Self::registry_mut`] and [`Self::timelock_mut`].
    pub fn take_events(&mut self) -> Vec<GovernanceEvent> {
        self.organization.governor.take_events()
    }

    // -- Queries --

    /// Id a proposal of `calls` with `description` would get.
    pub fn hash_proposal(calls: &[Call], description: &str) -> Result<Hash, GovernanceError> {
        hash_proposal(calls, &hash_description(description))
    }

    pub fn proposal(&self, id: &Hash) -> Option<&Proposal> {
        self.organization.governor.ledger.get(id)
    }

    fn get(&self, id: &Hash) -> Result<&Proposal, GovernanceError> {
        self.proposal(id)
            .ok_or(GovernanceError::UnknownProposal(*id))
    }

    /// Slot at which the proposal's vote weights and quorum are read.
    pub fn proposal_snapshot(&self, id: &Hash) -> Result<u64, GovernanceError> {
        Ok(self.get(id)?.snapshot())
    }

    pub fn proposal_deadline(&self, id: &Hash) -> Result<u64, GovernanceError> {
        Ok(self.get(id)?.deadline())
    }

    pub fn proposal_eta(&self, id: &Hash) -> Result<Option<u64>, GovernanceError> {
        Ok(self.get(id)?.eta)
    }

    /// `(against, for, abstain)`.
    pub fn proposal_votes(&self, id: &Hash) -> Result<(u64, u64, u64), GovernanceError> {
        let tally = self.get(id)?.tally;
        Ok((tally.against_votes, tally.for_votes, tally.abstain_votes))
    }

    pub fn has_voted(&self, id: &Hash, account: &Pubkey) -> bool {
        self.proposal(id)
            .map(|proposal| proposal.has_voted(account))
            .unwrap_or(false)
    }

    /// Quorum at `snapshot` under the current quorum numerator.
    pub fn quorum(&self, snapshot: u64) -> Result<u64, GovernanceError> {
        quorum_at(&self.weights, snapshot, self.config().quorum_numerator)
    }

    pub fn state(&self, id: &Hash, clock: &Clock) -> Result<ProposalState, GovernanceError> {
        self.derive_state(self.get(id)?, clock.slot)
    }

    fn derive_state(&self, proposal: &Proposal, now: u64) -> Result<ProposalState, GovernanceError> {
        let timelock = &self.organization.timelock;
        let operation_canceled = proposal
            .operation_id
            .is_some_and(|operation| timelock.is_operation_canceled(&operation));
        if proposal.canceled || operation_canceled {
            return Ok(ProposalState::Canceled);
        }
        if now <= proposal.snapshot() {
            return Ok(ProposalState::Pending);
        }
        if now < proposal.deadline() {
            return Ok(ProposalState::Active);
        }

        let quorum = quorum_at(&self.weights, proposal.snapshot(), proposal.quorum_numerator)?;
        if !proposal.tally.majority_for() || !quorum_met(&proposal.tally, quorum) {
            return Ok(ProposalState::Defeated);
        }
        Ok(match proposal.operation_id {
            Some(operation) if timelock.is_operation_done(&operation) => ProposalState::Executed,
            Some(_) => ProposalState::Queued,
            None => ProposalState::Succeeded,
        })
    }

    // -- Lifecycle --

    /// Create a proposal.  Voting opens `voting_delay` slots from now.
    pub fn propose(
        &mut self,
        proposer: &Pubkey,
        calls: Vec<Call>,
        description: &str,
        clock: &Clock,
    ) -> Result<Hash, GovernanceError> {
        if calls.is_empty() {
            return Err(GovernanceError::EmptyProposal);
        }
        let now = clock.slot;
        let description_hash = hash_description(description);
        let id = hash_proposal(&calls, &description_hash)?;

        if let Some(existing) = self.proposal(&id) {
            if !self.derive_state(existing, now)?.is_terminal() {
                return Err(GovernanceError::AlreadyExists(id));
            }
        }

        let config = self.config().clone();
        let weight = self.weights.weight_at(proposer, now.saturating_sub(1));
        if weight < config.proposal_threshold {
            warn!(
                "Governor: {proposer} has weight {weight}, below threshold {}",
                config.proposal_threshold
            );
            return Err(GovernanceError::BelowThreshold {
                weight,
                threshold: config.proposal_threshold,
            });
        }

        let vote_start = now
            .checked_add(config.voting_delay)
            .ok_or(GovernanceError::ArithmeticOverflow)?;
        let vote_end = vote_start
            .checked_add(config.voting_period)
            .ok_or(GovernanceError::ArithmeticOverflow)?;

        info!(
            "Governor: proposal {id} created by {proposer} ({} call(s)), voting {vote_start}..{vote_end}",
            calls.len()
        );
        let governor = &mut self.organization.governor;
        governor.events.push(GovernanceEvent::ProposalCreated {
            id,
            proposer: *proposer,
            calls: calls.clone(),
            description: description.to_string(),
            vote_start,
            vote_end,
        });
        governor.ledger.insert(Proposal {
            id,
            proposer: *proposer,
            calls,
            description_hash,
            created_at: now,
            vote_start,
            vote_end,
            extended_deadline: None,
            quorum_numerator: config.quorum_numerator,
            quorum_reached: false,
            tally: VoteTally::default(),
            votes: BTreeMap::new(),
            canceled: false,
            operation_id: None,
            eta: None,
        });
        Ok(id)
    }

    /// [`Self::propose`] taking the batch as parallel arrays.
    pub fn propose_batch(
        &mut self,
        proposer: &Pubkey,
        targets: &[Pubkey],
        values: &[u64],
        payloads: &[Vec<u8>],
        description: &str,
        clock: &Clock,
    ) -> Result<Hash, GovernanceError> {
        let calls = Call::zip(targets, values, payloads)?;
        self.propose(proposer, calls, description, clock)
    }

    /// Cast `voter`'s vote with its weight at the proposal snapshot.
    /// Returns the weight counted.
    pub fn cast_vote(
        &mut self,
        voter: &Pubkey,
        id: &Hash,
        vote: Vote,
        clock: &Clock,
    ) -> Result<u64, GovernanceError> {
        let now = clock.slot;
        let proposal = self.get(id)?;
        let state = self.derive_state(proposal, now)?;
        if state != ProposalState::Active {
            return Err(GovernanceError::NotActive { id: *id, state });
        }

        let snapshot = proposal.snapshot();
        let weight = self.weights.weight_at(voter, snapshot);
        let quorum = quorum_at(&self.weights, snapshot, proposal.quorum_numerator)?;
        let extended_deadline = now
            .checked_add(self.config().late_quorum_extension)
            .ok_or(GovernanceError::ArithmeticOverflow)?;

        let governor = &mut self.organization.governor;
        let proposal = governor.ledger.record_vote(id, *voter, vote, weight, now)?;
        debug!("Governor: {voter} voted {vote:?} on {id} with weight {weight}");
        governor.events.push(GovernanceEvent::VoteCast {
            id: *id,
            voter: *voter,
            vote,
            weight,
        });

        if !proposal.quorum_reached && quorum_met(&proposal.tally, quorum) {
            proposal.quorum_reached = true;
            if extended_deadline > proposal.deadline() {
                proposal.extended_deadline = Some(extended_deadline);
                info!("Governor: late quorum on {id}, deadline extended to {extended_deadline}");
                governor.events.push(GovernanceEvent::ProposalExtended {
                    id: *id,
                    deadline: extended_deadline,
                });
            }
        }
        Ok(weight)
    }

    /// Cancel a proposal that has not been executed.
    ///
    /// The proposer may always cancel.  Anyone else may cancel only once the
    /// proposer's weight has dropped below the proposal threshold.
    pub fn cancel(&mut self, caller: &Pubkey, id: &Hash, clock: &Clock) -> Result<(), GovernanceError> {
        let now = clock.slot;
        let proposal = self.get(id)?;
        let state = self.derive_state(proposal, now)?;
        if matches!(state, ProposalState::Canceled | ProposalState::Executed) {
            return Err(GovernanceError::NotActive { id: *id, state });
        }
        if *caller != proposal.proposer {
            let threshold = self.config().proposal_threshold;
            let weight = self
                .weights
                .weight_at(&proposal.proposer, now.saturating_sub(1));
            if weight >= threshold {
                warn!("Governor: {caller} may not cancel {id}, proposer still holds {weight}");
                return Err(GovernanceError::ProposerAboveThreshold {
                    id: *id,
                    weight,
                    threshold,
                });
            }
        }

        let queued_operation = proposal
            .operation_id
            .filter(|_| state == ProposalState::Queued);
        if let Some(operation) = queued_operation {
            let governor_address = self.organization.governor.address();
            let (registry, timelock) = self.organization.timelock_parts();
            timelock.cancel(registry, &governor_address, &operation, clock)?;
        }

        let governor = &mut self.organization.governor;
        governor.ledger.get_mut(id)?.canceled = true;
        info!("Governor: proposal {id} canceled by {caller}");
        governor
            .events
            .push(GovernanceEvent::ProposalCanceled { id: *id });
        Ok(())
    }

    /// Schedule a succeeded proposal on the timelock.  Returns the slot at
    /// which it can be executed.
    pub fn queue(&mut self, id: &Hash, clock: &Clock) -> Result<u64, GovernanceError> {
        let proposal = self.get(id)?;
        let state = self.derive_state(proposal, clock.slot)?;
        if state != ProposalState::Succeeded {
            return Err(GovernanceError::ProposalNotSuccessful { id: *id, state });
        }
        let calls = proposal.calls.clone();
        let salt = proposal.timelock_salt();

        let governor_address = self.organization.governor.address();
        let (registry, timelock) = self.organization.timelock_parts();
        let delay = timelock.min_delay();
        let eta = clock
            .slot
            .checked_add(delay)
            .ok_or(GovernanceError::ArithmeticOverflow)?;
        let operation_id =
            timelock.schedule(registry, &governor_address, calls, None, salt, delay, clock)?;

        let governor = &mut self.organization.governor;
        let proposal = governor.ledger.get_mut(id)?;
        proposal.operation_id = Some(operation_id);
        proposal.eta = Some(eta);
        info!("Governor: proposal {id} queued as {operation_id}, eta {eta}");
        governor.events.push(GovernanceEvent::ProposalQueued {
            id: *id,
            operation_id,
            eta,
        });
        Ok(eta)
    }

    /// Execute a queued proposal whose timelock delay has elapsed.
    pub fn execute(&mut self, id: &Hash, clock: &Clock) -> Result<(), GovernanceError> {
        let proposal = self.get(id)?;
        if proposal.operation_id.is_none() {
            return Err(GovernanceError::UnknownProposal(*id));
        }
        let calls = proposal.calls.clone();
        let salt = proposal.timelock_salt();
        let governor_address = self.organization.governor.address();

        trv1_timelock::execute(&mut self.organization, &governor_address, &calls, None, salt, clock)?;

        info!("Governor: proposal {id} executed");
        self.organization
            .governor
            .events
            .push(GovernanceEvent::ProposalExecuted { id: *id });
        Ok(())
    }

    /// Run `calls` as `caller` through the gateway, all-or-nothing.
    pub fn execute_calls(
        &mut self,
        caller: &Pubkey,
        calls: &[Call],
        clock: &Clock,
    ) -> Result<(), GovernanceError> {
        gateway::execute_batch(&mut self.organization, caller, calls, clock)?;
        Ok(())
    }

    /// [`Self::execute_calls`] taking the batch as parallel arrays.
    pub fn execute_batch(
        &mut self,
        caller: &Pubkey,
        targets: &[Pubkey],
        values: &[u64],
        payloads: &[Vec<u8>],
        clock: &Clock,
    ) -> Result<(), GovernanceError> {
        let calls = Call::zip(targets, values, payloads)?;
        self.execute_calls(caller, &calls, clock)
    }
}
