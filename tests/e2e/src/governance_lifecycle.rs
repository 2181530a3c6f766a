//! E2E Test: Governance Lifecycle
//!
//! Verifies the complete proposal flow against a wired organization:
//! - Propose → vote → succeed only after the window closes (Scenario B)
//! - Queue → timelock → execute exactly once (Scenario C)
//! - Proposals that change permissions and governor settings
//! - Cancellation rules and timelock cancellation
//! - Late-quorum deadline extension
//! - Snapshot-weighted voting under weight transfers

use {
    solana_hash::Hash,
    solana_pubkey::Pubkey,
    trv1_access_control::{Call, RegistryInstruction, Role},
    trv1_governance::{
        GovernanceError, GovernanceEvent, GovernorConfig, GovernorInstruction, ProposalState, Vote,
        VotingWeightSource,
    },
    trv1_governance_e2e_tests::helpers::*,
    trv1_timelock::{OperationState, TimelockError, TimelockEvent},
};

const PROPOSED_AT: u64 = 10;
const VOTE_START: u64 = PROPOSED_AT + VOTING_DELAY;
const SNAPSHOT: u64 = VOTE_START - 1;
const VOTE_END: u64 = VOTE_START + VOTING_PERIOD;

// ─────────────────────────────────────────────────────────────────────────────
// Scenario B: token transfer proposal succeeds only after vote-end
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_transfer_proposal_outcome() {
    init_logging();
    println!("\n========================================");
    println!("  GOVERNANCE: Transfer proposal (Scenario B)");
    println!("========================================\n");

    let mut engine = standard_organization();
    let recipient = holder(2);
    let id = engine
        .propose(
            &holder(0),
            vec![withdraw(recipient, 500)],
            "Transfer 500 to holder 3",
            &clock(PROPOSED_AT),
        )
        .unwrap();
    assert_eq!(engine.state(&id, &clock(PROPOSED_AT)).unwrap(), ProposalState::Pending);
    println!("✓ Proposal {id} created, Pending");

    assert_eq!(engine.proposal_snapshot(&id).unwrap(), SNAPSHOT);
    assert_eq!(engine.weights().total_supply_at(SNAPSHOT), 800);
    assert_eq!(engine.quorum(SNAPSHOT).unwrap(), 32);
    println!("✓ Quorum is 4% of 800 = 32");

    engine.cast_vote(&holder(0), &id, Vote::For, &clock(VOTE_START)).unwrap();
    engine.cast_vote(&holder(1), &id, Vote::For, &clock(VOTE_START + 3)).unwrap();
    assert_eq!(engine.proposal_votes(&id).unwrap(), (0, 200, 0));
    println!("✓ For=200, Against=0");

    assert_eq!(engine.state(&id, &clock(VOTE_END - 1)).unwrap(), ProposalState::Active);
    assert_eq!(engine.state(&id, &clock(VOTE_END)).unwrap(), ProposalState::Succeeded);
    println!("✓ Active until vote-end, Succeeded after");

    let events = engine.take_events();
    assert!(matches!(events[0], GovernanceEvent::ProposalCreated { .. }));
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, GovernanceEvent::VoteCast { .. }))
            .count(),
        2
    );
}

#[test]
fn test_majority_against_is_defeated() {
    init_logging();
    let mut engine = standard_organization();
    let id = engine
        .propose(&holder(0), vec![withdraw(holder(0), 1)], "Pay myself", &clock(PROPOSED_AT))
        .unwrap();
    engine.cast_vote(&holder(0), &id, Vote::For, &clock(VOTE_START)).unwrap();
    engine.cast_vote(&holder(3), &id, Vote::Against, &clock(VOTE_START)).unwrap();
    assert_eq!(engine.state(&id, &clock(VOTE_END)).unwrap(), ProposalState::Defeated);
    assert!(matches!(
        engine.queue(&id, &clock(VOTE_END)),
        Err(GovernanceError::ProposalNotSuccessful {
            state: ProposalState::Defeated,
            ..
        })
    ));
    println!("✓ Majority against: Defeated, cannot be queued");

    // Same content again, now that the first attempt is terminal.
    let again = engine
        .propose(&holder(0), vec![withdraw(holder(0), 1)], "Pay myself", &clock(VOTE_END))
        .unwrap();
    assert_eq!(again, id);
    assert_eq!(engine.state(&id, &clock(VOTE_END)).unwrap(), ProposalState::Pending);
    println!("✓ Defeated content re-proposed");
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenario C: queue → timelock → execute exactly once
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_queue_and_execute_through_timelock() {
    init_logging();
    println!("\n========================================");
    println!("  GOVERNANCE: Timelocked execution (Scenario C)");
    println!("========================================\n");

    let mut engine = standard_organization();
    let recipient = holder(2);
    let id = engine
        .propose(&holder(0), vec![withdraw(recipient, 500)], "Grant", &clock(PROPOSED_AT))
        .unwrap();
    engine.cast_vote(&holder(3), &id, Vote::For, &clock(VOTE_START)).unwrap();

    assert!(matches!(
        engine.queue(&id, &clock(VOTE_END - 1)),
        Err(GovernanceError::ProposalNotSuccessful {
            state: ProposalState::Active,
            ..
        })
    ));
    println!("✓ Queue before vote-end rejected");

    let eta = engine.queue(&id, &clock(VOTE_END)).unwrap();
    assert_eq!(eta, VOTE_END + MIN_DELAY);
    assert_eq!(engine.state(&id, &clock(VOTE_END)).unwrap(), ProposalState::Queued);
    let operation = engine.proposal(&id).unwrap().operation_id.unwrap();
    assert_eq!(
        engine.timelock().operation_state(&operation, &clock(VOTE_END)),
        OperationState::Waiting
    );
    println!("✓ Queued with eta {eta}");

    assert!(matches!(
        engine.execute(&id, &clock(VOTE_END)),
        Err(GovernanceError::Timelock(TimelockError::OperationNotReady { .. }))
    ));
    assert_eq!(treasury(&engine).paid_to(&recipient), 0);
    println!("✓ Execute immediately after queue rejected");

    engine.execute(&id, &clock(eta)).unwrap();
    assert_eq!(treasury(&engine).paid_to(&recipient), 500);
    assert_eq!(treasury(&engine).reserve, TREASURY_RESERVE - 500);
    assert_eq!(engine.state(&id, &clock(eta)).unwrap(), ProposalState::Executed);
    println!("✓ Executed at eta, 500 paid out");

    assert!(matches!(
        engine.execute(&id, &clock(eta + 1)),
        Err(GovernanceError::Timelock(TimelockError::OperationAlreadyFinalized(_)))
    ));
    assert_eq!(treasury(&engine).paid_to(&recipient), 500);
    println!("✓ Second execute rejected");

    let timelock_events = engine.timelock_mut().take_events();
    assert!(matches!(timelock_events[0], TimelockEvent::OperationScheduled { .. }));
    assert_eq!(timelock_events[1], TimelockEvent::OperationExecuted { id: operation });
}

#[test]
fn test_unqueued_proposal_cannot_execute() {
    init_logging();
    let mut engine = standard_organization();
    let id = engine
        .propose(&holder(0), vec![deposit(1)], "Deposit", &clock(PROPOSED_AT))
        .unwrap();
    assert!(matches!(
        engine.execute(&id, &clock(VOTE_END + MIN_DELAY)),
        Err(GovernanceError::UnknownProposal(_))
    ));
    assert!(matches!(
        engine.execute(&Hash::default(), &clock(VOTE_END)),
        Err(GovernanceError::UnknownProposal(_))
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Governance controls permissions and its own settings
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_proposal_grants_treasurer_withdraw_rights() {
    init_logging();
    println!("\n========================================");
    println!("  GOVERNANCE: Permission change by proposal");
    println!("========================================\n");

    let mut engine = standard_organization();
    let treasurer = Role::named("treasurer");
    let officer = holder(1);

    let calls = vec![
        Call::instruction(
            REGISTRY,
            0,
            &RegistryInstruction::AdminGrantRole {
                role: treasurer,
                account: officer,
            },
        )
        .unwrap(),
        Call::instruction(
            REGISTRY,
            0,
            &RegistryInstruction::AddActionsRoles {
                targets: vec![TREASURY],
                actions: vec![TreasuryInstruction::WITHDRAW_ACTION],
                roles: vec![vec![treasurer]],
            },
        )
        .unwrap(),
    ];
    let (id, eta) = pass_and_queue(&mut engine, calls, "Appoint a treasurer", PROPOSED_AT).unwrap();
    assert!(!engine.registry().has_role(&treasurer, &officer));

    engine.execute(&id, &clock(eta)).unwrap();
    assert!(engine.registry().has_role(&treasurer, &officer));
    println!("✓ Treasurer role granted by proposal");

    engine
        .execute_calls(&officer, &[withdraw(officer, 42)], &clock(eta + 1))
        .unwrap();
    assert_eq!(treasury(&engine).paid_to(&officer), 42);
    println!("✓ Treasurer withdraws directly through the gateway");

    // Nobody but the timelock can change the registry.
    let grant_self = Call::instruction(
        REGISTRY,
        0,
        &RegistryInstruction::AdminGrantRole {
            role: Role::ROOT,
            account: officer,
        },
    )
    .unwrap();
    assert!(engine
        .execute_calls(&officer, &[grant_self], &clock(eta + 1))
        .is_err());
    assert!(!engine.registry().has_role(&Role::ROOT, &officer));
    println!("✓ Direct registry change rejected");
}

#[test]
fn test_proposal_updates_governor_settings() {
    init_logging();
    let mut engine = standard_organization();
    let calls = vec![
        Call::instruction(
            GOVERNOR,
            0,
            &GovernorInstruction::UpdateQuorumNumerator { quorum_numerator: 30 },
        )
        .unwrap(),
        Call::instruction(
            GOVERNOR,
            0,
            &GovernorInstruction::SetProposalThreshold {
                proposal_threshold: 200,
            },
        )
        .unwrap(),
    ];
    let (id, eta) = pass_and_queue(&mut engine, calls, "Tighten governance", PROPOSED_AT).unwrap();
    engine.execute(&id, &clock(eta)).unwrap();

    assert_eq!(engine.config().quorum_numerator, 30);
    assert_eq!(engine.config().proposal_threshold, 200);
    assert!(engine.take_events().iter().any(|event| matches!(
        event,
        GovernanceEvent::SettingUpdated {
            setting: "quorum_numerator",
            old_value: QUORUM_NUMERATOR,
            new_value: 30
        }
    )));
    println!("✓ Quorum and threshold updated by proposal");

    assert!(matches!(
        engine.propose(&holder(0), vec![deposit(1)], "Too small", &clock(eta + 1)),
        Err(GovernanceError::BelowThreshold {
            weight: 100,
            threshold: 200
        })
    ));
    println!("✓ New threshold enforced");

    // An invalid setting reverts the whole proposal batch.
    let calls = vec![
        Call::instruction(GOVERNOR, 0, &GovernorInstruction::SetVotingDelay { voting_delay: 1 })
            .unwrap(),
        Call::instruction(GOVERNOR, 0, &GovernorInstruction::SetVotingPeriod { voting_period: 0 })
            .unwrap(),
    ];
    let start = eta + 1;
    let id = engine
        .propose(&holder(3), calls, "Break voting", &clock(start))
        .unwrap();
    let vote_start = engine.proposal(&id).unwrap().vote_start;
    engine.cast_vote(&holder(3), &id, Vote::For, &clock(vote_start)).unwrap();
    let deadline = engine.proposal_deadline(&id).unwrap();
    let eta = engine.queue(&id, &clock(deadline)).unwrap();
    assert!(engine.execute(&id, &clock(eta)).is_err());
    assert_eq!(engine.config().voting_delay, VOTING_DELAY);
    assert_eq!(engine.state(&id, &clock(eta)).unwrap(), ProposalState::Queued);
    println!("✓ Invalid settings batch rolled back");
}

// ─────────────────────────────────────────────────────────────────────────────
// Cancellation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_cancel_queued_proposal() {
    init_logging();
    let mut engine = standard_organization();
    let (id, eta) =
        pass_and_queue(&mut engine, vec![withdraw(holder(1), 10)], "Cancel me", PROPOSED_AT).unwrap();

    assert!(matches!(
        engine.cancel(&holder(1), &id, &clock(eta - 1)),
        Err(GovernanceError::ProposerAboveThreshold { .. })
    ));
    engine.cancel(&holder(0), &id, &clock(eta - 1)).unwrap();
    assert_eq!(engine.state(&id, &clock(eta)).unwrap(), ProposalState::Canceled);

    let operation = engine.proposal(&id).unwrap().operation_id.unwrap();
    assert_eq!(
        engine.timelock().operation_state(&operation, &clock(eta)),
        OperationState::Canceled
    );
    assert!(matches!(
        engine.execute(&id, &clock(eta)),
        Err(GovernanceError::Timelock(TimelockError::OperationAlreadyFinalized(_)))
    ));
    assert_eq!(treasury(&engine).paid_to(&holder(1)), 0);
    println!("✓ Queued proposal and its timelock operation canceled");
}

#[test]
fn test_anyone_cancels_once_proposer_loses_weight() {
    init_logging();
    let mut engine = standard_organization();
    let id = engine
        .propose(&holder(0), vec![deposit(1)], "Fragile", &clock(PROPOSED_AT))
        .unwrap();

    engine
        .weights_mut()
        .transfer(holder(0), holder(3), 100, VOTE_START)
        .unwrap();
    engine.cancel(&holder(2), &id, &clock(VOTE_START + 1)).unwrap();
    assert_eq!(engine.state(&id, &clock(VOTE_START + 1)).unwrap(), ProposalState::Canceled);
    println!("✓ Proposer below threshold: third party canceled");
}

// ─────────────────────────────────────────────────────────────────────────────
// Late quorum and snapshots
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_late_quorum_extends_voting() {
    init_logging();
    println!("\n========================================");
    println!("  GOVERNANCE: Late-quorum extension");
    println!("========================================\n");

    // Quorum 50% of 800 = 400: only the large holder can reach it.
    let mut engine = build_organization(GovernorConfig {
        quorum_numerator: 50,
        late_quorum_extension: 8,
        ..standard_config()
    });
    let id = engine
        .propose(&holder(0), vec![deposit(1)], "Sniped", &clock(PROPOSED_AT))
        .unwrap();

    engine.cast_vote(&holder(3), &id, Vote::For, &clock(VOTE_END - 1)).unwrap();
    let deadline = engine.proposal_deadline(&id).unwrap();
    assert_eq!(deadline, VOTE_END - 1 + 8);
    println!("✓ Deadline extended to {deadline}");

    // The rebuttal window is real: the remaining holders can still vote.
    for index in 0..3 {
        engine
            .cast_vote(&holder(index), &id, Vote::Against, &clock(VOTE_END + 2))
            .unwrap();
    }
    assert_eq!(engine.proposal_deadline(&id).unwrap(), deadline);
    assert_eq!(engine.state(&id, &clock(deadline)).unwrap(), ProposalState::Succeeded);
    println!("✓ Extension applied once; outcome decided at the new deadline");
}

#[test]
fn test_weight_transfer_after_snapshot_is_ignored() {
    init_logging();
    let mut engine = standard_organization();
    let id = engine
        .propose(&holder(0), vec![deposit(1)], "Snapshot", &clock(PROPOSED_AT))
        .unwrap();

    engine.cast_vote(&holder(3), &id, Vote::Against, &clock(VOTE_START)).unwrap();
    // The large holder hands its weight to a proposal supporter afterwards.
    engine
        .weights_mut()
        .transfer(holder(3), holder(0), 500, VOTE_START + 1)
        .unwrap();
    let counted = engine
        .cast_vote(&holder(0), &id, Vote::For, &clock(VOTE_START + 2))
        .unwrap();
    assert_eq!(counted, 100);
    assert_eq!(engine.proposal_votes(&id).unwrap(), (500, 100, 0));
    assert_eq!(engine.state(&id, &clock(VOTE_END)).unwrap(), ProposalState::Defeated);
    println!("✓ Post-snapshot transfer did not change the outcome");
}

#[test]
fn test_weight_moved_in_the_first_voting_slot_is_ignored() {
    init_logging();
    let mut engine = standard_organization();
    let id = engine
        .propose(&holder(0), vec![deposit(1)], "Same-slot snapshot", &clock(PROPOSED_AT))
        .unwrap();

    // Vote, hand the weight over and vote again, all in the first voting slot.
    engine.cast_vote(&holder(3), &id, Vote::Against, &clock(VOTE_START)).unwrap();
    engine
        .weights_mut()
        .transfer(holder(3), holder(0), 500, VOTE_START)
        .unwrap();
    let counted = engine
        .cast_vote(&holder(0), &id, Vote::For, &clock(VOTE_START))
        .unwrap();
    assert_eq!(counted, 100);
    assert_eq!(engine.proposal_votes(&id).unwrap(), (500, 100, 0));
    println!("✓ Same-slot transfer counted once");

    engine
        .weights_mut()
        .set_weight(Pubkey::new_from_array([9; 32]), VOTE_START, 1_000_000)
        .unwrap();
    assert_eq!(engine.quorum(SNAPSHOT).unwrap(), 32);
    assert_eq!(engine.state(&id, &clock(VOTE_END)).unwrap(), ProposalState::Defeated);
    println!("✓ Same-slot mint did not move the quorum bar");
}
