//! The governor component: settings, proposal ledger and event journal.
//!
//! It lives inside the [`crate::Organization`] next to the registry and the
//! timelock, so a batch that changes governor settings is staged and rolled
//! back together with everything else in that batch.

use {
    crate::{
        config::GovernorConfig, error::GovernanceError, event::GovernanceEvent,
        instruction::GovernorInstruction, ledger::ProposalLedger,
    },
    log::*,
    solana_bincode::limited_deserialize,
    solana_pubkey::Pubkey,
    trv1_access_control::processor::MAX_INSTRUCTION_DATA_LEN,
};

#[derive(Debug, Clone)]
pub struct Governor {
    address: Pubkey,
    /// The only account allowed to change settings.
    timelock: Pubkey,
    pub(crate) config: GovernorConfig,
    pub(crate) ledger: ProposalLedger,
    pub(crate) events: Vec<GovernanceEvent>,
}

impl Governor {
    pub fn new(
        address: Pubkey,
        timelock: Pubkey,
        config: GovernorConfig,
    ) -> Result<Self, GovernanceError> {
        config.validate()?;
        Ok(Self {
            address,
            timelock,
            config,
            ledger: ProposalLedger::new(),
            events: Vec::new(),
        })
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn timelock(&self) -> Pubkey {
        self.timelock
    }

    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }

    pub fn ledger(&self) -> &ProposalLedger {
        &self.ledger
    }

    pub fn take_events(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Decode a [`GovernorInstruction`] and apply it.  `caller` must be the
    /// timelock.
    pub fn process_instruction(
        &mut self,
        caller: &Pubkey,
        payload: &[u8],
    ) -> Result<(), GovernanceError> {
        let instruction: GovernorInstruction =
            limited_deserialize(payload, MAX_INSTRUCTION_DATA_LEN)
                .map_err(|_| GovernanceError::InvalidInstruction)?;

        trace!("governor process_instruction: {instruction:?}");

        if *caller != self.timelock {
            warn!("Governor {}: settings change attempted by {caller}", self.address);
            return Err(GovernanceError::OnlyGovernance { caller: *caller });
        }

        let mut config = self.config.clone();
        let (setting, field, new_value) = match instruction {
            GovernorInstruction::SetVotingDelay { voting_delay } => {
                ("voting_delay", &mut config.voting_delay, voting_delay)
            }
            GovernorInstruction::SetVotingPeriod { voting_period } => {
                ("voting_period", &mut config.voting_period, voting_period)
            }
            GovernorInstruction::SetProposalThreshold { proposal_threshold } => (
                "proposal_threshold",
                &mut config.proposal_threshold,
                proposal_threshold,
            ),
            GovernorInstruction::UpdateQuorumNumerator { quorum_numerator } => (
                "quorum_numerator",
                &mut config.quorum_numerator,
                quorum_numerator,
            ),
            GovernorInstruction::SetLateQuorumExtension {
                late_quorum_extension,
            } => (
                "late_quorum_extension",
                &mut config.late_quorum_extension,
                late_quorum_extension,
            ),
        };
        let old_value = std::mem::replace(field, new_value);
        config.validate()?;
        self.config = config;

        info!("Governor {}: {setting} {old_value} -> {new_value}", self.address);
        self.events.push(GovernanceEvent::SettingUpdated {
            setting,
            old_value,
            new_value,
        });
        Ok(())
    }
}
