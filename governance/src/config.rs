use {
    crate::constants::{
        DEFAULT_LATE_QUORUM_EXTENSION, DEFAULT_PROPOSAL_THRESHOLD, DEFAULT_QUORUM_NUMERATOR,
        DEFAULT_VOTING_DELAY, DEFAULT_VOTING_PERIOD, QUORUM_DENOMINATOR,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

/// Governor settings.
///
/// Changed only by [`crate::GovernorInstruction`]s executed by the timelock.
/// A proposal keeps the quorum numerator it was created under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct GovernorConfig {
    /// Slots between proposal creation and the start of voting.
    pub voting_delay: u64,

    /// Length of the voting window in slots.
    pub voting_period: u64,

    /// Minimum weight (at the slot before proposing) needed to propose.
    pub proposal_threshold: u64,

    /// Quorum as a fraction of total supply: `quorum_numerator / 100`.
    pub quorum_numerator: u64,

    /// If quorum is first reached less than this many slots before the
    /// deadline, the deadline moves to `now + late_quorum_extension`.
    pub late_quorum_extension: u64,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            voting_delay: DEFAULT_VOTING_DELAY,
            voting_period: DEFAULT_VOTING_PERIOD,
            proposal_threshold: DEFAULT_PROPOSAL_THRESHOLD,
            quorum_numerator: DEFAULT_QUORUM_NUMERATOR,
            late_quorum_extension: DEFAULT_LATE_QUORUM_EXTENSION,
        }
    }
}

impl GovernorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.voting_period == 0 {
            return Err(ConfigError::ZeroVotingPeriod);
        }
        if self.quorum_numerator > QUORUM_DENOMINATOR {
            return Err(ConfigError::QuorumNumeratorTooLarge(self.quorum_numerator));
        }
        Ok(())
    }
}

/// Errors in governor configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("voting_period must be > 0")]
    ZeroVotingPeriod,
    #[error("quorum_numerator must be <= {QUORUM_DENOMINATOR}, got {0}")]
    QuorumNumeratorTooLarge(u64),
}
