use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

/// Upper bound on any delay, in slots (roughly one year at 400 ms slots).
pub const MAX_DELAY_SLOTS: u64 = 78_840_000;

/// Timelock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct TimelockConfig {
    /// Minimum number of slots between scheduling and execution.
    pub min_delay: u64,
}

impl Default for TimelockConfig {
    fn default() -> Self {
        Self {
            min_delay: 432_000, // ~2 days
        }
    }
}

impl TimelockConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_delay > MAX_DELAY_SLOTS {
            return Err(ConfigError::DelayTooLong(self.min_delay));
        }
        Ok(())
    }
}

/// Errors in timelock configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("min_delay must be <= {MAX_DELAY_SLOTS} slots, got {0}")]
    DelayTooLong(u64),
}
