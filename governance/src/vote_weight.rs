//! Voting weight snapshots.
//!
//! The engine never reads "current" weight for tallying.  Votes are weighed at
//! the proposal's snapshot, the slot before `vote_start`, and quorum is
//! measured against the total supply at that same slot, so weight moved after
//! the snapshot cannot change an open proposal's outcome.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
    std::collections::HashMap,
    thiserror::Error,
};

/// Historical voting power.
///
/// Answers for a past slot must be deterministic and never change.
pub trait VotingWeightSource {
    fn weight_at(&self, account: &Pubkey, snapshot: u64) -> u64;

    fn total_supply_at(&self, snapshot: u64) -> u64;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("Checkpoint at slot {slot} is older than the latest checkpoint at slot {latest}")]
    OutOfOrder { slot: u64, latest: u64 },

    #[error("Account {account} has weight {available}, cannot move {requested}")]
    InsufficientWeight {
        account: Pubkey,
        available: u64,
        requested: u64,
    },

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Checkpoint {
    pub slot: u64,
    pub value: u64,
}

/// Value in force at `snapshot`: the last checkpoint at or before it.
fn lookup(history: &[Checkpoint], snapshot: u64) -> u64 {
    let index = history.partition_point(|checkpoint| checkpoint.slot <= snapshot);
    index
        .checked_sub(1)
        .and_then(|last| history.get(last))
        .map(|checkpoint| checkpoint.value)
        .unwrap_or(0)
}

fn push(history: &mut Vec<Checkpoint>, slot: u64, value: u64) -> Result<(), CheckpointError> {
    match history.last_mut() {
        Some(last) if slot < last.slot => {
            return Err(CheckpointError::OutOfOrder {
                slot,
                latest: last.slot,
            })
        }
        Some(last) if slot == last.slot => last.value = value,
        _ => history.push(Checkpoint { slot, value }),
    }
    Ok(())
}

/// Append-only checkpoint history per account plus total supply.
#[derive(Debug, Clone, Default)]
pub struct WeightCheckpoints {
    accounts: HashMap<Pubkey, Vec<Checkpoint>>,
    supply: Vec<Checkpoint>,
}

impl WeightCheckpoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest_weight(&self, account: &Pubkey) -> u64 {
        self.accounts
            .get(account)
            .and_then(|history| history.last())
            .map(|checkpoint| checkpoint.value)
            .unwrap_or(0)
    }

    pub fn latest_supply(&self) -> u64 {
        self.supply.last().map(|checkpoint| checkpoint.value).unwrap_or(0)
    }

    /// Set `account`'s weight from `slot` on, adjusting total supply.
    ///
    /// Slots must not go backwards; a second write at the same slot
    /// overwrites the first.
    pub fn set_weight(&mut self, account: Pubkey, slot: u64, weight: u64) -> Result<(), CheckpointError> {
        if let Some(latest) = self.supply.last().map(|checkpoint| checkpoint.slot) {
            if slot < latest {
                return Err(CheckpointError::OutOfOrder { slot, latest });
            }
        }
        let previous = self.latest_weight(&account);
        let supply = self
            .latest_supply()
            .checked_sub(previous)
            .and_then(|rest| rest.checked_add(weight))
            .ok_or(CheckpointError::ArithmeticOverflow)?;

        push(self.accounts.entry(account).or_default(), slot, weight)?;
        push(&mut self.supply, slot, supply)
    }

    /// Move `amount` of weight between accounts at `slot` (a delegation
    /// change).  Total supply is unchanged.
    pub fn transfer(
        &mut self,
        from: Pubkey,
        to: Pubkey,
        amount: u64,
        slot: u64,
    ) -> Result<(), CheckpointError> {
        let available = self.latest_weight(&from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(CheckpointError::InsufficientWeight {
                account: from,
                available,
                requested: amount,
            })?;
        let received = self
            .latest_weight(&to)
            .checked_add(amount)
            .ok_or(CheckpointError::ArithmeticOverflow)?;
        self.set_weight(from, slot, remaining)?;
        self.set_weight(to, slot, received)
    }
}

impl VotingWeightSource for WeightCheckpoints {
    fn weight_at(&self, account: &Pubkey, snapshot: u64) -> u64 {
        self.accounts
            .get(account)
            .map(|history| lookup(history, snapshot))
            .unwrap_or(0)
    }

    fn total_supply_at(&self, snapshot: u64) -> u64 {
        lookup(&self.supply, snapshot)
    }
}
