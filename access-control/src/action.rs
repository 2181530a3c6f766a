//! Action identifiers and per-action authorized role lists.

use {
    crate::role::Role,
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
    std::{collections::HashMap, fmt},
};

/// Width of the selector carried at the front of every call payload.
pub const SELECTOR_LEN: usize = 4;

/// Identifies an operation on a target: the payload's leading four bytes.
///
/// Built-in targets encode instructions with bincode, which writes the enum
/// variant index as a little-endian `u32`, so [`ActionId::from_index`] names
/// the n-th instruction of a target.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct ActionId(pub [u8; SELECTOR_LEN]);

impl ActionId {
    pub const fn from_index(index: u32) -> Self {
        ActionId(index.to_le_bytes())
    }

    /// Read the selector from a payload.  `None` if the payload is too short.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        let selector: [u8; SELECTOR_LEN] = payload.get(..SELECTOR_LEN)?.try_into().ok()?;
        Some(ActionId(selector))
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// A `(target, action)` pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct ActionKey {
    pub target: Pubkey,
    pub action: ActionId,
}

impl ActionKey {
    pub fn new(target: Pubkey, action: ActionId) -> Self {
        Self { target, action }
    }
}

/// Ordered role lists keyed by action.
///
/// Adding is idempotent and removing an absent role is a no-op; an entry
/// disappears only once its last role is removed.
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    actions: HashMap<ActionKey, Vec<Role>>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the roles that were actually added.
    pub fn add(&mut self, key: ActionKey, roles: &[Role]) -> Vec<Role> {
        let entry = self.actions.entry(key).or_default();
        let mut added = Vec::new();
        for role in roles {
            if !entry.contains(role) {
                entry.push(*role);
                added.push(*role);
            }
        }
        if entry.is_empty() {
            self.actions.remove(&key);
        }
        added
    }

    /// Returns the roles that were actually removed.
    pub fn remove(&mut self, key: &ActionKey, roles: &[Role]) -> Vec<Role> {
        let Some(entry) = self.actions.get_mut(key) else {
            return Vec::new();
        };
        let mut removed = Vec::new();
        entry.retain(|role| {
            let drop = roles.contains(role);
            if drop {
                removed.push(*role);
            }
            !drop
        });
        if entry.is_empty() {
            self.actions.remove(key);
        }
        removed
    }

    pub fn roles(&self, key: &ActionKey) -> &[Role] {
        self.actions.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &ActionKey) -> bool {
        self.actions.contains_key(key)
    }
}
