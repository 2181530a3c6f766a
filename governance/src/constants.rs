//! Constants for the TRv1 governance engine.
//!
//! All durations are in slots (400 ms each on TRv1).

/// Denominator of the quorum fraction: `quorum_numerator / 100`.
pub const QUORUM_DENOMINATOR: u64 = 100;

// ---------------------------------------------------------------------------
// Default governor settings
// ---------------------------------------------------------------------------

/// Default delay between proposal creation and the start of voting (~1 day).
pub const DEFAULT_VOTING_DELAY: u64 = 216_000;

/// Default length of the voting window (~1 week).
pub const DEFAULT_VOTING_PERIOD: u64 = 1_512_000;

/// Default minimum weight required to propose.  Zero lets any holder propose.
pub const DEFAULT_PROPOSAL_THRESHOLD: u64 = 0;

/// Default quorum: 4% of the total supply at the proposal snapshot.
pub const DEFAULT_QUORUM_NUMERATOR: u64 = 4;

/// Default late-quorum extension (~1 day).
pub const DEFAULT_LATE_QUORUM_EXTENSION: u64 = 216_000;

// ---------------------------------------------------------------------------
// Hash domains
// ---------------------------------------------------------------------------

pub(crate) const PROPOSAL_DOMAIN: &[u8] = b"trv1-governance-proposal";
pub(crate) const DESCRIPTION_DOMAIN: &[u8] = b"trv1-governance-description";
pub(crate) const SALT_DOMAIN: &[u8] = b"trv1-governance-timelock-salt";

// ---------------------------------------------------------------------------
// Well-known role names
// ---------------------------------------------------------------------------

pub const PROPOSER_ROLE_NAME: &str = "PROPOSER_ROLE";
pub const EXECUTOR_ROLE_NAME: &str = "EXECUTOR_ROLE";
pub const CANCELLER_ROLE_NAME: &str = "CANCELLER_ROLE";
