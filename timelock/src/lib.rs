//! TRv1 Timelock
//!
//! A delay queue for call batches.  A batch is *scheduled* under an id derived
//! from its content, matures for at least the configured minimum delay and is
//! then *executed* with the timelock's own address as the caller, so every
//! forwarded call is still checked against the permission registry.
//!
//! ## Operation lifecycle
//!
//! ```text
//! Unset ──schedule──▶ Waiting ──(ready_at reached)──▶ Ready ──execute──▶ Done
//!                        │                              │
//!                        └────────────cancel────────────┴──▶ Canceled
//! ```
//!
//! `Done` and `Canceled` are terminal; records are never deleted.
//!
//! | Operation | Action checked on the timelock address |
//! |-----------|-----------------------------------------|
//! | schedule  | [`TimelockInstruction::SCHEDULE_ACTION`] |
//! | execute   | [`TimelockInstruction::EXECUTE_ACTION`]  |
//! | cancel    | [`TimelockInstruction::CANCEL_ACTION`]   |
//!
//! The minimum delay itself can only be changed by a batch the timelock
//! executes.

pub mod config;
pub mod error;
pub mod event;
pub mod instruction;
pub mod operation;
pub mod processor;
pub mod timelock;

// Re-exports for convenience
pub use config::{ConfigError, TimelockConfig};
pub use error::TimelockError;
pub use event::TimelockEvent;
pub use instruction::TimelockInstruction;
pub use operation::{hash_operation, DelayedOperation, OperationState};
pub use processor::{process_instruction, process_staged_instruction};
pub use timelock::{execute, execute_batch, Timelock, TimelockHost};
