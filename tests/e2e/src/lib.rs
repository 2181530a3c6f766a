//! TRv1 Governance End-to-End Test Suite
//!
//! Drives a fully wired organization (permission registry, timelock,
//! governor, a mock treasury and checkpointed voting weights) through the
//! permission and proposal lifecycles.
//!
//! Each test file can be run independently:
//!
//! ```bash
//! cargo test -p trv1-governance-e2e-tests --test permission_lifecycle -- --nocapture
//! cargo test -p trv1-governance-e2e-tests --test governance_lifecycle -- --nocapture
//! ```
