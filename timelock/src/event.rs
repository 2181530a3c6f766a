use {solana_hash::Hash, trv1_access_control::Call};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelockEvent {
    OperationScheduled {
        id: Hash,
        calls: Vec<Call>,
        predecessor: Option<Hash>,
        delay: u64,
        ready_at: u64,
    },
    OperationExecuted {
        id: Hash,
    },
    OperationCanceled {
        id: Hash,
    },
    MinDelayChanged {
        old_delay: u64,
        new_delay: u64,
    },
}
