use {
    crate::config::ConfigError,
    solana_hash::Hash,
    solana_pubkey::Pubkey,
    thiserror::Error,
    trv1_access_control::{AccessControlError, ActionId, ErrorKind, GatewayError},
};

/// Errors produced by the timelock.
#[derive(Error, Debug)]
pub enum TimelockError {
    #[error("Account {caller} is not authorized for timelock action {action}")]
    NotAuthorized { caller: Pubkey, action: ActionId },

    #[error("Only the timelock itself may do this, called by {caller}")]
    OnlyTimelock { caller: Pubkey },

    #[error("Delay of {delay} slots is below the minimum of {min_delay}")]
    DelayTooShort { delay: u64, min_delay: u64 },

    #[error("Operation {0} is already scheduled")]
    OperationAlreadyScheduled(Hash),

    #[error("Operation {0} was never scheduled")]
    UnknownOperation(Hash),

    #[error("Operation {id} is not ready: ready at slot {ready_at}, now {now}")]
    OperationNotReady { id: Hash, ready_at: u64, now: u64 },

    #[error("Operation {0} was already executed or canceled")]
    OperationAlreadyFinalized(Hash),

    #[error("Predecessor operation {0} has not been executed")]
    PredecessorNotExecuted(Hash),

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Timelock instruction data is invalid")]
    InvalidInstruction,

    #[error("Call batch cannot be encoded: {0}")]
    Encoding(std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    AccessControl(#[from] AccessControlError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl TimelockError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAuthorized { .. } | Self::OnlyTimelock { .. } => ErrorKind::Authorization,
            Self::DelayTooShort { .. }
            | Self::OperationAlreadyScheduled(_)
            | Self::UnknownOperation(_)
            | Self::OperationNotReady { .. }
            | Self::OperationAlreadyFinalized(_)
            | Self::PredecessorNotExecuted(_) => ErrorKind::State,
            Self::ArithmeticOverflow
            | Self::InvalidInstruction
            | Self::Encoding(_)
            | Self::Config(_) => ErrorKind::Input,
            Self::AccessControl(err) => err.kind(),
            Self::Gateway(err) => err.kind(),
        }
    }
}
