use thiserror::Error;

/// Errors raised while assembling a Sui transaction.
#[derive(Debug, Error)]
pub enum SuiTxError {
    /// A contract id needed by the operation is not configured.
    #[error("missing contract config: {0}")]
    MissingContractConfig(&'static str),

    #[error("invalid object id for {field}: '{value}'")]
    InvalidObjectId { field: &'static str, value: String },

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("insufficient balance of {coin_type}: {available} available, {requested} requested")]
    InsufficientBalance {
        coin_type: String,
        requested: u64,
        available: u64,
    },

    #[error("transaction has {0} inputs, more than allowed")]
    TooManyInputs(usize),

    #[error("transaction has {0} commands, more than allowed")]
    TooManyCommands(usize),

    #[error(transparent)]
    Client(#[from] SuiClientError),
}

/// Errors from talking to a Sui full node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuiClientError {
    /// Network-related error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// RPC call failed.
    #[error("rpc error: {0}")]
    Rpc(String),
}

impl SuiClientError {
    /// Creates a network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Creates an RPC error.
    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc(msg.into())
    }
}
