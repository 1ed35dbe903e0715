use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexerError {
    /// Request did not complete.
    #[error("network error: {0}")]
    Network(String),

    /// Indexer answered with a non-success status.
    #[error("indexer returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode indexer response: {0}")]
    Decode(String),
}

impl IndexerError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
