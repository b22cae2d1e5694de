use incinerator_types::TxHash;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// The endpoint answered with a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The transaction was mined but reverted.
    #[error("transaction {0} reverted")]
    Reverted(TxHash),

    #[error("timed out waiting for receipt of {0}")]
    ReceiptTimeout(TxHash),

    #[error("no account available to send from")]
    NoAccount,

    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// The human-readable part of the failure, without the error-kind prefix.
    ///
    /// For endpoint errors this is the node's own message, which carries the
    /// contract's revert reason (e.g. `execution reverted: Cooldown not elapsed`).
    pub fn short_message(&self) -> String {
        match self {
            Self::Rpc { message, .. } => message.clone(),
            Self::Transport(msg) | Self::InvalidResponse(msg) | Self::Other(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
