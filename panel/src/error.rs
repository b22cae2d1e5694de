use incinerator_contract::ContractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("config error: {0}")]
    Config(String),

    /// A burn was requested while the action is not available.
    #[error("burn not available: {0}")]
    NotReady(String),

    #[error("contract error: {0}")]
    Contract(#[from] ContractError),
}
