use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PriceError {
    #[error("price client setup failed: {0}")]
    Client(String),

    #[error("price API unreachable: {0}")]
    Unreachable(String),

    #[error("price request failed: {0}")]
    RequestFailed(String),

    #[error("invalid price response: {0}")]
    InvalidResponse(String),

    #[error("no trading pair with a USD price")]
    MissingPrice,
}
