use thiserror::Error;

/// Errors raised when parsing the textual forms of the value types.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid token id: {0}")]
    InvalidTokenId(String),
}
