//! Error types for Superswap

use thiserror::Error;

use crate::ChainId;

/// Core errors that can occur in Superswap
#[derive(Debug, Error)]
pub enum Error {
    #[error("Reserve source error: {0}")]
    Source(#[from] SourceError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while reading pool reserves from a chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Chain {chain_id} unreachable at {url}")]
    Unreachable { chain_id: ChainId, url: String },

    #[error("No pair for {token_in}/{token_out} on chain {chain_id}")]
    PairNotFound {
        chain_id: ChainId,
        token_in: String,
        token_out: String,
    },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Routing and quoting errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Arithmetic error: {reason}")]
    Arithmetic { reason: String },

    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("No usable liquidity for {pair}")]
    NoLiquidity { pair: String },

    #[error("Chain {chain_id} is not configured")]
    ChainNotConfigured { chain_id: ChainId },
}

/// Result type alias for Superswap operations
pub type Result<T> = std::result::Result<T, Error>;

impl ProtocolError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::Arithmetic { .. } => "arithmetic_error",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::NoLiquidity { .. } => "no_liquidity",
            Self::ChainNotConfigured { .. } => "chain_not_configured",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } | Self::InvalidAmount { .. } => 400,
            Self::ChainNotConfigured { .. } => 422,
            Self::NoLiquidity { .. } => 503,
            Self::Arithmetic { .. } => 500,
        }
    }
}
