//! Error types for the stark-wallet library

use thiserror::Error;

/// Custom error type for stark-wallet operations
#[derive(Error, Debug)]
pub enum Error {
    /// The message does not fit the STARK curve's usable bit width
    #[error("Invalid message length: {0} hex digits")]
    InvalidMessageLength(usize),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Raised by the signer back-end, passed through untouched
    #[error("Signer error: {0}")]
    Signer(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Grinding ran past its safety bound. Single rejections are routine,
    /// but exhausting the default bound signals an internal inconsistency.
    #[error("Grind key exhausted after {rounds} rounds")]
    GrindKeyExhausted { rounds: u32 },

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for stark-wallet operations
pub type Result<T> = std::result::Result<T, Error>;
