//! Error types for the Grant Registry core.

use thiserror::Error;

/// Errors that can occur while handling keys and signatures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,
}
