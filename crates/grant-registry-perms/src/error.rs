//! Error types for the permissions module.

use grant_registry_core::Address;
use thiserror::Error;

/// Errors that can occur during permission operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermsError {
    /// The caller lacks the required role.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Adding an address that is already a validator.
    #[error("already a validator: {0}")]
    ValidatorExists(Address),

    /// Removing an address that is not a validator.
    #[error("not a validator: {0}")]
    ValidatorMissing(Address),

    /// Re-approving an approved address when re-approval is rejected.
    #[error("already approved: {0}")]
    AlreadyApproved(Address),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
