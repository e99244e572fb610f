//! Error types for the Registry.

use grant_registry_core::{Address, GrantId, Timestamp};
use grant_registry_perms::PermsError;
use grant_registry_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Registry operations.
///
/// Every failure is deterministic given the same state and inputs, and a
/// failed mutation leaves the registry unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The caller lacks the required role.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// An insert collided with an existing grant identity.
    #[error("duplicate grant: {0}")]
    DuplicateGrant(GrantId),

    /// A delete found nothing to operate on.
    #[error("no matching grants")]
    NoMatchingGrants,

    /// A delete hit a grant whose timelock has not elapsed.
    #[error("grant {grant} is timelocked until {locked_until} (now {now})")]
    Timelocked {
        grant: GrantId,
        locked_until: Timestamp,
        now: Timestamp,
    },

    /// A delegated operation's signature does not verify.
    #[error("invalid signature")]
    InvalidSignature,

    /// Neither owner nor grantee was concrete in a lookup.
    #[error("invalid query: owner or grantee must be concrete")]
    InvalidQuery,

    /// A wildcard value was used as a real identifier.
    #[error("reserved identifier: {0}")]
    ReservedIdentifier(String),

    /// Adding an address that is already a validator.
    #[error("already a validator: {0}")]
    ValidatorExists(Address),

    /// Removing an address that is not a validator.
    #[error("not a validator: {0}")]
    ValidatorMissing(Address),

    /// Re-approving an approved address under `Reapproval::Reject`.
    #[error("already approved: {0}")]
    AlreadyApproved(Address),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Event export failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<StoreError> for RegistryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateGrant(id) => RegistryError::DuplicateGrant(id),
            StoreError::NoMatchingGrants | StoreError::NotFound(_) => {
                RegistryError::NoMatchingGrants
            }
            StoreError::Timelocked {
                grant,
                locked_until,
                now,
            } => RegistryError::Timelocked {
                grant,
                locked_until,
                now,
            },
            StoreError::InvalidQuery => RegistryError::InvalidQuery,
            StoreError::ReservedIdentifier(msg) => RegistryError::ReservedIdentifier(msg),
        }
    }
}

impl From<PermsError> for RegistryError {
    fn from(e: PermsError) -> Self {
        match e {
            PermsError::Unauthorized(msg) => RegistryError::Unauthorized(msg),
            PermsError::ValidatorExists(a) => RegistryError::ValidatorExists(a),
            PermsError::ValidatorMissing(a) => RegistryError::ValidatorMissing(a),
            PermsError::AlreadyApproved(a) => RegistryError::AlreadyApproved(a),
        }
    }
}

/// Result type for Registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
