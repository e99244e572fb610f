//! Error types for the store module.

use grant_registry_core::{GrantId, Timestamp};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A grant with the same identity already exists.
    #[error("duplicate grant: {0}")]
    DuplicateGrant(GrantId),

    /// A delete found nothing to operate on.
    #[error("no matching grants")]
    NoMatchingGrants,

    /// A selected grant is still inside its timelock.
    #[error("grant {grant} is timelocked until {locked_until} (now {now})")]
    Timelocked {
        grant: GrantId,
        locked_until: Timestamp,
        now: Timestamp,
    },

    /// Neither owner nor grantee was concrete.
    #[error("invalid query: owner or grantee must be concrete")]
    InvalidQuery,

    /// A wildcard value was used as a real identifier.
    #[error("reserved identifier: {0}")]
    ReservedIdentifier(String),

    /// Grant not found.
    #[error("grant not found: {0}")]
    NotFound(GrantId),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
