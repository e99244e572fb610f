//! The grant record.
//!
//! A grant links a data owner to a grantee for one data item. It is
//! immutable once created; its identity is derived from all four fields.

use serde::{Deserialize, Serialize};

use crate::canonical::grant_identity_bytes;
use crate::types::{Address, DataId, DataKey, GrantId, Timestamp};

/// A time-bounded permission record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    /// The data owner issuing the grant.
    pub owner: Address,

    /// The principal being granted access.
    pub grantee: Address,

    /// The protected data item.
    pub data_id: DataId,

    /// The grant cannot be deleted before this time (Unix seconds).
    pub locked_until: Timestamp,
}

impl Grant {
    /// Create a new grant record.
    pub fn new(
        owner: Address,
        grantee: Address,
        data_id: impl Into<DataId>,
        locked_until: Timestamp,
    ) -> Self {
        Self {
            owner,
            grantee,
            data_id: data_id.into(),
            locked_until,
        }
    }

    /// Compute the identity of this grant.
    pub fn id(&self) -> GrantId {
        GrantId::derive(
            &self.owner,
            &self.grantee,
            self.data_id.as_str(),
            self.locked_until,
        )
    }

    /// The data index key of this grant.
    pub fn data_key(&self) -> DataKey {
        self.data_id.key()
    }

    /// Whether the timelock still forbids deletion at `now`.
    pub fn is_locked(&self, now: Timestamp) -> bool {
        self.locked_until > now
    }

    /// Whether any field holds a value reserved as a query wildcard.
    pub fn uses_reserved_identifier(&self) -> bool {
        self.owner.is_zero() || self.grantee.is_zero() || self.data_id.is_wildcard()
    }
}

impl GrantId {
    /// Derive the identity of the grant with these fields.
    pub fn derive(
        owner: &Address,
        grantee: &Address,
        data_id: &str,
        locked_until: Timestamp,
    ) -> Self {
        let bytes = grant_identity_bytes(owner, grantee, data_id, locked_until);
        Self(*blake3::hash(&bytes).as_bytes())
    }
}
