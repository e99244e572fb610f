//! Canonical encodings for grant identities and delegated operations.
//!
//! Two encodings live here:
//!
//! - **Grant identity**: a deterministic CBOR array
//!   `[owner, grantee, data_id, locked_until]` prefixed with [`ID_DOMAIN`]
//!   and hashed with Blake3.
//! - **Delegation message**: the human-readable text an owner signs to let
//!   someone else insert or delete grants on their behalf.
//!
//! The delegation message has one `key: value` line per field, in this
//! fixed order, joined with `\n` and without a trailing newline:
//!
//! ```text
//! operation: insertGrant
//! owner: <64 hex chars>
//! grantee: <64 hex chars>
//! dataId: <data id>
//! lockedUntil: <decimal seconds>
//! ```
//!
//! **CRITICAL**: Both encodings are FROZEN. Changing them invalidates every
//! existing grant id and every outstanding signature.

use std::fmt;

use ciborium::value::Value;
use serde::{Deserialize, Serialize};

use crate::types::{Address, Timestamp};

/// Domain separation prefix for grant identity hashing.
pub const ID_DOMAIN: &[u8] = b"grant-registry/grant-id/v1";

/// Default domain separation prefix for delegated signatures.
pub const SIGNING_PREFIX: &str = "\x19Grant Registry Signed Message:\n";

/// An operation that can be authorized by signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DelegatedOp {
    /// Create a grant on behalf of its owner.
    InsertGrant,
    /// Delete matching grants on behalf of their owner.
    DeleteGrant,
}

impl DelegatedOp {
    /// The operation name as it appears in the signed message.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DelegatedOp::InsertGrant => "insertGrant",
            DelegatedOp::DeleteGrant => "deleteGrant",
        }
    }

    /// Build the canonical message for this operation.
    pub fn message(
        &self,
        owner: &Address,
        grantee: &Address,
        data_id: &str,
        locked_until: Timestamp,
    ) -> String {
        format!(
            "operation: {}\nowner: {}\ngrantee: {}\ndataId: {}\nlockedUntil: {}",
            self.as_str(),
            owner.to_hex(),
            grantee.to_hex(),
            data_id,
            locked_until
        )
    }
}

impl fmt::Display for DelegatedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message an owner signs to authorize inserting a grant.
pub fn insert_grant_message(
    owner: &Address,
    grantee: &Address,
    data_id: &str,
    locked_until: Timestamp,
) -> String {
    DelegatedOp::InsertGrant.message(owner, grantee, data_id, locked_until)
}

/// Message an owner signs to authorize deleting grants.
///
/// `grantee`, `data_id` and `locked_until` may be wildcards, exactly as
/// they will be passed to the delete.
pub fn delete_grant_message(
    owner: &Address,
    grantee: &Address,
    data_id: &str,
    locked_until: Timestamp,
) -> String {
    DelegatedOp::DeleteGrant.message(owner, grantee, data_id, locked_until)
}

/// Digest that is actually signed for a message (hash-then-sign).
///
/// `Blake3(prefix || decimal(len(message)) || message)`. The length makes
/// the prefix unambiguous for messages that themselves start with digits.
pub fn signing_digest(prefix: &str, message: &[u8]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(prefix.as_bytes());
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    *hasher.finalize().as_bytes()
}

/// Canonical CBOR bytes of a grant's four identifying fields.
pub fn grant_identity_bytes(
    owner: &Address,
    grantee: &Address,
    data_id: &str,
    locked_until: Timestamp,
) -> Vec<u8> {
    let value = Value::Array(vec![
        Value::Bytes(owner.0.to_vec()),
        Value::Bytes(grantee.0.to_vec()),
        Value::Text(data_id.to_string()),
        Value::Integer(locked_until.into()),
    ]);

    let mut buf = Vec::with_capacity(ID_DOMAIN.len() + 96 + data_id.len());
    buf.extend_from_slice(ID_DOMAIN);
    ciborium::into_writer(&value, &mut buf).expect("CBOR serialization failed");
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_insert_message_format() {
        let owner = Address::from_bytes([0x11; 32]);
        let grantee = Address::from_bytes([0x22; 32]);

        let msg = insert_grant_message(&owner, &grantee, "x", 50);
        let lines: Vec<&str> = msg.lines().collect();

        assert_eq!(
            lines,
            vec![
                "operation: insertGrant".to_string(),
                format!("owner: {}", "11".repeat(32)),
                format!("grantee: {}", "22".repeat(32)),
                "dataId: x".to_string(),
                "lockedUntil: 50".to_string(),
            ]
        );
        assert!(!msg.ends_with('\n'));
    }

    #[test]
    fn test_delete_message_differs_from_insert() {
        let owner = Address::from_bytes([0x11; 32]);
        let grantee = Address::from_bytes([0x22; 32]);

        let insert = insert_grant_message(&owner, &grantee, "x", 50);
        let delete = delete_grant_message(&owner, &grantee, "x", 50);

        assert_ne!(insert, delete);
        assert!(delete.starts_with("operation: deleteGrant\n"));
    }

    #[test]
    fn test_signing_digest_depends_on_prefix() {
        let a = signing_digest(SIGNING_PREFIX, b"hello");
        let b = signing_digest("other prefix", b"hello");
        assert_ne!(a, b);
        assert_eq!(a, signing_digest(SIGNING_PREFIX, b"hello"));
    }

    #[test]
    fn test_identity_bytes_cover_every_field() {
        let owner = Address::from_bytes([1; 32]);
        let grantee = Address::from_bytes([2; 32]);

        let base = grant_identity_bytes(&owner, &grantee, "d", 10);
        assert!(base.starts_with(ID_DOMAIN));
        assert_ne!(base, grant_identity_bytes(&grantee, &owner, "d", 10));
        assert_ne!(base, grant_identity_bytes(&owner, &grantee, "e", 10));
        assert_ne!(base, grant_identity_bytes(&owner, &grantee, "d", 11));
    }

    proptest! {
        #[test]
        fn test_message_fields_are_recoverable(
            owner in any::<[u8; 32]>(),
            grantee in any::<[u8; 32]>(),
            data_id in "[^\n]{0,40}",
            locked_until in any::<u64>(),
        ) {
            let owner = Address::from_bytes(owner);
            let grantee = Address::from_bytes(grantee);
            let msg = insert_grant_message(&owner, &grantee, &data_id, locked_until);
            let lines: Vec<&str> = msg.split('\n').collect();

            prop_assert_eq!(lines.len(), 5);
            let owner_hex = owner.to_hex();
            prop_assert_eq!(lines[1].strip_prefix("owner: "), Some(owner_hex.as_str()));
            prop_assert_eq!(lines[3].strip_prefix("dataId: "), Some(data_id.as_str()));
            let lock = locked_until.to_string();
            prop_assert_eq!(lines[4].strip_prefix("lockedUntil: "), Some(lock.as_str()));
        }
    }
}
