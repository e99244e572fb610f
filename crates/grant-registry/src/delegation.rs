//! Signed delegation: inserts and deletes submitted by a relayer on behalf
//! of an owner.
//!
//! The owner signs the canonical message for the operation (see
//! [`grant_registry_core::canonical`]). The registry rebuilds that message
//! from the submitted parameters and checks the signature before any state
//! is touched, so a relayer can neither forge nor alter an authorization.

use grant_registry_core::{Address, DataId, DelegatedOp, Grant, GrantId, Signature, Timestamp};
use grant_registry_store::{GrantQuery, GrantStore};

use crate::error::{RegistryError, Result};
use crate::registry::Registry;

impl<S: GrantStore> Registry<S> {
    /// Whether `signature` is `owner`'s authorization of `op` with exactly
    /// these parameters.
    ///
    /// Relayers can call this before submitting.
    pub fn verify_delegation(
        &self,
        op: DelegatedOp,
        owner: &Address,
        grantee: &Address,
        data_id: &str,
        locked_until: Timestamp,
        signature: &Signature,
    ) -> bool {
        // The zero address is the owner wildcard and never signs.
        if owner.is_zero() {
            return false;
        }
        let message = op.message(owner, grantee, data_id, locked_until);
        self.verifier.verify(message.as_bytes(), signature, owner)
    }

    /// Insert a grant authorized by `owner`'s signature over the canonical
    /// insert message.
    ///
    /// `grantee` must be approved. `caller` is the relayer submitting the
    /// request; its own approval is not required.
    pub fn insert_grant_by_signature(
        &mut self,
        caller: &Address,
        owner: Address,
        grantee: Address,
        data_id: impl Into<DataId>,
        locked_until: Timestamp,
        signature: &Signature,
    ) -> Result<GrantId> {
        let data_id = data_id.into();
        self.check_delegation(
            DelegatedOp::InsertGrant,
            caller,
            &owner,
            &grantee,
            &data_id,
            locked_until,
            signature,
        )?;
        self.require_approved(&grantee, "grantee")?;

        self.store_insert(Grant::new(owner, grantee, data_id, locked_until))
    }

    /// Delete grants authorized by `owner`'s signature over the canonical
    /// delete message.
    ///
    /// `caller` (the submitter) must be approved. Matching and timelock
    /// rules are those of [`Registry::delete_grant`].
    pub fn delete_grant_by_signature(
        &mut self,
        caller: &Address,
        owner: Address,
        grantee: Address,
        data_id: impl Into<DataId>,
        locked_until: Timestamp,
        signature: &Signature,
    ) -> Result<Vec<Grant>> {
        let data_id = data_id.into();
        self.check_delegation(
            DelegatedOp::DeleteGrant,
            caller,
            &owner,
            &grantee,
            &data_id,
            locked_until,
            signature,
        )?;
        self.require_approved(caller, "caller")?;

        self.store_delete(&GrantQuery::new(owner, grantee, data_id), locked_until)
    }

    #[allow(clippy::too_many_arguments)]
    fn check_delegation(
        &self,
        op: DelegatedOp,
        caller: &Address,
        owner: &Address,
        grantee: &Address,
        data_id: &DataId,
        locked_until: Timestamp,
        signature: &Signature,
    ) -> Result<()> {
        if self.verify_delegation(op, owner, grantee, data_id.as_str(), locked_until, signature) {
            return Ok(());
        }
        tracing::warn!(
            op = %op,
            caller = %caller,
            owner = %owner,
            "delegated signature rejected"
        );
        Err(RegistryError::InvalidSignature)
    }
}
