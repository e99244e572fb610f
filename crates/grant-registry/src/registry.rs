//! The Registry: the grant store, its indexes, and the access-control
//! state behind one service object.
//!
//! Every mutating operation either completes (updating state and appending
//! events) or fails with no side effects.

use std::sync::Arc;

use grant_registry_core::{
    Address, Clock, DataId, Ed25519Verifier, Grant, GrantId, SignatureVerifier, SystemClock,
    Timestamp,
};
use grant_registry_perms::{AccessControl, ApprovalChange};
use grant_registry_store::{GrantQuery, GrantStore, GrantStoreExt, MemoryGrantStore};

use crate::config::{QueryGate, RegistryConfig};
use crate::error::{RegistryError, Result};
use crate::events::{EventLog, RegistryEvent};

/// The grant registry.
///
/// Provides a unified API for:
/// - Managing validators (administrator)
/// - Approving participants (validators)
/// - Inserting, deleting and querying grants (approved participants)
/// - Delegated inserts and deletes authorized by the owner's signature
pub struct Registry<S: GrantStore = MemoryGrantStore> {
    /// The grant table and its indexes.
    pub(crate) store: S,
    /// Validators and approvals.
    pub(crate) access: AccessControl,
    /// Emitted events.
    pub(crate) events: EventLog,
    /// Checks delegated signatures.
    pub(crate) verifier: Box<dyn SignatureVerifier>,
    /// Time source for timelocks.
    pub(crate) clock: Arc<dyn Clock>,
    /// Configuration.
    pub(crate) config: RegistryConfig,
}

impl Registry<MemoryGrantStore> {
    /// Create a registry with an in-memory store, administered by `admin`.
    pub fn new(admin: Address, config: RegistryConfig) -> Self {
        Self::with_store(admin, MemoryGrantStore::new(), config)
    }
}

impl<S: GrantStore> Registry<S> {
    /// Create a registry over the given store.
    ///
    /// Uses the system clock and an Ed25519 verifier with the configured
    /// signing prefix.
    pub fn with_store(admin: Address, store: S, config: RegistryConfig) -> Self {
        let verifier = Ed25519Verifier::new(config.signing_prefix.clone());
        Self {
            store,
            access: AccessControl::new(admin, config.reapproval),
            events: EventLog::new(),
            verifier: Box::new(verifier),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the signature verifier.
    pub fn with_verifier(mut self, verifier: impl SignatureVerifier + 'static) -> Self {
        self.verifier = Box::new(verifier);
        self
    }

    /// The configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The event log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The current time according to the registry's clock.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validator Set
    // ─────────────────────────────────────────────────────────────────────────

    /// The administrator address.
    pub fn admin(&self) -> &Address {
        self.access.admin()
    }

    /// Whether `addr` is a validator.
    pub fn is_validator(&self, addr: &Address) -> bool {
        self.access.is_validator(addr)
    }

    /// All validators, sorted by address.
    pub fn validators(&self) -> Vec<Address> {
        self.access.validators().iter().copied().collect()
    }

    /// Add a validator. Only the administrator may call this.
    pub fn add_validator(&mut self, caller: &Address, validator: Address) -> Result<()> {
        self.access.add_validator(caller, validator).map_err(|e| {
            tracing::warn!(caller = %caller, validator = %validator, error = %e, "validator add rejected");
            RegistryError::from(e)
        })?;
        tracing::info!(validator = %validator, "validator added");
        self.events.emit(RegistryEvent::ValidatorAdded { validator });
        Ok(())
    }

    /// Remove a validator. Only the administrator may call this.
    pub fn remove_validator(&mut self, caller: &Address, validator: &Address) -> Result<()> {
        self.access.remove_validator(caller, validator).map_err(|e| {
            tracing::warn!(caller = %caller, validator = %validator, error = %e, "validator removal rejected");
            RegistryError::from(e)
        })?;
        tracing::info!(validator = %validator, "validator removed");
        self.events.emit(RegistryEvent::ValidatorRemoved {
            validator: *validator,
        });
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Approval Gate
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether `addr` is an approved participant.
    pub fn is_approved(&self, addr: &Address) -> bool {
        self.access.is_approved(addr)
    }

    /// Approve `target`. Only validators may call this.
    pub fn approve(&mut self, caller: &Address, target: Address) -> Result<()> {
        match self.access.approve(caller, target) {
            Ok(ApprovalChange::Granted) => {
                tracing::info!(address = %target, validator = %caller, "address approved");
                self.events
                    .emit(RegistryEvent::AddressApproved { address: target });
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!(caller = %caller, target = %target, error = %e, "approval rejected");
                Err(e.into())
            }
        }
    }

    /// Withdraw the approval of `target`. Only validators may call this.
    ///
    /// Grants already held or issued by `target` are not touched.
    pub fn revoke_approval(&mut self, caller: &Address, target: &Address) -> Result<()> {
        let change = self.access.revoke_approval(caller, target).map_err(|e| {
            tracing::warn!(caller = %caller, target = %target, error = %e, "revocation rejected");
            RegistryError::from(e)
        })?;
        if change == ApprovalChange::Revoked {
            tracing::info!(address = %target, validator = %caller, "approval revoked");
            self.events
                .emit(RegistryEvent::ApprovalRevoked { address: *target });
        }
        Ok(())
    }

    pub(crate) fn require_approved(&self, addr: &Address, role: &str) -> Result<()> {
        self.access.require_approved(addr, role).map_err(|e| {
            tracing::warn!(address = %addr, role, "participant not approved");
            e.into()
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Grant Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a grant owned by `caller`.
    ///
    /// Both `caller` and `grantee` must be approved.
    pub fn insert_grant(
        &mut self,
        caller: &Address,
        grantee: Address,
        data_id: impl Into<DataId>,
        locked_until: Timestamp,
    ) -> Result<GrantId> {
        self.require_approved(caller, "owner")?;
        self.require_approved(&grantee, "grantee")?;
        self.store_insert(Grant::new(*caller, grantee, data_id, locked_until))
    }

    /// Delete grants owned by `caller` that match `grantee`/`data_id`.
    ///
    /// `grantee` and `data_id` may be wildcards. With `locked_until` equal
    /// to [`ANY_LOCK`](grant_registry_core::ANY_LOCK) every match is
    /// deleted; otherwise only matches with that exact lock time. Returns
    /// the deleted grants.
    pub fn delete_grant(
        &mut self,
        caller: &Address,
        grantee: Address,
        data_id: impl Into<DataId>,
        locked_until: Timestamp,
    ) -> Result<Vec<Grant>> {
        self.require_approved(caller, "caller")?;
        self.store_delete(&GrantQuery::new(*caller, grantee, data_id), locked_until)
    }

    /// Look up grants by owner, grantee and data id, any of which may be a
    /// wildcard (but not both owner and grantee).
    ///
    /// Results are in the insertion order of the owner index when `owner`
    /// is concrete, otherwise of the grantee index.
    pub fn find_grants(
        &self,
        owner: Address,
        grantee: Address,
        data_id: impl Into<DataId>,
    ) -> Result<Vec<Grant>> {
        self.find(&GrantQuery::new(owner, grantee, data_id))
    }

    /// [`find_grants`](Registry::find_grants) taking a prepared query.
    pub fn find(&self, query: &GrantQuery) -> Result<Vec<Grant>> {
        if !query.is_resolvable() {
            return Err(RegistryError::InvalidQuery);
        }
        self.check_query_gate(query)?;
        Ok(self.store.find_grants(query)?)
    }

    /// Grants held by `grantee`, from any owner. `grantee` must be approved.
    pub fn grants_for(&self, grantee: Address, data_id: impl Into<DataId>) -> Result<Vec<Grant>> {
        self.require_approved(&grantee, "grantee")?;
        self.find(&GrantQuery::new(Address::ZERO, grantee, data_id))
    }

    /// Get a grant by identity.
    pub fn grant(&self, id: &GrantId) -> Option<&Grant> {
        self.store.get(id)
    }

    /// Number of live grants.
    pub fn grant_count(&self) -> usize {
        self.store.len()
    }

    fn check_query_gate(&self, query: &GrantQuery) -> Result<()> {
        match self.config.query_gate {
            QueryGate::ConcreteOwner if query.owner.is_zero() => Ok(()),
            QueryGate::ConcreteOwner | QueryGate::Uniform => {
                self.require_approved(&query.owner, "owner")
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Store primitives
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert into the store and announce the grant.
    pub(crate) fn store_insert(&mut self, grant: Grant) -> Result<GrantId> {
        let id = self.store.insert(grant.clone()).map_err(RegistryError::from)?;
        tracing::debug!(
            grant = %id,
            owner = %grant.owner,
            grantee = %grant.grantee,
            data_id = %grant.data_id,
            locked_until = grant.locked_until,
            "grant added"
        );
        self.events.emit(RegistryEvent::GrantAdded(grant));
        Ok(id)
    }

    /// Delete from the store and announce each deleted grant.
    pub(crate) fn store_delete(
        &mut self,
        query: &GrantQuery,
        locked_until: Timestamp,
    ) -> Result<Vec<Grant>> {
        let now = self.clock.now();
        let deleted = self.store.delete_grants(query, locked_until, now)?;
        for grant in &deleted {
            tracing::debug!(
                owner = %grant.owner,
                grantee = %grant.grantee,
                data_id = %grant.data_id,
                locked_until = grant.locked_until,
                "grant deleted"
            );
            self.events.emit(RegistryEvent::GrantDeleted(grant.clone()));
        }
        Ok(deleted)
    }
}
