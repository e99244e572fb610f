//! GrantStore trait: the abstract interface for grant persistence.
//!
//! Backends implement the primitive operations; the query engine and the
//! bulk delete are provided once, by [`GrantStoreExt`], for every backend.

use grant_registry_core::{Address, DataId, DataKey, Grant, GrantId, Timestamp, ANY_LOCK};

use crate::error::{Result, StoreError};

/// An owner/grantee/data pattern. Each field may be its wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantQuery {
    /// Concrete owner, or [`Address::ZERO`] for any.
    pub owner: Address,
    /// Concrete grantee, or [`Address::ZERO`] for any.
    pub grantee: Address,
    /// Concrete data id, or the `"0"` wildcard for any.
    pub data_id: DataId,
}

impl GrantQuery {
    /// Create a query from explicit values.
    pub fn new(owner: Address, grantee: Address, data_id: impl Into<DataId>) -> Self {
        Self {
            owner,
            grantee,
            data_id: data_id.into(),
        }
    }

    /// All grants issued by `owner`.
    pub fn by_owner(owner: Address) -> Self {
        Self::new(owner, Address::ZERO, DataId::wildcard())
    }

    /// All grants held by `grantee`.
    pub fn by_grantee(grantee: Address) -> Self {
        Self::new(Address::ZERO, grantee, DataId::wildcard())
    }

    /// Restrict to one grantee.
    pub fn grantee(mut self, grantee: Address) -> Self {
        self.grantee = grantee;
        self
    }

    /// Restrict to one data item.
    pub fn data(mut self, data_id: impl Into<DataId>) -> Self {
        self.data_id = data_id.into();
        self
    }

    /// Whether at least one of owner or grantee is concrete.
    pub fn is_resolvable(&self) -> bool {
        !self.owner.is_zero() || !self.grantee.is_zero()
    }
}

/// The GrantStore trait: primitive grant persistence.
///
/// # Design Notes
///
/// - **No overwrite**: `insert` of an existing identity returns `DuplicateGrant`.
/// - **Index consistency**: an id is in an index iff the grant is in the
///   primary table. `insert` and `remove` update all indexes together.
/// - **Ordered indexes**: index lookups return ids in insertion order.
pub trait GrantStore: Send {
    // ─────────────────────────────────────────────────────────────────────────
    // Primary table
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a grant and index it.
    ///
    /// # Returns
    /// - The new grant's identity.
    /// - `DuplicateGrant` if that identity already exists.
    /// - `ReservedIdentifier` if a field holds a wildcard value.
    fn insert(&mut self, grant: Grant) -> Result<GrantId>;

    /// Remove a grant from the table and every index.
    ///
    /// Must succeed for any id that `get` currently returns.
    fn remove(&mut self, id: &GrantId) -> Result<Grant>;

    /// Get a grant by identity.
    fn get(&self, id: &GrantId) -> Option<&Grant>;

    /// Check if a grant exists.
    fn contains(&self, id: &GrantId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live grants.
    fn len(&self) -> usize;

    /// Whether the store holds no grants.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Indexes
    // ─────────────────────────────────────────────────────────────────────────

    /// Grant ids issued by `owner`, in insertion order.
    fn ids_by_owner(&self, owner: &Address) -> Vec<GrantId>;

    /// Grant ids held by `grantee`, in insertion order.
    fn ids_by_grantee(&self, grantee: &Address) -> Vec<GrantId>;

    /// Whether `id` is in the grantee index for `grantee`.
    fn in_grantee_index(&self, grantee: &Address, id: &GrantId) -> bool;

    /// Whether `id` is in the data index for `key`.
    fn in_data_index(&self, key: &DataKey, id: &GrantId) -> bool;
}

/// Query engine and bulk delete for every [`GrantStore`].
pub trait GrantStoreExt: GrantStore {
    /// Resolve a query into grant ids.
    ///
    /// The owner index is the primary index whenever the owner is concrete,
    /// otherwise the grantee index. Results keep that index's order.
    fn find_grant_ids(&self, query: &GrantQuery) -> Result<Vec<GrantId>>;

    /// Resolve a query into grants, in the same order as [`find_grant_ids`].
    ///
    /// [`find_grant_ids`]: GrantStoreExt::find_grant_ids
    fn find_grants(&self, query: &GrantQuery) -> Result<Vec<Grant>>;

    /// Delete every grant matching `query` whose lock time equals
    /// `locked_until`, or every match when `locked_until` is [`ANY_LOCK`].
    ///
    /// Fails with `NoMatchingGrants` when nothing is selected and with
    /// `Timelocked` when any selected grant is still locked at `now`. On
    /// failure nothing is removed: if the backend's `remove` fails partway,
    /// the grants already removed by this call are inserted again.
    fn delete_grants(
        &mut self,
        query: &GrantQuery,
        locked_until: Timestamp,
        now: Timestamp,
    ) -> Result<Vec<Grant>>;
}

impl<S: GrantStore + ?Sized> GrantStoreExt for S {
    fn find_grant_ids(&self, query: &GrantQuery) -> Result<Vec<GrantId>> {
        let candidates = if !query.owner.is_zero() {
            self.ids_by_owner(&query.owner)
        } else if !query.grantee.is_zero() {
            self.ids_by_grantee(&query.grantee)
        } else {
            return Err(StoreError::InvalidQuery);
        };

        let data_key = (!query.data_id.is_wildcard()).then(|| query.data_id.key());

        Ok(candidates
            .into_iter()
            .filter(|id| query.grantee.is_zero() || self.in_grantee_index(&query.grantee, id))
            .filter(|id| data_key.map_or(true, |key| self.in_data_index(&key, id)))
            .collect())
    }

    fn find_grants(&self, query: &GrantQuery) -> Result<Vec<Grant>> {
        Ok(self
            .find_grant_ids(query)?
            .iter()
            .filter_map(|id| self.get(id).cloned())
            .collect())
    }

    fn delete_grants(
        &mut self,
        query: &GrantQuery,
        locked_until: Timestamp,
        now: Timestamp,
    ) -> Result<Vec<Grant>> {
        let candidates = self.find_grant_ids(query)?;
        if candidates.is_empty() {
            return Err(StoreError::NoMatchingGrants);
        }

        let selected: Vec<GrantId> = candidates
            .into_iter()
            .filter(|id| {
                self.get(id).map_or(false, |g| {
                    locked_until == ANY_LOCK || g.locked_until == locked_until
                })
            })
            .collect();
        if selected.is_empty() {
            return Err(StoreError::NoMatchingGrants);
        }

        // Check every timelock before touching anything.
        for id in &selected {
            if let Some(grant) = self.get(id) {
                if grant.is_locked(now) {
                    return Err(StoreError::Timelocked {
                        grant: *id,
                        locked_until: grant.locked_until,
                        now,
                    });
                }
            }
        }

        let mut removed = Vec::with_capacity(selected.len());
        for id in &selected {
            match self.remove(id) {
                Ok(grant) => removed.push(grant),
                Err(e) => {
                    // Put back what this call already took out.
                    for grant in removed {
                        let _ = self.insert(grant);
                    }
                    return Err(e);
                }
            }
        }
        Ok(removed)
    }
}
