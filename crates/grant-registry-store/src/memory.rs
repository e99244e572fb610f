//! In-memory implementation of the GrantStore trait.
//!
//! Keeps the primary table and three secondary indexes (owner, grantee,
//! data) as plain maps. The registry owns the store, so no locking happens
//! here; serialisation of concurrent callers is the owner's job.

use std::collections::HashMap;

use grant_registry_core::{Address, DataKey, Grant, GrantId};

use crate::error::{Result, StoreError};
use crate::index::OrderedIds;
use crate::traits::GrantStore;

/// In-memory grant store.
#[derive(Debug, Default)]
pub struct MemoryGrantStore {
    /// Grants indexed by identity.
    grants: HashMap<GrantId, Grant>,

    /// Index: owner -> grant ids.
    by_owner: HashMap<Address, OrderedIds>,

    /// Index: grantee -> grant ids.
    by_grantee: HashMap<Address, OrderedIds>,

    /// Index: hashed data id -> grant ids.
    by_data: HashMap<DataKey, OrderedIds>,
}

impl MemoryGrantStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over all live grants, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&GrantId, &Grant)> {
        self.grants.iter()
    }

    /// Check that every index agrees with the primary table.
    ///
    /// Every indexed id must name a live grant filed under the right key,
    /// and every live grant must appear in all three indexes.
    pub fn indexes_consistent(&self) -> bool {
        let indexed_ok = self.by_owner.iter().all(|(owner, ids)| {
            ids.iter()
                .all(|id| self.grants.get(id).map_or(false, |g| &g.owner == owner))
        }) && self.by_grantee.iter().all(|(grantee, ids)| {
            ids.iter()
                .all(|id| self.grants.get(id).map_or(false, |g| &g.grantee == grantee))
        }) && self.by_data.iter().all(|(key, ids)| {
            ids.iter()
                .all(|id| self.grants.get(id).map_or(false, |g| &g.data_key() == key))
        });

        let live_ok = self.grants.iter().all(|(id, g)| {
            self.by_owner.get(&g.owner).map_or(false, |s| s.contains(id))
                && self.by_grantee.get(&g.grantee).map_or(false, |s| s.contains(id))
                && self.by_data.get(&g.data_key()).map_or(false, |s| s.contains(id))
        });

        indexed_ok && live_ok
    }
}

/// Remove `id` from the set under `key`, dropping the set once empty.
fn unindex<K: std::hash::Hash + Eq>(index: &mut HashMap<K, OrderedIds>, key: &K, id: &GrantId) {
    if let Some(ids) = index.get_mut(key) {
        ids.remove(id);
        if ids.is_empty() {
            index.remove(key);
        }
    }
}

impl GrantStore for MemoryGrantStore {
    fn insert(&mut self, grant: Grant) -> Result<GrantId> {
        if grant.uses_reserved_identifier() {
            return Err(StoreError::ReservedIdentifier(format!(
                "owner {}, grantee {}, data id {:?}",
                grant.owner, grant.grantee, grant.data_id
            )));
        }

        let id = grant.id();
        if self.grants.contains_key(&id) {
            return Err(StoreError::DuplicateGrant(id));
        }

        self.by_owner.entry(grant.owner).or_default().insert(id);
        self.by_grantee.entry(grant.grantee).or_default().insert(id);
        self.by_data.entry(grant.data_key()).or_default().insert(id);
        self.grants.insert(id, grant);

        tracing::trace!(grant = %id, "grant indexed");
        Ok(id)
    }

    fn remove(&mut self, id: &GrantId) -> Result<Grant> {
        let grant = self.grants.remove(id).ok_or(StoreError::NotFound(*id))?;

        unindex(&mut self.by_owner, &grant.owner, id);
        unindex(&mut self.by_grantee, &grant.grantee, id);
        unindex(&mut self.by_data, &grant.data_key(), id);

        tracing::trace!(grant = %id, "grant unindexed");
        Ok(grant)
    }

    fn get(&self, id: &GrantId) -> Option<&Grant> {
        self.grants.get(id)
    }

    fn len(&self) -> usize {
        self.grants.len()
    }

    fn ids_by_owner(&self, owner: &Address) -> Vec<GrantId> {
        self.by_owner
            .get(owner)
            .map(OrderedIds::to_vec)
            .unwrap_or_default()
    }

    fn ids_by_grantee(&self, grantee: &Address) -> Vec<GrantId> {
        self.by_grantee
            .get(grantee)
            .map(OrderedIds::to_vec)
            .unwrap_or_default()
    }

    fn in_grantee_index(&self, grantee: &Address, id: &GrantId) -> bool {
        self.by_grantee
            .get(grantee)
            .map_or(false, |ids| ids.contains(id))
    }

    fn in_data_index(&self, key: &DataKey, id: &GrantId) -> bool {
        self.by_data.get(key).map_or(false, |ids| ids.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{GrantQuery, GrantStoreExt};
    use grant_registry_core::{DataId, ANY_LOCK};

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    const A: u8 = 0xa;
    const B: u8 = 0xb;
    const C: u8 = 0xc;

    fn wildcard_fixture() -> (MemoryGrantStore, Vec<Grant>) {
        let mut store = MemoryGrantStore::new();
        let grants = vec![
            Grant::new(addr(A), addr(B), "1A", 0),
            Grant::new(addr(A), addr(B), "1B", 0),
            Grant::new(addr(A), addr(C), "1A", 0),
        ];
        for g in &grants {
            store.insert(g.clone()).unwrap();
        }
        (store, grants)
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = MemoryGrantStore::new();
        let grant = Grant::new(addr(1), addr(2), "doc", 5);

        let id = store.insert(grant.clone()).unwrap();

        assert_eq!(id, grant.id());
        assert_eq!(store.get(&id), Some(&grant));
        assert_eq!(store.len(), 1);
        assert!(store.indexes_consistent());
    }

    #[test]
    fn test_duplicate_insert_fails_without_side_effects() {
        let mut store = MemoryGrantStore::new();
        let grant = Grant::new(addr(1), addr(2), "doc", 5);
        let id = store.insert(grant.clone()).unwrap();

        assert_eq!(store.insert(grant), Err(StoreError::DuplicateGrant(id)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.ids_by_owner(&addr(1)), vec![id]);
    }

    #[test]
    fn test_same_fields_different_lock_are_distinct() {
        let mut store = MemoryGrantStore::new();
        store.insert(Grant::new(addr(1), addr(2), "doc", 5)).unwrap();
        store.insert(Grant::new(addr(1), addr(2), "doc", 6)).unwrap();

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reserved_identifiers_rejected() {
        let mut store = MemoryGrantStore::new();

        let wildcard_data = Grant::new(addr(1), addr(2), DataId::WILDCARD, 0);
        assert!(matches!(
            store.insert(wildcard_data),
            Err(StoreError::ReservedIdentifier(_))
        ));

        let zero_grantee = Grant::new(addr(1), Address::ZERO, "doc", 0);
        assert!(matches!(
            store.insert(zero_grantee),
            Err(StoreError::ReservedIdentifier(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_clears_all_indexes() {
        let mut store = MemoryGrantStore::new();
        let grant = Grant::new(addr(1), addr(2), "doc", 5);
        let id = store.insert(grant.clone()).unwrap();

        assert_eq!(store.remove(&id).unwrap(), grant);
        assert!(store.ids_by_owner(&addr(1)).is_empty());
        assert!(store.ids_by_grantee(&addr(2)).is_empty());
        assert!(!store.in_data_index(&DataId::from("doc").key(), &id));
        assert_eq!(store.remove(&id), Err(StoreError::NotFound(id)));
        assert!(store.indexes_consistent());
    }

    #[test]
    fn test_find_by_owner_in_insertion_order() {
        let (store, grants) = wildcard_fixture();

        let found = store.find_grants(&GrantQuery::by_owner(addr(A))).unwrap();
        assert_eq!(found, grants);
    }

    #[test]
    fn test_find_by_owner_and_data() {
        let (store, grants) = wildcard_fixture();

        let found = store
            .find_grants(&GrantQuery::by_owner(addr(A)).data("1A"))
            .unwrap();
        assert_eq!(found, vec![grants[0].clone(), grants[2].clone()]);
    }

    #[test]
    fn test_find_by_owner_and_grantee() {
        let (store, grants) = wildcard_fixture();

        let found = store
            .find_grants(&GrantQuery::by_owner(addr(A)).grantee(addr(B)))
            .unwrap();
        assert_eq!(found, vec![grants[0].clone(), grants[1].clone()]);
    }

    #[test]
    fn test_find_by_grantee_only() {
        let (mut store, grants) = wildcard_fixture();
        let other = Grant::new(addr(0xd), addr(C), "1A", 0);
        store.insert(other.clone()).unwrap();

        let found = store.find_grants(&GrantQuery::by_grantee(addr(C))).unwrap();
        assert_eq!(found, vec![grants[2].clone(), other]);
    }

    #[test]
    fn test_primary_index_decides_order() {
        let mut store = MemoryGrantStore::new();
        // Grantee C receives from D first, then from A.
        let from_d = Grant::new(addr(0xd), addr(C), "x", 0);
        let from_a = Grant::new(addr(A), addr(C), "x", 0);
        store.insert(from_d.clone()).unwrap();
        store.insert(from_a.clone()).unwrap();

        let by_grantee = store.find_grants(&GrantQuery::by_grantee(addr(C))).unwrap();
        assert_eq!(by_grantee, vec![from_d, from_a.clone()]);

        let by_owner = store
            .find_grants(&GrantQuery::by_owner(addr(A)).grantee(addr(C)))
            .unwrap();
        assert_eq!(by_owner, vec![from_a]);
    }

    #[test]
    fn test_data_only_query_is_invalid() {
        let (store, _) = wildcard_fixture();
        let query = GrantQuery::new(Address::ZERO, Address::ZERO, "1A");

        assert_eq!(store.find_grants(&query), Err(StoreError::InvalidQuery));
    }

    #[test]
    fn test_unknown_owner_finds_nothing() {
        let (store, _) = wildcard_fixture();
        assert!(store
            .find_grants(&GrantQuery::by_owner(addr(0xe)))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_delete_bulk_removes_all_lock_times() {
        let mut store = MemoryGrantStore::new();
        for lock in [10, 20, 30] {
            store.insert(Grant::new(addr(1), addr(2), "doc", lock)).unwrap();
        }
        let query = GrantQuery::by_owner(addr(1)).grantee(addr(2)).data("doc");

        let removed = store.delete_grants(&query, ANY_LOCK, 100).unwrap();

        assert_eq!(removed.len(), 3);
        assert!(store.is_empty());
        assert!(store.indexes_consistent());
    }

    #[test]
    fn test_delete_bulk_aborts_if_any_locked() {
        let mut store = MemoryGrantStore::new();
        for lock in [10, 20, 300] {
            store.insert(Grant::new(addr(1), addr(2), "doc", lock)).unwrap();
        }
        let query = GrantQuery::by_owner(addr(1)).grantee(addr(2)).data("doc");

        let err = store.delete_grants(&query, ANY_LOCK, 100).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Timelocked {
                locked_until: 300,
                now: 100,
                ..
            }
        ));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_delete_with_lock_filter_removes_only_that_grant() {
        let mut store = MemoryGrantStore::new();
        for lock in [10, 20, 300] {
            store.insert(Grant::new(addr(1), addr(2), "doc", lock)).unwrap();
        }
        let query = GrantQuery::by_owner(addr(1));

        let removed = store.delete_grants(&query, 20, 100).unwrap();

        assert_eq!(removed, vec![Grant::new(addr(1), addr(2), "doc", 20)]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_delete_nothing_found() {
        let mut store = MemoryGrantStore::new();
        let query = GrantQuery::by_owner(addr(1));
        assert_eq!(
            store.delete_grants(&query, ANY_LOCK, 0),
            Err(StoreError::NoMatchingGrants)
        );

        store.insert(Grant::new(addr(1), addr(2), "doc", 10)).unwrap();
        assert_eq!(
            store.delete_grants(&query, 11, 100),
            Err(StoreError::NoMatchingGrants)
        );
        assert_eq!(store.len(), 1);
    }
}
