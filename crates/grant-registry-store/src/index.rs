//! Insertion-ordered identity sets used by the secondary indexes.

use std::collections::HashSet;

use grant_registry_core::GrantId;

/// A set of grant ids that remembers insertion order.
///
/// Removal keeps the relative order of the remaining ids.
#[derive(Debug, Clone, Default)]
pub struct OrderedIds {
    order: Vec<GrantId>,
    members: HashSet<GrantId>,
}

impl OrderedIds {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id. Returns `false` if it was already present.
    pub fn insert(&mut self, id: GrantId) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        self.order.push(id);
        true
    }

    /// Remove an id. Returns `false` if it was not present.
    pub fn remove(&mut self, id: &GrantId) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.order.retain(|existing| existing != id);
        true
    }

    /// Membership test.
    pub fn contains(&self, id: &GrantId) -> bool {
        self.members.contains(id)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &GrantId> {
        self.order.iter()
    }

    /// Number of ids.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Copy the ids out, in insertion order.
    pub fn to_vec(&self) -> Vec<GrantId> {
        self.order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(b: u8) -> GrantId {
        GrantId::from_bytes([b; 32])
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut set = OrderedIds::new();
        set.insert(id(3));
        set.insert(id(1));
        set.insert(id(2));

        assert_eq!(set.to_vec(), vec![id(3), id(1), id(2)]);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut set = OrderedIds::new();
        assert!(set.insert(id(1)));
        assert!(!set.insert(id(1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut set = OrderedIds::new();
        for b in 1..=4 {
            set.insert(id(b));
        }

        assert!(set.remove(&id(2)));
        assert!(!set.remove(&id(2)));
        assert_eq!(set.to_vec(), vec![id(1), id(3), id(4)]);
        assert!(!set.contains(&id(2)));
    }

    proptest! {
        #[test]
        fn test_matches_vec_model(ops in prop::collection::vec((any::<bool>(), 0u8..8), 0..64)) {
            let mut set = OrderedIds::new();
            let mut model: Vec<GrantId> = Vec::new();

            for (add, b) in ops {
                if add {
                    let fresh = !model.contains(&id(b));
                    prop_assert_eq!(set.insert(id(b)), fresh);
                    if fresh {
                        model.push(id(b));
                    }
                } else {
                    let present = model.contains(&id(b));
                    prop_assert_eq!(set.remove(&id(b)), present);
                    model.retain(|x| x != &id(b));
                }
                prop_assert_eq!(set.to_vec(), model.clone());
            }
        }
    }
}
