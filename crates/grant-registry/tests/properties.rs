//! Property tests: the registry against a plain list of live grants.

use proptest::prelude::*;

use grant_registry::{Address, Grant, RegistryError, ANY_LOCK};
use grant_registry_testkit::generators::{pool_address, GrantParams, QueryParams, NOW};
use grant_registry_testkit::TestFixture;

#[derive(Debug, Clone)]
enum Op {
    Insert(GrantParams),
    Delete {
        owner: Address,
        query: QueryParams,
        any_lock: bool,
        lock: u64,
    },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<GrantParams>().prop_map(Op::Insert),
        1 => (any::<GrantParams>(), any::<QueryParams>(), any::<bool>())
            .prop_map(|(p, query, any_lock)| Op::Delete {
                owner: p.owner,
                query,
                any_lock,
                lock: p.locked_until,
            }),
    ]
}

fn fixture() -> TestFixture {
    let mut fx = TestFixture::new();
    fx.clock.set(NOW);
    for n in 0..3 {
        fx.approve(pool_address(n));
    }
    fx
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_registry_matches_model(ops in prop::collection::vec(op(), 1..40)) {
        let mut fx = fixture();
        let mut model: Vec<Grant> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(params) => {
                    let grant = params.grant();
                    let result = fx.registry.insert_grant(
                        &grant.owner,
                        grant.grantee,
                        grant.data_id.clone(),
                        grant.locked_until,
                    );
                    if model.contains(&grant) {
                        prop_assert_eq!(result, Err(RegistryError::DuplicateGrant(grant.id())));
                    } else {
                        prop_assert_eq!(result, Ok(grant.id()));
                        model.push(grant);
                    }
                }
                Op::Delete { owner, query, any_lock, lock } => {
                    let filter = if any_lock { ANY_LOCK } else { lock };
                    let selected: Vec<Grant> = model
                        .iter()
                        .filter(|g| g.owner == owner)
                        .filter(|g| query.matches(g))
                        .filter(|g| filter == ANY_LOCK || g.locked_until == filter)
                        .cloned()
                        .collect();

                    let result = fx.registry.delete_grant(
                        &owner,
                        query.grantee,
                        query.data_id.clone(),
                        filter,
                    );

                    if selected.is_empty() {
                        prop_assert_eq!(result, Err(RegistryError::NoMatchingGrants));
                    } else if selected.iter().any(|g| g.is_locked(NOW)) {
                        let is_timelocked = matches!(result, Err(RegistryError::Timelocked { .. }));
                        prop_assert!(is_timelocked);
                    } else {
                        prop_assert_eq!(result, Ok(selected.clone()));
                        model.retain(|g| !selected.contains(g));
                    }
                }
            }

            prop_assert_eq!(fx.registry.grant_count(), model.len());
            prop_assert!(fx.registry.store().indexes_consistent());
        }

        // Every live grant is found by its own fields.
        for grant in &model {
            let found = fx
                .registry
                .find_grants(grant.owner, grant.grantee, grant.data_id.clone())
                .unwrap();
            prop_assert!(found.contains(grant));
        }
    }

    #[test]
    fn test_query_results_follow_insertion_order(
        grants in prop::collection::vec(any::<GrantParams>(), 0..30),
        query: QueryParams,
    ) {
        let mut fx = fixture();
        let mut model: Vec<Grant> = Vec::new();
        for params in grants {
            let grant = params.grant();
            if fx
                .registry
                .insert_grant(&grant.owner, grant.grantee, grant.data_id.clone(), grant.locked_until)
                .is_ok()
            {
                model.push(grant);
            }
        }

        let result = fx
            .registry
            .find_grants(query.owner, query.grantee, query.data_id.clone());

        if query.owner.is_zero() && query.grantee.is_zero() {
            prop_assert_eq!(result, Err(RegistryError::InvalidQuery));
        } else {
            let expected: Vec<Grant> = model.into_iter().filter(|g| query.matches(g)).collect();
            prop_assert_eq!(result, Ok(expected));
        }
    }
}
