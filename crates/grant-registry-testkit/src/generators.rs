//! Proptest generators for property-based testing.

use proptest::prelude::*;

use grant_registry_core::{Address, DataId, Grant, Keypair, Timestamp};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random non-zero address.
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 32]>()
        .prop_filter("zero address is the wildcard", |b| b != &[0u8; 32])
        .prop_map(Address::from_bytes)
}

/// Generate a data id that is not the wildcard.
pub fn data_id() -> impl Strategy<Value = DataId> {
    "[a-zA-Z0-9_/-]{1,24}"
        .prop_filter("\"0\" is the wildcard", |s| s.as_str() != DataId::WILDCARD)
        .prop_map(DataId::from)
}

/// Generate a lock time around [`NOW`].
pub fn locked_until() -> impl Strategy<Value = Timestamp> {
    prop_oneof![Just(0u64), 1..NOW, NOW..=NOW + 10_000]
}

/// Reference "now" for generated lock times.
pub const NOW: Timestamp = 1_000_000;

/// Small pools so generated grants collide on owner, grantee and data.
const POOL: u8 = 3;
const DATA_POOL: &[&str] = &["1A", "1B", "1C"];

/// Address number `n` of the shared pool.
pub fn pool_address(n: u8) -> Address {
    Address::from_bytes([n + 1; 32])
}

/// Parameters for generating a grant.
///
/// Fields are drawn from small pools, so sequences of params exercise
/// duplicate identities and shared index entries.
#[derive(Debug, Clone)]
pub struct GrantParams {
    pub owner: Address,
    pub grantee: Address,
    pub data_id: DataId,
    pub locked_until: Timestamp,
}

impl GrantParams {
    /// The grant these parameters describe.
    pub fn grant(&self) -> Grant {
        Grant::new(
            self.owner,
            self.grantee,
            self.data_id.clone(),
            self.locked_until,
        )
    }
}

impl Arbitrary for GrantParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            0..POOL,
            0..POOL,
            0..DATA_POOL.len(),
            prop_oneof![Just(0), Just(NOW - 1), Just(NOW + 5)],
        )
            .prop_map(|(o, g, d, locked_until)| GrantParams {
                owner: pool_address(o),
                grantee: pool_address(g),
                data_id: DataId::from(DATA_POOL[d]),
                locked_until,
            })
            .boxed()
    }
}

/// A query pattern over the same pools; each field may be its wildcard.
#[derive(Debug, Clone)]
pub struct QueryParams {
    pub owner: Address,
    pub grantee: Address,
    pub data_id: DataId,
}

impl Arbitrary for QueryParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let addr = prop_oneof![Just(Address::ZERO), (0..POOL).prop_map(pool_address)];
        let data = prop_oneof![
            Just(DataId::wildcard()),
            (0..DATA_POOL.len()).prop_map(|d| DataId::from(DATA_POOL[d]))
        ];
        (addr.clone(), addr, data)
            .prop_map(|(owner, grantee, data_id)| QueryParams {
                owner,
                grantee,
                data_id,
            })
            .boxed()
    }
}

impl QueryParams {
    /// Whether `grant` matches this pattern.
    pub fn matches(&self, grant: &Grant) -> bool {
        (self.owner.is_zero() || grant.owner == self.owner)
            && (self.grantee.is_zero() || grant.grantee == self.grantee)
            && (self.data_id.is_wildcard() || grant.data_id == self.data_id)
    }
}
