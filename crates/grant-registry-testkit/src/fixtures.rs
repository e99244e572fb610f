//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use grant_registry::{Registry, RegistryConfig};
use grant_registry_core::{
    delete_grant_message, insert_grant_message, Address, Keypair, ManualClock, Signature,
    Timestamp,
};

/// A registry with an administrator, one validator and a manual clock.
pub struct TestFixture {
    pub registry: Registry,
    pub clock: ManualClock,
    pub admin: Keypair,
    pub validator: Keypair,
}

impl TestFixture {
    /// Time the fixture clock starts at.
    pub const START_TIME: Timestamp = 1_700_000_000;

    /// Create a fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a fixture with a custom configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        let clock = ManualClock::new(Self::START_TIME);
        let admin = Keypair::from_seed(&[0xa0; 32]);
        let validator = Keypair::from_seed(&[0xa1; 32]);

        let mut registry = Registry::new(admin.address(), config).with_clock(clock.clone());
        registry
            .add_validator(&admin.address(), validator.address())
            .expect("admin can add a validator");

        Self {
            registry,
            clock,
            admin,
            validator,
        }
    }

    /// A deterministic keypair for `seed`.
    pub fn party(seed: u8) -> Keypair {
        Keypair::from_seed(&[seed; 32])
    }

    /// A deterministic keypair for `seed`, approved in the registry.
    pub fn approved_party(&mut self, seed: u8) -> Keypair {
        let party = Self::party(seed);
        self.approve(party.address());
        party
    }

    /// Approve an address through the fixture's validator.
    pub fn approve(&mut self, addr: Address) {
        self.registry
            .approve(&self.validator.address(), addr)
            .expect("validator can approve");
    }

    /// Current fixture time.
    pub fn now(&self) -> Timestamp {
        self.registry.now()
    }

    /// `owner`'s signature authorizing an insert.
    pub fn sign_insert(
        owner: &Keypair,
        grantee: &Address,
        data_id: &str,
        locked_until: Timestamp,
    ) -> Signature {
        owner.sign_message(&insert_grant_message(
            &owner.address(),
            grantee,
            data_id,
            locked_until,
        ))
    }

    /// `owner`'s signature authorizing a delete.
    pub fn sign_delete(
        owner: &Keypair,
        grantee: &Address,
        data_id: &str,
        locked_until: Timestamp,
    ) -> Signature {
        owner.sign_message(&delete_grant_message(
            &owner.address(),
            grantee,
            data_id,
            locked_until,
        ))
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Distinct deterministic keypairs for multi-party tests.
///
/// # Panics
/// If `count` exceeds 65536.
pub fn multi_party_keys(count: usize) -> Vec<Keypair> {
    assert!(count <= 1 << 16, "at most 65536 distinct parties");
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..2].copy_from_slice(&(i as u16).to_le_bytes());
            seed[2] = 0x5e;
            Keypair::from_seed(&seed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_roles() {
        let fixture = TestFixture::new();

        assert_eq!(fixture.registry.admin(), &fixture.admin.address());
        assert!(fixture.registry.is_validator(&fixture.validator.address()));
        assert_eq!(fixture.now(), TestFixture::START_TIME);
    }

    #[test]
    fn test_approved_party() {
        let mut fixture = TestFixture::new();
        let party = fixture.approved_party(7);

        assert!(fixture.registry.is_approved(&party.address()));
        assert!(!fixture.registry.is_approved(&TestFixture::party(8).address()));
    }

    #[test]
    fn test_multi_party() {
        let keys = multi_party_keys(3);
        let addrs: Vec<_> = keys.iter().map(|k| k.address()).collect();

        assert_ne!(addrs[0], addrs[1]);
        assert_ne!(addrs[1], addrs[2]);
        assert_ne!(addrs[0], addrs[2]);
    }

    #[test]
    fn test_multi_party_beyond_one_byte() {
        let keys = multi_party_keys(300);
        let addrs: std::collections::HashSet<_> = keys.iter().map(|k| k.address()).collect();

        assert_eq!(addrs.len(), 300);
    }
}
