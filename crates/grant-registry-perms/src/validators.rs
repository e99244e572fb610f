//! The validator set.
//!
//! Only the administrator may change membership. Adding requires the
//! address to be absent and removing requires it to be present.

use std::collections::BTreeSet;

use grant_registry_core::Address;

use crate::error::{PermsError, Result};

/// Administrator-managed set of validator addresses.
#[derive(Debug, Clone)]
pub struct ValidatorSet {
    admin: Address,
    members: BTreeSet<Address>,
}

impl ValidatorSet {
    /// Create an empty set managed by `admin`.
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            members: BTreeSet::new(),
        }
    }

    /// The administrator address.
    pub fn admin(&self) -> &Address {
        &self.admin
    }

    /// Whether `addr` is a validator.
    pub fn contains(&self, addr: &Address) -> bool {
        self.members.contains(addr)
    }

    /// Validators, sorted by address.
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }

    /// Number of validators.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether there are no validators.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add a validator.
    pub fn add(&mut self, caller: &Address, addr: Address) -> Result<()> {
        self.require_admin(caller)?;
        if !self.members.insert(addr) {
            return Err(PermsError::ValidatorExists(addr));
        }
        Ok(())
    }

    /// Remove a validator.
    pub fn remove(&mut self, caller: &Address, addr: &Address) -> Result<()> {
        self.require_admin(caller)?;
        if !self.members.remove(addr) {
            return Err(PermsError::ValidatorMissing(*addr));
        }
        Ok(())
    }

    /// Fail with `Unauthorized` unless `caller` is a validator.
    pub fn require_validator(&self, caller: &Address) -> Result<()> {
        if self.contains(caller) {
            Ok(())
        } else {
            Err(PermsError::Unauthorized(format!("{caller} is not a validator")))
        }
    }

    fn require_admin(&self, caller: &Address) -> Result<()> {
        if caller == &self.admin {
            Ok(())
        } else {
            Err(PermsError::Unauthorized(format!(
                "{caller} is not the administrator"
            )))
        }
    }
}
