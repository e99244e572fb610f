//! The participant approval gate.
//!
//! An address must be approved before it can own, hold, or submit grants.
//! Approval is granted (and revoked) only by validators.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use grant_registry_core::Address;

use crate::error::{PermsError, Result};
use crate::validators::ValidatorSet;

/// What to do when an approved address is approved again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reapproval {
    /// Succeed without changing anything.
    #[default]
    Ignore,
    /// Fail with `AlreadyApproved`.
    Reject,
}

/// Effect of an approval operation on the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalChange {
    /// The address became approved.
    Granted,
    /// The address lost its approval.
    Revoked,
    /// The address was already in the requested state.
    Unchanged,
}

/// Mapping from address to approval status.
#[derive(Debug, Clone, Default)]
pub struct ApprovalGate {
    approved: HashMap<Address, bool>,
}

impl ApprovalGate {
    /// Create a gate with nobody approved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `addr` is approved.
    pub fn is_approved(&self, addr: &Address) -> bool {
        self.approved.get(addr).copied().unwrap_or(false)
    }

    /// Fail with `Unauthorized` unless `addr` is approved.
    pub fn require_approved(&self, addr: &Address, role: &str) -> Result<()> {
        if self.is_approved(addr) {
            Ok(())
        } else {
            Err(PermsError::Unauthorized(format!("{role} {addr} is not approved")))
        }
    }

    /// Approve `target`. `caller` must be a validator.
    pub fn approve(
        &mut self,
        validators: &ValidatorSet,
        caller: &Address,
        target: Address,
        reapproval: Reapproval,
    ) -> Result<ApprovalChange> {
        validators.require_validator(caller)?;

        if self.is_approved(&target) {
            return match reapproval {
                Reapproval::Ignore => Ok(ApprovalChange::Unchanged),
                Reapproval::Reject => Err(PermsError::AlreadyApproved(target)),
            };
        }

        self.approved.insert(target, true);
        Ok(ApprovalChange::Granted)
    }

    /// Withdraw the approval of `target`. `caller` must be a validator.
    pub fn revoke(
        &mut self,
        validators: &ValidatorSet,
        caller: &Address,
        target: &Address,
    ) -> Result<ApprovalChange> {
        validators.require_validator(caller)?;

        match self.approved.remove(target) {
            Some(true) => Ok(ApprovalChange::Revoked),
            _ => Ok(ApprovalChange::Unchanged),
        }
    }

    /// Number of approved addresses.
    pub fn approved_count(&self) -> usize {
        self.approved.values().filter(|&&ok| ok).count()
    }
}
