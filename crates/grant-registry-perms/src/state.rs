//! Aggregated access-control state.
//!
//! Bundles the validator set and the approval gate so the registry owns a
//! single value for every role check.

use grant_registry_core::Address;

use crate::error::Result;
use crate::gate::{ApprovalChange, ApprovalGate, Reapproval};
use crate::validators::ValidatorSet;

/// Validator set plus approval gate.
#[derive(Debug, Clone)]
pub struct AccessControl {
    validators: ValidatorSet,
    gate: ApprovalGate,
    reapproval: Reapproval,
}

impl AccessControl {
    /// Create access-control state managed by `admin`.
    pub fn new(admin: Address, reapproval: Reapproval) -> Self {
        Self {
            validators: ValidatorSet::new(admin),
            gate: ApprovalGate::new(),
            reapproval,
        }
    }

    /// The administrator address.
    pub fn admin(&self) -> &Address {
        self.validators.admin()
    }

    /// The validator set.
    pub fn validators(&self) -> &ValidatorSet {
        &self.validators
    }

    /// Whether `addr` is a validator.
    pub fn is_validator(&self, addr: &Address) -> bool {
        self.validators.contains(addr)
    }

    /// Whether `addr` is an approved participant.
    pub fn is_approved(&self, addr: &Address) -> bool {
        self.gate.is_approved(addr)
    }

    /// Fail with `Unauthorized` unless `addr` is approved.
    pub fn require_approved(&self, addr: &Address, role: &str) -> Result<()> {
        self.gate.require_approved(addr, role)
    }

    /// Add a validator (administrator only).
    pub fn add_validator(&mut self, caller: &Address, addr: Address) -> Result<()> {
        self.validators.add(caller, addr)
    }

    /// Remove a validator (administrator only).
    pub fn remove_validator(&mut self, caller: &Address, addr: &Address) -> Result<()> {
        self.validators.remove(caller, addr)
    }

    /// Approve a participant (validators only).
    pub fn approve(&mut self, caller: &Address, target: Address) -> Result<ApprovalChange> {
        self.gate
            .approve(&self.validators, caller, target, self.reapproval)
    }

    /// Revoke a participant's approval (validators only).
    pub fn revoke_approval(&mut self, caller: &Address, target: &Address) -> Result<ApprovalChange> {
        self.gate.revoke(&self.validators, caller, target)
    }
}
