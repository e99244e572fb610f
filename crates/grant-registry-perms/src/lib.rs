//! # Grant Registry Permissions
//!
//! Who may take part in the registry.
//!
//! ## Overview
//!
//! Three roles gate every registry operation:
//!
//! - **Administrator**: a single address that manages the validator set
//! - **Validators**: addresses trusted to approve participants
//! - **Approved participants**: addresses allowed to own, hold, or submit
//!   grants
//!
//! ## Key Types
//!
//! - [`ValidatorSet`] - Administrator-managed set of validators
//! - [`ApprovalGate`] - Participant approvals, granted by validators
//! - [`AccessControl`] - Both, as one aggregate
//!
//! ## Usage
//!
//! ```rust
//! use grant_registry_core::Address;
//! use grant_registry_perms::{AccessControl, Reapproval};
//!
//! let admin = Address::from_bytes([1; 32]);
//! let validator = Address::from_bytes([2; 32]);
//! let alice = Address::from_bytes([3; 32]);
//!
//! let mut access = AccessControl::new(admin, Reapproval::Ignore);
//! access.add_validator(&admin, validator).unwrap();
//! access.approve(&validator, alice).unwrap();
//!
//! assert!(access.is_approved(&alice));
//! ```

pub mod error;
pub mod gate;
pub mod state;
pub mod validators;

pub use error::{PermsError, Result};
pub use gate::{ApprovalChange, ApprovalGate, Reapproval};
pub use state::AccessControl;
pub use validators::ValidatorSet;
