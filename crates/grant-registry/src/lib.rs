//! # Grant Registry
//!
//! An authorization registry of time-bounded grants: permission records
//! linking a data owner to a grantee for a named data item.
//!
//! ## Overview
//!
//! - **Validators** (managed by a single administrator) approve participants
//! - **Approved participants** insert and delete grants directly
//! - **Relayers** submit inserts and deletes on an owner's behalf, carrying
//!   the owner's signature over a canonical message
//! - **Queries** match owner/grantee/data with wildcards, in deterministic
//!   index order
//! - **Timelocks** forbid deleting a grant before its `locked_until`
//!
//! Every successful mutation appends to an ordered [`EventLog`].
//!
//! ## Usage
//!
//! ```rust
//! use grant_registry::{Registry, RegistryConfig};
//! use grant_registry::core::{insert_grant_message, Address, Keypair};
//!
//! let admin = Address::from_bytes([1; 32]);
//! let validator = Address::from_bytes([2; 32]);
//! let owner = Keypair::from_seed(&[3; 32]);
//! let grantee = Address::from_bytes([4; 32]);
//! let relayer = Address::from_bytes([5; 32]);
//!
//! let mut registry = Registry::new(admin, RegistryConfig::default());
//! registry.add_validator(&admin, validator).unwrap();
//! registry.approve(&validator, grantee).unwrap();
//!
//! // The owner signs off-line; the relayer submits.
//! let message = insert_grant_message(&owner.address(), &grantee, "medical-record", 0);
//! let signature = owner.sign_message(&message);
//! registry
//!     .insert_grant_by_signature(&relayer, owner.address(), grantee, "medical-record", 0, &signature)
//!     .unwrap();
//!
//! let held = registry.grants_for(grantee, "medical-record").unwrap();
//! assert_eq!(held.len(), 1);
//! ```
//!
//! ## Re-exports
//!
//! - `grant_registry::core` - Addresses, grants, signatures, canonical messages
//! - `grant_registry::store` - Grant storage and the query engine
//! - `grant_registry::perms` - Validator set and approval gate

pub mod config;
pub mod delegation;
pub mod error;
pub mod events;
pub mod registry;
pub mod shared;

// Re-export component crates
pub use grant_registry_core as core;
pub use grant_registry_perms as perms;
pub use grant_registry_store as store;

// Re-export main types for convenience
pub use config::{QueryGate, RegistryConfig};
pub use error::{RegistryError, Result};
pub use events::{EventLog, EventRecord, RegistryEvent};
pub use registry::Registry;
pub use shared::SharedRegistry;

// Re-export commonly used core types
pub use grant_registry_core::{
    delete_grant_message, insert_grant_message, Address, Clock, DataId, DelegatedOp, Grant,
    GrantId, Keypair, ManualClock, Signature, SignatureVerifier, SystemClock, Timestamp,
    ANY_LOCK,
};
pub use grant_registry_store::GrantQuery;
