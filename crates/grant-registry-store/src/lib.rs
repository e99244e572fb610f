//! # Grant Registry Store
//!
//! Storage for grants. Provides a trait-based interface with an in-memory
//! implementation that keeps a primary table and three secondary indexes.
//!
//! ## Overview
//!
//! The [`GrantStore`] trait covers the primitive operations (insert, remove,
//! index lookups). [`GrantStoreExt`] builds the query engine and the bulk
//! delete on top of those primitives, so every backend gets identical query
//! semantics.
//!
//! ## Key Types
//!
//! - [`GrantStore`] - Primitive storage operations
//! - [`GrantStoreExt`] - `find_grants` and `delete_grants`
//! - [`MemoryGrantStore`] - Primary table + owner/grantee/data indexes
//! - [`GrantQuery`] - Owner/grantee/data pattern with wildcards
//! - [`OrderedIds`] - Insertion-ordered identity set
//!
//! ## Usage
//!
//! ```rust
//! use grant_registry_core::{Address, Grant};
//! use grant_registry_store::{GrantQuery, GrantStore, GrantStoreExt, MemoryGrantStore};
//!
//! let owner = Address::from_bytes([1; 32]);
//! let grantee = Address::from_bytes([2; 32]);
//!
//! let mut store = MemoryGrantStore::new();
//! store.insert(Grant::new(owner, grantee, "report", 0)).unwrap();
//!
//! let found = store.find_grants(&GrantQuery::by_owner(owner)).unwrap();
//! assert_eq!(found.len(), 1);
//! ```
//!
//! ## Design Notes
//!
//! - **No overwrite**: Inserting an existing identity fails with `DuplicateGrant`
//! - **Primary index order**: Query results follow the insertion order of the
//!   index chosen for the query (owner if given, else grantee)
//! - **All-or-nothing deletes**: Every selected grant's timelock is checked
//!   before any grant is removed

pub mod error;
pub mod index;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use index::OrderedIds;
pub use memory::MemoryGrantStore;
pub use traits::{GrantQuery, GrantStore, GrantStoreExt};
