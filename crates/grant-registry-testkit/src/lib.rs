//! # Grant Registry Testkit
//!
//! Testing utilities for the Grant Registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Canonical delegation messages with their exact text
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A registry with an administrator, a validator and a
//!   manual clock, ready for tests
//!
//! ## Golden Vectors
//!
//! ```rust
//! use grant_registry_testkit::vectors::{all_vectors, verify_all_vectors};
//!
//! assert!(verify_all_vectors().is_ok());
//! assert!(!all_vectors().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use grant_registry_testkit::generators::GrantParams;
//!
//! proptest! {
//!     #[test]
//!     fn grant_id_is_deterministic(params: GrantParams) {
//!         prop_assert_eq!(params.grant().id(), params.grant().id());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use grant_registry_testkit::fixtures::TestFixture;
//!
//! let mut fixture = TestFixture::new();
//! let owner = fixture.approved_party(10);
//! let grantee = fixture.approved_party(11);
//! fixture
//!     .registry
//!     .insert_grant(&owner.address(), grantee.address(), "doc", 0)
//!     .unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_keys, TestFixture};
pub use generators::GrantParams;
pub use vectors::{all_vectors, verify_all_vectors, MessageVector};
