//! # Grant Registry Core
//!
//! Pure primitives for the Grant Registry: addresses, grant records, grant
//! identities, signatures and the canonical messages that delegated
//! operations are signed over.
//!
//! This crate contains no registry state. It is pure computation over the
//! values the other crates store and verify.
//!
//! ## Key Types
//!
//! - [`Address`] - A participant identity (an Ed25519 public key)
//! - [`Grant`] - The immutable permission record
//! - [`GrantId`] - Content-derived identity of a grant (Blake3 hash)
//! - [`DataId`] - Opaque data item name, with `"0"` reserved as the wildcard
//! - [`SignatureVerifier`] - Pluggable check of (message, signature, signer)
//! - [`Clock`] - Source of the current time for timelock checks
//!
//! ## Canonical Messages
//!
//! Delegated inserts and deletes are authorized by a signature over a fixed,
//! human-readable message. See [`canonical`] for the exact format.

pub mod canonical;
pub mod clock;
pub mod crypto;
pub mod error;
pub mod grant;
pub mod types;

pub use canonical::{
    delete_grant_message, grant_identity_bytes, insert_grant_message, signing_digest,
    DelegatedOp, ID_DOMAIN, SIGNING_PREFIX,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use crypto::{Ed25519Verifier, Keypair, Signature, SignatureVerifier};
pub use error::CoreError;
pub use grant::Grant;
pub use types::{Address, DataId, DataKey, GrantId, Timestamp, ANY_LOCK};
