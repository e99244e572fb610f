//! Cryptographic primitives for the Grant Registry.
//!
//! Wraps Ed25519 signing with strong types and defines the pluggable
//! [`SignatureVerifier`] used by the signed-delegation protocol.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use std::fmt;

use crate::canonical::{signing_digest, SIGNING_PREFIX};
use crate::error::CoreError;
use crate::types::Address;

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 64 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The zero signature (never valid).
    pub const ZERO: Self = Self([0u8; 64]);
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..16])
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl Address {
    /// Verify a raw Ed25519 signature by this address over `message`.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CoreError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CoreError::InvalidPublicKey)?;

        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);

        verifying_key
            .verify_strict(message, &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

/// Checks that `signature` over `message` was produced by `signer`.
///
/// The registry only ever asks this one question, so any scheme that can
/// map an address to a verification key can be plugged in.
pub trait SignatureVerifier: Send + Sync {
    /// Returns `true` iff the signature is valid for `signer` and `message`.
    fn verify(&self, message: &[u8], signature: &Signature, signer: &Address) -> bool;
}

/// Ed25519 hash-then-sign verifier over a domain-separated digest.
#[derive(Debug, Clone)]
pub struct Ed25519Verifier {
    prefix: String,
}

impl Ed25519Verifier {
    /// Create a verifier using the given signing prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The signing prefix in use.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for Ed25519Verifier {
    fn default() -> Self {
        Self::new(SIGNING_PREFIX)
    }
}

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, message: &[u8], signature: &Signature, signer: &Address) -> bool {
        if signer.is_zero() {
            return false;
        }
        let digest = signing_digest(&self.prefix, message);
        signer.verify(&digest, signature).is_ok()
    }
}

/// A keypair for signing delegated operations.
///
/// This wraps ed25519-dalek's SigningKey.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// The address of this keypair.
    pub fn address(&self) -> Address {
        Address(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign raw bytes.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let sig = self.signing_key.sign(message);
        Signature(sig.to_bytes())
    }

    /// Sign a message under the default [`SIGNING_PREFIX`].
    pub fn sign_message(&self, message: &str) -> Signature {
        self.sign_message_with_prefix(SIGNING_PREFIX, message)
    }

    /// Sign a message under a custom signing prefix.
    pub fn sign_message_with_prefix(&self, prefix: &str, message: &str) -> Signature {
        self.sign(&signing_digest(prefix, message.as_bytes()))
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.address())
    }
}
