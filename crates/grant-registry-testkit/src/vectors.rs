//! Golden vectors for the delegation message format.
//!
//! Each vector pins the exact text an owner signs. Other implementations
//! (wallets, relayers) can check themselves against [`vectors_json`].

use grant_registry_core::{
    signing_digest, Address, DelegatedOp, Ed25519Verifier, Keypair, SignatureVerifier,
    Timestamp, SIGNING_PREFIX,
};

/// A golden delegation-message vector.
#[derive(Debug, Clone)]
pub struct MessageVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Operation being authorized.
    pub op: DelegatedOp,
    /// Owner address bytes.
    pub owner: [u8; 32],
    /// Grantee address bytes (all zero for the wildcard).
    pub grantee: [u8; 32],
    /// Data id (`"0"` for the wildcard).
    pub data_id: &'static str,
    /// Lock time (0 for the wildcard on deletes).
    pub locked_until: Timestamp,
    /// Seed of the key that signs the vector.
    pub signer_seed: [u8; 32],
    /// Exact message text.
    pub expected_message: &'static str,
}

impl MessageVector {
    /// Build the message from the vector's fields.
    pub fn message(&self) -> String {
        self.op.message(
            &Address::from_bytes(self.owner),
            &Address::from_bytes(self.grantee),
            self.data_id,
            self.locked_until,
        )
    }
}

/// Get all golden vectors.
pub fn all_vectors() -> Vec<MessageVector> {
    vec![
        MessageVector {
            name: "insert with timelock",
            op: DelegatedOp::InsertGrant,
            owner: [0x11; 32],
            grantee: [0x22; 32],
            data_id: "x",
            locked_until: 50,
            signer_seed: [0x42; 32],
            expected_message: "operation: insertGrant\n\
                owner: 1111111111111111111111111111111111111111111111111111111111111111\n\
                grantee: 2222222222222222222222222222222222222222222222222222222222222222\n\
                dataId: x\n\
                lockedUntil: 50",
        },
        MessageVector {
            name: "delete exact grant",
            op: DelegatedOp::DeleteGrant,
            owner: [0x11; 32],
            grantee: [0x22; 32],
            data_id: "x",
            locked_until: 50,
            signer_seed: [0x42; 32],
            expected_message: "operation: deleteGrant\n\
                owner: 1111111111111111111111111111111111111111111111111111111111111111\n\
                grantee: 2222222222222222222222222222222222222222222222222222222222222222\n\
                dataId: x\n\
                lockedUntil: 50",
        },
        MessageVector {
            name: "delete everything an owner issued",
            op: DelegatedOp::DeleteGrant,
            owner: [0xab; 32],
            grantee: [0x00; 32],
            data_id: "0",
            locked_until: 0,
            signer_seed: [0x07; 32],
            expected_message: "operation: deleteGrant\n\
                owner: abababababababababababababababababababababababababababababababab\n\
                grantee: 0000000000000000000000000000000000000000000000000000000000000000\n\
                dataId: 0\n\
                lockedUntil: 0",
        },
        MessageVector {
            name: "insert with long data id and far lock",
            op: DelegatedOp::InsertGrant,
            owner: [0xab; 32],
            grantee: [0x11; 32],
            data_id: "medical-records/2026/scan-17",
            locked_until: 4_102_444_800, // 2100-01-01T00:00:00Z
            signer_seed: [0x07; 32],
            expected_message: "operation: insertGrant\n\
                owner: abababababababababababababababababababababababababababababababab\n\
                grantee: 1111111111111111111111111111111111111111111111111111111111111111\n\
                dataId: medical-records/2026/scan-17\n\
                lockedUntil: 4102444800",
        },
    ]
}

/// Check every vector: the message text must match exactly, and a
/// signature over it must verify under the default prefix and fail once
/// the text is altered.
pub fn verify_all_vectors() -> Result<(), String> {
    let verifier = Ed25519Verifier::default();

    for vector in all_vectors() {
        let message = vector.message();
        if message != vector.expected_message {
            return Err(format!(
                "vector '{}': message mismatch\n  got:      {:?}\n  expected: {:?}",
                vector.name, message, vector.expected_message
            ));
        }

        let signer = Keypair::from_seed(&vector.signer_seed);
        let signature = signer.sign_message(&message);
        if !verifier.verify(message.as_bytes(), &signature, &signer.address()) {
            return Err(format!("vector '{}': signature did not verify", vector.name));
        }

        let altered = format!("{message} ");
        if verifier.verify(altered.as_bytes(), &signature, &signer.address()) {
            return Err(format!(
                "vector '{}': signature verified an altered message",
                vector.name
            ));
        }
    }

    Ok(())
}

/// Export the vectors as JSON, with the digest each one signs.
pub fn vectors_json() -> serde_json::Value {
    let vectors: Vec<serde_json::Value> = all_vectors()
        .iter()
        .map(|v| {
            let message = v.message();
            serde_json::json!({
                "name": v.name,
                "operation": v.op.as_str(),
                "owner": hex::encode(v.owner),
                "grantee": hex::encode(v.grantee),
                "dataId": v.data_id,
                "lockedUntil": v.locked_until,
                "message": message,
                "digest": hex::encode(signing_digest(SIGNING_PREFIX, message.as_bytes())),
            })
        })
        .collect();

    serde_json::json!({
        "signingPrefix": SIGNING_PREFIX,
        "vectors": vectors,
    })
}
