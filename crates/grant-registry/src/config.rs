//! Registry configuration.

use serde::{Deserialize, Serialize};

use grant_registry_core::SIGNING_PREFIX;
use grant_registry_perms::Reapproval;

use crate::error::{RegistryError, Result};

/// When `find_grants` requires the owner argument to be approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryGate {
    /// Only a concrete owner must be approved; owner-wildcard queries are
    /// not gated.
    #[default]
    ConcreteOwner,
    /// The owner argument must always be approved, including the zero
    /// address. Grantee-only queries then fail unless the zero address has
    /// itself been approved.
    Uniform,
}

/// Configuration for the Registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Approval requirement for lookups.
    pub query_gate: QueryGate,
    /// Domain separation prefix for delegated signatures.
    pub signing_prefix: String,
    /// Behaviour when approving an already-approved address.
    pub reapproval: Reapproval,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            query_gate: QueryGate::default(),
            signing_prefix: SIGNING_PREFIX.to_string(),
            reapproval: Reapproval::default(),
        }
    }
}

impl RegistryConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RegistryError::Config(e.to_string()))?;
        if config.signing_prefix.is_empty() {
            return Err(RegistryError::Config("signing_prefix must not be empty".into()));
        }
        Ok(config)
    }
}
