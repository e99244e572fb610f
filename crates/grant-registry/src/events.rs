//! Registry events.
//!
//! Every successful mutation appends one event per effect to an ordered,
//! append-only log. Subscribers read the log by cursor; the registry never
//! reads it back.

use serde::{Deserialize, Serialize};

use grant_registry_core::{Address, Grant};

use crate::error::{RegistryError, Result};

/// A notification emitted by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RegistryEvent {
    /// A grant was inserted.
    GrantAdded(Grant),
    /// A grant was deleted.
    GrantDeleted(Grant),
    /// An address became approved.
    AddressApproved { address: Address },
    /// An address lost its approval.
    ApprovalRevoked { address: Address },
    /// A validator was added.
    ValidatorAdded { validator: Address },
    /// A validator was removed.
    ValidatorRemoved { validator: Address },
}

/// An event with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 1-based position in the log.
    pub seq: u64,
    /// The event.
    pub event: RegistryEvent,
}

/// Ordered, append-only event log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its sequence number.
    pub(crate) fn emit(&mut self, event: RegistryEvent) -> u64 {
        let seq = self.records.len() as u64 + 1;
        self.records.push(EventRecord { seq, event });
        seq
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records after `seq` (pass 0 for everything).
    pub fn since(&self, seq: u64) -> &[EventRecord] {
        let start = usize::try_from(seq)
            .unwrap_or(usize::MAX)
            .min(self.records.len());
        &self.records[start..]
    }

    /// Sequence number of the newest record (0 when empty).
    pub fn last_seq(&self) -> u64 {
        self.records.len() as u64
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Export as JSON lines, one record per line.
    pub fn to_json_lines(&self) -> Result<String> {
        let mut out = String::new();
        for record in &self.records {
            let line = serde_json::to_string(record)
                .map_err(|e| RegistryError::Serialization(e.to_string()))?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }
}
