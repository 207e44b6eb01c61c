//! Lookup service: the injected collaborator behind uniqueness checks.
//!
//! The engine itself performs no I/O; a uniqueness rule asks the lookup
//! whether another record (excluding this record's own identity) already
//! holds the value. Infrastructure failures propagate unmodified; the
//! engine never retries.

use serde_json::Value;
use thiserror::Error;

/// The lookup service failed (e.g. the backing store is unreachable).
#[derive(Debug, Error)]
#[error("lookup service failed: {0}")]
pub struct LookupError(pub String);

/// Existence queries used by uniqueness rules.
pub trait LookupService {
    /// Does a record other than `excluding` hold `value` for `field`?
    fn exists(
        &self,
        field: &str,
        value: &Value,
        excluding: Option<&Value>,
    ) -> Result<bool, LookupError>;
}

/// In-memory lookup over `(identity, field, value)` triples; useful for
/// tests and single-process callers.
#[derive(Debug, Default)]
pub struct MemoryLookup {
    rows: Vec<(Value, String, Value)>,
}

impl MemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing record's field value.
    pub fn insert(&mut self, identity: impl Into<Value>, field: &str, value: impl Into<Value>) {
        self.rows
            .push((identity.into(), field.to_string(), value.into()));
    }
}

impl LookupService for MemoryLookup {
    fn exists(
        &self,
        field: &str,
        value: &Value,
        excluding: Option<&Value>,
    ) -> Result<bool, LookupError> {
        Ok(self.rows.iter().any(|(id, f, v)| {
            f == field && v == value && excluding.map_or(true, |ex| ex != id)
        }))
    }
}
