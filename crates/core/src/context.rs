//! Per-call validation context: lifecycle phase, persisted identity,
//! and the lookup service handle.

use serde_json::Value;

use crate::lookup::LookupService;

/// Lifecycle stage of the record being validated, used by phase-scoped
/// rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    Create,
    Update,
    /// No lifecycle distinction; only `On::Always` rules apply phase-wise.
    #[default]
    None,
}

/// Context for one validation call.
pub struct Context<'a> {
    pub(crate) phase: Phase,
    pub(crate) identity: Option<Value>,
    pub(crate) lookup: Option<&'a dyn LookupService>,
}

impl<'a> Context<'a> {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            identity: None,
            lookup: None,
        }
    }

    /// The record's persisted identity, excluded from uniqueness checks.
    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<Value>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Attach the lookup service required by uniqueness rules.
    #[must_use]
    pub fn with_lookup(mut self, lookup: &'a dyn LookupService) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl Default for Context<'_> {
    fn default() -> Self {
        Self::new(Phase::None)
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("phase", &self.phase)
            .field("identity", &self.identity)
            .field("lookup", &self.lookup.is_some())
            .finish()
    }
}
