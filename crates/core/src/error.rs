//! Hard failures of the validation engine.
//!
//! Soft (user-correctable) failures live in the [`crate::report::Report`];
//! the variants here abort a validation call instead.

use thiserror::Error;

use crate::lookup::LookupError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A strict rule failed: a broken invariant, not user input.
    #[error("strict {check} rule violated on {field}: {message}")]
    Strict {
        field: String,
        check: &'static str,
        message: String,
    },

    /// A uniqueness rule ran without a lookup service in the context.
    #[error("no lookup service configured for uniqueness check on {field}")]
    MissingLookup { field: String },

    /// The lookup service failed; propagated unmodified.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
