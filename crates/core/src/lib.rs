//! Declarative record validation engine.
//!
//! Takes a record (a field-name → value map), an ordered set of declared
//! rules, and a per-call context, and produces field-scoped error
//! messages:
//!
//! - [`RuleSet`] — ordered rule registry, built once at startup.
//! - [`Rule`] — one constraint: a check kind plus message override,
//!   `when`/`unless` guards, phase filter, nil-tolerance and strictness.
//! - [`validate`] — the evaluation core; pure logic except for the
//!   injected [`LookupService`] used by uniqueness rules.
//! - [`Report`] — ordered field → message aggregation for error sinks.
//! - [`EngineError`] — hard failures: strict rule violations and lookup
//!   problems, kept distinct from user-correctable errors.
//!
//! ```
//! use serde_json::json;
//! use veridate_core::{validate, Context, Phase, Rule, RuleSet};
//!
//! let mut rules = RuleSet::new();
//! rules
//!     .declare(Rule::presence(&["name"]))
//!     .declare(Rule::length(&["name"], Some(2), None));
//!
//! let mut record = serde_json::Map::new();
//! record.insert("name".to_string(), json!("A"));
//!
//! let report = validate(&rules, &record, &Context::new(Phase::Create)).unwrap();
//! assert_eq!(
//!     report.messages_for("name"),
//!     ["is too short (minimum is 2 characters)"]
//! );
//! ```

pub mod context;
pub mod error;
pub mod evaluator;
pub mod lookup;
pub mod message;
pub mod report;
pub mod rule;
pub mod ruleset;
pub mod value;

pub use context::{Context, Phase};
pub use error::EngineError;
pub use evaluator::validate;
pub use lookup::{LookupError, LookupService, MemoryLookup};
pub use message::Message;
pub use report::{FieldErrors, Report, BASE};
pub use rule::{Check, Compare, NumberBounds, On, RecordValidator, Rule, SetSource};
pub use ruleset::RuleSet;
pub use value::Record;
