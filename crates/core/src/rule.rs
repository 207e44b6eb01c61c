//! Rule descriptors: one declared constraint bound to one or more fields.
//!
//! A [`Rule`] carries its check kind and configuration, an optional
//! message override, applicability guards (`when`/`unless` predicates
//! over the record and a lifecycle-phase filter), and flags for
//! nil-tolerance and strictness. Rules are built once at startup and are
//! immutable and shareable afterwards.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::message::Message;
use crate::value::{number_view, value_eq, Record};

/// Predicate over the record, evaluated fresh per validation call.
pub type Guard = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// Per-field check closure for [`Check::Each`]: returns a failure
/// message for the named field, or `None` when the value is acceptable.
pub type EachCheck = Arc<dyn Fn(&Record, &str, &Value) -> Option<String> + Send + Sync>;

/// Producer for computed inclusion/exclusion sets.
pub type SetBuilder = Arc<dyn Fn(&Record) -> Vec<Value> + Send + Sync>;

/// Pluggable whole-record validator object.
///
/// Returns `(field, message)` pairs; use [`crate::report::BASE`] to
/// target the record as a whole. Closures `Fn(&Record) -> Vec<(String,
/// String)>` implement this automatically.
pub trait RecordValidator: Send + Sync {
    fn validate(&self, record: &Record) -> Vec<(String, String)>;
}

impl<F> RecordValidator for F
where
    F: Fn(&Record) -> Vec<(String, String)> + Send + Sync,
{
    fn validate(&self, record: &Record) -> Vec<(String, String)> {
        self(record)
    }
}

/// The allowed (or forbidden) set for inclusion/exclusion checks.
#[derive(Clone)]
pub enum SetSource {
    /// A fixed list of values.
    Values(Vec<Value>),
    /// An inclusive numeric range.
    NumberRange { min: f64, max: f64 },
    /// A set computed per call, e.g. from sibling fields.
    Computed(SetBuilder),
}

impl SetSource {
    /// Membership test; computed sets are re-evaluated on every call.
    pub fn contains(&self, record: &Record, value: &Value) -> bool {
        match self {
            Self::Values(values) => values.iter().any(|v| value_eq(v, value)),
            Self::NumberRange { min, max } => {
                number_view(value).is_some_and(|n| n >= *min && n <= *max)
            }
            Self::Computed(build) => build(record).iter().any(|v| value_eq(v, value)),
        }
    }
}

impl fmt::Debug for SetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Values(values) => f.debug_tuple("SetSource::Values").field(values).finish(),
            Self::NumberRange { min, max } => f
                .debug_struct("SetSource::NumberRange")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Computed(_) => f.write_str("SetSource::Computed(..)"),
        }
    }
}

/// Relational operator for comparison-to-sibling-field checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compare {
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    EqualTo,
    OtherThan,
}

/// Bounds and flags for the numericality check. All bounds are optional
/// and combine; every violated bound produces its own message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberBounds {
    pub only_integer: bool,
    pub greater_than: Option<f64>,
    pub greater_than_or_equal_to: Option<f64>,
    pub less_than: Option<f64>,
    pub less_than_or_equal_to: Option<f64>,
    /// Inclusive range, e.g. `1.0..=10.0` as `(1.0, 10.0)`.
    pub in_range: Option<(f64, f64)>,
    pub even: bool,
    pub odd: bool,
}

impl NumberBounds {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn only_integer(mut self) -> Self {
        self.only_integer = true;
        self
    }

    #[must_use]
    pub fn greater_than(mut self, bound: f64) -> Self {
        self.greater_than = Some(bound);
        self
    }

    #[must_use]
    pub fn greater_than_or_equal_to(mut self, bound: f64) -> Self {
        self.greater_than_or_equal_to = Some(bound);
        self
    }

    #[must_use]
    pub fn less_than(mut self, bound: f64) -> Self {
        self.less_than = Some(bound);
        self
    }

    #[must_use]
    pub fn less_than_or_equal_to(mut self, bound: f64) -> Self {
        self.less_than_or_equal_to = Some(bound);
        self
    }

    /// Inclusive range constraint.
    #[must_use]
    pub fn within(mut self, min: f64, max: f64) -> Self {
        self.in_range = Some((min, max));
        self
    }

    #[must_use]
    pub fn even(mut self) -> Self {
        self.even = true;
        self
    }

    #[must_use]
    pub fn odd(mut self) -> Self {
        self.odd = true;
        self
    }
}

/// The check a rule performs, with its configuration.
#[derive(Clone)]
pub enum Check {
    /// Fails when the value is missing, null, or blank.
    Presence,
    /// Fails when the value is present (inverse of presence).
    Absence,
    /// String/array length within inclusive bounds.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// Numeric constraints; see [`NumberBounds`].
    Numericality(NumberBounds),
    /// Value must be a member of the set.
    Inclusion(SetSource),
    /// Value must not be a member of the set.
    Exclusion(SetSource),
    /// String value must match the pattern.
    Format(Regex),
    /// Value must satisfy the operator against a named sibling field.
    Comparison { operator: Compare, other: String },
    /// Value must equal one of the accepted sentinels.
    Acceptance { accept: Vec<Value> },
    /// Value must equal the paired `<field>_confirmation` field.
    Confirmation,
    /// No other record may hold the same value (via the lookup service).
    Uniqueness,
    /// Per-field closure applied to each bound field.
    Each(EachCheck),
    /// Pluggable whole-record validator object.
    With(Arc<dyn RecordValidator>),
}

impl Check {
    /// Stable kind name, used in strict-failure signals and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Presence => "presence",
            Self::Absence => "absence",
            Self::Length { .. } => "length",
            Self::Numericality(_) => "numericality",
            Self::Inclusion(_) => "inclusion",
            Self::Exclusion(_) => "exclusion",
            Self::Format(_) => "format",
            Self::Comparison { .. } => "comparison",
            Self::Acceptance { .. } => "acceptance",
            Self::Confirmation => "confirmation",
            Self::Uniqueness => "uniqueness",
            Self::Each(_) => "each",
            Self::With(_) => "with",
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle-phase filter for a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum On {
    #[default]
    Always,
    Create,
    Update,
}

/// One declared constraint bound to one or more fields.
pub struct Rule {
    pub(crate) fields: Vec<String>,
    pub(crate) check: Check,
    pub(crate) message: Message,
    pub(crate) allow_nil: bool,
    pub(crate) strict: bool,
    pub(crate) on: On,
    pub(crate) if_guards: Vec<Guard>,
    pub(crate) unless_guards: Vec<Guard>,
}

impl Rule {
    /// Bind a check to a list of field names.
    pub fn new(fields: &[&str], check: Check) -> Self {
        Self {
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
            check,
            message: Message::Default,
            allow_nil: false,
            strict: false,
            on: On::Always,
            if_guards: Vec::new(),
            unless_guards: Vec::new(),
        }
    }

    // ── Kind constructors ────────────────────────────────────────────

    pub fn presence(fields: &[&str]) -> Self {
        Self::new(fields, Check::Presence)
    }

    pub fn absence(fields: &[&str]) -> Self {
        Self::new(fields, Check::Absence)
    }

    pub fn length(fields: &[&str], min: Option<usize>, max: Option<usize>) -> Self {
        Self::new(fields, Check::Length { min, max })
    }

    pub fn numericality(fields: &[&str], bounds: NumberBounds) -> Self {
        Self::new(fields, Check::Numericality(bounds))
    }

    pub fn inclusion(fields: &[&str], set: SetSource) -> Self {
        Self::new(fields, Check::Inclusion(set))
    }

    pub fn exclusion(fields: &[&str], set: SetSource) -> Self {
        Self::new(fields, Check::Exclusion(set))
    }

    pub fn format(fields: &[&str], pattern: Regex) -> Self {
        Self::new(fields, Check::Format(pattern))
    }

    pub fn comparison(fields: &[&str], operator: Compare, other: &str) -> Self {
        Self::new(
            fields,
            Check::Comparison {
                operator,
                other: other.to_string(),
            },
        )
    }

    /// Acceptance with the default sentinels `true`, `"1"`, `"true"`.
    pub fn acceptance(fields: &[&str]) -> Self {
        Self::new(
            fields,
            Check::Acceptance {
                accept: vec![Value::Bool(true), Value::from("1"), Value::from("true")],
            },
        )
    }

    pub fn confirmation(fields: &[&str]) -> Self {
        Self::new(fields, Check::Confirmation)
    }

    pub fn uniqueness(fields: &[&str]) -> Self {
        Self::new(fields, Check::Uniqueness)
    }

    /// Apply the same per-field check to each named field.
    pub fn each(
        fields: &[&str],
        check: impl Fn(&Record, &str, &Value) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self::new(fields, Check::Each(Arc::new(check)))
    }

    /// Attach a whole-record validator object (or closure).
    pub fn with(validator: impl RecordValidator + 'static) -> Self {
        Self::new(&[], Check::With(Arc::new(validator)))
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Override the failure message with a literal template.
    /// `%{value}` is replaced with the rejected value.
    #[must_use]
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.message = Message::Literal(template.into());
        self
    }

    /// Override the failure message with a record-aware callback.
    #[must_use]
    pub fn message_with(
        mut self,
        build: impl Fn(&Record, &Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.message = Message::Builder(Arc::new(build));
        self
    }

    /// Skip this rule when the field is missing or null.
    #[must_use]
    pub fn allow_nil(mut self) -> Self {
        self.allow_nil = true;
        self
    }

    /// Mark the rule strict: a failure aborts evaluation with a hard
    /// error instead of being collected.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Restrict the rule to a lifecycle phase.
    #[must_use]
    pub fn on(mut self, on: On) -> Self {
        self.on = on;
        self
    }

    /// Add an `if` guard: the rule runs only when every guard holds.
    #[must_use]
    pub fn when(mut self, guard: impl Fn(&Record) -> bool + Send + Sync + 'static) -> Self {
        self.if_guards.push(Arc::new(guard));
        self
    }

    /// Add an `unless` guard: the rule is skipped when any guard holds.
    #[must_use]
    pub fn unless(mut self, guard: impl Fn(&Record) -> bool + Send + Sync + 'static) -> Self {
        self.unless_guards.push(Arc::new(guard));
        self
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("fields", &self.fields)
            .field("check", &self.check)
            .field("message", &self.message)
            .field("allow_nil", &self.allow_nil)
            .field("strict", &self.strict)
            .field("on", &self.on)
            .field("if_guards", &self.if_guards.len())
            .field("unless_guards", &self.unless_guards.len())
            .finish()
    }
}
