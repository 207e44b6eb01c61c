//! Rule evaluation core — pure logic, no I/O beyond the injected lookup.
//!
//! Evaluates every applicable rule in declaration order against one
//! record and aggregates soft failures into a [`Report`]. Strict rule
//! failures and lookup problems abort the call with an [`EngineError`].

use std::cmp::Ordering;

use serde_json::Value;
use tracing::{debug, trace};

use crate::context::{Context, Phase};
use crate::error::EngineError;
use crate::report::Report;
use crate::rule::{Check, Compare, NumberBounds, On, Rule};
use crate::ruleset::RuleSet;
use crate::value::{
    compare_values, display, integer_view, is_blank, is_nil, length_view, number_view, Record,
};

/// Evaluate all declared rules against a single record.
///
/// Returns the collected soft failures, or an [`EngineError`] when a
/// strict rule fails or the lookup service is missing or broken.
pub fn validate(rules: &RuleSet, record: &Record, ctx: &Context) -> Result<Report, EngineError> {
    let mut report = Report::new();

    for rule in rules.rules() {
        if !phase_applies(rule.on, ctx.phase()) {
            trace!(check = rule.check.name(), "rule skipped by phase filter");
            continue;
        }
        if !rule.if_guards.iter().all(|guard| guard(record)) {
            trace!(check = rule.check.name(), "rule skipped by if guard");
            continue;
        }
        if rule.unless_guards.iter().any(|guard| guard(record)) {
            trace!(check = rule.check.name(), "rule skipped by unless guard");
            continue;
        }

        let failures = rule_failures(rule, record, ctx)?;
        if failures.is_empty() {
            continue;
        }

        if rule.strict {
            let (field, message) = failures.into_iter().next().unwrap_or_default();
            debug!(
                check = rule.check.name(),
                %field,
                "strict rule failed, aborting validation"
            );
            return Err(EngineError::Strict {
                field,
                check: rule.check.name(),
                message,
            });
        }
        for (field, message) in failures {
            report.add(&field, message);
        }
    }

    Ok(report)
}

fn phase_applies(on: On, phase: Phase) -> bool {
    match on {
        On::Always => true,
        On::Create => phase == Phase::Create,
        On::Update => phase == Phase::Update,
    }
}

/// All `(field, message)` failures one rule produces for the record.
fn rule_failures(
    rule: &Rule,
    record: &Record,
    ctx: &Context,
) -> Result<Vec<(String, String)>, EngineError> {
    match &rule.check {
        // Whole-record validator objects produce their own messages.
        Check::With(validator) => Ok(validator.validate(record)),

        Check::Each(check) => {
            let null = Value::Null;
            let mut failures = Vec::new();
            for field in &rule.fields {
                let value = record.get(field.as_str());
                if rule.allow_nil && is_nil(value) {
                    continue;
                }
                if let Some(message) = check(record, field, value.unwrap_or(&null)) {
                    failures.push((field.clone(), message));
                }
            }
            Ok(failures)
        }

        _ => {
            let mut failures = Vec::new();
            for field in &rule.fields {
                failures.extend(field_failures(rule, field, record, ctx)?);
            }
            Ok(failures)
        }
    }
}

/// Failures for one declarative check on one field, with messages
/// rendered through the rule's message configuration.
fn field_failures(
    rule: &Rule,
    field: &str,
    record: &Record,
    ctx: &Context,
) -> Result<Vec<(String, String)>, EngineError> {
    let null = Value::Null;
    let value = record.get(field);
    let rejected = value.unwrap_or(&null);

    if rule.allow_nil && is_nil(value) {
        return Ok(Vec::new());
    }

    // (target field, default message) pairs; rendered below.
    let mut failures: Vec<(String, String)> = Vec::new();
    // Default messages for failures on the bound field itself.
    let mut defaults: Vec<String> = Vec::new();

    match &rule.check {
        Check::Presence => {
            if is_blank(value) {
                defaults.push("can't be blank".to_string());
            }
        }

        Check::Absence => {
            if !is_blank(value) {
                defaults.push("must be blank".to_string());
            }
        }

        Check::Length { min, max } => {
            // Values without a length (numbers, booleans) are not
            // measured; numericality is the rule for those.
            if let Some(len) = length_view(value) {
                if let Some(min) = min {
                    if len < *min {
                        defaults.push(format!("is too short (minimum is {min} characters)"));
                    }
                }
                if let Some(max) = max {
                    if len > *max {
                        defaults.push(format!("is too long (maximum is {max} characters)"));
                    }
                }
            }
        }

        Check::Numericality(bounds) => {
            defaults.extend(numericality_failures(bounds, rejected));
        }

        Check::Inclusion(set) => {
            if !set.contains(record, rejected) {
                defaults.push("is not included in the list".to_string());
            }
        }

        Check::Exclusion(set) => {
            if set.contains(record, rejected) {
                defaults.push("is reserved".to_string());
            }
        }

        Check::Format(pattern) => match rejected.as_str() {
            Some(s) if pattern.is_match(s) => {}
            _ => defaults.push("is invalid".to_string()),
        },

        Check::Comparison { operator, other } => {
            // Blank operands are presence's concern, not comparison's.
            if !is_blank(value) && !is_blank(record.get(other.as_str())) {
                let other_value = record.get(other.as_str()).unwrap_or(&null);
                match compare_values(rejected, other_value) {
                    Some(ordering) if comparison_holds(*operator, ordering) => {}
                    Some(_) => defaults.push(comparison_message(*operator, other_value)),
                    None => defaults.push(format!("cannot be compared with {other}")),
                }
            }
        }

        Check::Acceptance { accept } => {
            if !accept.iter().any(|a| a == rejected) {
                defaults.push("must be accepted".to_string());
            }
        }

        Check::Confirmation => {
            let confirmation_field = format!("{field}_confirmation");
            match record.get(&confirmation_field) {
                // Confirmation not submitted at all: nothing to match.
                None | Some(Value::Null) => {}
                Some(confirmation) if confirmation == rejected => {}
                Some(_) => {
                    failures.push((confirmation_field, format!("doesn't match {field}")));
                }
            }
        }

        Check::Uniqueness => {
            let lookup = ctx.lookup.ok_or_else(|| EngineError::MissingLookup {
                field: field.to_string(),
            })?;
            if lookup.exists(field, rejected, ctx.identity.as_ref())? {
                defaults.push("has already been taken".to_string());
            }
        }

        // Handled in rule_failures.
        Check::Each(_) | Check::With(_) => {}
    }

    failures.extend(defaults.into_iter().map(|message| (field.to_string(), message)));

    Ok(failures
        .into_iter()
        .map(|(target, default)| {
            let message = rule.message.render(&default, record, rejected);
            (target, message)
        })
        .collect())
}

/// Every numericality message the value violates, in option order.
fn numericality_failures(bounds: &NumberBounds, value: &Value) -> Vec<String> {
    let Some(n) = number_view(value) else {
        return vec!["is not a number".to_string()];
    };

    let mut messages = Vec::new();
    let integer = integer_view(value);

    if bounds.only_integer && integer.is_none() {
        return vec!["must be an integer".to_string()];
    }
    if let Some(bound) = bounds.greater_than {
        if n <= bound {
            messages.push(format!("must be greater than {bound}"));
        }
    }
    if let Some(bound) = bounds.greater_than_or_equal_to {
        if n < bound {
            messages.push(format!("must be greater than or equal to {bound}"));
        }
    }
    if let Some(bound) = bounds.less_than {
        if n >= bound {
            messages.push(format!("must be less than {bound}"));
        }
    }
    if let Some(bound) = bounds.less_than_or_equal_to {
        if n > bound {
            messages.push(format!("must be less than or equal to {bound}"));
        }
    }
    if let Some((min, max)) = bounds.in_range {
        if n < min || n > max {
            messages.push(format!("must be in {min}..{max}"));
        }
    }
    if bounds.even && integer.map_or(true, |i| i % 2 != 0) {
        messages.push("must be even".to_string());
    }
    if bounds.odd && integer.map_or(true, |i| i % 2 == 0) {
        messages.push("must be odd".to_string());
    }

    messages
}

fn comparison_holds(operator: Compare, ordering: Ordering) -> bool {
    match operator {
        Compare::GreaterThan => ordering == Ordering::Greater,
        Compare::GreaterThanOrEqualTo => ordering != Ordering::Less,
        Compare::LessThan => ordering == Ordering::Less,
        Compare::LessThanOrEqualTo => ordering != Ordering::Greater,
        Compare::EqualTo => ordering == Ordering::Equal,
        Compare::OtherThan => ordering != Ordering::Equal,
    }
}

fn comparison_message(operator: Compare, other: &Value) -> String {
    let shown = display(other);
    match operator {
        Compare::GreaterThan => format!("must be greater than {shown}"),
        Compare::GreaterThanOrEqualTo => format!("must be greater than or equal to {shown}"),
        Compare::LessThan => format!("must be less than {shown}"),
        Compare::LessThanOrEqualTo => format!("must be less than or equal to {shown}"),
        Compare::EqualTo => format!("must be equal to {shown}"),
        Compare::OtherThan => format!("must be other than {shown}"),
    }
}
