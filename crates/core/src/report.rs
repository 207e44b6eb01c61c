//! Aggregated validation errors for one record.
//!
//! Pure data: field → ordered message list, with insertion order
//! preserved per field and across fields. Whole-record errors go under
//! the [`BASE`] pseudo-field.

use serde::{Deserialize, Serialize};

/// Pseudo-field for errors that apply to the record as a whole.
pub const BASE: &str = "base";

/// Messages accumulated for a single field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldErrors {
    pub field: String,
    pub messages: Vec<String>,
}

/// Result of one validation call: every soft failure, in the order the
/// rules produced them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    entries: Vec<FieldErrors>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message under a field, preserving insertion order.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.field == field) {
            entry.messages.push(message);
        } else {
            self.entries.push(FieldErrors {
                field: field.to_string(),
                messages: vec![message],
            });
        }
    }

    /// True iff no rule produced an error.
    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages for one field, empty when the field is clean.
    pub fn messages_for(&self, field: &str) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map_or(&[], |e| e.messages.as_slice())
    }

    /// Per-field entries in first-error order.
    pub fn entries(&self) -> &[FieldErrors] {
        &self.entries
    }

    /// Flattened `(field, message)` pairs for display.
    pub fn flattened(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .flat_map(|e| {
                e.messages
                    .iter()
                    .map(move |m| (e.field.as_str(), m.as_str()))
            })
            .collect()
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.messages.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let report = Report::new();
        assert!(report.is_valid());
        assert!(report.messages_for("name").is_empty());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn messages_accumulate_in_order() {
        let mut report = Report::new();
        report.add("age", "is not a number");
        report.add("name", "can't be blank");
        report.add("age", "must be greater than 17");

        assert!(!report.is_valid());
        assert_eq!(
            report.messages_for("age"),
            ["is not a number", "must be greater than 17"]
        );
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn flattened_preserves_first_error_order() {
        let mut report = Report::new();
        report.add("age", "is not a number");
        report.add("name", "can't be blank");
        report.add("age", "must be even");

        assert_eq!(
            report.flattened(),
            vec![
                ("age", "is not a number"),
                ("age", "must be even"),
                ("name", "can't be blank"),
            ]
        );
    }

    #[test]
    fn base_errors_use_pseudo_field() {
        let mut report = Report::new();
        report.add(BASE, "This person is evil");
        assert_eq!(report.messages_for(BASE), ["This person is evil"]);
    }

    #[test]
    fn serializes_for_error_sinks() {
        let mut report = Report::new();
        report.add("email", "has already been taken");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["entries"][0]["messages"][0],
            "has already been taken"
        );
    }
}
