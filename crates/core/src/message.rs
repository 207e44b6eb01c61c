//! Error message templating.
//!
//! Every rule kind carries a default message; a declaration may override
//! it with a literal template (supporting `%{value}` substitution of the
//! rejected value) or a callback receiving the record and the rejected
//! value.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::value::{display, Record};

/// Record-aware message override callback.
pub type MessageBuilder = Arc<dyn Fn(&Record, &Value) -> String + Send + Sync>;

/// How a rule's failure message is produced.
#[derive(Clone, Default)]
pub enum Message {
    /// The rule kind's default template.
    #[default]
    Default,
    /// A literal template; `%{value}` is replaced with the rejected value.
    Literal(String),
    /// A callback over the record and the rejected value.
    Builder(MessageBuilder),
}

impl Message {
    /// Render the message for a failure, given the kind's default text.
    pub fn render(&self, default: &str, record: &Record, rejected: &Value) -> String {
        match self {
            Self::Default => substitute(default, rejected),
            Self::Literal(template) => substitute(template, rejected),
            Self::Builder(build) => build(record, rejected),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Message::Default"),
            Self::Literal(template) => f.debug_tuple("Message::Literal").field(template).finish(),
            Self::Builder(_) => f.write_str("Message::Builder(..)"),
        }
    }
}

/// Replace `%{value}` in a template with the rejected value.
fn substitute(template: &str, rejected: &Value) -> String {
    if template.contains("%{value}") {
        template.replace("%{value}", &display(rejected))
    } else {
        template.to_string()
    }
}
