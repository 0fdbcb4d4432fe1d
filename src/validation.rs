//! Declarative validation of a table snapshot before a create mutation.
//!
//! A [`Schema`] is an ordered set of field schemas, each a type plus a list of
//! rules. Validation is synchronous and stops at the first failing rule; the
//! failing rule's message becomes the error shown inline by the add-row control.
//!
//! ```
//! use gqltable::validation::{FieldSchema, Schema, Validate};
//! use serde_json::json;
//!
//! let schema = Schema::object().field(
//!     "count",
//!     FieldSchema::number().less_than(5.0, "You can only have 5 credentials at the same time."),
//! );
//! let snapshot = json!({"count": 5}).as_object().cloned().unwrap_or_default();
//! let err = schema.validate(&snapshot).unwrap_err();
//! assert_eq!(err.to_string(), "You can only have 5 credentials at the same time.");
//! ```

use serde_json::Value;
use thiserror::Error;

/// The subset of table state exposed to the validator.
pub type Snapshot = serde_json::Map<String, Value>;

/// A failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The offending field.
    pub field: String,
    /// Message shown to the user.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Anything that can check a snapshot.
pub trait Validate: Send + Sync {
    fn validate(&self, snapshot: &Snapshot) -> Result<(), ValidationError>;
}

impl<F> Validate for F
where
    F: Fn(&Snapshot) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(&self, snapshot: &Snapshot) -> Result<(), ValidationError> {
        self(snapshot)
    }
}

/// Expected type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    String,
    Boolean,
    Any,
}

impl FieldKind {
    fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::String => "string",
            FieldKind::Boolean => "boolean",
            FieldKind::Any => "mixed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Rule {
    LessThan(f64),
    MoreThan(f64),
    Min(f64),
    Max(f64),
    OneOf(Vec<Value>),
    MinLength(usize),
    MaxLength(usize),
}

#[derive(Debug, Clone, PartialEq)]
struct FieldRule {
    rule: Rule,
    message: Option<String>,
}

/// Type and rules for a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    kind: FieldKind,
    required: Option<Option<String>>,
    rules: Vec<FieldRule>,
}

impl FieldSchema {
    fn of(kind: FieldKind) -> Self {
        Self {
            kind,
            required: None,
            rules: Vec::new(),
        }
    }

    pub fn number() -> Self {
        Self::of(FieldKind::Number)
    }

    pub fn string() -> Self {
        Self::of(FieldKind::String)
    }

    pub fn boolean() -> Self {
        Self::of(FieldKind::Boolean)
    }

    pub fn any() -> Self {
        Self::of(FieldKind::Any)
    }

    /// Reject missing or null values.
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(Some(message.into()));
        self
    }

    /// Reject missing or null values with the default message.
    pub fn required_default(mut self) -> Self {
        self.required = Some(None);
        self
    }

    pub fn less_than(self, limit: f64, message: impl Into<String>) -> Self {
        self.push(Rule::LessThan(limit), Some(message.into()))
    }

    pub fn more_than(self, limit: f64, message: impl Into<String>) -> Self {
        self.push(Rule::MoreThan(limit), Some(message.into()))
    }

    pub fn min(self, limit: f64, message: impl Into<String>) -> Self {
        self.push(Rule::Min(limit), Some(message.into()))
    }

    pub fn max(self, limit: f64, message: impl Into<String>) -> Self {
        self.push(Rule::Max(limit), Some(message.into()))
    }

    /// Accept only the listed values (`equals` in the schema builder idiom).
    pub fn one_of<I, V>(self, values: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.push(Rule::OneOf(values), Some(message.into()))
    }

    /// Alias for [`FieldSchema::one_of`].
    pub fn equals<I, V>(self, values: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.one_of(values, message)
    }

    pub fn min_length(self, len: usize, message: impl Into<String>) -> Self {
        self.push(Rule::MinLength(len), Some(message.into()))
    }

    pub fn max_length(self, len: usize, message: impl Into<String>) -> Self {
        self.push(Rule::MaxLength(len), Some(message.into()))
    }

    fn push(mut self, rule: Rule, message: Option<String>) -> Self {
        self.rules.push(FieldRule { rule, message });
        self
    }

    fn check(&self, field: &str, value: Option<&Value>) -> Result<(), ValidationError> {
        let value = match value {
            None | Some(Value::Null) => {
                return match &self.required {
                    Some(message) => Err(ValidationError::new(
                        field,
                        message
                            .clone()
                            .unwrap_or_else(|| format!("{} is a required field", field)),
                    )),
                    None => Ok(()),
                };
            }
            Some(value) => value,
        };

        let type_error =
            || ValidationError::new(field, format!("{} must be a `{}` type", field, self.kind.type_name()));

        let number = match self.kind {
            FieldKind::Number => Some(as_number(value).ok_or_else(type_error)?),
            FieldKind::String if !value.is_string() => return Err(type_error()),
            FieldKind::Boolean if !value.is_boolean() => return Err(type_error()),
            _ => as_number(value),
        };

        for FieldRule { rule, message } in &self.rules {
            let failed = match rule {
                Rule::LessThan(limit) => number.is_some_and(|n| n >= *limit),
                Rule::MoreThan(limit) => number.is_some_and(|n| n <= *limit),
                Rule::Min(limit) => number.is_some_and(|n| n < *limit),
                Rule::Max(limit) => number.is_some_and(|n| n > *limit),
                Rule::OneOf(values) => !values.iter().any(|v| values_equal(v, value)),
                Rule::MinLength(len) => value.as_str().is_some_and(|s| s.chars().count() < *len),
                Rule::MaxLength(len) => value.as_str().is_some_and(|s| s.chars().count() > *len),
            };
            if failed {
                let message = message
                    .clone()
                    .unwrap_or_else(|| default_message(field, rule));
                return Err(ValidationError::new(field, message));
            }
        }

        Ok(())
    }
}

/// An object schema: ordered field schemas checked against a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<(String, FieldSchema)>,
}

impl Schema {
    /// Start an empty object schema.
    pub fn object() -> Self {
        Self::default()
    }

    /// Add a field. Fields are checked in insertion order.
    pub fn field(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
        self.fields.push((name.into(), schema));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Validate for Schema {
    fn validate(&self, snapshot: &Snapshot) -> Result<(), ValidationError> {
        for (name, schema) in &self.fields {
            schema.check(name, snapshot.get(name))?;
        }
        Ok(())
    }
}

/// Numbers, and strings that parse as numbers.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn values_equal(expected: &Value, actual: &Value) -> bool {
    match (as_number(expected), as_number(actual)) {
        (Some(a), Some(b)) if expected.is_number() || actual.is_number() => a == b,
        _ => expected == actual,
    }
}

fn default_message(field: &str, rule: &Rule) -> String {
    match rule {
        Rule::LessThan(n) => format!("{} must be less than {}", field, n),
        Rule::MoreThan(n) => format!("{} must be greater than {}", field, n),
        Rule::Min(n) => format!("{} must be greater than or equal to {}", field, n),
        Rule::Max(n) => format!("{} must be less than or equal to {}", field, n),
        Rule::OneOf(values) => format!(
            "{} must be one of the following values: {}",
            field,
            values
                .iter()
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Rule::MinLength(n) => format!("{} must be at least {} characters", field, n),
        Rule::MaxLength(n) => format!("{} must be at most {} characters", field, n),
    }
}
