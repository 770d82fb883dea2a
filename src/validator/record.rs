//! Record validation.
//!
//! This module provides [`RecordValidator`] for validating maps with a fixed
//! set of declared keys, each with its own validator, and configurable
//! handling of keys that were not declared.

use indexmap::IndexMap;
use std::collections::HashSet;

use crate::context::Context;
use crate::error::ValidationError;
use crate::outcome::Outcome;
use crate::path::PathSegment;
use crate::value::Value;

use super::traits::{expected, BoxedValidator, Message, Validator};

/// How a record treats keys it does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Copy undeclared entries into the output unchanged.
    #[default]
    Allow,
    /// Drop undeclared entries from the output.
    Strip,
    /// Report an error at each undeclared key.
    Deny,
}

/// A validator for maps with declared keys.
///
/// Declared keys are visited in declaration order. A key missing from the
/// input is validated as `Nil`, so whether it is required is decided by its
/// validator: `Schema::string()` rejects it, `Schema::nilable(..)` accepts it
/// and writes `nil` into the output. Failures from every key are reported.
///
/// # Example
///
/// ```rust
/// use autopsy::{errors_to_string, validate, Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::record()
///     .field("name", Schema::string())
///     .field("age", Schema::number());
///
/// let result = validate(&schema, Value::from(json!({"name": 5, "age": "x"})));
/// assert_eq!(
///     errors_to_string(result.errors().unwrap()),
///     "name: Expected string, got 5\nage: Expected number, got \"x\""
/// );
/// ```
#[derive(Clone, Default)]
pub struct RecordValidator {
    fields: IndexMap<Value, BoxedValidator>,
    unknown_keys: UnknownKeys,
    type_message: Option<Message>,
}

impl RecordValidator {
    /// Creates a record with no declared keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `key` and the validator for its value.
    ///
    /// Declaring the same key twice replaces the earlier validator.
    pub fn field(mut self, key: impl Into<Value>, validator: impl Validator + 'static) -> Self {
        self.fields.insert(key.into(), validator.boxed());
        self
    }

    /// Configures how undeclared keys are handled.
    ///
    /// ```rust
    /// use autopsy::{validate, Schema, UnknownKeys, Value};
    /// use serde_json::json;
    ///
    /// let schema = Schema::record()
    ///     .field("name", Schema::string())
    ///     .unknown_keys(UnknownKeys::Deny);
    ///
    /// let result = validate(&schema, Value::from(json!({"name": "Ann", "admin": true})));
    /// let error = result.errors().unwrap().first();
    /// assert_eq!(error.path.to_string(), "admin");
    /// assert_eq!(error.message, "Unexpected key");
    /// ```
    pub fn unknown_keys(mut self, mode: UnknownKeys) -> Self {
        self.unknown_keys = mode;
        self
    }

    /// Sets the message used when the value is not a map.
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.type_message = Some(message.into());
        self
    }

    /// Returns the declared keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.fields.keys()
    }
}

/// Finds the input entry for `declared`. A name matches a keyword key
/// first and a string key second; any other key must match exactly.
fn input_entry<'a>(
    map: &'a IndexMap<Value, Value>,
    declared: &Value,
) -> Option<(&'a Value, &'a Value)> {
    match declared {
        Value::Str(name) | Value::Keyword(name) => map
            .get_key_value(&Value::Keyword(name.clone()))
            .or_else(|| map.get_key_value(&Value::Str(name.clone()))),
        other => map.get_key_value(other),
    }
}

impl Validator for RecordValidator {
    fn validate(&self, ctx: &Context) -> Outcome {
        let map = match ctx.value().as_map() {
            Some(map) => map,
            None => {
                return Outcome::Error(Message::resolve(self.type_message.as_ref(), ctx, || {
                    expected("map", ctx)
                }))
            }
        };

        let mut acc = ctx.clone().with_output(Value::Map(IndexMap::new()));
        let mut matched = HashSet::with_capacity(self.fields.len());

        for (declared, validator) in &self.fields {
            let segment = PathSegment::from_key(declared);
            let (key, child) = match input_entry(map, declared) {
                Some((key, value)) => {
                    matched.insert(key);
                    (key, ctx.enter_with(segment, value.clone()))
                }
                None => (declared, ctx.enter_with(segment, Value::Nil)),
            };
            let outcome = validator.validate(&child);
            acc = acc.absorb(key.clone(), child.path(), outcome);
        }

        for (key, value) in map {
            if matched.contains(key) {
                continue;
            }
            acc = match self.unknown_keys {
                UnknownKeys::Allow => acc.accrete_key(key.clone(), value.clone()),
                UnknownKeys::Strip => acc,
                UnknownKeys::Deny => acc.raise(ValidationError::new(
                    ctx.path().push(PathSegment::from_key(key)),
                    "Unexpected key",
                )),
            };
        }

        acc.finish()
    }
}
