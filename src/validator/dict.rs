//! Dictionary validation.
//!
//! This module provides [`DictValidator`] for maps whose keys share one
//! validator and whose values share another.

use indexmap::IndexMap;

use crate::context::Context;
use crate::outcome::Outcome;
use crate::path::PathSegment;
use crate::value::Value;

use super::traits::{expected, BoxedValidator, Message, Validator};

/// A validator for homogeneous maps.
///
/// Each entry is located at `path + [key]`. Within it, the key is validated
/// at slot `0` and the value at slot `1`, so a failing key and a failing
/// value on the same entry are both reported. Only entries whose key and
/// value both pass are written into the output.
///
/// # Example
///
/// ```rust
/// use autopsy::{errors_to_string, validate, Schema, Value};
///
/// let schema = Schema::dict_of(Schema::keyword(), Schema::number());
/// let input = Value::map([(Value::Int(1), Value::from("a"))]);
///
/// let result = validate(&schema, input);
/// assert_eq!(
///     errors_to_string(result.errors().unwrap()),
///     "1.0: Expected keyword, got 1\n1.1: Expected number, got \"a\""
/// );
/// ```
#[derive(Clone)]
pub struct DictValidator {
    key: BoxedValidator,
    value: BoxedValidator,
    type_message: Option<Message>,
}

impl DictValidator {
    pub fn new(key: impl Validator + 'static, value: impl Validator + 'static) -> Self {
        Self {
            key: key.boxed(),
            value: value.boxed(),
            type_message: None,
        }
    }

    /// Sets the message used when the value is not a map.
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.type_message = Some(message.into());
        self
    }
}

impl Validator for DictValidator {
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

        for (key, value) in map {
            let entry = ctx.enter_with(
                PathSegment::from_key(key),
                Value::vector([key.clone(), value.clone()]),
            );
            let key_ctx = entry.enter_path(PathSegment::index(0));
            let value_ctx = entry.enter_path(PathSegment::index(1));

            match (self.key.validate(&key_ctx), self.value.validate(&value_ctx)) {
                (Outcome::Ok(key), Outcome::Ok(value)) => acc = acc.accrete_key(key, value),
                (key_outcome, value_outcome) => {
                    for (outcome, slot) in [(key_outcome, &key_ctx), (value_outcome, &value_ctx)] {
                        if let Some(errors) = outcome.into_errors(slot.path()) {
                            acc = acc.raise_errors(errors);
                        }
                    }
                }
            }
        }

        acc.finish()
    }
}
