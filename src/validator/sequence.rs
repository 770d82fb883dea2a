//! Indexed collection validation.
//!
//! This module provides [`SequenceValidator`] for vectors, lists and sets
//! whose elements share one validator, and for fixed-length tuples whose
//! elements each have their own.

use indexmap::IndexSet;

use crate::context::Context;
use crate::error::ValidationError;
use crate::outcome::Outcome;
use crate::path::PathSegment;
use crate::value::Value;

use super::traits::{expected, BoxedValidator, Message, Validator};

/// The container kind a [`SequenceValidator`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Vector,
    List,
    Set,
}

impl SequenceKind {
    fn name(self) -> &'static str {
        match self {
            SequenceKind::Vector => "vector",
            SequenceKind::List => "list",
            SequenceKind::Set => "set",
        }
    }

    fn elements(self, value: &Value) -> Option<Vec<&Value>> {
        match (self, value) {
            (SequenceKind::Vector, Value::Vector(items))
            | (SequenceKind::List, Value::List(items)) => Some(items.iter().collect()),
            (SequenceKind::Set, Value::Set(items)) => Some(items.iter().collect()),
            _ => None,
        }
    }

    fn empty(self) -> Value {
        match self {
            SequenceKind::Vector => Value::Vector(Vec::new()),
            SequenceKind::List => Value::List(Vec::new()),
            SequenceKind::Set => Value::Set(IndexSet::new()),
        }
    }
}

#[derive(Clone)]
enum Items {
    /// Every element is checked by the same validator.
    Each(BoxedValidator),
    /// Element `i` is checked by validator `i`; the length must match.
    Tuple(Vec<BoxedValidator>),
}

#[derive(Clone)]
enum LengthConstraint {
    Min { min: usize, message: Option<Message> },
    Max { max: usize, message: Option<Message> },
}

/// A validator for vectors, lists, sets and tuples.
///
/// The container kind is checked first; a mismatch is a single error and no
/// element is visited. Every element is then validated at `path + [i]` and
/// all element failures are reported, in index order. The output is a
/// container of the same kind holding the validated elements.
///
/// # Example
///
/// ```rust
/// use autopsy::{errors_to_string, validate, Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::vector_of(Schema::number());
///
/// let result = validate(&schema, Value::from(json!([1, "x", 3, "y"])));
/// assert_eq!(
///     errors_to_string(result.errors().unwrap()),
///     "1: Expected number, got \"x\"\n3: Expected number, got \"y\""
/// );
/// ```
#[derive(Clone)]
pub struct SequenceValidator {
    kind: SequenceKind,
    items: Items,
    constraints: Vec<LengthConstraint>,
    type_message: Option<Message>,
}

impl SequenceValidator {
    /// Creates a validator for a homogeneous container of `kind`.
    pub fn of(kind: SequenceKind, item: impl Validator + 'static) -> Self {
        Self {
            kind,
            items: Items::Each(item.boxed()),
            constraints: Vec::new(),
            type_message: None,
        }
    }

    /// Creates a validator for a fixed-length container of `kind` whose
    /// element `i` is checked by `items[i]`.
    pub fn tuple(kind: SequenceKind, items: Vec<BoxedValidator>) -> Self {
        Self {
            kind,
            items: Items::Tuple(items),
            constraints: Vec::new(),
            type_message: None,
        }
    }

    /// Requires at least `min` elements.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(LengthConstraint::Min { min, message: None });
        self
    }

    /// Requires at most `max` elements.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(LengthConstraint::Max { max, message: None });
        self
    }

    /// Requires at least one element.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Sets the message for the most recent length constraint, or the
    /// container-mismatch message if there is none yet.
    pub fn error(mut self, message: impl Into<Message>) -> Self {
        let message = Some(message.into());
        match self.constraints.last_mut() {
            Some(LengthConstraint::Min { message: m, .. })
            | Some(LengthConstraint::Max { message: m, .. }) => *m = message,
            None => self.type_message = message,
        }
        self
    }

    /// Sets the message used when the value is not a container of the
    /// expected kind.
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.type_message = Some(message.into());
        self
    }

    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    fn item_validator(&self, index: usize) -> Option<&BoxedValidator> {
        match &self.items {
            Items::Each(item) => Some(item),
            Items::Tuple(items) => items.get(index),
        }
    }

    fn length_failures(&self, len: usize, ctx: &Context) -> Vec<ValidationError> {
        self.constraints
            .iter()
            .filter_map(|constraint| {
                let message = match constraint {
                    LengthConstraint::Min { min, message } if len < *min => {
                        Message::resolve(message.as_ref(), ctx, || {
                            format!("Expected at least {} items, got {}", min, len)
                        })
                    }
                    LengthConstraint::Max { max, message } if len > *max => {
                        Message::resolve(message.as_ref(), ctx, || {
                            format!("Expected at most {} items, got {}", max, len)
                        })
                    }
                    _ => return None,
                };
                Some(ValidationError::new(ctx.path().clone(), message))
            })
            .collect()
    }
}

impl Validator for SequenceValidator {
    fn validate(&self, ctx: &Context) -> Outcome {
        let elements = match self.kind.elements(ctx.value()) {
            Some(elements) => elements,
            None => {
                return Outcome::Error(Message::resolve(self.type_message.as_ref(), ctx, || {
                    expected(self.kind.name(), ctx)
                }))
            }
        };

        if let Items::Tuple(items) = &self.items {
            if items.len() != elements.len() {
                return Outcome::Error(format!(
                    "Expected {} of length {}, got length {}",
                    self.kind.name(),
                    items.len(),
                    elements.len()
                ));
            }
        }

        let mut acc = ctx
            .clone()
            .with_output(self.kind.empty())
            .raise_errors(self.length_failures(elements.len(), ctx));

        for (index, element) in elements.into_iter().enumerate() {
            let Some(validator) = self.item_validator(index) else {
                continue;
            };
            let child = ctx.enter_with(PathSegment::index(index), element.clone());
            let outcome = validator.validate(&child);
            acc = acc.absorb(Value::Int(index as i64), child.path(), outcome);
        }

        acc.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::Schema;
    use serde_json::json;

    fn numbers(kind: SequenceKind) -> SequenceValidator {
        SequenceValidator::of(kind, Schema::number())
    }

    #[test]
    fn test_vector_of_valid() {
        let outcome = numbers(SequenceKind::Vector).validate(&Context::new(json!([1, 2.5, 3])));
        assert_eq!(
            outcome,
            Outcome::Ok(Value::vector([Value::Int(1), Value::Float(2.5), Value::Int(3)]))
        );
    }

    #[test]
    fn test_kind_mismatch_does_not_descend() {
        let outcome = numbers(SequenceKind::Vector).validate(&Context::new(Value::list([1])));
        assert_eq!(outcome, Outcome::error("Expected vector, got (1)"));

        let outcome = numbers(SequenceKind::Set).validate(&Context::new(json!([1])));
        assert_eq!(outcome, Outcome::error("Expected set, got [1]"));
    }

    #[test]
    fn test_every_element_error_is_collected() {
        let outcome =
            numbers(SequenceKind::Vector).validate(&Context::new(json!([1, "x", 3, "y"])));
        let errors = outcome.into_errors(&Default::default()).unwrap();
        let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["[1]", "[3]"]);
    }

    #[test]
    fn test_list_and_set_keep_their_kind() {
        let list = numbers(SequenceKind::List).validate(&Context::new(Value::list([1, 2])));
        assert_eq!(list, Outcome::Ok(Value::list([1, 2])));

        let set = numbers(SequenceKind::Set).validate(&Context::new(Value::set([1, 2])));
        assert_eq!(set, Outcome::Ok(Value::set([1, 2])));
    }

    #[test]
    fn test_tuple_length_mismatch() {
        let tuple = SequenceValidator::tuple(
            SequenceKind::Vector,
            vec![Schema::string().boxed(), Schema::number().boxed()],
        );

        assert_eq!(
            tuple.validate(&Context::new(json!(["a"]))),
            Outcome::error("Expected vector of length 2, got length 1")
        );
        assert!(tuple.validate(&Context::new(json!(["a", 1]))).is_ok());
    }

    #[test]
    fn test_tuple_reports_each_position() {
        let tuple = SequenceValidator::tuple(
            SequenceKind::List,
            vec![Schema::string().boxed(), Schema::number().boxed()],
        );

        let outcome = tuple.validate(&Context::new(Value::list([Value::Int(1), Value::from("a")])));
        let errors = outcome.into_errors(&Default::default()).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first().message, "Expected string, got 1");
    }

    #[test]
    fn test_length_constraints() {
        let validator = numbers(SequenceKind::Vector).non_empty();
        let outcome = validator.validate(&Context::new(json!([])));
        let errors = outcome.into_errors(&Default::default()).unwrap();
        assert_eq!(errors.first().message, "Expected at least 1 items, got 0");
        assert!(errors.first().path.is_root());
    }
}
