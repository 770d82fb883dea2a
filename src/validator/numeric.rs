//! Numeric validation.
//!
//! This module provides [`NumberValidator`] for validating numbers, either
//! any number or integers only, with range and sign constraints.

use std::ops::RangeInclusive;

use crate::context::Context;
use crate::error::{ValidationError, ValidationErrors};
use crate::outcome::Outcome;
use crate::value::Value;

use super::traits::{expected, Message, Validator};

/// A constraint applied to numeric values.
#[derive(Clone)]
enum NumberConstraint {
    Min { value: f64, message: Option<Message> },
    Max { value: f64, message: Option<Message> },
    Positive { message: Option<Message> },
    NonNegative { message: Option<Message> },
    Negative { message: Option<Message> },
}

impl NumberConstraint {
    fn message_mut(&mut self) -> &mut Option<Message> {
        match self {
            NumberConstraint::Min { message, .. }
            | NumberConstraint::Max { message, .. }
            | NumberConstraint::Positive { message }
            | NumberConstraint::NonNegative { message }
            | NumberConstraint::Negative { message } => message,
        }
    }
}

/// Which values count as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberKind {
    /// Integers and floats.
    Any,
    /// Integers only; floats are rejected even when integral.
    Integer,
}

/// A validator for numeric values.
///
/// All constraint violations are reported together at the current path.
///
/// # Example
///
/// ```rust
/// use autopsy::{validate, Schema, Value};
///
/// let schema = Schema::integer().min(0).max(100);
///
/// assert!(validate(&schema, Value::Int(50)).is_pass());
/// assert!(!validate(&schema, Value::Int(-5)).is_pass());
/// // Float values are rejected by integer validators
/// assert!(!validate(&schema, Value::Float(1.5)).is_pass());
/// ```
#[derive(Clone)]
pub struct NumberValidator {
    kind: NumberKind,
    constraints: Vec<NumberConstraint>,
    type_message: Option<Message>,
}

impl NumberValidator {
    /// Creates a validator accepting integers and floats.
    pub fn number() -> Self {
        Self {
            kind: NumberKind::Any,
            constraints: Vec::new(),
            type_message: None,
        }
    }

    /// Creates a validator accepting integers only.
    pub fn integer() -> Self {
        Self {
            kind: NumberKind::Integer,
            ..Self::number()
        }
    }

    /// Requires the value to be at least `value` (inclusive).
    pub fn min(mut self, value: impl Into<f64>) -> Self {
        self.constraints.push(NumberConstraint::Min {
            value: value.into(),
            message: None,
        });
        self
    }

    /// Requires the value to be at most `value` (inclusive).
    pub fn max(mut self, value: impl Into<f64>) -> Self {
        self.constraints.push(NumberConstraint::Max {
            value: value.into(),
            message: None,
        });
        self
    }

    /// Equivalent to `.min(start).max(end)`.
    pub fn range<N: Into<f64> + Copy>(self, range: RangeInclusive<N>) -> Self {
        self.min(*range.start()).max(*range.end())
    }

    /// Requires the value to be greater than 0.
    pub fn positive(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Positive { message: None });
        self
    }

    /// Requires the value to be greater than or equal to 0.
    pub fn non_negative(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::NonNegative { message: None });
        self
    }

    /// Requires the value to be less than 0.
    pub fn negative(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Negative { message: None });
        self
    }

    /// Sets the message for the most recent constraint, or the type-mismatch
    /// message if there is no constraint yet.
    pub fn error(mut self, message: impl Into<Message>) -> Self {
        let message = Some(message.into());
        match self.constraints.last_mut() {
            Some(last) => *last.message_mut() = message,
            None => self.type_message = message,
        }
        self
    }

    /// Sets the message used when the value is not a number.
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.type_message = Some(message.into());
        self
    }

    fn accepts(&self, value: &Value) -> Option<f64> {
        match (self.kind, value) {
            (_, Value::Int(i)) => Some(*i as f64),
            (NumberKind::Any, Value::Float(f)) => Some(*f),
            _ => None,
        }
    }
}

impl Validator for NumberValidator {
    fn validate(&self, ctx: &Context) -> Outcome {
        let n = match self.accepts(ctx.value()) {
            Some(n) => n,
            None => {
                let kind = match self.kind {
                    NumberKind::Any => "number",
                    NumberKind::Integer => "integer",
                };
                return Outcome::Error(Message::resolve(self.type_message.as_ref(), ctx, || {
                    expected(kind, ctx)
                }));
            }
        };

        let failures: Vec<_> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, n, ctx))
            .collect();

        match ValidationErrors::from_vec(failures) {
            None => Outcome::Ok(ctx.value().clone()),
            Some(errors) => Outcome::Errors(errors),
        }
    }
}

/// Checks a single constraint and returns an error if it fails.
fn check_constraint(
    constraint: &NumberConstraint,
    n: f64,
    ctx: &Context,
) -> Option<ValidationError> {
    let got = ctx.value();
    let message = match constraint {
        NumberConstraint::Min { value, message } if n < *value => {
            Message::resolve(message.as_ref(), ctx, || {
                format!("Expected at least {}, got {}", value, got)
            })
        }
        NumberConstraint::Max { value, message } if n > *value => {
            Message::resolve(message.as_ref(), ctx, || {
                format!("Expected at most {}, got {}", value, got)
            })
        }
        NumberConstraint::Positive { message } if n <= 0.0 => {
            Message::resolve(message.as_ref(), ctx, || {
                format!("Expected positive number, got {}", got)
            })
        }
        NumberConstraint::NonNegative { message } if n < 0.0 => {
            Message::resolve(message.as_ref(), ctx, || {
                format!("Expected non-negative number, got {}", got)
            })
        }
        NumberConstraint::Negative { message } if n >= 0.0 => {
            Message::resolve(message.as_ref(), ctx, || {
                format!("Expected negative number, got {}", got)
            })
        }
        _ => return None,
    };
    Some(ValidationError::new(ctx.path().clone(), message))
}
