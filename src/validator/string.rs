//! String validation.
//!
//! This module provides [`StringValidator`] for validating string values with
//! constraints like minimum/maximum length and regex patterns.

use regex::Regex;

use crate::context::Context;
use crate::error::{ValidationError, ValidationErrors};
use crate::outcome::Outcome;

use super::traits::{expected, Message, Validator};

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<Message>,
    },
    MaxLength {
        max: usize,
        message: Option<Message>,
    },
    Pattern {
        regex: Regex,
        message: Option<Message>,
    },
}

/// A validator for string values.
///
/// `StringValidator` checks that the cursor holds a string and then applies
/// every constraint. All constraint violations are reported together at the
/// current path.
///
/// # Example
///
/// ```rust
/// use autopsy::{validate, Schema, Value};
///
/// let schema = Schema::string()
///     .min_len(3)
///     .max_len(20)
///     .pattern(r"^[a-z]+$")
///     .unwrap();
///
/// let result = validate(&schema, Value::from("AB"));
/// // Too short AND pattern mismatch
/// assert_eq!(result.errors().unwrap().len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct StringValidator {
    constraints: Vec<StringConstraint>,
    type_message: Option<Message>,
}

impl StringValidator {
    /// Creates a new string validator with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires at least `min` characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints.push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` characters.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints.push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires the string to match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error if `pattern` is invalid.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints
            .push(StringConstraint::Pattern { regex, message: None });
        Ok(self)
    }

    /// Sets the message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type-mismatch
    /// message instead.
    ///
    /// ```rust
    /// use autopsy::{validate, Schema, Value};
    ///
    /// let schema = Schema::string().min_len(5).error("username too short");
    ///
    /// let result = validate(&schema, Value::from("ab"));
    /// assert_eq!(result.errors().unwrap().first().message, "username too short");
    /// ```
    pub fn error(mut self, message: impl Into<Message>) -> Self {
        let message = Some(message.into());
        match self.constraints.last_mut() {
            Some(StringConstraint::MinLength { message: m, .. })
            | Some(StringConstraint::MaxLength { message: m, .. })
            | Some(StringConstraint::Pattern { message: m, .. }) => *m = message,
            None => self.type_message = message,
        }
        self
    }

    /// Sets the message used when the value is not a string.
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.type_message = Some(message.into());
        self
    }
}

impl Validator for StringValidator {
    fn validate(&self, ctx: &Context) -> Outcome {
        let s = match ctx.value().as_str() {
            Some(s) => s,
            None => {
                return Outcome::Error(Message::resolve(self.type_message.as_ref(), ctx, || {
                    expected("string", ctx)
                }))
            }
        };

        let failures: Vec<_> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s, ctx))
            .collect();

        match ValidationErrors::from_vec(failures) {
            None => Outcome::ok(s),
            Some(errors) => Outcome::Errors(errors),
        }
    }
}

/// Checks a single constraint and returns an error if it fails.
fn check_constraint(
    constraint: &StringConstraint,
    value: &str,
    ctx: &Context,
) -> Option<ValidationError> {
    let message = match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            if len >= *min {
                return None;
            }
            Message::resolve(message.as_ref(), ctx, || {
                format!("Expected at least {} characters, got {}", min, len)
            })
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            if len <= *max {
                return None;
            }
            Message::resolve(message.as_ref(), ctx, || {
                format!("Expected at most {} characters, got {}", max, len)
            })
        }
        StringConstraint::Pattern { regex, message } => {
            if regex.is_match(value) {
                return None;
            }
            Message::resolve(message.as_ref(), ctx, || {
                format!("Expected string matching '{}', got {}", regex.as_str(), ctx.value())
            })
        }
    };
    Some(ValidationError::new(ctx.path().clone(), message))
}
