//! Scalar type checks and user predicates.
//!
//! This module provides [`TypeValidator`] for the boolean, keyword, nil and
//! any validators, and [`PredicateValidator`] for arbitrary checks on the
//! cursor value.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::outcome::Outcome;
use crate::value::Value;

use super::traits::{expected, Message, Validator};

/// The scalar kinds checked by [`TypeValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Boolean,
    Keyword,
    Nil,
    /// Accepts every value.
    Any,
}

impl ScalarKind {
    fn name(self) -> &'static str {
        match self {
            ScalarKind::Boolean => "boolean",
            ScalarKind::Keyword => "keyword",
            ScalarKind::Nil => "nil",
            ScalarKind::Any => "any",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            ScalarKind::Boolean => matches!(value, Value::Bool(_)),
            ScalarKind::Keyword => matches!(value, Value::Keyword(_)),
            ScalarKind::Nil => value.is_nil(),
            ScalarKind::Any => true,
        }
    }
}

/// A validator that checks the kind of a scalar value and returns it
/// unchanged.
///
/// # Example
///
/// ```rust
/// use autopsy::{validate, Schema, Value};
///
/// assert!(validate(&Schema::keyword(), Value::keyword("admin")).is_pass());
///
/// let result = validate(&Schema::boolean(), Value::from("yes"));
/// assert_eq!(
///     result.errors().unwrap().first().message,
///     "Expected boolean, got \"yes\""
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TypeValidator {
    kind: ScalarKind,
    message: Option<Message>,
}

impl TypeValidator {
    pub fn new(kind: ScalarKind) -> Self {
        Self { kind, message: None }
    }

    /// Sets the message used when the value has the wrong kind.
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }
}

impl Validator for TypeValidator {
    fn validate(&self, ctx: &Context) -> Outcome {
        if self.kind.matches(ctx.value()) {
            return Outcome::Ok(ctx.value().clone());
        }
        Outcome::Error(Message::resolve(self.message.as_ref(), ctx, || {
            expected(self.kind.name(), ctx)
        }))
    }
}

/// Type alias for the check behind a [`PredicateValidator`].
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A validator that accepts the value when a user-supplied check returns
/// true.
///
/// The default failure message is `Expected <name>, got <value>`.
///
/// # Example
///
/// ```rust
/// use autopsy::{validate, Schema, Value};
///
/// let even = Schema::predicate("even integer", |v| matches!(v, Value::Int(i) if i % 2 == 0));
///
/// assert!(validate(&even, Value::Int(4)).is_pass());
/// assert_eq!(
///     validate(&even, Value::Int(3)).errors().unwrap().first().message,
///     "Expected even integer, got 3"
/// );
/// ```
#[derive(Clone)]
pub struct PredicateValidator {
    name: String,
    check: PredicateFn,
    message: Option<Message>,
}

impl PredicateValidator {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
            message: None,
        }
    }

    /// Sets the message used when the check fails.
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for PredicateValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Validator for PredicateValidator {
    fn validate(&self, ctx: &Context) -> Outcome {
        if (self.check)(ctx.value()) {
            return Outcome::Ok(ctx.value().clone());
        }
        Outcome::Error(Message::resolve(self.message.as_ref(), ctx, || {
            expected(&self.name, ctx)
        }))
    }
}
