//! Combinators for composing validators.
//!
//! This module provides validators built out of other validators:
//! - [`Chain`]: every validator must pass, each one seeing the previous output
//! - [`Union`]: the first validator that passes wins
//! - [`WithDefault`]: substitutes a fallback for `nil` before validating
//! - [`Lazy`]: builds its validator on every invocation, for recursive shapes
//! - [`Nilable`]: `nil` passes, anything else is delegated
//!
//! # Example
//!
//! ```rust
//! use autopsy::{validate, Schema, Validator, Value};
//!
//! // A string or an integer identifier
//! let id = Schema::union(vec![
//!     Schema::string().min_len(1).boxed(),
//!     Schema::integer().positive().boxed(),
//! ]);
//!
//! assert!(validate(&id, Value::from("abc")).is_pass());
//! assert!(validate(&id, Value::Int(7)).is_pass());
//! assert!(!validate(&id, Value::Bool(true)).is_pass());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::outcome::Outcome;
use crate::value::Value;

use super::traits::{BoxedValidator, Validator};

/// Fail-fast conjunction: validators run in order, each on the value the
/// previous one produced. The first failure is returned unchanged and the
/// remaining validators are not invoked.
///
/// ```rust
/// use autopsy::{from_fn, validate, Outcome, Schema, Validator, Value};
///
/// let trimmed = Schema::chain(vec![
///     Schema::string().boxed(),
///     from_fn(|ctx| Outcome::ok(ctx.value().as_str().unwrap_or_default().trim())).boxed(),
///     Schema::string().min_len(1).boxed(),
/// ]);
///
/// let result = validate(&trimmed, Value::from("  hi "));
/// assert_eq!(result.output(), Some(&Value::from("hi")));
/// ```
#[derive(Clone)]
pub struct Chain {
    validators: Vec<BoxedValidator>,
}

impl Chain {
    pub fn new(validators: Vec<BoxedValidator>) -> Self {
        Self { validators }
    }
}

impl Validator for Chain {
    fn validate(&self, ctx: &Context) -> Outcome {
        let mut current = ctx.clone();
        for validator in &self.validators {
            match validator.validate(&current) {
                Outcome::Ok(value) => current = current.with_value(value),
                failure => return failure,
            }
        }
        Outcome::Ok(current.value().clone())
    }
}

/// Disjunction: every alternative sees the same original context and the
/// first success is returned.
///
/// When every alternative fails, only the failure of the last one is
/// reported; earlier failures are discarded.
#[derive(Clone)]
pub struct Union {
    alternatives: Vec<BoxedValidator>,
}

impl Union {
    /// # Panics
    ///
    /// Panics if `alternatives` is empty.
    pub fn new(alternatives: Vec<BoxedValidator>) -> Self {
        assert!(
            !alternatives.is_empty(),
            "union requires at least one alternative"
        );
        Self { alternatives }
    }
}

impl Validator for Union {
    fn validate(&self, ctx: &Context) -> Outcome {
        let mut last = None;
        for alternative in &self.alternatives {
            match alternative.validate(ctx) {
                Outcome::Ok(value) => return Outcome::Ok(value),
                failure => last = Some(failure),
            }
        }
        last.unwrap_or_else(|| Outcome::Ok(ctx.value().clone()))
    }
}

/// Type alias for a function producing a fallback value.
pub type FallbackFn = Arc<dyn Fn() -> Value + Send + Sync>;

#[derive(Clone)]
enum Fallback {
    Value(Value),
    Thunk(FallbackFn),
}

/// Substitutes a fallback when the cursor value is `nil`, then validates.
///
/// The fallback is validated like any other value, so a fallback that does
/// not satisfy the inner validator is reported.
///
/// ```rust
/// use autopsy::{validate, Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::record()
///     .field("role", Schema::default(Schema::string(), "user"));
///
/// let result = validate(&schema, Value::from(json!({})));
/// assert_eq!(result.output(), Some(&Value::from(json!({"role": "user"}))));
/// ```
#[derive(Clone)]
pub struct WithDefault {
    inner: BoxedValidator,
    fallback: Fallback,
}

impl WithDefault {
    pub fn new(inner: impl Validator + 'static, fallback: impl Into<Value>) -> Self {
        Self {
            inner: inner.boxed(),
            fallback: Fallback::Value(fallback.into()),
        }
    }

    /// Computes the fallback on each substitution.
    pub fn with<F>(inner: impl Validator + 'static, fallback: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            inner: inner.boxed(),
            fallback: Fallback::Thunk(Arc::new(fallback)),
        }
    }
}

impl Validator for WithDefault {
    fn validate(&self, ctx: &Context) -> Outcome {
        if !ctx.value().is_nil() {
            return self.inner.validate(ctx);
        }
        let fallback = match &self.fallback {
            Fallback::Value(value) => value.clone(),
            Fallback::Thunk(thunk) => thunk(),
        };
        self.inner.validate(&ctx.with_value(fallback))
    }
}

/// Type alias for the function that builds a lazy validator.
pub type ThunkFn = Arc<dyn Fn() -> BoxedValidator + Send + Sync>;

/// Defers building a validator until it is invoked.
///
/// The thunk runs on every invocation and its result is never cached, so a
/// validator may refer to itself. Each invocation counts as one recursion
/// level; past [`Context::max_depth`] the result is an error instead of a
/// stack overflow.
///
/// ```rust
/// use autopsy::{validate, BoxedValidator, Schema, Validator, Value};
/// use serde_json::json;
///
/// fn tree() -> BoxedValidator {
///     Schema::record()
///         .field("value", Schema::number())
///         .field("children", Schema::vector_of(Schema::lazy(tree)))
///         .boxed()
/// }
///
/// let input = json!({"value": 1, "children": [{"value": 2, "children": []}]});
/// assert!(validate(&tree(), Value::from(input)).is_pass());
/// ```
#[derive(Clone)]
pub struct Lazy {
    thunk: ThunkFn,
}

impl Lazy {
    pub fn new<F>(thunk: F) -> Self
    where
        F: Fn() -> BoxedValidator + Send + Sync + 'static,
    {
        Self {
            thunk: Arc::new(thunk),
        }
    }
}

impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lazy(<thunk>)")
    }
}

impl Validator for Lazy {
    fn validate(&self, ctx: &Context) -> Outcome {
        match ctx.descend() {
            Some(deeper) => (self.thunk)().validate(&deeper),
            None => recursion_limit(ctx),
        }
    }
}

/// The error produced when a recursive validator nests too deeply.
pub(crate) fn recursion_limit(ctx: &Context) -> Outcome {
    tracing::warn!(
        path = %ctx.path(),
        max_depth = ctx.max_depth(),
        "recursion limit reached"
    );
    Outcome::Error(format!(
        "maximum recursion depth {} exceeded",
        ctx.max_depth()
    ))
}

/// Accepts `nil` as is and delegates every other value.
#[derive(Clone)]
pub struct Nilable {
    inner: BoxedValidator,
}

impl Nilable {
    pub fn new(inner: impl Validator + 'static) -> Self {
        Self {
            inner: inner.boxed(),
        }
    }
}

impl Validator for Nilable {
    fn validate(&self, ctx: &Context) -> Outcome {
        if ctx.value().is_nil() {
            return Outcome::Ok(Value::Nil);
        }
        self.inner.validate(ctx)
    }
}
