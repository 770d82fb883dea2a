//! The immutable cursor threaded through a validation run.
//!
//! A [`Context`] is created once per top-level validation and handed to every
//! validator. Navigation, error raising and accretion all return a new
//! context; nothing is mutated in place.

use std::sync::Arc;

use crate::error::{ValidationError, ValidationErrors};
use crate::outcome::Outcome;
use crate::path::{PathSegment, ValuePath};
use crate::value::Value;

/// Default limit for nested `lazy` and registry-reference invocations.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Validation context carrying the cursor, the original input, the errors
/// raised so far and the output being assembled.
///
/// - `input` is shared and never changes.
/// - `value` is the value at `path`, unless a combinator bound another one
///   with [`with_value`](Context::with_value) or
///   [`enter_with`](Context::enter_with).
/// - `output` grows only through [`accrete`](Context::accrete) and
///   [`accrete_key`](Context::accrete_key).
///
/// # Example
///
/// ```rust
/// use autopsy::{Context, PathSegment, Value};
/// use serde_json::json;
///
/// let ctx = Context::new(Value::from(json!({"users": [{"name": "Ann"}]})));
/// let name = ctx
///     .enter_path(PathSegment::field("users"))
///     .enter_path(PathSegment::index(0))
///     .enter_path(PathSegment::field("name"));
///
/// assert_eq!(name.value(), &Value::from("Ann"));
/// assert_eq!(name.path().to_string(), "users[0].name");
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    input: Arc<Value>,
    value: Value,
    path: ValuePath,
    output: Value,
    errors: Vec<ValidationError>,
    depth: usize,
    max_depth: usize,
}

impl Context {
    /// Creates a root context: the cursor is the whole input, the path is
    /// empty, there are no errors and the output is `Nil`.
    pub fn new(input: impl Into<Value>) -> Self {
        let input = Arc::new(input.into());
        Self {
            value: (*input).clone(),
            input,
            path: ValuePath::root(),
            output: Value::Nil,
            errors: Vec::new(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the recursion limit enforced by [`descend`](Context::descend).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the value under the cursor.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the cursor's location within the input.
    pub fn path(&self) -> &ValuePath {
        &self.path
    }

    /// Returns the original input.
    pub fn input(&self) -> &Value {
        &self.input
    }

    /// Returns the output assembled so far.
    pub fn output(&self) -> &Value {
        &self.output
    }

    /// Returns the errors raised so far, in encounter order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns how many recursive indirections the cursor is nested in.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Consumes the context and returns the assembled output.
    pub fn into_output(self) -> Value {
        self.output
    }

    /// Consumes the context and returns the shared input and the output.
    pub(crate) fn into_parts(self) -> (Arc<Value>, Value) {
        (self.input, self.output)
    }

    fn moved(&self, path: ValuePath, value: Value) -> Self {
        Self {
            input: Arc::clone(&self.input),
            value,
            path,
            output: self.output.clone(),
            errors: self.errors.clone(),
            depth: self.depth,
            max_depth: self.max_depth,
        }
    }

    /// Moves the cursor one level down to `segment`.
    ///
    /// The new value is the child of the current value, which is the same
    /// as re-navigating the input whenever the cursor was not overridden.
    pub fn enter_path(&self, segment: PathSegment) -> Self {
        let value = self.value.get(&segment).cloned().unwrap_or_default();
        self.moved(self.path.push(segment), value)
    }

    /// Moves the cursor one level down to `segment`, bound to `value`.
    pub fn enter_with(&self, segment: PathSegment, value: Value) -> Self {
        self.moved(self.path.push(segment), value)
    }

    /// Truncates the path to `index` segments, appends `segment`, and
    /// re-navigates the input.
    pub fn replace_path(&self, index: usize, segment: PathSegment) -> Self {
        let path = self.path.truncate(index).push(segment);
        let value = self.input.get_in(path.as_slice());
        self.moved(path, value)
    }

    /// Moves the cursor one level up and re-navigates the input.
    pub fn leave_path(&self) -> Self {
        let path = self.path.parent().unwrap_or_default();
        let value = self.input.get_in(path.as_slice());
        self.moved(path, value)
    }

    /// Binds `value` as the cursor value without moving.
    pub fn with_value(&self, value: Value) -> Self {
        self.moved(self.path.clone(), value)
    }

    /// Replaces the output, typically with an empty container about to be
    /// filled by [`accrete_key`](Context::accrete_key).
    pub fn with_output(mut self, output: Value) -> Self {
        self.output = output;
        self
    }

    /// Records a failure at the current path.
    pub fn raise_error(self, message: impl Into<String>) -> Self {
        let error = ValidationError::new(self.path.clone(), message);
        self.raise(error)
    }

    /// Records an already located failure.
    pub fn raise(mut self, error: ValidationError) -> Self {
        self.errors.push(error);
        self
    }

    /// Records several already located failures, keeping their order.
    pub fn raise_errors(mut self, errors: impl IntoIterator<Item = ValidationError>) -> Self {
        self.errors.extend(errors);
        self
    }

    /// Makes `value` the cursor value and writes it into the output at the
    /// current path.
    pub fn accrete(mut self, value: Value) -> Self {
        let output = std::mem::take(&mut self.output);
        self.output = output.assoc_in(self.path.as_slice(), value.clone());
        self.value = value;
        self
    }

    /// Writes `value` under `key` in the output container.
    pub fn accrete_key(mut self, key: Value, value: Value) -> Self {
        let output = std::mem::take(&mut self.output);
        self.output = output.insert_key(key, value);
        self
    }

    /// Folds a child validator's outcome into this context: a success is
    /// accreted under `key`, a failure is raised, located at `at` when it is
    /// a bare message.
    pub fn absorb(self, key: Value, at: &ValuePath, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Ok(value) => self.accrete_key(key, value),
            Outcome::Error(message) => self.raise(ValidationError::new(at.clone(), message)),
            Outcome::Errors(errors) => self.raise_errors(errors),
        }
    }

    /// Returns `Ok(output)` if no error was raised, otherwise every error.
    pub fn finish(self) -> Outcome {
        match ValidationErrors::from_vec(self.errors) {
            None => Outcome::Ok(self.output),
            Some(errors) => Outcome::Errors(errors),
        }
    }

    /// Returns a context one recursion level deeper, or `None` once
    /// `max_depth` levels have been entered.
    pub fn descend(&self) -> Option<Self> {
        if self.depth >= self.max_depth {
            return None;
        }
        let mut next = self.moved(self.path.clone(), self.value.clone());
        next.depth += 1;
        Some(next)
    }
}
