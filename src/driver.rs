//! Entry points that run a validator over raw input.
//!
//! [`validate`] returns a [`ValidationResult`] describing success or every
//! failure. [`assert_valid`] is the only place a data failure becomes an
//! `Err`. [`validate_batch`] validates independent inputs in parallel.

use std::fmt::{self, Display};
use std::sync::Arc;

use rayon::prelude::*;
use serde_json::json;
use stillwater::Validation;

use crate::context::{Context, DEFAULT_MAX_DEPTH};
use crate::error::{errors_to_string, ValidationError, ValidationErrors};
use crate::outcome::Outcome;
use crate::path::{PathSegment, ValuePath};
use crate::validator::Validator;
use crate::value::Value;

/// Options for [`validate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Maximum nesting of `lazy` and registry-reference invocations.
    pub max_depth: usize,
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Whether a validation passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Passed {
    pub input: Value,
    pub output: Value,
}

/// A failed validation. There is no output.
#[derive(Debug, Clone, PartialEq)]
pub struct Failed {
    pub input: Value,
    pub errors: ValidationErrors,
}

/// The result of validating one input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Pass(Passed),
    Fail(Failed),
}

impl ValidationResult {
    pub fn status(&self) -> Status {
        match self {
            ValidationResult::Pass(_) => Status::Pass,
            ValidationResult::Fail(_) => Status::Fail,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationResult::Pass(_))
    }

    pub fn is_fail(&self) -> bool {
        !self.is_pass()
    }

    /// Returns the input as it was given.
    pub fn input(&self) -> &Value {
        match self {
            ValidationResult::Pass(passed) => &passed.input,
            ValidationResult::Fail(failed) => &failed.input,
        }
    }

    /// Returns the output, or `None` if validation failed.
    pub fn output(&self) -> Option<&Value> {
        match self {
            ValidationResult::Pass(passed) => Some(&passed.output),
            ValidationResult::Fail(_) => None,
        }
    }

    /// Returns the errors, or `None` if validation passed.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            ValidationResult::Pass(_) => None,
            ValidationResult::Fail(failed) => Some(&failed.errors),
        }
    }

    pub fn into_result(self) -> Result<Passed, Failed> {
        match self {
            ValidationResult::Pass(passed) => Ok(passed),
            ValidationResult::Fail(failed) => Err(failed),
        }
    }

    /// Converts into a `stillwater::Validation` over the output.
    pub fn into_validation(self) -> Validation<Value, ValidationErrors> {
        match self {
            ValidationResult::Pass(passed) => Validation::Success(passed.output),
            ValidationResult::Fail(failed) => Validation::Failure(failed.errors),
        }
    }

    /// Renders the result as JSON.
    ///
    /// ```rust
    /// use autopsy::{validate, Schema, Value};
    /// use serde_json::json;
    ///
    /// let result = validate(&Schema::vector_of(Schema::number()), Value::from(json!([1, "x"])));
    /// assert_eq!(
    ///     result.to_json(),
    ///     json!({
    ///         "status": "fail",
    ///         "input": [1, "x"],
    ///         "output": null,
    ///         "errors": [{"path": [1], "message": "Expected number, got \"x\""}]
    ///     })
    /// );
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ValidationResult::Pass(passed) => json!({
                "status": Status::Pass.as_str(),
                "input": passed.input.to_json(),
                "output": passed.output.to_json(),
            }),
            ValidationResult::Fail(failed) => json!({
                "status": Status::Fail.as_str(),
                "input": failed.input.to_json(),
                "output": serde_json::Value::Null,
                "errors": failed.errors.iter().map(error_json).collect::<Vec<_>>(),
            }),
        }
    }
}

fn error_json(error: &ValidationError) -> serde_json::Value {
    let path: Vec<_> = error
        .path
        .segments()
        .map(|segment| match segment {
            PathSegment::Field(name) => json!(name),
            PathSegment::Index(idx) => json!(idx),
        })
        .collect();
    json!({"path": path, "message": error.message})
}

/// Validates `input` with the default options.
///
/// # Example
///
/// ```rust
/// use autopsy::{validate, Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::record().field("k", Schema::nilable(Schema::string()));
///
/// let result = validate(&schema, Value::from(json!({})));
/// assert_eq!(result.output(), Some(&Value::map([("k", Value::Nil)])));
/// ```
pub fn validate<V>(validator: &V, input: impl Into<Value>) -> ValidationResult
where
    V: Validator + ?Sized,
{
    validate_with(validator, input, &ValidateOptions::default())
}

/// Validates `input` with the given options.
pub fn validate_with<V>(
    validator: &V,
    input: impl Into<Value>,
    options: &ValidateOptions,
) -> ValidationResult
where
    V: Validator + ?Sized,
{
    let ctx = Context::new(input).with_max_depth(options.max_depth);
    let outcome = validator.validate(&ctx);

    let errors = match outcome {
        Outcome::Ok(value) => {
            let (input, output) = ctx.accrete(value).into_parts();
            return ValidationResult::Pass(Passed {
                input: unshare(input),
                output,
            });
        }
        Outcome::Error(message) => {
            ValidationErrors::single(ValidationError::new(ValuePath::root(), message))
        }
        Outcome::Errors(errors) => errors,
    };

    tracing::debug!(error_count = errors.len(), "validation failed");
    let (input, _) = ctx.into_parts();
    ValidationResult::Fail(Failed {
        input: unshare(input),
        errors,
    })
}

fn unshare(input: Arc<Value>) -> Value {
    Arc::try_unwrap(input).unwrap_or_else(|shared| (*shared).clone())
}

/// Validates each input in parallel, returning results in input order.
///
/// ```rust
/// use autopsy::{validate_batch, Schema, Value};
///
/// let results = validate_batch(&Schema::integer(), vec![Value::Int(1), Value::from("x")]);
/// assert!(results[0].is_pass());
/// assert!(results[1].is_fail());
/// ```
pub fn validate_batch<V, T>(validator: &V, inputs: Vec<T>) -> Vec<ValidationResult>
where
    V: Validator + ?Sized,
    T: Into<Value> + Send,
{
    tracing::trace!(count = inputs.len(), "validating batch");
    inputs
        .into_par_iter()
        .map(|input| validate(validator, input))
        .collect()
}

/// Type alias for a function rendering the message of an [`AssertError`].
pub type AssertFormatFn = Arc<dyn Fn(&ValidationErrors) -> String + Send + Sync>;

#[derive(Clone)]
enum AssertMessage {
    Static(String),
    Format(AssertFormatFn),
}

/// Options for [`assert_valid`].
#[derive(Clone, Default)]
pub struct AssertOptions {
    message: Option<AssertMessage>,
    validate: ValidateOptions,
}

impl AssertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `message` as the error message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(AssertMessage::Static(message.into()));
        self
    }

    /// Computes the error message from the errors.
    pub fn format<F>(mut self, format: F) -> Self
    where
        F: Fn(&ValidationErrors) -> String + Send + Sync + 'static,
    {
        self.message = Some(AssertMessage::Format(Arc::new(format)));
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.validate = self.validate.max_depth(max_depth);
        self
    }

    fn render(&self, errors: &ValidationErrors) -> String {
        match &self.message {
            Some(AssertMessage::Static(message)) => message.clone(),
            Some(AssertMessage::Format(format)) => format(errors),
            None => errors_to_string(errors),
        }
    }
}

impl fmt::Debug for AssertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match &self.message {
            None => "default",
            Some(AssertMessage::Static(_)) => "static",
            Some(AssertMessage::Format(_)) => "format",
        };
        f.debug_struct("AssertOptions")
            .field("message", &message)
            .field("validate", &self.validate)
            .finish()
    }
}

/// The error returned by [`assert_valid`] when validation fails.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct AssertError {
    message: String,
    input: Value,
    #[source]
    errors: ValidationErrors,
}

impl AssertError {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn input(&self) -> &Value {
        &self.input
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }
}

/// Validates `input`, turning a failure into an [`AssertError`].
///
/// # Errors
///
/// Returns `AssertError` when validation fails. Its message is the one set
/// in `options`, or one line per error as rendered by [`errors_to_string`].
///
/// ```rust
/// use autopsy::{assert_valid, AssertOptions, Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::record().field("age", Schema::number());
///
/// let err = assert_valid(&schema, Value::from(json!({"age": "x"})), &AssertOptions::new())
///     .unwrap_err();
/// assert_eq!(err.to_string(), "age: Expected number, got \"x\"");
/// ```
pub fn assert_valid<V>(
    validator: &V,
    input: impl Into<Value>,
    options: &AssertOptions,
) -> Result<Passed, AssertError>
where
    V: Validator + ?Sized,
{
    validate_with(validator, input, &options.validate)
        .into_result()
        .map_err(|failed| AssertError {
            message: options.render(&failed.errors),
            input: failed.input,
            errors: failed.errors,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::Schema;
    use serde_json::json;

    #[test]
    fn test_pass_carries_input_and_output() {
        let result = validate(&Schema::string(), Value::from("a"));
        assert_eq!(result.status(), Status::Pass);
        assert_eq!(result.input(), &Value::from("a"));
        assert_eq!(result.output(), Some(&Value::from("a")));
        assert!(result.errors().is_none());
    }

    #[test]
    fn test_root_error_is_located_at_root() {
        let result = validate(&Schema::string(), Value::Int(5));
        let errors = result.errors().unwrap();
        assert!(errors.first().path.is_root());
        assert_eq!(errors_to_string(errors), "(root): Expected string, got 5");
        assert!(result.output().is_none());
    }

    #[test]
    fn test_to_json_on_pass() {
        let result = validate(&Schema::any(), Value::from(json!({"a": [1]})));
        assert_eq!(
            result.to_json(),
            json!({"status": "pass", "input": {"a": [1]}, "output": {"a": [1]}})
        );
    }

    #[test]
    fn test_max_depth_option() {
        fn forever() -> crate::validator::BoxedValidator {
            Schema::lazy(forever).boxed()
        }

        let result = validate_with(&forever(), Value::Nil, &ValidateOptions::new().max_depth(3));
        assert_eq!(
            result.errors().unwrap().first().message,
            "maximum recursion depth 3 exceeded"
        );
    }

    #[test]
    fn test_assert_valid_messages() {
        let schema = Schema::number();

        let passed = assert_valid(&schema, Value::Int(1), &AssertOptions::new()).unwrap();
        assert_eq!(passed.output, Value::Int(1));

        let err = assert_valid(&schema, Value::Nil, &AssertOptions::new().message("bad input"))
            .unwrap_err();
        assert_eq!(err.to_string(), "bad input");
        assert_eq!(err.errors().len(), 1);

        let err = assert_valid(
            &schema,
            Value::Nil,
            &AssertOptions::new().format(|errors| format!("{} problem(s)", errors.len())),
        )
        .unwrap_err();
        assert_eq!(err.message(), "1 problem(s)");
        assert_eq!(err.input(), &Value::Nil);
    }

    #[test]
    fn test_validate_batch_preserves_order() {
        let inputs: Vec<Value> = (0..50)
            .map(|i| if i % 7 == 0 { Value::Nil } else { Value::Int(i) })
            .collect();
        let results = validate_batch(&Schema::integer(), inputs);

        assert_eq!(results.len(), 50);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.is_fail(), i % 7 == 0, "input {}", i);
        }
    }
}
