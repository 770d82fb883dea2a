//! The result of a single validator invocation.

use stillwater::Validation;

use crate::error::{ValidationError, ValidationErrors};
use crate::path::ValuePath;
use crate::value::Value;

/// What a validator returns for one [`Context`](crate::Context).
///
/// `Error` carries a bare message that belongs to the path of the context the
/// validator was invoked with; `Errors` carries errors that already know
/// their paths. Collections and combinators promote the former into the
/// latter as they assemble results.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Validation succeeded with the (possibly transformed) value.
    Ok(Value),
    /// A single failure at the current path.
    Error(String),
    /// One or more path-qualified failures.
    Errors(ValidationErrors),
}

impl Outcome {
    pub fn ok(value: impl Into<Value>) -> Self {
        Outcome::Ok(value.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Outcome::Error(message.into())
    }

    pub fn errors(errors: ValidationErrors) -> Self {
        Outcome::Errors(errors)
    }

    /// Folds the outcome through one handler per variant.
    ///
    /// ```rust
    /// use autopsy::{Outcome, Value};
    ///
    /// let described = Outcome::ok(Value::Int(1)).case(
    ///     |value| format!("ok {}", value),
    ///     |message| format!("error {}", message),
    ///     |errors| format!("{} errors", errors.len()),
    /// );
    /// assert_eq!(described, "ok 1");
    /// ```
    pub fn case<R>(
        self,
        ok: impl FnOnce(Value) -> R,
        err: impl FnOnce(String) -> R,
        errs: impl FnOnce(ValidationErrors) -> R,
    ) -> R {
        match self {
            Outcome::Ok(value) => ok(value),
            Outcome::Error(message) => err(message),
            Outcome::Errors(errors) => errs(errors),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    /// Returns the failure as path-qualified errors, placing a bare `Error`
    /// at `path`. `None` for `Ok`.
    pub fn into_errors(self, path: &ValuePath) -> Option<ValidationErrors> {
        self.case(
            |_| None,
            |message| {
                Some(ValidationErrors::single(ValidationError::new(
                    path.clone(),
                    message,
                )))
            },
            Some,
        )
    }

    /// Converts into a `stillwater::Validation`, placing a bare `Error` at `path`.
    pub fn into_validation(self, path: &ValuePath) -> Validation<Value, ValidationErrors> {
        match self {
            Outcome::Ok(value) => Validation::Success(value),
            Outcome::Error(message) => Validation::Failure(ValidationErrors::single(
                ValidationError::new(path.clone(), message),
            )),
            Outcome::Errors(errors) => Validation::Failure(errors),
        }
    }
}

impl From<Validation<Value, ValidationErrors>> for Outcome {
    fn from(validation: Validation<Value, ValidationErrors>) -> Self {
        match validation {
            Validation::Success(value) => Outcome::Ok(value),
            Validation::Failure(errors) => Outcome::Errors(errors),
        }
    }
}
