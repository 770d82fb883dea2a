//! Validation error types.
//!
//! This module provides [`ValidationError`] for single validation failures and
//! [`ValidationErrors`] for accumulating multiple errors.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::ValuePath;

/// A single validation failure located by its path.
///
/// # Example
///
/// ```rust
/// use autopsy::{ValidationError, ValuePath};
///
/// let error = ValidationError::new(
///     ValuePath::root().push_field("email"),
///     "Expected string, got 5",
/// );
///
/// assert_eq!(error.to_string(), "email: Expected string, got 5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The path to the value that failed validation.
    pub path: ValuePath,
    /// Human-readable error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error with the given path and message.
    pub fn new(path: ValuePath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.dotted(), self.message)
    }
}

impl std::error::Error for ValidationError {}

// ValidationError is Send + Sync since all fields are owned types
// (String, ValuePath with Vec<PathSegment>).
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// A non-empty, ordered collection of validation errors.
///
/// `ValidationErrors` wraps a `NonEmptyVec<ValidationError>` so a failure
/// always carries at least one error. Errors keep the order in which they
/// were encountered.
///
/// # Combining Errors
///
/// `ValidationErrors` implements `Semigroup`:
///
/// ```rust
/// use autopsy::{ValidationError, ValidationErrors, ValuePath};
/// use stillwater::prelude::*;
///
/// let errors1 = ValidationErrors::single(
///     ValidationError::new(ValuePath::root().push_field("name"), "required")
/// );
/// let errors2 = ValidationErrors::single(
///     ValidationError::new(ValuePath::root().push_field("email"), "invalid format")
/// );
///
/// let combined = errors1.combine(errors2);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a `ValidationErrors` containing a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `ValidationErrors` from a `NonEmptyVec` of errors.
    pub fn from_non_empty(errors: NonEmptyVec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Creates a `ValidationErrors` from a `Vec`, or `None` if it is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns all errors at the specified path.
    pub fn at_path(&self, path: &ValuePath) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<ValidationError> {
        &self.0
    }

    /// Renders one line per error, see [`errors_to_string`].
    pub fn to_lines(&self) -> String {
        errors_to_string(self.iter())
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};

/// Renders errors one per line as `<dot.joined.path>: <message>`.
///
/// Path segments are rendered bare: keyword keys lose their `:` sigil and
/// indexes appear as plain numbers.
///
/// ```rust
/// use autopsy::{errors_to_string, ValidationError, ValuePath};
///
/// let errors = vec![
///     ValidationError::new(ValuePath::root().push_field("tags").push_index(1), "Expected string, got 2"),
///     ValidationError::new(ValuePath::root(), "Expected map, got nil"),
/// ];
///
/// assert_eq!(
///     errors_to_string(&errors),
///     "tags.1: Expected string, got 2\n(root): Expected map, got nil"
/// );
/// ```
pub fn errors_to_string<'a, I>(errors: I) -> String
where
    I: IntoIterator<Item = &'a ValidationError>,
{
    errors
        .into_iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_creation() {
        let error = ValidationError::new(ValuePath::root().push_field("name"), "field is required");

        assert_eq!(error.path, ValuePath::root().push_field("name"));
        assert_eq!(error.message, "field is required");
    }

    #[test]
    fn test_validation_error_display_root() {
        let error = ValidationError::new(ValuePath::root(), "value is nil");
        assert_eq!(error.to_string(), "(root): value is nil");
    }

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(ValidationErrors::from_vec(Vec::new()).is_none());

        let errors =
            ValidationErrors::from_vec(vec![ValidationError::new(ValuePath::root(), "x")]).unwrap();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_validation_errors_combine_keeps_order() {
        let error1 = ValidationError::new(ValuePath::root().push_field("a"), "error 1");
        let error2 = ValidationError::new(ValuePath::root().push_field("b"), "error 2");

        let combined = ValidationErrors::single(error1.clone())
            .combine(ValidationErrors::single(error2.clone()));

        assert_eq!(combined.into_vec(), vec![error1, error2]);
    }

    #[test]
    fn test_validation_errors_at_path() {
        let path_a = ValuePath::root().push_field("a");
        let path_b = ValuePath::root().push_field("b");

        let errors = ValidationErrors::single(ValidationError::new(path_a.clone(), "error 1"))
            .combine(ValidationErrors::single(ValidationError::new(
                path_a.clone(),
                "error 2",
            )))
            .combine(ValidationErrors::single(ValidationError::new(
                path_b.clone(),
                "error 3",
            )));

        assert_eq!(errors.at_path(&path_a).len(), 2);
        assert_eq!(errors.at_path(&path_b).len(), 1);
    }

    #[test]
    fn test_validation_errors_display() {
        let error1 = ValidationError::new(ValuePath::root().push_field("name"), "required");
        let error2 = ValidationError::new(ValuePath::root().push_field("email"), "invalid");

        let errors = ValidationErrors::single(error1).combine(ValidationErrors::single(error2));
        let display = errors.to_string();

        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. name: required"));
        assert!(display.contains("2. email: invalid"));
    }

    #[test]
    fn test_to_lines() {
        let errors = ValidationErrors::single(ValidationError::new(
            ValuePath::root().push_field("a").push_index(0),
            "bad",
        ))
        .combine(ValidationErrors::single(ValidationError::new(
            ValuePath::root().push_field("b"),
            "worse",
        )));

        assert_eq!(errors.to_lines(), "a.0: bad\nb: worse");
    }
}
