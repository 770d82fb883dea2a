//! # Autopsy
//!
//! A runtime structural-validation engine that reports ALL validation
//! errors, each located precisely within the input, rather than stopping at
//! the first failure.
//!
//! ## Overview
//!
//! A validator is a function from a [`Context`] to an [`Outcome`]. The
//! context carries the cursor (the value being checked and its path), the
//! original input, and the output being assembled. Collection validators
//! visit every element; combinators compose validators. The driver
//! functions build the initial context and turn the final outcome into a
//! [`ValidationResult`].
//!
//! ## Core Types
//!
//! - [`Value`]: the dynamic data model (maps, vectors, lists, sets, keywords, ...)
//! - [`ValuePath`]: paths to values in nested structures (e.g., `users[0].email`)
//! - [`ValidationError`]: a single failure with its path and message
//! - [`ValidationErrors`]: a non-empty collection of failures
//! - [`Schema`]: entry point for creating validators
//! - [`Registry`]: named validators and late-bound references
//!
//! ## Example
//!
//! ```rust
//! use autopsy::{errors_to_string, validate, Schema, Value};
//! use serde_json::json;
//!
//! let schema = Schema::record()
//!     .field("name", Schema::string())
//!     .field("age", Schema::number());
//!
//! // Valid input passes through to the output
//! let result = validate(&schema, Value::from(json!({"name": "Ann", "age": 30})));
//! assert!(result.is_pass());
//!
//! // Every failure is reported
//! let result = validate(&schema, Value::from(json!({"name": 5, "age": "x"})));
//! assert_eq!(
//!     errors_to_string(result.errors().unwrap()),
//!     "name: Expected string, got 5\nage: Expected number, got \"x\""
//! );
//! ```

pub mod context;
pub mod driver;
pub mod error;
pub mod outcome;
pub mod path;
pub mod registry;
pub mod validator;
pub mod value;

pub use context::{Context, DEFAULT_MAX_DEPTH};
pub use driver::{
    assert_valid, validate, validate_batch, validate_with, AssertError, AssertFormatFn,
    AssertOptions, Failed, Passed, Status, ValidateOptions, ValidationResult,
};
pub use error::{errors_to_string, ValidationError, ValidationErrors};
pub use outcome::Outcome;
pub use path::{PathSegment, ValuePath};
pub use registry::{Reference, Registry, RegistryError};
pub use validator::{
    from_fn, BoxedValidator, Chain, DictValidator, FnValidator, Lazy, Message, MessageFn,
    Nilable, NumberValidator, PredicateValidator, RecordValidator, ScalarKind, Schema,
    SequenceKind, SequenceValidator, StringValidator, TypeValidator, Union, UnknownKeys,
    Validator, WithDefault,
};
pub use value::Value;
