//! Validator definitions.
//!
//! This module provides the [`Validator`] contract and the built-in
//! validators: primitives, collections and combinators. Collections visit
//! every element and report all failures rather than stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use autopsy::{validate, Schema, Value};
//! use serde_json::json;
//!
//! let schema = Schema::record()
//!     .field("name", Schema::string().min_len(1))
//!     .field("tags", Schema::vector_of(Schema::keyword()));
//!
//! let result = validate(&schema, Value::from(json!({"name": "", "tags": "x"})));
//! assert_eq!(result.errors().unwrap().len(), 2);
//! ```

mod combinators;
mod dict;
mod numeric;
mod primitive;
mod record;
mod sequence;
mod string;
mod traits;

pub use combinators::{Chain, FallbackFn, Lazy, Nilable, ThunkFn, Union, WithDefault};
pub use dict::DictValidator;
pub use numeric::NumberValidator;
pub use primitive::{PredicateFn, PredicateValidator, ScalarKind, TypeValidator};
pub use record::{RecordValidator, UnknownKeys};
pub use sequence::{SequenceKind, SequenceValidator};
pub use string::StringValidator;
pub use traits::{from_fn, BoxedValidator, FnValidator, Message, MessageFn, Validator};

pub(crate) use combinators::recursion_limit;

use crate::value::Value;

/// Entry point for creating validators.
///
/// `Schema` provides one factory method per built-in validator. Builders
/// returned by the factories add constraints and custom messages.
///
/// # Example
///
/// ```rust
/// use autopsy::Schema;
///
/// let username = Schema::string()
///     .min_len(3)
///     .max_len(20)
///     .pattern(r"^[a-z0-9_]+$")
///     .unwrap()
///     .error("may only contain lowercase letters, digits and underscores");
///
/// let age = Schema::integer().range(0..=150);
/// ```
pub struct Schema;

impl Schema {
    /// Creates a string validator.
    pub fn string() -> StringValidator {
        StringValidator::new()
    }

    /// Creates a validator accepting integers and floats.
    pub fn number() -> NumberValidator {
        NumberValidator::number()
    }

    /// Creates a validator accepting integers only.
    pub fn integer() -> NumberValidator {
        NumberValidator::integer()
    }

    pub fn boolean() -> TypeValidator {
        TypeValidator::new(ScalarKind::Boolean)
    }

    pub fn keyword() -> TypeValidator {
        TypeValidator::new(ScalarKind::Keyword)
    }

    pub fn nil() -> TypeValidator {
        TypeValidator::new(ScalarKind::Nil)
    }

    /// Creates a validator that accepts any value unchanged.
    pub fn any() -> TypeValidator {
        TypeValidator::new(ScalarKind::Any)
    }

    /// Creates a validator from a check on the cursor value. `name` describes
    /// the expected value in the default message.
    pub fn predicate<F>(name: impl Into<String>, check: F) -> PredicateValidator
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        PredicateValidator::new(name, check)
    }

    /// Creates a validator for vectors whose elements all pass `item`.
    pub fn vector_of(item: impl Validator + 'static) -> SequenceValidator {
        SequenceValidator::of(SequenceKind::Vector, item)
    }

    /// Creates a validator for lists whose elements all pass `item`.
    pub fn list_of(item: impl Validator + 'static) -> SequenceValidator {
        SequenceValidator::of(SequenceKind::List, item)
    }

    /// Creates a validator for sets whose elements all pass `item`.
    pub fn set_of(item: impl Validator + 'static) -> SequenceValidator {
        SequenceValidator::of(SequenceKind::Set, item)
    }

    /// Creates a validator for vectors of exactly `items.len()` elements,
    /// element `i` checked by `items[i]`.
    ///
    /// ```rust
    /// use autopsy::{validate, Schema, Validator, Value};
    /// use serde_json::json;
    ///
    /// let point = Schema::tuple(vec![Schema::number().boxed(), Schema::number().boxed()]);
    ///
    /// assert!(validate(&point, Value::from(json!([1, 2.5]))).is_pass());
    /// assert!(!validate(&point, Value::from(json!([1]))).is_pass());
    /// ```
    pub fn tuple(items: Vec<BoxedValidator>) -> SequenceValidator {
        SequenceValidator::tuple(SequenceKind::Vector, items)
    }

    /// Like [`Schema::tuple`], for lists.
    pub fn list_tuple(items: Vec<BoxedValidator>) -> SequenceValidator {
        SequenceValidator::tuple(SequenceKind::List, items)
    }

    /// Creates a record validator with no declared keys.
    pub fn record() -> RecordValidator {
        RecordValidator::new()
    }

    /// Creates a validator for maps whose keys pass `key` and whose values
    /// pass `value`.
    pub fn dict_of(
        key: impl Validator + 'static,
        value: impl Validator + 'static,
    ) -> DictValidator {
        DictValidator::new(key, value)
    }

    /// Runs `validators` in order, stopping at the first failure.
    pub fn chain(validators: Vec<BoxedValidator>) -> Chain {
        Chain::new(validators)
    }

    /// Returns the first success among `alternatives`, or the failure of the
    /// last one.
    ///
    /// # Panics
    ///
    /// Panics if `alternatives` is empty.
    pub fn union(alternatives: Vec<BoxedValidator>) -> Union {
        Union::new(alternatives)
    }

    /// Substitutes `fallback` for `nil` before running `inner`.
    pub fn default(inner: impl Validator + 'static, fallback: impl Into<Value>) -> WithDefault {
        WithDefault::new(inner, fallback)
    }

    /// Substitutes the result of `fallback` for `nil` before running `inner`.
    pub fn default_with<F>(inner: impl Validator + 'static, fallback: F) -> WithDefault
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        WithDefault::with(inner, fallback)
    }

    /// Builds the validator from `thunk` on every invocation.
    pub fn lazy<F>(thunk: F) -> Lazy
    where
        F: Fn() -> BoxedValidator + Send + Sync + 'static,
    {
        Lazy::new(thunk)
    }

    /// Accepts `nil`, otherwise delegates to `inner`.
    pub fn nilable(inner: impl Validator + 'static) -> Nilable {
        Nilable::new(inner)
    }
}

// Validators are shared across threads.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StringValidator>();
    assert_send_sync::<NumberValidator>();
    assert_send_sync::<TypeValidator>();
    assert_send_sync::<PredicateValidator>();
    assert_send_sync::<SequenceValidator>();
    assert_send_sync::<RecordValidator>();
    assert_send_sync::<DictValidator>();
    assert_send_sync::<Chain>();
    assert_send_sync::<Union>();
    assert_send_sync::<WithDefault>();
    assert_send_sync::<Lazy>();
    assert_send_sync::<Nilable>();
};
