//! The validator contract.
//!
//! This module provides the [`Validator`] trait every validator implements,
//! the [`Message`] type used to customize failure text, and [`from_fn`] for
//! turning a closure into a validator.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::outcome::Outcome;

/// A validator: a pure function from a [`Context`] to an [`Outcome`].
///
/// Validators never panic or return `Err` for data that does not conform;
/// they return [`Outcome::Error`] or [`Outcome::Errors`]. The `Send + Sync`
/// bounds let one validator be shared by many threads.
///
/// # Example
///
/// ```rust
/// use autopsy::{validate, Context, Outcome, Validator, Value};
///
/// struct Even;
///
/// impl Validator for Even {
///     fn validate(&self, ctx: &Context) -> Outcome {
///         match ctx.value() {
///             Value::Int(i) if i % 2 == 0 => Outcome::ok(*i),
///             other => Outcome::error(format!("Expected even integer, got {}", other)),
///         }
///     }
/// }
///
/// assert!(validate(&Even, Value::Int(4)).is_pass());
/// assert!(!validate(&Even, Value::Int(3)).is_pass());
/// ```
pub trait Validator: Send + Sync {
    /// Validates the value under the cursor of `ctx`.
    fn validate(&self, ctx: &Context) -> Outcome;

    /// Erases the concrete type so validators of different types can be
    /// stored together.
    fn boxed(self) -> BoxedValidator
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

/// A shared, type-erased validator.
pub type BoxedValidator = Arc<dyn Validator>;

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, ctx: &Context) -> Outcome {
        (**self).validate(ctx)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, ctx: &Context) -> Outcome {
        (**self).validate(ctx)
    }
}

impl<V: Validator + ?Sized> Validator for &V {
    fn validate(&self, ctx: &Context) -> Outcome {
        (**self).validate(ctx)
    }
}

/// A validator backed by a closure. Created by [`from_fn`].
pub struct FnValidator<F> {
    f: F,
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Context) -> Outcome + Send + Sync,
{
    fn validate(&self, ctx: &Context) -> Outcome {
        (self.f)(ctx)
    }
}

/// Wraps a closure as a validator.
///
/// ```rust
/// use autopsy::{from_fn, validate, Outcome, Value};
///
/// let upper = from_fn(|ctx| match ctx.value().as_str() {
///     Some(s) => Outcome::ok(s.to_uppercase()),
///     None => Outcome::error(format!("Expected string, got {}", ctx.value())),
/// });
///
/// let result = validate(&upper, Value::from("abc"));
/// assert_eq!(result.output(), Some(&Value::from("ABC")));
/// ```
pub fn from_fn<F>(f: F) -> FnValidator<F>
where
    F: Fn(&Context) -> Outcome + Send + Sync,
{
    FnValidator { f }
}

/// Type alias for the closure behind a dynamic message.
pub type MessageFn = Arc<dyn Fn(&Context) -> String + Send + Sync>;

/// A failure message: fixed text, or text computed from the failing context.
#[derive(Clone)]
pub enum Message {
    Static(String),
    Dynamic(MessageFn),
}

impl Message {
    /// Creates a message computed from the failing context.
    ///
    /// ```rust
    /// use autopsy::{validate, Message, Schema, Value};
    ///
    /// let schema = Schema::string()
    ///     .message(Message::dynamic(|ctx| format!("{} is not text", ctx.value())));
    ///
    /// let result = validate(&schema, Value::Int(3));
    /// assert_eq!(result.errors().unwrap().first().message, "3 is not text");
    /// ```
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Context) -> String + Send + Sync + 'static,
    {
        Message::Dynamic(Arc::new(f))
    }

    /// Renders the message for `ctx`.
    pub fn render(&self, ctx: &Context) -> String {
        match self {
            Message::Static(text) => text.clone(),
            Message::Dynamic(f) => f(ctx),
        }
    }

    /// Renders `custom` if set, otherwise the validator's default message.
    pub(crate) fn resolve(
        custom: Option<&Message>,
        ctx: &Context,
        default: impl FnOnce() -> String,
    ) -> String {
        match custom {
            Some(message) => message.render(ctx),
            None => default(),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Message::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Static(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Static(text)
    }
}

/// The default type-mismatch message, `Expected <kind>, got <value>`.
pub(crate) fn expected(kind: &str, ctx: &Context) -> String {
    format!("Expected {}, got {}", kind, ctx.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_fn_validator() {
        let validator = from_fn(|ctx| Outcome::Ok(ctx.value().clone()));
        let outcome = validator.validate(&Context::new(Value::Int(1)));
        assert_eq!(outcome, Outcome::Ok(Value::Int(1)));
    }

    #[test]
    fn test_boxed_and_shared_validators_delegate() {
        let boxed: BoxedValidator = from_fn(|_| Outcome::error("no")).boxed();
        let ctx = Context::new(Value::Nil);

        assert_eq!(boxed.validate(&ctx), Outcome::error("no"));
        assert_eq!((&boxed).validate(&ctx), Outcome::error("no"));
        assert_eq!(Box::new(boxed.clone()).validate(&ctx), Outcome::error("no"));
    }

    #[test]
    fn test_message_render() {
        let ctx = Context::new(Value::Int(7));
        assert_eq!(Message::from("fixed").render(&ctx), "fixed");
        assert_eq!(
            Message::dynamic(|ctx| format!("got {}", ctx.value())).render(&ctx),
            "got 7"
        );
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let ctx = Context::new(Value::from("x"));
        assert_eq!(
            Message::resolve(None, &ctx, || expected("number", &ctx)),
            "Expected number, got \"x\""
        );
        let custom = Message::from("custom");
        assert_eq!(
            Message::resolve(Some(&custom), &ctx, || unreachable!()),
            "custom"
        );
    }
}
