//! Integration tests for chain, union, default and nilable.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use autopsy::{
    errors_to_string, from_fn, validate, BoxedValidator, Outcome, Schema, Validator, Value,
};
use serde_json::json;

fn counting_stub(calls: &Arc<AtomicUsize>) -> BoxedValidator {
    let calls = Arc::clone(calls);
    from_fn(move |ctx| {
        calls.fetch_add(1, Ordering::SeqCst);
        Outcome::Ok(ctx.value().clone())
    })
    .boxed()
}

#[test]
fn test_chain_short_circuits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let schema = Schema::chain(vec![
        Schema::integer().boxed(),
        counting_stub(&calls),
        counting_stub(&calls),
    ]);

    let result = validate(&schema, Value::from("not a number"));
    assert!(result.is_fail());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(validate(&schema, Value::Int(1)).is_pass());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_chain_transforms_then_validates() {
    let parse = from_fn(|ctx| match ctx.value().as_str().map(str::parse::<i64>) {
        Some(Ok(n)) => Outcome::ok(n),
        _ => Outcome::error(format!("Expected numeric string, got {}", ctx.value())),
    });
    let schema = Schema::record().field(
        "port",
        Schema::chain(vec![parse.boxed(), Schema::integer().range(1..=65535).boxed()]),
    );

    let result = validate(&schema, json!({"port": "8080"}));
    assert_eq!(result.output(), Some(&Value::from(json!({"port": 8080}))));

    let result = validate(&schema, json!({"port": "99999"}));
    assert_eq!(
        errors_to_string(result.errors().unwrap()),
        "port: Expected at most 65535, got 99999"
    );
}

#[test]
fn test_union_returns_last_alternative_errors_only() {
    let schema = Schema::union(vec![
        Schema::string().boxed(),
        Schema::record().field("id", Schema::integer()).boxed(),
    ]);

    let result = validate(&schema, json!({"id": "x"}));
    assert_eq!(
        errors_to_string(result.errors().unwrap()),
        "id: Expected integer, got \"x\""
    );
}

#[test]
fn test_union_alternatives_see_original_value() {
    let schema = Schema::union(vec![
        Schema::chain(vec![
            from_fn(|_| Outcome::ok("replaced")).boxed(),
            Schema::integer().boxed(),
        ])
        .boxed(),
        Schema::boolean().boxed(),
    ]);

    let result = validate(&schema, Value::Bool(true));
    assert_eq!(result.output(), Some(&Value::Bool(true)));
}

#[test]
fn test_union_first_success_stops_search() {
    let calls = Arc::new(AtomicUsize::new(0));
    let schema = Schema::union(vec![Schema::any().boxed(), counting_stub(&calls)]);

    assert!(validate(&schema, Value::Nil).is_pass());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_default_fills_missing_record_keys() {
    let schema = Schema::record()
        .field("role", Schema::default(Schema::keyword(), Value::keyword("user")))
        .field(
            "tags",
            Schema::default_with(Schema::vector_of(Schema::string()), || {
                Value::vector(Vec::<Value>::new())
            }),
        );

    let result = validate(&schema, json!({}));
    assert_eq!(
        result.output(),
        Some(&Value::map([
            (Value::from("role"), Value::keyword("user")),
            (Value::from("tags"), Value::vector(Vec::<Value>::new())),
        ]))
    );
}

#[test]
fn test_invalid_default_is_reported() {
    let schema = Schema::record().field("n", Schema::default(Schema::integer(), "zero"));

    let result = validate(&schema, json!({}));
    assert_eq!(
        errors_to_string(result.errors().unwrap()),
        "n: Expected integer, got \"zero\""
    );
}

#[test]
fn test_nilable_inside_vector() {
    let schema = Schema::vector_of(Schema::nilable(Schema::integer()));

    assert!(validate(&schema, json!([1, null, 3])).is_pass());
    assert_eq!(
        errors_to_string(validate(&schema, json!([null, "x"])).errors().unwrap()),
        "1: Expected integer, got \"x\""
    );
}
