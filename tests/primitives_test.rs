//! Integration tests for string, number and scalar validators.

use autopsy::{validate, Message, Schema, Validator, Value};

fn first_message(validator: &impl Validator, input: impl Into<Value>) -> String {
    validate(validator, input)
        .errors()
        .expect("expected failure")
        .first()
        .message
        .clone()
}

#[test]
fn test_primitives_return_their_own_scalar() {
    let cases: Vec<(Box<dyn Validator>, Value)> = vec![
        (Box::new(Schema::string()), Value::from("s")),
        (Box::new(Schema::number()), Value::Float(0.5)),
        (Box::new(Schema::integer()), Value::Int(-3)),
        (Box::new(Schema::boolean()), Value::Bool(false)),
        (Box::new(Schema::keyword()), Value::keyword("k")),
        (Box::new(Schema::nil()), Value::Nil),
        (Box::new(Schema::any()), Value::list([1, 2])),
    ];

    for (validator, input) in cases {
        let result = validate(&validator, input.clone());
        assert_eq!(result.output(), Some(&input));
    }
}

#[test]
fn test_default_type_messages_render_values_unambiguously() {
    assert_eq!(first_message(&Schema::string(), 5), "Expected string, got 5");
    assert_eq!(first_message(&Schema::number(), "x"), "Expected number, got \"x\"");
    assert_eq!(first_message(&Schema::number(), ""), "Expected number, got \"\"");
    assert_eq!(first_message(&Schema::integer(), 1.5), "Expected integer, got 1.5");
    assert_eq!(first_message(&Schema::boolean(), Value::Nil), "Expected boolean, got nil");
    assert_eq!(
        first_message(&Schema::keyword(), Value::vector([1, 2])),
        "Expected keyword, got [1, 2]"
    );
    assert_eq!(first_message(&Schema::nil(), Value::keyword("a")), "Expected nil, got :a");
}

#[test]
fn test_string_constraints_accumulate() {
    let schema = Schema::string()
        .min_len(8)
        .pattern(r"[0-9]")
        .unwrap()
        .pattern(r"[A-Z]")
        .unwrap();

    let result = validate(&schema, Value::from("abc"));
    let messages: Vec<_> = result
        .errors()
        .unwrap()
        .iter()
        .map(|e| e.message.clone())
        .collect();

    assert_eq!(
        messages,
        vec![
            "Expected at least 8 characters, got 3",
            "Expected string matching '[0-9]', got \"abc\"",
            "Expected string matching '[A-Z]', got \"abc\"",
        ]
    );
}

#[test]
fn test_error_targets_last_constraint() {
    let schema = Schema::string()
        .min_len(3)
        .error("too short")
        .max_len(5)
        .error("too long");

    assert_eq!(first_message(&schema, "ab"), "too short");
    assert_eq!(first_message(&schema, "abcdef"), "too long");
    assert_eq!(first_message(&schema, 1), "Expected string, got 1");
}

#[test]
fn test_dynamic_message() {
    let schema = Schema::integer()
        .max(10)
        .error(Message::dynamic(|ctx| format!("{} is over the limit", ctx.value())));

    assert_eq!(first_message(&schema, 11), "11 is over the limit");
}

#[test]
fn test_number_range_and_sign() {
    let schema = Schema::number().range(0.0..=1.0);
    assert!(validate(&schema, Value::Float(0.5)).is_pass());
    assert_eq!(first_message(&schema, 2), "Expected at most 1, got 2");

    let schema = Schema::integer().negative();
    assert_eq!(first_message(&schema, 0), "Expected negative number, got 0");
}

#[test]
fn test_predicate_with_custom_message() {
    let even = Schema::predicate("even", |v| matches!(v, Value::Int(i) if i % 2 == 0))
        .message("must be even");

    assert!(validate(&even, Value::Int(2)).is_pass());
    assert_eq!(first_message(&even, 3), "must be even");
}
