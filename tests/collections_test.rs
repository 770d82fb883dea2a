//! Integration tests for vector, list, set, tuple, record and dictionary validators.

use autopsy::{errors_to_string, validate, Schema, UnknownKeys, Validator, Value};
use serde_json::json;

fn error_lines(validator: &impl Validator, input: impl Into<Value>) -> String {
    errors_to_string(validate(validator, input).errors().expect("expected failure"))
}

#[test]
fn test_vector_collects_every_element_error() {
    let schema = Schema::vector_of(Schema::number());

    assert_eq!(
        error_lines(&schema, json!([1, "x", 3, "y"])),
        "1: Expected number, got \"x\"\n3: Expected number, got \"y\""
    );
}

#[test]
fn test_empty_vector_passes() {
    let result = validate(&Schema::vector_of(Schema::number()), json!([]));
    assert_eq!(result.output(), Some(&Value::vector(Vec::<Value>::new())));
}

#[test]
fn test_container_kind_mismatch_is_single_error() {
    let schema = Schema::vector_of(Schema::number());
    let result = validate(&schema, Value::list(["a", "b"]));

    assert_eq!(result.errors().unwrap().len(), 1);
    assert_eq!(
        error_lines(&schema, Value::list(["a", "b"])),
        "(root): Expected vector, got (\"a\", \"b\")"
    );
}

#[test]
fn test_set_of() {
    let schema = Schema::set_of(Schema::keyword());

    let ok = validate(&schema, Value::set([Value::keyword("a"), Value::keyword("b")]));
    assert!(ok.is_pass());

    assert_eq!(
        error_lines(&schema, Value::set([Value::keyword("a"), Value::from("b")])),
        "1: Expected keyword, got \"b\""
    );
}

#[test]
fn test_list_tuple() {
    let schema = Schema::list_tuple(vec![Schema::keyword().boxed(), Schema::integer().boxed()]);

    let input = Value::list([Value::keyword("id"), Value::Int(3)]);
    assert_eq!(validate(&schema, input.clone()).output(), Some(&input));

    assert_eq!(
        error_lines(&schema, Value::list([Value::Int(3)])),
        "(root): Expected list of length 2, got length 1"
    );
}

#[test]
fn test_nested_element_paths() {
    let schema = Schema::vector_of(
        Schema::record()
            .field("name", Schema::string())
            .field("tags", Schema::vector_of(Schema::string())),
    );

    let input = json!([
        {"name": "a", "tags": ["x"]},
        {"name": 1, "tags": ["y", 2]}
    ]);

    assert_eq!(
        error_lines(&schema, input),
        "1.name: Expected string, got 1\n1.tags.1: Expected string, got 2"
    );
}

#[test]
fn test_record_end_to_end() {
    let schema = Schema::record()
        .field("name", Schema::string())
        .field("age", Schema::number());

    let result = validate(&schema, json!({"name": 5, "age": "x"}));
    let errors: Vec<_> = result
        .errors()
        .unwrap()
        .iter()
        .map(|e| (e.path.dotted(), e.message.clone()))
        .collect();

    assert_eq!(
        errors,
        vec![
            ("name".to_string(), "Expected string, got 5".to_string()),
            ("age".to_string(), "Expected number, got \"x\"".to_string()),
        ]
    );
    assert!(result.output().is_none());
}

#[test]
fn test_record_optional_key_is_written_as_nil() {
    let schema = Schema::record().field("k", Schema::nilable(Schema::string()));
    let result = validate(&schema, json!({}));

    assert_eq!(result.output(), Some(&Value::map([("k", Value::Nil)])));
}

#[test]
fn test_record_unknown_keys() {
    let input = json!({"id": 1, "debug": true});
    let base = || Schema::record().field("id", Schema::integer());

    assert_eq!(validate(&base(), input.clone()).output(), Some(&Value::from(input.clone())));
    assert_eq!(
        validate(&base().unknown_keys(UnknownKeys::Strip), input.clone()).output(),
        Some(&Value::from(json!({"id": 1})))
    );
    assert_eq!(
        error_lines(&base().unknown_keys(UnknownKeys::Deny), input),
        "debug: Unexpected key"
    );
}

#[test]
fn test_dict_reports_key_and_value_on_same_entry() {
    let schema = Schema::dict_of(Schema::keyword(), Schema::number());
    let input = Value::map([(Value::Int(1), Value::from("a"))]);

    let result = validate(&schema, input);
    let paths: Vec<_> = result
        .errors()
        .unwrap()
        .iter()
        .map(|e| e.path.dotted())
        .collect();
    assert_eq!(paths, vec!["1.0", "1.1"]);
}

#[test]
fn test_dict_keyword_keys() {
    let schema = Schema::dict_of(Schema::keyword(), Schema::vector_of(Schema::integer()));
    let input = Value::map([
        (Value::keyword("a"), Value::vector([1, 2])),
        (Value::keyword("b"), Value::vector([Value::Int(3), Value::from("4")])),
    ]);

    assert_eq!(error_lines(&schema, input), "b.1.1: Expected integer, got \"4\"");
}
