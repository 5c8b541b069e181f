//! Tests for type-directed parameter binding
//!
//! # Test Coverage
//!
//! Validates the binder's contract through its public API:
//! - Lenient scalar coercion (leading-numeric parses, truthy strings)
//! - Declaration-order positional arguments
//! - Defaults and nullable parameters on absent keys
//! - Whole-payload object hydration, including nested objects and typed
//!   containers
//! - The failure taxonomy and its client-facing messages

use routecast::binder::{BindError, ParameterBinder};
use routecast::descriptor::{
    FieldDef, ObjectDef, ObjectKind, ScalarKind, TypeDescriptor, TypeRegistry,
};
use routecast::router::ParamSpec;
use serde_json::{json, Map, Value};

fn payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn bind_one(types: &TypeRegistry, spec: ParamSpec, data: Value) -> Result<Value, BindError> {
    let binder = ParameterBinder::new(types);
    binder
        .bind(&[spec], &payload(data))
        .map(|plan| plan.args.into_iter().next().unwrap_or(Value::Null))
}

#[test]
fn int_coercion_takes_the_leading_digits() {
    let types = TypeRegistry::new();
    let spec = ParamSpec::typed("count", TypeDescriptor::scalar(ScalarKind::Int));

    let bound = bind_one(&types, spec, json!({"count": "12abc"})).unwrap();
    assert_eq!(bound, json!(12));
}

#[test]
fn float_coercion_takes_the_leading_number() {
    let types = TypeRegistry::new();
    let spec = ParamSpec::typed("ratio", TypeDescriptor::scalar(ScalarKind::Float));

    let bound = bind_one(&types, spec, json!({"ratio": "3.5kg"})).unwrap();
    assert_eq!(bound, json!(3.5));
}

#[test]
fn bool_coercion_knows_the_truthy_words() {
    let types = TypeRegistry::new();

    for word in ["true", "1", "yes", "on"] {
        let spec = ParamSpec::typed("flag", TypeDescriptor::scalar(ScalarKind::Bool));
        let bound = bind_one(&types, spec, json!({ "flag": word })).unwrap();
        assert_eq!(bound, json!(true), "expected '{word}' to bind true");
    }

    for word in ["false", "0", "no", "off", ""] {
        let spec = ParamSpec::typed("flag", TypeDescriptor::scalar(ScalarKind::Bool));
        let bound = bind_one(&types, spec, json!({ "flag": word })).unwrap();
        assert_eq!(bound, json!(false), "expected '{word}' to bind false");
    }

    // Unrecognized non-empty strings fall back to generic truthiness.
    let spec = ParamSpec::typed("flag", TypeDescriptor::scalar(ScalarKind::Bool));
    let bound = bind_one(&types, spec, json!({"flag": "anything"})).unwrap();
    assert_eq!(bound, json!(true));
}

#[test]
fn string_coercion_follows_cast_rules() {
    let types = TypeRegistry::new();

    let spec = ParamSpec::typed("s", TypeDescriptor::scalar(ScalarKind::Str));
    assert_eq!(bind_one(&types, spec, json!({"s": true})).unwrap(), json!("1"));

    let spec = ParamSpec::typed("s", TypeDescriptor::scalar(ScalarKind::Str));
    assert_eq!(bind_one(&types, spec, json!({"s": false})).unwrap(), json!(""));

    let spec = ParamSpec::typed("s", TypeDescriptor::scalar(ScalarKind::Str));
    assert_eq!(bind_one(&types, spec, json!({"s": 7})).unwrap(), json!("7"));
}

#[test]
fn absent_key_uses_the_declared_default() {
    let types = TypeRegistry::new();
    let spec =
        ParamSpec::typed("limit", TypeDescriptor::scalar(ScalarKind::Int)).with_default(json!(50));

    assert_eq!(bind_one(&types, spec, json!({})).unwrap(), json!(50));
}

#[test]
fn absent_nullable_binds_null() {
    let types = TypeRegistry::new();
    let spec = ParamSpec::typed("note", TypeDescriptor::scalar(ScalarKind::Str).nullable());

    assert_eq!(bind_one(&types, spec, json!({})).unwrap(), Value::Null);
}

#[test]
fn absent_required_parameter_fails_by_name() {
    let types = TypeRegistry::new();
    let spec = ParamSpec::typed("count", TypeDescriptor::scalar(ScalarKind::Int));

    let err = bind_one(&types, spec, json!({})).unwrap_err();
    assert_eq!(
        err,
        BindError::MissingParameter {
            name: "count".to_string()
        }
    );
    assert_eq!(err.to_string(), "Missing required parameter: count");
}

#[test]
fn arguments_follow_declaration_order() {
    let types = TypeRegistry::new();
    let binder = ParameterBinder::new(&types);

    let plan = binder
        .bind(
            &[
                ParamSpec::typed("b", TypeDescriptor::scalar(ScalarKind::Int)),
                ParamSpec::typed("a", TypeDescriptor::scalar(ScalarKind::Int)),
            ],
            &payload(json!({"a": 1, "b": 2})),
        )
        .unwrap();

    assert_eq!(plan.args, vec![json!(2), json!(1)]);
}

fn registry_with_objects() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types.register_object(ObjectDef::new(
        "StringArray",
        ObjectKind::Container(ScalarKind::Str),
    ));
    types.register_object(ObjectDef::new(
        "IntArray",
        ObjectKind::Container(ScalarKind::Int),
    ));
    types.register_object(
        ObjectDef::new("Profile", ObjectKind::Property)
            .field(FieldDef::new("nick", TypeDescriptor::scalar(ScalarKind::Str)))
            .field(FieldDef::new(
                "tags",
                TypeDescriptor::object("StringArray").nullable(),
            )),
    );
    types.register_object(
        ObjectDef::new("SignupRequest", ObjectKind::Data)
            .field(FieldDef::new(
                "username",
                TypeDescriptor::scalar(ScalarKind::Str),
            ))
            .field(FieldDef::new(
                "age",
                TypeDescriptor::scalar(ScalarKind::Int).nullable(),
            ))
            .field(FieldDef::new(
                "profile",
                TypeDescriptor::object("Profile").nullable(),
            ))
            .field(FieldDef::new(
                "scores",
                TypeDescriptor::object("IntArray").nullable(),
            )),
    );
    types
}

#[test]
fn object_parameter_hydrates_from_the_whole_payload() {
    let types = registry_with_objects();
    let spec = ParamSpec::typed("request", TypeDescriptor::object("SignupRequest"));

    let bound = bind_one(
        &types,
        spec,
        json!({"username": "alice", "age": "30", "ignored": "x"}),
    )
    .unwrap();

    // Only declared fields survive; absent nullable fields are omitted.
    assert_eq!(bound, json!({"username": "alice", "age": 30}));
}

#[test]
fn nested_object_fields_recurse() {
    let types = registry_with_objects();
    let spec = ParamSpec::typed("request", TypeDescriptor::object("SignupRequest"));

    let bound = bind_one(
        &types,
        spec,
        json!({
            "username": "bob",
            "profile": {"nick": 42, "tags": ["a", 1]}
        }),
    )
    .unwrap();

    assert_eq!(
        bound,
        json!({
            "username": "bob",
            "profile": {"nick": "42", "tags": ["a", "1"]}
        })
    );
}

#[test]
fn container_fields_coerce_their_elements() {
    let types = registry_with_objects();
    let spec = ParamSpec::typed("request", TypeDescriptor::object("SignupRequest"));

    let bound = bind_one(
        &types,
        spec,
        json!({"username": "carol", "scores": ["7", "8abc"]}),
    )
    .unwrap();

    assert_eq!(bound["scores"], json!([7, 8]));
}

#[test]
fn explicit_null_on_nullable_field_is_kept() {
    let types = registry_with_objects();
    let spec = ParamSpec::typed("request", TypeDescriptor::object("SignupRequest"));

    let bound = bind_one(&types, spec, json!({"username": "dan", "age": null})).unwrap();
    assert_eq!(bound, json!({"username": "dan", "age": null}));
}

#[test]
fn missing_required_property_names_field_and_parameter() {
    let types = registry_with_objects();
    let spec = ParamSpec::typed("request", TypeDescriptor::object("SignupRequest"));

    let err = bind_one(&types, spec, json!({"age": 1})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required property 'username' for parameter request"
    );
}

#[test]
fn unregistered_type_fails_with_both_names() {
    let types = TypeRegistry::new();
    let spec = ParamSpec::typed("request", TypeDescriptor::object("Ghost"));

    let err = bind_one(&types, spec, json!({})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Type 'Ghost' is not registered for parameter request"
    );
}

#[test]
fn untyped_parameter_binds_the_raw_value() {
    let types = TypeRegistry::new();
    let spec = ParamSpec::untyped("raw");

    let bound = bind_one(&types, spec, json!({"raw": {"anything": [1, 2]}})).unwrap();
    assert_eq!(bound, json!({"anything": [1, 2]}));
}
