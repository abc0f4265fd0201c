use routespec_core::schema::{
    self, EffectKind, LiteralValue, NumberCheck, SchemaExt, SchemaNode, StringCheck,
};
use serde_json::json;

// ── Optionality ─────────────────────────────────────────────────────────────

#[test]
fn optional_and_default_are_not_required() {
    assert!(schema::string().optional().is_optional());
    assert!(schema::number().with_default(10).is_optional());
}

#[test]
fn nullable_delegates_to_inner() {
    assert!(!schema::string().nullable().is_optional());
    assert!(schema::string().optional().nullable().is_optional());
}

#[test]
fn effects_do_not_make_a_field_optional() {
    assert!(!schema::string().refine().is_optional());
}

#[test]
fn required_fields_follow_declaration_order() {
    let user = schema::object()
        .field("id", schema::string().uuid())
        .field("nickname", schema::string().optional())
        .field("email", schema::string().email())
        .field("bio", schema::string().nullable())
        .field("role", schema::enumeration(["admin", "user"]).with_default("user"));

    assert_eq!(user.required_fields(), ["id", "email", "bio"]);
    assert_eq!(user.len(), 5);
}

#[test]
fn redeclared_field_replaces_in_place() {
    let obj = schema::object()
        .field("a", schema::string())
        .field("b", schema::boolean())
        .field("a", schema::number());

    let names: Vec<&str> = obj.fields().map(|(n, _)| n).collect();
    assert_eq!(names, ["a", "b"]);
    assert!(matches!(obj.get("a"), Some(SchemaNode::Number(_))));
}

// ── Builders ────────────────────────────────────────────────────────────────

#[test]
fn string_checks_accumulate_in_order() {
    let s = schema::string().min_length(2).max_length(50).email().min_length(3);
    assert_eq!(
        s.checks,
        vec![
            StringCheck::MinLength(2),
            StringCheck::MaxLength(50),
            StringCheck::Email,
            StringCheck::MinLength(3),
        ]
    );
}

#[test]
fn number_bounds_record_inclusivity() {
    let n = schema::number().gt(0.0).max(100.0).int();
    assert_eq!(
        n.checks,
        vec![
            NumberCheck::Min { value: 0.into(), inclusive: false },
            NumberCheck::Max { value: 100.into(), inclusive: true },
            NumberCheck::Int,
        ]
    );
    assert!(n.is_integer());
    assert!(!schema::number().is_integer());
}

#[test]
fn integral_float_bounds_are_stored_as_integers() {
    let from_float = schema::number().min(1.0).max(10.0);
    let from_int = schema::number().min(1).max(10u32);
    assert_eq!(from_float, from_int);
    assert!(from_float.checks.iter().all(|check| match check {
        NumberCheck::Min { value, .. } | NumberCheck::Max { value, .. } => value.is_i64(),
        _ => false,
    }));
}

#[test]
fn fractional_bounds_keep_float_form() {
    let n = schema::number().multiple_of(0.5);
    let NumberCheck::MultipleOf(step) = &n.checks[0] else {
        panic!("expected multipleOf");
    };
    assert!(step.is_f64());
    assert_eq!(step.as_f64(), Some(0.5));
}

#[test]
fn non_finite_bounds_are_dropped() {
    let n = schema::number().min(f64::NAN).max(f64::INFINITY).int();
    assert_eq!(n.checks, vec![NumberCheck::Int]);
}

#[test]
fn array_length_sets_both_bounds() {
    let a = schema::array(schema::string()).length(3);
    assert_eq!(a.min_items, Some(3));
    assert_eq!(a.max_items, Some(3));
}

#[test]
fn with_default_keeps_json_value() {
    let node = schema::boolean().with_default(false);
    match node {
        SchemaNode::WithDefault { default, .. } => assert_eq!(default, json!(false)),
        other => panic!("unexpected node: {other:?}"),
    }
}

#[test]
fn literal_from_primitives() {
    assert_eq!(
        schema::literal("admin"),
        SchemaNode::Literal(LiteralValue::String("admin".into()))
    );
    assert_eq!(schema::literal(true), SchemaNode::Literal(LiteralValue::Boolean(true)));
}

// ── Introspection ───────────────────────────────────────────────────────────

#[test]
fn unwrap_effects_is_idempotent() {
    let node = schema::string().refine().transform();
    let once = node.unwrap_effects();
    assert!(matches!(once, SchemaNode::String(_)));
    assert_eq!(once.unwrap_effects(), once);
}

#[test]
fn inner_of_wrappers() {
    let node = schema::string().effect(EffectKind::Preprocess);
    assert!(matches!(node.inner(), Some(SchemaNode::String(_))));
    assert!(schema::boolean().inner().is_none());
}

#[test]
fn as_object_looks_through_effects() {
    let node = schema::object().field("a", schema::string()).refine();
    assert_eq!(node.as_object().map(|o| o.len()), Some(1));
    assert!(schema::string().optional().as_object().is_none());
}

#[test]
fn kind_names() {
    assert_eq!(SchemaNode::from(schema::string()).kind(), "string");
    assert_eq!(schema::tuple([schema::boolean()]).kind(), "tuple");
    assert_eq!(SchemaNode::Other { kind: "ZodLazy".into() }.kind(), "ZodLazy");
}
