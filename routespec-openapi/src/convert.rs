use indexmap::IndexMap;
use routespec_core::schema::{
    ArraySchema, EnumValue, LiteralValue, NumberCheck, NumberSchema, ObjectSchema, SchemaNode,
    StringCheck, StringSchema,
};
use serde_json::Value;

use crate::schema::{AdditionalProperties, SchemaObject, SchemaType};

/// Convert a schema node into an OpenAPI schema object.
///
/// Total: a node kind with no OpenAPI counterpart yields `{}` and a warning.
/// Refinements and transforms are dropped; the output only describes shape.
pub fn convert_schema(node: &SchemaNode) -> SchemaObject {
    match node {
        SchemaNode::String(schema) => string_schema(schema),
        SchemaNode::Number(schema) => number_schema(schema),
        SchemaNode::BigInt => SchemaObject {
            format: Some("int64".into()),
            ..SchemaObject::of_type(SchemaType::Integer)
        },
        SchemaNode::Boolean => SchemaObject::of_type(SchemaType::Boolean),
        SchemaNode::Date => SchemaObject {
            format: Some("date-time".into()),
            ..SchemaObject::of_type(SchemaType::String)
        },
        SchemaNode::Array(schema) => array_schema(schema),
        SchemaNode::Object(schema) => object_schema(schema),
        SchemaNode::Union(variants) => SchemaObject {
            one_of: Some(variants.iter().map(convert_schema).collect()),
            ..SchemaObject::default()
        },
        SchemaNode::Intersection(left, right) => SchemaObject {
            all_of: Some(vec![convert_schema(left), convert_schema(right)]),
            ..SchemaObject::default()
        },
        SchemaNode::Enum(values) => SchemaObject {
            enum_values: Some(values.iter().cloned().map(Value::String).collect()),
            ..SchemaObject::of_type(SchemaType::String)
        },
        SchemaNode::NativeEnum(values) => native_enum_schema(values),
        SchemaNode::Literal(value) => literal_schema(value),
        SchemaNode::Optional(inner) | SchemaNode::Effects { inner, .. } => convert_schema(inner),
        SchemaNode::Nullable(inner) => SchemaObject {
            nullable: Some(true),
            ..convert_schema(inner)
        },
        SchemaNode::WithDefault { inner, default } => SchemaObject {
            default: Some(default.clone()),
            ..convert_schema(inner)
        },
        SchemaNode::Record(value) | SchemaNode::Map(value) => SchemaObject {
            additional_properties: Some(match value {
                Some(value) => AdditionalProperties::Schema(Box::new(convert_schema(value))),
                None => AdditionalProperties::Any(true),
            }),
            ..SchemaObject::of_type(SchemaType::Object)
        },
        SchemaNode::Set(value) => SchemaObject {
            items: Some(Box::new(convert_schema(value))),
            unique_items: Some(true),
            ..SchemaObject::of_type(SchemaType::Array)
        },
        // Positional typing is flattened into a union of the item types.
        SchemaNode::Tuple(items) => {
            let len = items.len() as u64;
            SchemaObject {
                items: Some(Box::new(SchemaObject {
                    one_of: Some(items.iter().map(convert_schema).collect()),
                    ..SchemaObject::default()
                })),
                min_items: Some(len),
                max_items: Some(len),
                ..SchemaObject::of_type(SchemaType::Array)
            }
        }
        SchemaNode::Any | SchemaNode::Unknown => SchemaObject::empty(),
        SchemaNode::Void | SchemaNode::Never => SchemaObject::nothing(),
        SchemaNode::Other { kind } => {
            tracing::warn!(kind = %kind, "Unsupported schema node; emitting an empty schema");
            SchemaObject::empty()
        }
    }
}

fn string_schema(schema: &StringSchema) -> SchemaObject {
    let mut out = SchemaObject::of_type(SchemaType::String);
    for check in &schema.checks {
        match check {
            StringCheck::MinLength(n) => out.min_length = Some(*n),
            StringCheck::MaxLength(n) => out.max_length = Some(*n),
            StringCheck::Email => out.format = Some("email".into()),
            StringCheck::Url => out.format = Some("uri".into()),
            StringCheck::Uuid => out.format = Some("uuid".into()),
            StringCheck::Format(format) => out.format = Some(format.clone()),
            StringCheck::Regex(pattern) => out.pattern = Some(pattern.clone()),
        }
    }
    out
}

fn number_schema(schema: &NumberSchema) -> SchemaObject {
    let mut out = SchemaObject::of_type(SchemaType::Number);
    for check in &schema.checks {
        match check {
            // A later bound replaces an earlier one, exclusivity included.
            NumberCheck::Min { value, inclusive } => {
                out.minimum = Some(value.clone());
                out.exclusive_minimum = (!inclusive).then_some(true);
            }
            NumberCheck::Max { value, inclusive } => {
                out.maximum = Some(value.clone());
                out.exclusive_maximum = (!inclusive).then_some(true);
            }
            NumberCheck::Int => out.schema_type = Some(SchemaType::Integer),
            NumberCheck::MultipleOf(value) => out.multiple_of = Some(value.clone()),
        }
    }
    out
}

fn array_schema(schema: &ArraySchema) -> SchemaObject {
    SchemaObject {
        items: Some(Box::new(convert_schema(&schema.element))),
        min_items: schema.min_items,
        max_items: schema.max_items,
        ..SchemaObject::of_type(SchemaType::Array)
    }
}

fn object_schema(schema: &ObjectSchema) -> SchemaObject {
    let mut properties = IndexMap::with_capacity(schema.len());
    let mut required = Vec::new();

    for (name, field) in schema.fields() {
        properties.insert(name.to_string(), convert_schema(field));
        if !field.is_optional() {
            required.push(name.to_string());
        }
    }

    SchemaObject {
        properties: Some(properties),
        required: (!required.is_empty()).then_some(required),
        ..SchemaObject::of_type(SchemaType::Object)
    }
}

fn native_enum_schema(values: &[EnumValue]) -> SchemaObject {
    let schema_type = if values.iter().all(EnumValue::is_string) {
        SchemaType::String
    } else {
        SchemaType::Number
    };
    SchemaObject {
        enum_values: Some(values.iter().map(EnumValue::to_json).collect()),
        ..SchemaObject::of_type(schema_type)
    }
}

fn literal_schema(value: &LiteralValue) -> SchemaObject {
    let schema_type = match value {
        LiteralValue::String(_) => SchemaType::String,
        LiteralValue::Number(_) => SchemaType::Number,
        LiteralValue::Boolean(_) => SchemaType::Boolean,
    };
    SchemaObject {
        enum_values: Some(vec![value.to_json()]),
        ..SchemaObject::of_type(schema_type)
    }
}
