//! Boundary adapter from JSON Schema documents to [`SchemaNode`].
//!
//! Accepts draft 2020-12 as emitted by `schemars` 1.x (`$defs`, numeric
//! `exclusiveMinimum`, `type: [T, "null"]`) and the older `definitions` form.

use serde_json::{Map, Number, Value};

use super::{
    ArraySchema, EnumValue, LiteralValue, NumberCheck, NumberSchema, ObjectSchema, SchemaNode,
    StringCheck, StringSchema,
};

impl SchemaNode {
    /// Translate a JSON Schema value into a schema node.
    ///
    /// Refs are resolved against the root's `$defs` (or `definitions`).
    /// A ref that cannot be resolved, or that points back into itself,
    /// becomes [`SchemaNode::Other`].
    pub fn from_json_schema(schema: &Value) -> SchemaNode {
        let defs = schema
            .get("$defs")
            .or_else(|| schema.get("definitions"))
            .and_then(Value::as_object);
        let mut reader = Reader {
            defs,
            resolving: Vec::new(),
        };
        reader.read(schema)
    }

    /// Build the node for a type deriving [`schemars::JsonSchema`].
    #[cfg(feature = "schemars")]
    pub fn of<T: schemars::JsonSchema>() -> SchemaNode {
        let schema = schemars::schema_for!(T);
        SchemaNode::from_json_schema(schema.as_value())
    }
}

struct Reader<'a> {
    defs: Option<&'a Map<String, Value>>,
    resolving: Vec<String>,
}

impl<'a> Reader<'a> {
    fn read(&mut self, schema: &Value) -> SchemaNode {
        let obj = match schema {
            Value::Bool(true) => return SchemaNode::Any,
            Value::Bool(false) => return SchemaNode::Never,
            Value::Object(obj) => obj,
            other => {
                return SchemaNode::Other {
                    kind: format!("json-schema:{}", json_kind(other)),
                }
            }
        };

        let node = self.read_shape(obj);
        match obj.get("default") {
            Some(default) => SchemaNode::WithDefault {
                inner: Box::new(node),
                default: default.clone(),
            },
            None => node,
        }
    }

    fn read_shape(&mut self, obj: &Map<String, Value>) -> SchemaNode {
        if let Some(Value::String(reference)) = obj.get("$ref") {
            return self.read_ref(reference);
        }
        if let Some(value) = obj.get("const") {
            return literal_node(value);
        }
        if let Some(Value::Array(values)) = obj.get("enum") {
            return enum_node(values);
        }
        if let Some(Value::Array(members)) = obj.get("anyOf").or_else(|| obj.get("oneOf")) {
            return self.read_union(members);
        }
        if let Some(Value::Array(parts)) = obj.get("allOf") {
            return self.read_all_of(parts);
        }

        match obj.get("type") {
            Some(Value::String(ty)) => self.read_typed(ty, obj),
            Some(Value::Array(types)) => {
                let named: Vec<&str> = types
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|ty| *ty != "null")
                    .collect();
                let nullable = named.len() < types.len();
                let node = match named.as_slice() {
                    [] => SchemaNode::Other {
                        kind: "json-schema:null".into(),
                    },
                    [single] => self.read_typed(single, obj),
                    many => SchemaNode::Union(
                        many.iter().map(|ty| self.read_typed(ty, obj)).collect(),
                    ),
                };
                wrap_nullable(node, nullable)
            }
            _ if obj.contains_key("properties") => self.read_typed("object", obj),
            _ => SchemaNode::Any,
        }
    }

    fn read_typed(&mut self, ty: &str, obj: &Map<String, Value>) -> SchemaNode {
        match ty {
            "string" => read_string(obj),
            "number" | "integer" => read_number(ty, obj),
            "boolean" => SchemaNode::Boolean,
            "array" => self.read_array(obj),
            "object" => self.read_object(obj),
            other => SchemaNode::Other {
                kind: format!("json-schema:{other}"),
            },
        }
    }

    fn read_array(&mut self, obj: &Map<String, Value>) -> SchemaNode {
        if let Some(Value::Array(prefix)) = obj.get("prefixItems") {
            return SchemaNode::Tuple(prefix.iter().map(|item| self.read(item)).collect());
        }

        let element = obj
            .get("items")
            .map(|items| self.read(items))
            .unwrap_or(SchemaNode::Any);

        if obj.get("uniqueItems").and_then(Value::as_bool) == Some(true) {
            return SchemaNode::Set(Box::new(element));
        }

        SchemaNode::Array(ArraySchema {
            element: Box::new(element),
            min_items: obj.get("minItems").and_then(Value::as_u64),
            max_items: obj.get("maxItems").and_then(Value::as_u64),
        })
    }

    fn read_object(&mut self, obj: &Map<String, Value>) -> SchemaNode {
        if let Some(Value::Object(properties)) = obj.get("properties") {
            let required: Vec<&str> = obj
                .get("required")
                .and_then(Value::as_array)
                .map(|names| names.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            let mut object = ObjectSchema::new();
            for (name, property) in properties {
                let node = self.read(property);
                let node = if required.contains(&name.as_str()) || node.is_optional() {
                    node
                } else {
                    SchemaNode::Optional(Box::new(node))
                };
                object.fields.push((name.clone(), node));
            }
            return SchemaNode::Object(object);
        }

        match obj.get("additionalProperties") {
            Some(value @ Value::Object(_)) => SchemaNode::Record(Some(Box::new(self.read(value)))),
            _ => SchemaNode::Record(None),
        }
    }

    fn read_union(&mut self, members: &[Value]) -> SchemaNode {
        let (nulls, rest): (Vec<&Value>, Vec<&Value>) =
            members.iter().partition(|member| is_null_schema(member));
        let mut variants: Vec<SchemaNode> = rest.into_iter().map(|m| self.read(m)).collect();
        let node = if variants.len() == 1 {
            variants.remove(0)
        } else {
            SchemaNode::Union(variants)
        };
        wrap_nullable(node, !nulls.is_empty())
    }

    fn read_all_of(&mut self, parts: &[Value]) -> SchemaNode {
        let mut nodes = parts.iter().map(|part| self.read(part));
        let Some(first) = nodes.next() else {
            return SchemaNode::Any;
        };
        nodes.fold(first, |left, right| {
            SchemaNode::Intersection(Box::new(left), Box::new(right))
        })
    }

    fn read_ref(&mut self, reference: &str) -> SchemaNode {
        let name = reference
            .strip_prefix("#/$defs/")
            .or_else(|| reference.strip_prefix("#/definitions/"));
        let (Some(name), Some(defs)) = (name, self.defs) else {
            return SchemaNode::Other {
                kind: format!("$ref:{reference}"),
            };
        };
        if self.resolving.iter().any(|n| n == name) {
            return SchemaNode::Other {
                kind: format!("$ref:{reference}"),
            };
        }
        let Some(target) = defs.get(name) else {
            return SchemaNode::Other {
                kind: format!("$ref:{reference}"),
            };
        };

        self.resolving.push(name.to_string());
        let node = self.read(target);
        self.resolving.pop();
        node
    }
}

fn read_string(obj: &Map<String, Value>) -> SchemaNode {
    let format = obj.get("format").and_then(Value::as_str);
    if format == Some("date-time") {
        return SchemaNode::Date;
    }

    let mut schema = StringSchema::new();
    if let Some(n) = obj.get("minLength").and_then(Value::as_u64) {
        schema = schema.min_length(n);
    }
    if let Some(n) = obj.get("maxLength").and_then(Value::as_u64) {
        schema = schema.max_length(n);
    }
    if let Some(format) = format {
        schema = schema.check(match format {
            "email" => StringCheck::Email,
            "uri" | "url" => StringCheck::Url,
            "uuid" => StringCheck::Uuid,
            other => StringCheck::Format(other.to_string()),
        });
    }
    if let Some(pattern) = obj.get("pattern").and_then(Value::as_str) {
        schema = schema.regex(pattern);
    }
    SchemaNode::String(schema)
}

fn read_number(ty: &str, obj: &Map<String, Value>) -> SchemaNode {
    let mut schema = NumberSchema::new();
    if ty == "integer" {
        schema = schema.int();
    }

    if let Some(value) = number_at(obj, "minimum") {
        schema = schema.min(value);
    }
    match obj.get("exclusiveMinimum") {
        Some(Value::Number(n)) => schema = schema.gt(n.clone()),
        // draft-04 boolean form flips the preceding `minimum`
        Some(Value::Bool(true)) => flip_last_bound(&mut schema, true),
        _ => {}
    }

    if let Some(value) = number_at(obj, "maximum") {
        schema = schema.max(value);
    }
    match obj.get("exclusiveMaximum") {
        Some(Value::Number(n)) => schema = schema.lt(n.clone()),
        Some(Value::Bool(true)) => flip_last_bound(&mut schema, false),
        _ => {}
    }

    if let Some(value) = number_at(obj, "multipleOf") {
        schema = schema.multiple_of(value);
    }
    SchemaNode::Number(schema)
}

fn number_at(obj: &Map<String, Value>, key: &str) -> Option<Number> {
    match obj.get(key) {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

fn flip_last_bound(schema: &mut NumberSchema, lower: bool) {
    for check in schema.checks.iter_mut().rev() {
        match check {
            NumberCheck::Min { inclusive, .. } if lower => {
                *inclusive = false;
                return;
            }
            NumberCheck::Max { inclusive, .. } if !lower => {
                *inclusive = false;
                return;
            }
            _ => {}
        }
    }
}

fn literal_node(value: &Value) -> SchemaNode {
    match value {
        Value::String(s) => SchemaNode::Literal(LiteralValue::String(s.clone())),
        Value::Number(n) => SchemaNode::Literal(LiteralValue::Number(n.clone())),
        Value::Bool(b) => SchemaNode::Literal(LiteralValue::Boolean(*b)),
        other => SchemaNode::Other {
            kind: format!("json-schema:const-{}", json_kind(other)),
        },
    }
}

fn enum_node(values: &[Value]) -> SchemaNode {
    let nullable = values.iter().any(Value::is_null);
    let members: Vec<&Value> = values.iter().filter(|v| !v.is_null()).collect();

    let node = if members.iter().all(|v| v.is_string()) {
        SchemaNode::Enum(
            members
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        )
    } else if members.iter().all(|v| v.is_string() || v.is_number()) {
        SchemaNode::NativeEnum(
            members
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(EnumValue::String(s.clone())),
                    Value::Number(n) => Some(EnumValue::Number(n.clone())),
                    _ => None,
                })
                .collect(),
        )
    } else {
        SchemaNode::Union(members.into_iter().map(literal_node).collect())
    };
    wrap_nullable(node, nullable)
}

fn is_null_schema(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("null")
}

fn wrap_nullable(node: SchemaNode, nullable: bool) -> SchemaNode {
    if nullable {
        SchemaNode::Nullable(Box::new(node))
    } else {
        node
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
