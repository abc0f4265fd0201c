//! Fluent constructors for [`SchemaNode`] trees.
//!
//! ```
//! use routespec_core::schema::{self, SchemaExt};
//!
//! let user = schema::object()
//!     .field("id", schema::string().uuid())
//!     .field("name", schema::string().min_length(2))
//!     .field("age", schema::integer().min(0).optional());
//!
//! let node: routespec_core::SchemaNode = user.into();
//! assert_eq!(node.as_object().unwrap().required_fields(), ["id", "name"]);
//! ```

use serde_json::Value;

use super::{
    ArraySchema, EffectKind, EnumValue, LiteralValue, NumberSchema, ObjectSchema, SchemaNode,
    StringSchema,
};

pub fn string() -> StringSchema {
    StringSchema::new()
}

pub fn number() -> NumberSchema {
    NumberSchema::new()
}

/// Shorthand for `number().int()`.
pub fn integer() -> NumberSchema {
    NumberSchema::new().int()
}

pub fn bigint() -> SchemaNode {
    SchemaNode::BigInt
}

pub fn boolean() -> SchemaNode {
    SchemaNode::Boolean
}

pub fn date() -> SchemaNode {
    SchemaNode::Date
}

pub fn any() -> SchemaNode {
    SchemaNode::Any
}

pub fn unknown() -> SchemaNode {
    SchemaNode::Unknown
}

pub fn void() -> SchemaNode {
    SchemaNode::Void
}

pub fn never() -> SchemaNode {
    SchemaNode::Never
}

pub fn array(element: impl Into<SchemaNode>) -> ArraySchema {
    ArraySchema::new(element)
}

pub fn object() -> ObjectSchema {
    ObjectSchema::new()
}

pub fn union(variants: impl IntoIterator<Item = SchemaNode>) -> SchemaNode {
    SchemaNode::Union(variants.into_iter().collect())
}

pub fn intersection(left: impl Into<SchemaNode>, right: impl Into<SchemaNode>) -> SchemaNode {
    SchemaNode::Intersection(Box::new(left.into()), Box::new(right.into()))
}

/// A string enum; values keep their declared order.
pub fn enumeration<S: Into<String>>(values: impl IntoIterator<Item = S>) -> SchemaNode {
    SchemaNode::Enum(values.into_iter().map(Into::into).collect())
}

pub fn native_enum<V: Into<EnumValue>>(values: impl IntoIterator<Item = V>) -> SchemaNode {
    SchemaNode::NativeEnum(values.into_iter().map(Into::into).collect())
}

pub fn literal(value: impl Into<LiteralValue>) -> SchemaNode {
    SchemaNode::Literal(value.into())
}

pub fn record(value: impl Into<SchemaNode>) -> SchemaNode {
    SchemaNode::Record(Some(Box::new(value.into())))
}

/// A record with unconstrained values.
pub fn record_any() -> SchemaNode {
    SchemaNode::Record(None)
}

pub fn map(value: impl Into<SchemaNode>) -> SchemaNode {
    SchemaNode::Map(Some(Box::new(value.into())))
}

pub fn set(value: impl Into<SchemaNode>) -> SchemaNode {
    SchemaNode::Set(Box::new(value.into()))
}

pub fn tuple(items: impl IntoIterator<Item = SchemaNode>) -> SchemaNode {
    SchemaNode::Tuple(items.into_iter().collect())
}

/// Wrapper combinators available on anything that converts into a [`SchemaNode`].
pub trait SchemaExt: Into<SchemaNode> + Sized {
    fn optional(self) -> SchemaNode {
        SchemaNode::Optional(Box::new(self.into()))
    }

    fn nullable(self) -> SchemaNode {
        SchemaNode::Nullable(Box::new(self.into()))
    }

    /// Marks the value as defaulted to `default` when absent.
    fn with_default(self, default: impl Into<Value>) -> SchemaNode {
        SchemaNode::WithDefault {
            inner: Box::new(self.into()),
            default: default.into(),
        }
    }

    fn refine(self) -> SchemaNode {
        self.effect(EffectKind::Refinement)
    }

    fn transform(self) -> SchemaNode {
        self.effect(EffectKind::Transform)
    }

    fn effect(self, effect: EffectKind) -> SchemaNode {
        SchemaNode::Effects {
            inner: Box::new(self.into()),
            effect,
        }
    }

    fn array(self) -> ArraySchema {
        ArraySchema::new(self)
    }
}

impl<T: Into<SchemaNode>> SchemaExt for T {}
