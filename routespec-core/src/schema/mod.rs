mod build;
mod json_schema;

pub use build::{
    any, array, bigint, boolean, date, enumeration, integer, intersection, literal, map,
    native_enum, never, number, object, record, record_any, set, string, tuple, union, unknown,
    void, SchemaExt,
};

use serde_json::{Number, Value};

/// One node of a validation-schema tree.
///
/// Schemas are finite trees: every wrapper variant owns exactly one inner
/// node, so unwrapping always terminates.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    String(StringSchema),
    Number(NumberSchema),
    BigInt,
    Boolean,
    Date,
    Any,
    Unknown,
    Void,
    Never,
    Array(ArraySchema),
    Object(ObjectSchema),
    Union(Vec<SchemaNode>),
    Intersection(Box<SchemaNode>, Box<SchemaNode>),
    Enum(Vec<String>),
    NativeEnum(Vec<EnumValue>),
    Literal(LiteralValue),
    Optional(Box<SchemaNode>),
    Nullable(Box<SchemaNode>),
    WithDefault {
        inner: Box<SchemaNode>,
        default: Value,
    },
    Record(Option<Box<SchemaNode>>),
    Map(Option<Box<SchemaNode>>),
    Set(Box<SchemaNode>),
    Tuple(Vec<SchemaNode>),
    /// A refinement or transform around `inner`. The predicate itself is not
    /// kept; only the wrapped shape is described.
    Effects {
        inner: Box<SchemaNode>,
        effect: EffectKind,
    },
    /// A node kind a boundary adapter could not map onto this union.
    Other { kind: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Refinement,
    Transform,
    Preprocess,
}

impl SchemaNode {
    /// Short name of the node kind, used in diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            SchemaNode::String(_) => "string",
            SchemaNode::Number(_) => "number",
            SchemaNode::BigInt => "bigint",
            SchemaNode::Boolean => "boolean",
            SchemaNode::Date => "date",
            SchemaNode::Any => "any",
            SchemaNode::Unknown => "unknown",
            SchemaNode::Void => "void",
            SchemaNode::Never => "never",
            SchemaNode::Array(_) => "array",
            SchemaNode::Object(_) => "object",
            SchemaNode::Union(_) => "union",
            SchemaNode::Intersection(..) => "intersection",
            SchemaNode::Enum(_) => "enum",
            SchemaNode::NativeEnum(_) => "native_enum",
            SchemaNode::Literal(_) => "literal",
            SchemaNode::Optional(_) => "optional",
            SchemaNode::Nullable(_) => "nullable",
            SchemaNode::WithDefault { .. } => "default",
            SchemaNode::Record(_) => "record",
            SchemaNode::Map(_) => "map",
            SchemaNode::Set(_) => "set",
            SchemaNode::Tuple(_) => "tuple",
            SchemaNode::Effects { .. } => "effects",
            SchemaNode::Other { kind } => kind,
        }
    }

    /// Whether an object field of this type may be omitted.
    ///
    /// `Optional` and `WithDefault` are not required. `Nullable` delegates to
    /// the wrapped type: nullable-but-present is still required.
    pub fn is_optional(&self) -> bool {
        match self {
            SchemaNode::Optional(_) | SchemaNode::WithDefault { .. } => true,
            SchemaNode::Nullable(inner) => inner.is_optional(),
            _ => false,
        }
    }

    /// The wrapped node of `Optional`, `Nullable`, `WithDefault`, and `Effects`.
    pub fn inner(&self) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Optional(inner)
            | SchemaNode::Nullable(inner)
            | SchemaNode::WithDefault { inner, .. }
            | SchemaNode::Effects { inner, .. } => Some(inner),
            _ => None,
        }
    }

    /// Strip every `Effects` layer. Idempotent.
    pub fn unwrap_effects(&self) -> &SchemaNode {
        let mut node = self;
        while let SchemaNode::Effects { inner, .. } = node {
            node = inner;
        }
        node
    }

    /// The object shape of this node, looking through refinements.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self.unwrap_effects() {
            SchemaNode::Object(object) => Some(object),
            _ => None,
        }
    }
}

// ── Strings ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum StringCheck {
    MinLength(u64),
    MaxLength(u64),
    Email,
    Url,
    Uuid,
    Regex(String),
    /// Any other named format, emitted verbatim.
    Format(String),
}

/// A string with its constraint checks, applied left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringSchema {
    pub checks: Vec<StringCheck>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(mut self, check: StringCheck) -> Self {
        self.checks.push(check);
        self
    }

    pub fn min_length(self, len: u64) -> Self {
        self.check(StringCheck::MinLength(len))
    }

    pub fn max_length(self, len: u64) -> Self {
        self.check(StringCheck::MaxLength(len))
    }

    pub fn email(self) -> Self {
        self.check(StringCheck::Email)
    }

    pub fn url(self) -> Self {
        self.check(StringCheck::Url)
    }

    pub fn uuid(self) -> Self {
        self.check(StringCheck::Uuid)
    }

    pub fn regex(self, pattern: impl Into<String>) -> Self {
        self.check(StringCheck::Regex(pattern.into()))
    }

    pub fn format(self, format: impl Into<String>) -> Self {
        self.check(StringCheck::Format(format.into()))
    }
}

// ── Numbers ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum NumberCheck {
    Min { value: Number, inclusive: bool },
    Max { value: Number, inclusive: bool },
    Int,
    MultipleOf(Number),
}

/// A numeric constraint value.
///
/// Integral floats are stored as integers, so `min(0.0)` and `min(0)` both
/// emit `0`. Non-finite floats have no JSON form.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound(Option<Number>);

impl Bound {
    pub fn into_number(self) -> Option<Number> {
        self.0
    }
}

impl From<f64> for Bound {
    fn from(value: f64) -> Self {
        // 2^53: beyond this not every integer is representable as f64
        const EXACT: f64 = 9_007_199_254_740_992.0;
        if value.fract() == 0.0 && value.abs() <= EXACT {
            Bound(Some(Number::from(value as i64)))
        } else {
            Bound(Number::from_f64(value))
        }
    }
}

impl From<Number> for Bound {
    fn from(value: Number) -> Self {
        Bound(Some(value))
    }
}

macro_rules! bound_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Bound {
            fn from(value: $ty) -> Self {
                Bound(Some(Number::from(value)))
            }
        })*
    };
}

bound_from_int!(i32, i64, u32, u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberSchema {
    pub checks: Vec<NumberCheck>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(mut self, check: NumberCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// Inclusive lower bound (`>= value`).
    pub fn min(self, value: impl Into<Bound>) -> Self {
        self.bound(value.into(), |value| NumberCheck::Min { value, inclusive: true })
    }

    /// Exclusive lower bound (`> value`).
    pub fn gt(self, value: impl Into<Bound>) -> Self {
        self.bound(value.into(), |value| NumberCheck::Min { value, inclusive: false })
    }

    /// Inclusive upper bound (`<= value`).
    pub fn max(self, value: impl Into<Bound>) -> Self {
        self.bound(value.into(), |value| NumberCheck::Max { value, inclusive: true })
    }

    /// Exclusive upper bound (`< value`).
    pub fn lt(self, value: impl Into<Bound>) -> Self {
        self.bound(value.into(), |value| NumberCheck::Max { value, inclusive: false })
    }

    pub fn positive(self) -> Self {
        self.gt(0)
    }

    pub fn int(self) -> Self {
        self.check(NumberCheck::Int)
    }

    pub fn multiple_of(self, value: impl Into<Bound>) -> Self {
        self.bound(value.into(), NumberCheck::MultipleOf)
    }

    pub fn is_integer(&self) -> bool {
        self.checks.iter().any(|c| matches!(c, NumberCheck::Int))
    }

    fn bound(self, value: Bound, check: impl FnOnce(Number) -> NumberCheck) -> Self {
        match value.into_number() {
            Some(value) => self.check(check(value)),
            None => {
                tracing::warn!("Ignoring non-finite numeric bound");
                self
            }
        }
    }
}

// ── Arrays and objects ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub element: Box<SchemaNode>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}

impl ArraySchema {
    pub fn new(element: impl Into<SchemaNode>) -> Self {
        Self {
            element: Box::new(element.into()),
            min_items: None,
            max_items: None,
        }
    }

    pub fn min_items(mut self, n: u64) -> Self {
        self.min_items = Some(n);
        self
    }

    pub fn max_items(mut self, n: u64) -> Self {
        self.max_items = Some(n);
        self
    }

    /// Fix the length: `min_items == max_items == n`.
    pub fn length(self, n: u64) -> Self {
        self.min_items(n).max_items(n)
    }

    pub fn nonempty(self) -> Self {
        self.min_items(1)
    }
}

/// An object shape. Field order is declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub fields: Vec<(String, SchemaNode)>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Redeclaring a name replaces its type in place.
    pub fn field(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        let name = name.into();
        let node = node.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = node,
            None => self.fields.push((name, node)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, node)| node)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(n, node)| (n.as_str(), node))
    }

    /// Names of the fields that must be present.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields()
            .filter(|(_, node)| !node.is_optional())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ── Enum members and literals ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum EnumValue {
    String(String),
    Number(Number),
}

impl EnumValue {
    pub fn is_string(&self) -> bool {
        matches!(self, EnumValue::String(_))
    }

    pub fn to_json(&self) -> Value {
        match self {
            EnumValue::String(s) => Value::String(s.clone()),
            EnumValue::Number(n) => Value::Number(n.clone()),
        }
    }
}

impl From<&str> for EnumValue {
    fn from(value: &str) -> Self {
        EnumValue::String(value.to_string())
    }
}

impl From<String> for EnumValue {
    fn from(value: String) -> Self {
        EnumValue::String(value)
    }
}

impl From<i64> for EnumValue {
    fn from(value: i64) -> Self {
        EnumValue::Number(value.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(Number),
    Boolean(bool),
}

impl LiteralValue {
    pub fn to_json(&self) -> Value {
        match self {
            LiteralValue::String(s) => Value::String(s.clone()),
            LiteralValue::Number(n) => Value::Number(n.clone()),
            LiteralValue::Boolean(b) => Value::Bool(*b),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        LiteralValue::String(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        LiteralValue::Number(value.into())
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Boolean(value)
    }
}

// ── Conversions into SchemaNode ─────────────────────────────────────────────

impl From<StringSchema> for SchemaNode {
    fn from(schema: StringSchema) -> Self {
        SchemaNode::String(schema)
    }
}

impl From<NumberSchema> for SchemaNode {
    fn from(schema: NumberSchema) -> Self {
        SchemaNode::Number(schema)
    }
}

impl From<ArraySchema> for SchemaNode {
    fn from(schema: ArraySchema) -> Self {
        SchemaNode::Array(schema)
    }
}

impl From<ObjectSchema> for SchemaNode {
    fn from(schema: ObjectSchema) -> Self {
        SchemaNode::Object(schema)
    }
}
