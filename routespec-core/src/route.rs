use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ParseMethodError;
use crate::schema::SchemaNode;

/// The fixed set of HTTP methods a route may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// The uppercase method token, e.g. `"GET"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// The key used for this method inside an OpenAPI path item.
    pub fn as_lowercase(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }

    /// Methods that document a request body.
    pub fn accepts_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseMethodError(s.to_string()))
    }
}

/// One of the five named positions a schema can occupy in a [`SchemaBundle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Body,
    Query,
    Params,
    Headers,
    Response,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::Body,
        Slot::Query,
        Slot::Params,
        Slot::Headers,
        Slot::Response,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Body => "body",
            Slot::Query => "query",
            Slot::Params => "params",
            Slot::Headers => "headers",
            Slot::Response => "response",
        }
    }
}

/// Registry key for a schema slot: `path ⧺ "_" ⧺ slot`.
pub fn schema_key(path: &str, slot: Slot) -> String {
    format!("{path}_{}", slot.as_str())
}

/// The schemas attached to one method on one route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaBundle {
    pub body: Option<SchemaNode>,
    pub query: Option<SchemaNode>,
    pub params: Option<SchemaNode>,
    pub headers: Option<SchemaNode>,
    pub response: Option<SchemaNode>,
}

impl SchemaBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, schema: impl Into<SchemaNode>) -> Self {
        self.body = Some(schema.into());
        self
    }

    pub fn query(mut self, schema: impl Into<SchemaNode>) -> Self {
        self.query = Some(schema.into());
        self
    }

    pub fn params(mut self, schema: impl Into<SchemaNode>) -> Self {
        self.params = Some(schema.into());
        self
    }

    pub fn headers(mut self, schema: impl Into<SchemaNode>) -> Self {
        self.headers = Some(schema.into());
        self
    }

    pub fn response(mut self, schema: impl Into<SchemaNode>) -> Self {
        self.response = Some(schema.into());
        self
    }

    pub fn get(&self, slot: Slot) -> Option<&SchemaNode> {
        match slot {
            Slot::Body => self.body.as_ref(),
            Slot::Query => self.query.as_ref(),
            Slot::Params => self.params.as_ref(),
            Slot::Headers => self.headers.as_ref(),
            Slot::Response => self.response.as_ref(),
        }
    }

    /// Present slots in `body, query, params, headers, response` order.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, &SchemaNode)> {
        Slot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|node| (slot, node)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots().next().is_none()
    }
}

/// Opaque reference to whatever serves a route. Never invoked here.
#[derive(Clone)]
pub struct HandlerRef(Arc<dyn Any + Send + Sync>);

impl HandlerRef {
    pub fn new<H: Any + Send + Sync>(handler: H) -> Self {
        Self(Arc::new(handler))
    }

    pub fn downcast_ref<H: Any>(&self) -> Option<&H> {
        self.0.downcast_ref::<H>()
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HandlerRef(..)")
    }
}

impl PartialEq for HandlerRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Schema bundle plus handler for one HTTP method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodHandlerSpec {
    pub schema: SchemaBundle,
    pub handler: Option<HandlerRef>,
}

impl MethodHandlerSpec {
    pub fn new(schema: SchemaBundle) -> Self {
        Self {
            schema,
            handler: None,
        }
    }

    pub fn with_handler<H: Any + Send + Sync>(mut self, handler: H) -> Self {
        self.handler = Some(HandlerRef::new(handler));
        self
    }
}

impl From<SchemaBundle> for MethodHandlerSpec {
    fn from(schema: SchemaBundle) -> Self {
        MethodHandlerSpec::new(schema)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

impl ExternalDocs {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            description: None,
            url: url.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Security scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Everything registered under one path template.
///
/// The path itself (`/users/:id`) is opaque: it is stored and emitted as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteDefinition {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub operation_id: Option<String>,
    pub deprecated: bool,
    pub security: Option<Vec<SecurityRequirement>>,
    pub external_docs: Option<ExternalDocs>,
    pub methods: IndexMap<HttpMethod, MethodHandlerSpec>,
}

impl RouteDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn security(mut self, requirement: SecurityRequirement) -> Self {
        self.security.get_or_insert_with(Vec::new).push(requirement);
        self
    }

    pub fn external_docs(mut self, docs: ExternalDocs) -> Self {
        self.external_docs = Some(docs);
        self
    }

    /// Declare a method. Declaring the same method twice keeps the latest spec.
    pub fn method(mut self, method: HttpMethod, spec: impl Into<MethodHandlerSpec>) -> Self {
        self.methods.insert(method, spec.into());
        self
    }

    pub fn get(self, spec: impl Into<MethodHandlerSpec>) -> Self {
        self.method(HttpMethod::Get, spec)
    }

    pub fn post(self, spec: impl Into<MethodHandlerSpec>) -> Self {
        self.method(HttpMethod::Post, spec)
    }

    pub fn put(self, spec: impl Into<MethodHandlerSpec>) -> Self {
        self.method(HttpMethod::Put, spec)
    }

    pub fn patch(self, spec: impl Into<MethodHandlerSpec>) -> Self {
        self.method(HttpMethod::Patch, spec)
    }

    pub fn delete(self, spec: impl Into<MethodHandlerSpec>) -> Self {
        self.method(HttpMethod::Delete, spec)
    }

    pub fn head(self, spec: impl Into<MethodHandlerSpec>) -> Self {
        self.method(HttpMethod::Head, spec)
    }

    pub fn options(self, spec: impl Into<MethodHandlerSpec>) -> Self {
        self.method(HttpMethod::Options, spec)
    }

    pub fn first_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }
}
