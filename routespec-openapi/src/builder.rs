use std::collections::hash_map::Entry;
use std::collections::HashMap;

use indexmap::IndexMap;
use routespec_core::{
    ApiConfig, HttpMethod, MethodHandlerSpec, Registry, RouteDefinition, SchemaNode,
    SecurityRequirement, Slot,
};

use crate::convert::convert_schema;
use crate::document::{
    Components, Document, Info, MediaType, Operation, Parameter, ParameterLocation, PathItem,
    RequestBody, Response, Server, Tag,
};
use crate::ordering::{sort_methods, sort_routes, sort_tags};
use crate::render::{to_json, to_yaml, RenderError};
use crate::schema::SchemaObject;

pub const OPENAPI_VERSION: &str = "3.1.0";

const APPLICATION_JSON: &str = "application/json";

/// Document-level inputs for a generation call.
#[derive(Debug, Clone)]
pub struct SpecOptions {
    pub info: Info,
    pub servers: Option<Vec<Server>>,
    pub tags: Option<Vec<Tag>>,
    pub security: Option<Vec<SecurityRequirement>>,
}

impl SpecOptions {
    pub fn new(info: Info) -> Self {
        Self {
            info,
            servers: None,
            tags: None,
            security: None,
        }
    }

    pub fn with_servers(mut self, servers: Vec<Server>) -> Self {
        self.servers = Some(servers);
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_security(mut self, security: Vec<SecurityRequirement>) -> Self {
        self.security = Some(security);
        self
    }
}

/// Builds documents from a borrowed registry, using the config cached on it.
pub struct OpenApiGenerator<'a> {
    registry: &'a Registry,
}

impl<'a> OpenApiGenerator<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn generate_spec(&self, options: &SpecOptions) -> Document {
        build_spec(self.registry, options)
    }

    /// Pretty-printed JSON.
    pub fn generate_json(&self, options: &SpecOptions) -> Result<String, RenderError> {
        to_json(&self.generate_spec(options))
    }

    pub fn generate_yaml(&self, options: &SpecOptions) -> Result<String, RenderError> {
        to_yaml(&self.generate_spec(options))
    }
}

/// Build an OpenAPI 3.1.0 document from the registry's routes and schemas.
pub fn build_spec(registry: &Registry, options: &SpecOptions) -> Document {
    let config = registry.config();

    let tags = options.tags.as_ref().map(|tags| match config {
        Some(config) => sort_tags(tags, config),
        None => tags.clone(),
    });

    let mut paths: IndexMap<String, PathItem> = IndexMap::new();
    for (path, definition) in sort_routes(registry.routes().collect(), config) {
        paths.insert(path.to_string(), build_path_item(definition, config));
    }

    // One component per `path_slot` key; identical schemas under different
    // paths stay separate entries.
    let components = (registry.schema_count() > 0).then(|| Components {
        schemas: Some(
            registry
                .schemas()
                .map(|(key, node)| (key.to_string(), convert_schema(node)))
                .collect(),
        ),
    });

    if let Some(config) = config {
        report_diagnostics(registry, config);
    }

    tracing::debug!(
        paths = paths.len(),
        schemas = registry.schema_count(),
        "Generated OpenAPI document"
    );

    Document {
        openapi: OPENAPI_VERSION.to_string(),
        info: options.info.clone(),
        servers: options.servers.clone(),
        paths,
        components,
        tags,
        security: options.security.clone(),
    }
}

fn build_path_item(definition: &RouteDefinition, config: Option<&ApiConfig>) -> PathItem {
    let mut item = PathItem::new();
    for method in sort_methods(definition.methods.keys().copied(), config) {
        if let Some(spec) = definition.methods.get(&method) {
            item.insert(
                method.as_lowercase().to_string(),
                build_operation(method, spec, definition),
            );
        }
    }
    item
}

fn build_operation(
    method: HttpMethod,
    spec: &MethodHandlerSpec,
    route: &RouteDefinition,
) -> Operation {
    let schema = &spec.schema;

    let mut parameters = Vec::new();
    for (slot, location) in [
        (Slot::Params, ParameterLocation::Path),
        (Slot::Query, ParameterLocation::Query),
        (Slot::Headers, ParameterLocation::Header),
    ] {
        if let Some(node) = schema.get(slot) {
            push_parameters(&mut parameters, node, location);
        }
    }

    let request_body = schema
        .body
        .as_ref()
        .filter(|_| method.accepts_body())
        .map(|body| RequestBody {
            required: true,
            content: json_content(convert_schema(body)),
        });

    Operation {
        summary: route.summary.clone(),
        description: route.description.clone(),
        tags: (!route.tags.is_empty()).then(|| route.tags.clone()),
        operation_id: route.operation_id.clone(),
        deprecated: route.deprecated.then_some(true),
        security: route.security.clone(),
        external_docs: route.external_docs.clone(),
        parameters: (!parameters.is_empty()).then_some(parameters),
        request_body,
        responses: build_responses(schema.response.as_ref()),
    }
}

/// One parameter per top-level field of an object-shaped schema.
fn push_parameters(out: &mut Vec<Parameter>, node: &SchemaNode, location: ParameterLocation) {
    let converted = convert_schema(node);
    let Some(properties) = converted.properties.as_ref() else {
        tracing::warn!(
            location = ?location,
            kind = node.kind(),
            "Parameter schema is not object-shaped; no parameters derived"
        );
        return;
    };

    for (name, schema) in properties {
        out.push(Parameter {
            name: name.clone(),
            location,
            required: converted.is_required(name),
            schema: schema.clone(),
        });
    }
}

fn build_responses(response: Option<&SchemaNode>) -> IndexMap<String, Response> {
    let mut responses = IndexMap::new();
    responses.insert(
        "200".to_string(),
        Response {
            description: "Successful response".to_string(),
            content: response.map(|node| json_content(convert_schema(node))),
        },
    );
    responses.insert("400".to_string(), Response::new("Bad Request"));
    responses.insert("500".to_string(), Response::new("Internal Server Error"));
    responses
}

fn json_content(schema: SchemaObject) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    content.insert(APPLICATION_JSON.to_string(), MediaType { schema });
    content
}

/// Non-fatal warnings controlled by `warnMissingTags` and `detectDuplicates`.
fn report_diagnostics(registry: &Registry, config: &ApiConfig) {
    if config.options.warn_missing_tags {
        for (path, definition) in registry.routes() {
            if definition.tags.is_empty() {
                tracing::warn!(
                    path,
                    group = config.uncategorized_tag(),
                    "Route has no tags"
                );
            }
        }
    }

    if config.options.detect_duplicates {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (path, definition) in registry.routes() {
            let Some(id) = definition.operation_id.as_deref() else {
                continue;
            };
            match seen.entry(id) {
                Entry::Occupied(first) => tracing::warn!(
                    operation_id = id,
                    first_path = *first.get(),
                    path,
                    "Duplicate operationId"
                ),
                Entry::Vacant(slot) => {
                    slot.insert(path);
                }
            }
        }
    }
}
