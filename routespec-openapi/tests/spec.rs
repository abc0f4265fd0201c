mod common;

use common::capture_logs;
use indexmap::IndexMap;
use routespec_core::schema::{self, SchemaExt};
use routespec_core::{ApiConfig, ExternalDocs, Registry, RouteDefinition, SchemaBundle};
use routespec_openapi::{
    build_spec, Info, OpenApiGenerator, ParameterLocation, Server, SpecOptions, Tag,
    OPENAPI_VERSION,
};
use serde_json::{json, Value};

fn options() -> SpecOptions {
    SpecOptions::new(Info::new("Test API", "0.1.0"))
}

fn spec_value(registry: &Registry) -> Value {
    serde_json::to_value(build_spec(registry, &options())).unwrap()
}

fn user_body() -> schema::ObjectSchema {
    schema::object()
        .field("name", schema::string().min_length(1))
        .field("email", schema::string().email())
}

// ── Document skeleton ───────────────────────────────────────────────────────

#[test]
fn empty_registry_yields_bare_document() {
    let spec = spec_value(&Registry::new());
    assert_eq!(
        spec,
        json!({
            "openapi": "3.1.0",
            "info": { "title": "Test API", "version": "0.1.0" },
            "paths": {}
        })
    );
}

#[test]
fn document_level_options_pass_through() {
    let mut requirement = IndexMap::new();
    requirement.insert("bearerAuth".to_string(), Vec::new());
    let options = SpecOptions::new(Info::new("Test API", "2.0.0").with_description("Demo"))
        .with_servers(vec![Server::new("https://api.example.com").with_description("prod")])
        .with_tags(vec![Tag::new("Users")])
        .with_security(vec![requirement]);

    let doc = build_spec(&Registry::new(), &options);
    assert_eq!(doc.openapi, OPENAPI_VERSION);
    assert_eq!(doc.info.description.as_deref(), Some("Demo"));
    assert_eq!(doc.servers.as_ref().unwrap()[0].url, "https://api.example.com");
    assert_eq!(doc.tags.as_ref().unwrap()[0].name, "Users");
    assert!(doc.security.as_ref().unwrap()[0].contains_key("bearerAuth"));
}

#[test]
fn top_level_keys_are_in_document_order() {
    let registry = Registry::new().with_route(
        "/health",
        RouteDefinition::new().get(SchemaBundle::new().response(schema::boolean())),
    );
    let options = options()
        .with_servers(vec![Server::new("http://localhost")])
        .with_tags(vec![Tag::new("Health")]);
    let json = serde_json::to_string(&build_spec(&registry, &options)).unwrap();

    let keys = ["openapi", "info", "servers", "paths", "components", "tags"];
    let positions: Vec<usize> = keys
        .iter()
        .map(|key| format!("\"{key}\""))
        .map(|key| json.find(&key).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
}

// ── Operations ──────────────────────────────────────────────────────────────

#[test]
fn get_with_query_and_response() {
    let registry = Registry::new().with_route(
        "/api/users",
        RouteDefinition::new()
            .summary("List users")
            .tag("Users")
            .get(
                SchemaBundle::new()
                    .query(
                        schema::object()
                            .field("page", schema::integer().optional())
                            .field("q", schema::string()),
                    )
                    .response(schema::array(user_body())),
            ),
    );
    let op = &spec_value(&registry)["paths"]["/api/users"]["get"];

    assert_eq!(op["summary"], "List users");
    assert_eq!(op["tags"], json!(["Users"]));
    assert_eq!(
        op["parameters"],
        json!([
            { "name": "page", "in": "query", "required": false, "schema": { "type": "integer" } },
            { "name": "q", "in": "query", "required": true, "schema": { "type": "string" } }
        ])
    );
    assert!(op.get("requestBody").is_none());
    assert_eq!(
        op["responses"]["200"]["content"]["application/json"]["schema"]["type"],
        "array"
    );
}

#[test]
fn post_body_becomes_required_request_body() {
    let registry = Registry::new().with_route(
        "/api/users",
        RouteDefinition::new().post(SchemaBundle::new().body(user_body())),
    );
    let op = &spec_value(&registry)["paths"]["/api/users"]["post"];

    assert_eq!(op["requestBody"]["required"], true);
    assert_eq!(
        op["requestBody"]["content"]["application/json"]["schema"],
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "minLength": 1 },
                "email": { "type": "string", "format": "email" }
            },
            "required": ["name", "email"]
        })
    );
}

#[test]
fn body_on_get_or_delete_is_ignored() {
    let registry = Registry::new().with_route(
        "/api/items",
        RouteDefinition::new()
            .get(SchemaBundle::new().body(user_body()))
            .delete(SchemaBundle::new().body(user_body())),
    );
    let spec = spec_value(&registry);
    assert!(spec["paths"]["/api/items"]["get"].get("requestBody").is_none());
    assert!(spec["paths"]["/api/items"]["delete"].get("requestBody").is_none());
}

#[test]
fn put_and_patch_accept_bodies() {
    let registry = Registry::new().with_route(
        "/api/items/:id",
        RouteDefinition::new()
            .put(SchemaBundle::new().body(user_body()))
            .patch(SchemaBundle::new().body(user_body())),
    );
    let spec = spec_value(&registry);
    assert_eq!(spec["paths"]["/api/items/:id"]["put"]["requestBody"]["required"], true);
    assert_eq!(spec["paths"]["/api/items/:id"]["patch"]["requestBody"]["required"], true);
}

#[test]
fn parameters_follow_params_query_headers_order() {
    let registry = Registry::new().with_route(
        "/api/users/:id",
        RouteDefinition::new().get(
            SchemaBundle::new()
                .headers(schema::object().field("x-request-id", schema::string().optional()))
                .query(schema::object().field("expand", schema::boolean().optional()))
                .params(schema::object().field("id", schema::string().uuid())),
        ),
    );
    let doc = build_spec(&registry, &options());
    let params = doc.paths["/api/users/:id"]["get"].parameters.clone().unwrap();

    let seen: Vec<(&str, ParameterLocation, bool)> = params
        .iter()
        .map(|p| (p.name.as_str(), p.location, p.required))
        .collect();
    assert_eq!(
        seen,
        [
            ("id", ParameterLocation::Path, true),
            ("expand", ParameterLocation::Query, false),
            ("x-request-id", ParameterLocation::Header, false),
        ]
    );
}

#[test]
fn parameters_look_through_effects() {
    let registry = Registry::new().with_route(
        "/search",
        RouteDefinition::new().get(
            SchemaBundle::new().query(schema::object().field("term", schema::string()).refine()),
        ),
    );
    let spec = spec_value(&registry);
    assert_eq!(spec["paths"]["/search"]["get"]["parameters"][0]["name"], "term");
}

#[test]
fn non_object_parameter_schema_warns_and_derives_nothing() {
    let registry = Registry::new().with_route(
        "/odd",
        RouteDefinition::new().get(SchemaBundle::new().query(schema::string())),
    );
    let (spec, logs) = capture_logs(|| spec_value(&registry));

    assert!(spec["paths"]["/odd"]["get"].get("parameters").is_none());
    assert_eq!(logs.count("Parameter schema is not object-shaped"), 1);
}

#[test]
fn responses_always_include_error_codes() {
    let registry = Registry::new().with_route(
        "/ping",
        RouteDefinition::new().get(SchemaBundle::new()),
    );
    let spec = spec_value(&registry);
    assert_eq!(
        spec["paths"]["/ping"]["get"]["responses"],
        json!({
            "200": { "description": "Successful response" },
            "400": { "description": "Bad Request" },
            "500": { "description": "Internal Server Error" }
        })
    );
}

#[test]
fn route_metadata_is_copied_to_every_operation() {
    let mut requirement = IndexMap::new();
    requirement.insert("apiKey".to_string(), vec!["read".to_string()]);
    let registry = Registry::new().with_route(
        "/legacy",
        RouteDefinition::new()
            .summary("Legacy endpoint")
            .description("Use /v2 instead")
            .tags(["Legacy", "Internal"])
            .operation_id("legacy")
            .deprecated(true)
            .security(requirement)
            .external_docs(ExternalDocs::new("https://docs.example.com").with_description("Docs"))
            .get(SchemaBundle::new())
            .post(SchemaBundle::new()),
    );
    let spec = spec_value(&registry);

    for method in ["get", "post"] {
        let op = &spec["paths"]["/legacy"][method];
        assert_eq!(op["summary"], "Legacy endpoint");
        assert_eq!(op["description"], "Use /v2 instead");
        assert_eq!(op["tags"], json!(["Legacy", "Internal"]));
        assert_eq!(op["operationId"], "legacy");
        assert_eq!(op["deprecated"], true);
        assert_eq!(op["security"], json!([{ "apiKey": ["read"] }]));
        assert_eq!(
            op["externalDocs"],
            json!({ "description": "Docs", "url": "https://docs.example.com" })
        );
    }
}

#[test]
fn absent_metadata_is_omitted() {
    let registry = Registry::new().with_route(
        "/bare",
        RouteDefinition::new().deprecated(false).get(SchemaBundle::new()),
    );
    let op = spec_value(&registry)["paths"]["/bare"]["get"].clone();
    for key in ["summary", "description", "tags", "operationId", "deprecated", "security"] {
        assert!(op.get(key).is_none(), "unexpected {key}");
    }
}

// ── Components ──────────────────────────────────────────────────────────────

#[test]
fn components_hold_one_schema_per_path_slot() {
    let registry = Registry::new()
        .with_route(
            "/api/users",
            RouteDefinition::new().post(
                SchemaBundle::new()
                    .body(user_body())
                    .response(schema::object().field("id", schema::string().uuid())),
            ),
        )
        .with_route(
            "/api/admins",
            RouteDefinition::new().post(SchemaBundle::new().body(user_body())),
        );
    let spec = spec_value(&registry);
    let schemas = spec["components"]["schemas"].as_object().unwrap();

    let keys: Vec<&str> = schemas.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["/api/users_body", "/api/users_response", "/api/admins_body"]
    );
    assert_eq!(schemas["/api/users_body"], schemas["/api/admins_body"]);
}

#[test]
fn components_omitted_without_schemas() {
    let registry = Registry::new().with_route("/ping", RouteDefinition::new().get(SchemaBundle::new()));
    assert!(spec_value(&registry).get("components").is_none());
}

// ── Generator & diagnostics ─────────────────────────────────────────────────

#[test]
fn generator_renders_json_and_yaml() {
    let registry = Registry::new().with_route(
        "/ping",
        RouteDefinition::new().get(SchemaBundle::new().response(schema::string())),
    );
    let generator = OpenApiGenerator::new(&registry);

    let json = generator.generate_json(&options()).unwrap();
    assert!(json.starts_with("{\n  \"openapi\": \"3.1.0\""));

    let yaml = generator.generate_yaml(&options()).unwrap();
    assert!(yaml.starts_with("openapi:"));
    assert!(yaml.contains("3.1.0"));
    assert!(yaml.contains("/ping"));
}

#[test]
fn missing_tags_are_reported_when_enabled() {
    let registry = Registry::new()
        .with_config(ApiConfig::default())
        .with_route("/untagged", RouteDefinition::new().get(SchemaBundle::new()))
        .with_route("/tagged", RouteDefinition::new().tag("A").get(SchemaBundle::new()));

    let (_, logs) = capture_logs(|| build_spec(&registry, &options()));
    assert_eq!(logs.count("Route has no tags"), 1);
    assert!(logs.contents().contains("/untagged"));
}

#[test]
fn missing_tags_are_silent_when_disabled() {
    let mut config = ApiConfig::default();
    config.options.warn_missing_tags = false;
    let registry = Registry::new()
        .with_config(config)
        .with_route("/untagged", RouteDefinition::new().get(SchemaBundle::new()));

    let (_, logs) = capture_logs(|| build_spec(&registry, &options()));
    assert_eq!(logs.count("Route has no tags"), 0);
}

#[test]
fn duplicate_operation_ids_are_reported() {
    let registry = Registry::new()
        .with_config(ApiConfig::default())
        .with_route("/a", RouteDefinition::new().tag("T").operation_id("dup").get(SchemaBundle::new()))
        .with_route("/b", RouteDefinition::new().tag("T").operation_id("dup").get(SchemaBundle::new()))
        .with_route("/c", RouteDefinition::new().tag("T").operation_id("unique").get(SchemaBundle::new()));

    let (doc, logs) = capture_logs(|| build_spec(&registry, &options()));
    assert_eq!(logs.count("Duplicate operationId"), 1);
    assert_eq!(doc.paths.len(), 3);
}
