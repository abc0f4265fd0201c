use std::io::Write;

use routespec::prelude::*;
use serde_json::{json, Value};
use serial_test::serial;

fn info() -> Info {
    Info::new("Facade API", "1.0.0")
}

fn register_sample_routes() {
    register_route(
        "/api/users",
        RouteDefinition::new()
            .tag("Users")
            .get(SchemaBundle::new().response(schema::array(schema::string())))
            .post(SchemaBundle::new().body(schema::object().field("name", schema::string()))),
    );
    register_route(
        "/api/auth/login",
        RouteDefinition::new()
            .tag("Auth")
            .post(SchemaBundle::new().body(
                schema::object()
                    .field("email", schema::string().email())
                    .field("password", schema::string().min_length(8)),
            )),
    );
    register_route(
        "/health",
        RouteDefinition::new().get(SchemaBundle::new().response(schema::boolean())),
    );
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn path_keys(doc: &Document) -> Vec<&str> {
    doc.paths.keys().map(String::as_str).collect()
}

#[test]
#[serial]
fn generates_from_process_wide_registry() {
    clear_registry();
    register_sample_routes();

    let generated = generate_openapi_spec(&GenerateOptions::new(info()));
    let doc = generated.spec();

    assert_eq!(doc.openapi, "3.1.0");
    assert_eq!(doc.info.title, "Facade API");
    assert_eq!(doc.paths.len(), 3);
    assert_eq!(doc.components.as_ref().unwrap().schemas.as_ref().unwrap().len(), 4);
    clear_registry();
}

#[test]
#[serial]
fn defaults_apply_without_config_file() {
    clear_registry();
    register_sample_routes();

    let generated = generate_openapi_spec(&GenerateOptions::new(info()));

    // groupByTag with an empty tagOrder: tagged routes keep registration
    // order, untagged routes go last.
    assert_eq!(
        path_keys(generated.spec()),
        ["/api/users", "/api/auth/login", "/health"]
    );
    let methods: Vec<&str> = generated.spec().paths["/api/users"]
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(methods, ["post", "get"]);
    clear_registry();
}

#[test]
#[serial]
fn config_file_controls_ordering() {
    clear_registry();
    register_sample_routes();
    let file = config_file(
        r#"{
            "tagOrder": ["Auth", "Users"],
            "httpMethodOrder": { "GET": 1, "POST": 2 },
            "options": { "uncategorizedLast": false }
        }"#,
    );

    let generated =
        generate_openapi_spec(&GenerateOptions::new(info()).with_config_path(file.path()));

    assert_eq!(
        path_keys(generated.spec()),
        ["/health", "/api/auth/login", "/api/users"]
    );
    let methods: Vec<&str> = generated.spec().paths["/api/users"]
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(methods, ["get", "post"]);
    clear_registry();
}

#[test]
#[serial]
fn loaded_config_is_cached_on_registry() {
    clear_registry();
    let file = config_file(r#"{ "tagOrder": ["Only"] }"#);

    generate_openapi_spec(&GenerateOptions::new(info()).with_config_path(file.path()));

    let registry = get_registry();
    assert_eq!(registry.config().unwrap().tag_order, ["Only"]);
    clear_registry();
}

#[test]
#[serial]
fn later_registrations_do_not_leak_into_generated_document() {
    clear_registry();
    register_sample_routes();

    let generated = generate_openapi_spec(&GenerateOptions::new(info()));
    register_route("/late", RouteDefinition::new().get(SchemaBundle::new()));

    assert!(!generated.spec().paths.contains_key("/late"));
    assert!(get_registry().route("/late").is_some());
    clear_registry();
}

#[test]
#[serial]
fn broken_config_file_falls_back_to_defaults() {
    clear_registry();
    register_sample_routes();
    let file = config_file("{ not json");

    let generated =
        generate_openapi_spec(&GenerateOptions::new(info()).with_config_path(file.path()));

    assert_eq!(get_registry().config(), Some(&ApiConfig::default()));
    assert_eq!(generated.spec().paths.len(), 3);
    clear_registry();
}

#[test]
fn generate_from_uses_injected_registry() {
    let registry = Registry::new()
        .with_config(ApiConfig::new().with_tag_order(["B", "A"]))
        .with_route("/a", RouteDefinition::new().tag("A").get(SchemaBundle::new()))
        .with_route("/b", RouteDefinition::new().tag("B").get(SchemaBundle::new()));

    let options = GenerateOptions::new(info()).with_servers(vec![Server::new("http://localhost:8080")]);
    let generated = generate_from(&registry, &options);

    assert_eq!(path_keys(generated.spec()), ["/b", "/a"]);
    assert_eq!(generated.spec().servers.as_ref().unwrap()[0].url, "http://localhost:8080");
}

#[test]
fn generated_spec_renders_json_and_yaml() {
    let registry = Registry::new().with_route(
        "/ping",
        RouteDefinition::new()
            .summary("Ping")
            .get(SchemaBundle::new().response(schema::literal("pong"))),
    );
    let generated = generate_from(&registry, &GenerateOptions::new(info()));

    let json: Value = serde_json::from_str(&generated.json().unwrap()).unwrap();
    assert_eq!(
        json["paths"]["/ping"]["get"]["responses"]["200"]["content"]["application/json"]["schema"],
        json!({ "type": "string", "enum": ["pong"] })
    );

    let yaml: Value = serde_yaml::from_str(&generated.yaml().unwrap()).unwrap();
    assert_eq!(yaml, json);
    assert_eq!(generated.clone().into_spec(), *generated.spec());
}
