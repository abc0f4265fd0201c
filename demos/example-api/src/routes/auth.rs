use routespec::prelude::*;

use crate::schemas;

pub fn routes() -> Vec<(&'static str, RouteDefinition)> {
    vec![
        (
            "/api/auth/login",
            RouteDefinition::new()
                .summary("Exchange credentials for tokens")
                .tag("Auth")
                .operation_id("login")
                .post(
                    SchemaBundle::new()
                        .body(schemas::login())
                        .response(schemas::token_pair()),
                ),
        ),
        (
            "/api/auth/refresh",
            RouteDefinition::new()
                .summary("Refresh an access token")
                .tag("Auth")
                .operation_id("refresh")
                .post(
                    SchemaBundle::new()
                        .body(schema::object().field("refreshToken", schema::string()))
                        .response(schemas::token_pair()),
                ),
        ),
        (
            "/api/auth/legacy-login",
            RouteDefinition::new()
                .summary("Form-based login")
                .tag("Auth")
                .deprecated(true)
                .external_docs(
                    ExternalDocs::new("https://example.com/docs/auth-migration")
                        .with_description("Migrating to token auth"),
                )
                .post(SchemaBundle::new().body(schemas::login())),
        ),
    ]
}
