use routespec::prelude::*;

// Untagged on purpose: lands in the uncategorized group.
pub fn routes() -> Vec<(&'static str, RouteDefinition)> {
    vec![(
        "/health",
        RouteDefinition::new()
            .summary("Liveness probe")
            .operation_id("health")
            .get(SchemaBundle::new().response(
                schema::object()
                    .field("status", schema::literal("ok"))
                    .field("uptimeSeconds", schema::number().min(0.0)),
            )),
    )]
}
