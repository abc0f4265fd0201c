use routespec::prelude::*;

use crate::schemas;

pub fn routes() -> Vec<(&'static str, RouteDefinition)> {
    vec![
        (
            "/api/users",
            RouteDefinition::new()
                .summary("Users collection")
                .tag("Users")
                .get(
                    SchemaBundle::new()
                        .query(schemas::pagination())
                        .response(schemas::paginated(schemas::user())),
                )
                .post(
                    SchemaBundle::new()
                        .headers(schemas::auth_headers())
                        .body(schemas::create_user())
                        .response(schemas::user()),
                ),
        ),
        (
            "/api/users/:id",
            RouteDefinition::new()
                .summary("Single user")
                .tag("Users")
                .get(
                    SchemaBundle::new()
                        .params(schemas::id_params())
                        .response(schemas::user()),
                )
                .patch(
                    SchemaBundle::new()
                        .params(schemas::id_params())
                        .headers(schemas::auth_headers())
                        .body(schemas::update_user())
                        .response(schemas::user()),
                )
                .delete(
                    SchemaBundle::new()
                        .params(schemas::id_params())
                        .headers(schemas::auth_headers())
                        .response(schema::void()),
                ),
        ),
    ]
}
