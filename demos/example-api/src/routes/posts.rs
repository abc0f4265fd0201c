use routespec::prelude::*;

use crate::schemas::{self, CreatePost, Post};

pub fn routes() -> Vec<(&'static str, RouteDefinition)> {
    vec![
        (
            "/api/posts",
            RouteDefinition::new()
                .summary("Posts")
                .tag("Posts")
                .get(
                    SchemaBundle::new()
                        .query(schemas::pagination().field(
                            "tag",
                            schema::array(schema::string()).optional(),
                        ))
                        .response(schemas::paginated(SchemaNode::of::<Post>())),
                )
                .post(
                    SchemaBundle::new()
                        .headers(schemas::auth_headers())
                        .body(SchemaNode::of::<CreatePost>())
                        .response(SchemaNode::of::<Post>()),
                ),
        ),
        (
            "/api/posts/:id/publish",
            RouteDefinition::new()
                .summary("Publish a draft")
                .description("Marks the post as published. Idempotent.")
                .tag("Posts")
                .operation_id("publishPost")
                .post(
                    SchemaBundle::new()
                        .params(schemas::id_params())
                        .headers(schemas::auth_headers())
                        .response(SchemaNode::of::<Post>()),
                ),
        ),
    ]
}
