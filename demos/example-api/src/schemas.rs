use routespec::prelude::*;
use routespec::schema::ObjectSchema;
use schemars::JsonSchema;

pub fn id_params() -> ObjectSchema {
    schema::object().field("id", schema::string().uuid())
}

pub fn user() -> ObjectSchema {
    schema::object()
        .field("id", schema::string().uuid())
        .field("email", schema::string().email())
        .field("name", schema::string().min_length(1).max_length(100))
        .field("role", schema::enumeration(["admin", "editor", "viewer"]))
        .field("createdAt", schema::date())
        .field("avatarUrl", schema::string().url().nullable())
}

pub fn create_user() -> ObjectSchema {
    schema::object()
        .field("email", schema::string().email())
        .field("name", schema::string().min_length(1).max_length(100))
        .field(
            "role",
            schema::enumeration(["admin", "editor", "viewer"]).with_default("viewer"),
        )
        .field("password", schema::string().min_length(8).refine())
}

pub fn update_user() -> ObjectSchema {
    schema::object()
        .field("email", schema::string().email().optional())
        .field("name", schema::string().min_length(1).optional())
        .field("role", schema::enumeration(["admin", "editor", "viewer"]).optional())
}

pub fn pagination() -> ObjectSchema {
    schema::object()
        .field("page", schema::integer().min(1).with_default(1))
        .field("limit", schema::integer().min(1).max(100).with_default(20))
        .field("search", schema::string().optional())
}

pub fn paginated(item: impl Into<SchemaNode>) -> ObjectSchema {
    schema::object()
        .field("items", schema::array(item))
        .field("total", schema::integer().min(0))
        .field("page", schema::integer().positive())
}

/// Body of `POST /api/posts`; derived through schemars.
#[allow(dead_code)]
#[derive(JsonSchema)]
#[schemars(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub published: Option<bool>,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
#[schemars(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub published: bool,
}

pub fn login() -> ObjectSchema {
    schema::object()
        .field("email", schema::string().email())
        .field("password", schema::string().min_length(8))
}

pub fn token_pair() -> ObjectSchema {
    schema::object()
        .field("accessToken", schema::string())
        .field("refreshToken", schema::string())
        .field("expiresIn", schema::integer().positive())
}

pub fn auth_headers() -> ObjectSchema {
    schema::object().field("authorization", schema::string().regex("^Bearer .+$"))
}
