mod builder;
mod convert;
pub mod document;
mod ordering;
mod render;
pub mod schema;

pub use builder::{build_spec, OpenApiGenerator, SpecOptions, OPENAPI_VERSION};
pub use convert::convert_schema;
pub use document::{
    Components, Contact, Document, Info, License, MediaType, Operation, Parameter,
    ParameterLocation, PathItem, RequestBody, Response, Server, ServerVariable, Tag,
};
pub use ordering::{sort_methods, sort_routes, sort_tags};
pub use render::{to_json, to_yaml, RenderError};
pub use schema::{AdditionalProperties, SchemaObject, SchemaType};
