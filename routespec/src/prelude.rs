//! Everything needed to register routes and generate a document.
//!
//! ```
//! use routespec::prelude::*;
//! ```

pub use routespec_core::schema::{self, SchemaExt, SchemaNode};
pub use routespec_core::{
    clear_registry, get_registry, register_route, ApiConfig, ExternalDocs, HttpMethod,
    MethodHandlerSpec, Registry, RouteDefinition, SchemaBundle,
};
pub use routespec_openapi::{Document, Info, Server, Tag};

pub use crate::generate::{generate_from, generate_openapi_spec, GenerateOptions, GeneratedSpec};
