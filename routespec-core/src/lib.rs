//! Core data model for routespec.
//!
//! - [`schema`]: the closed [`SchemaNode`] union describing validated shapes.
//! - [`route`]: route definitions, HTTP methods, and per-method schema bundles.
//! - [`registry`]: the [`Registry`] holding routes and every schema they reference.
//! - [`config`]: presentation rules ([`ApiConfig`]) and the file-based supplier.

pub mod config;
pub mod error;
pub mod registry;
pub mod route;
pub mod schema;

pub use config::{load_api_config, load_config_file, ApiConfig, ApiOptions, PathPatterns};
pub use error::{ConfigError, ParseMethodError};
pub use registry::{
    clear_registry, get_registry, register_route, set_registry, with_registry, Registry,
};
pub use route::{
    schema_key, ExternalDocs, HandlerRef, HttpMethod, MethodHandlerSpec, RouteDefinition,
    SchemaBundle, SecurityRequirement, Slot,
};
pub use schema::{SchemaExt, SchemaNode};
