//! routespec: describe routes with typed schemas, get an OpenAPI 3.1 document.
//!
//! This facade re-exports the sub-crates through a single dependency.
//!
//! ```
//! use routespec::prelude::*;
//!
//! let registry = Registry::new().with_route(
//!     "/api/users",
//!     RouteDefinition::new()
//!         .tag("Users")
//!         .post(SchemaBundle::new().body(schema::object().field("name", schema::string()))),
//! );
//!
//! let generated = generate_from(&registry, &GenerateOptions::new(Info::new("Users", "1.0.0")));
//! assert!(generated.spec().paths.contains_key("/api/users"));
//! ```
//!
//! # Feature flags
//!
//! | Feature    | Default | Enables                                    |
//! |------------|---------|--------------------------------------------|
//! | `schemars` | **yes** | `SchemaNode::of::<T: JsonSchema>()`        |

pub extern crate routespec_core;
pub extern crate routespec_openapi;

#[cfg(feature = "schemars")]
pub use schemars;

mod generate;
mod logging;
pub mod prelude;

pub use routespec_core::*;
pub use routespec_openapi::{
    build_spec, convert_schema, Document, Info, OpenApiGenerator, RenderError, Server,
    SpecOptions, Tag,
};

pub use generate::{generate_from, generate_openapi_spec, GenerateOptions, GeneratedSpec};
pub use logging::init_tracing;
