//! A small users/posts/auth API described with routespec.

pub mod routes;
pub mod schemas;

use routespec::register_route;

/// Register every demo route on the process-wide registry.
pub fn register_all() {
    for (path, definition) in routes::all() {
        register_route(path, definition);
    }
}
