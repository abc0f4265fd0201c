mod auth;
mod health;
mod posts;
mod users;

use routespec::RouteDefinition;

/// Every demo route, in registration order.
pub fn all() -> Vec<(&'static str, RouteDefinition)> {
    let mut routes = Vec::new();
    routes.extend(health::routes());
    routes.extend(users::routes());
    routes.extend(posts::routes());
    routes.extend(auth::routes());
    routes
}
