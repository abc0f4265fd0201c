//! Deterministic ordering of tags, routes, and methods.
//!
//! Every sort here is stable: equal keys keep their input order, which for
//! routes is registration order.

use routespec_core::config::default_method_rank;
use routespec_core::{ApiConfig, HttpMethod, RouteDefinition};

use crate::document::Tag;

/// Order tags by their position in `tagOrder`; unlisted tags go last.
pub fn sort_tags(tags: &[Tag], config: &ApiConfig) -> Vec<Tag> {
    let mut sorted = tags.to_vec();
    sorted.sort_by_key(|tag| config.tag_rank(&tag.name));
    sorted
}

/// Order routes for the `paths` map.
///
/// Without a config, or with `groupByTag` off, registration order is kept.
/// Otherwise untagged routes go first or last per `uncategorizedLast`, and
/// tagged routes are ranked by their first tag's position in `tagOrder`.
pub fn sort_routes<'a>(
    mut routes: Vec<(&'a str, &'a RouteDefinition)>,
    config: Option<&ApiConfig>,
) -> Vec<(&'a str, &'a RouteDefinition)> {
    let Some(config) = config.filter(|c| c.options.group_by_tag) else {
        return routes;
    };
    routes.sort_by_key(|(_, definition)| route_rank(definition, config));
    routes
}

fn route_rank(definition: &RouteDefinition, config: &ApiConfig) -> (u8, usize) {
    match definition.first_tag() {
        None if config.options.uncategorized_last => (2, 0),
        None => (0, 0),
        Some(tag) => (1, config.tag_rank(tag)),
    }
}

/// Order the methods of one path item by `httpMethodOrder`.
///
/// Without a config the default POST, GET, PUT, PATCH, DELETE, HEAD, OPTIONS
/// order applies.
pub fn sort_methods(
    methods: impl IntoIterator<Item = HttpMethod>,
    config: Option<&ApiConfig>,
) -> Vec<HttpMethod> {
    let mut methods: Vec<HttpMethod> = methods.into_iter().collect();
    methods.sort_by_key(|method| match config {
        Some(config) => config.method_rank(*method),
        None => default_method_rank(*method),
    });
    methods
}
