mod loader;

pub use loader::{default_config_paths, load_api_config, load_config_file, DEFAULT_CONFIG_FILE};

use glob::Pattern;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::route::HttpMethod;

/// Rank given to methods missing from `httpMethodOrder`.
pub const UNLISTED_METHOD_RANK: u32 = 999;

/// Rank of a tag missing from `tagOrder`; sorts after every listed tag.
pub const UNLISTED_TAG_RANK: usize = usize::MAX;

/// Method order used when no config is supplied at all.
pub const DEFAULT_METHOD_ORDER: [HttpMethod; 7] = [
    HttpMethod::Post,
    HttpMethod::Get,
    HttpMethod::Put,
    HttpMethod::Patch,
    HttpMethod::Delete,
    HttpMethod::Head,
    HttpMethod::Options,
];

/// Rank of `method` in [`DEFAULT_METHOD_ORDER`], starting at 1.
pub fn default_method_rank(method: HttpMethod) -> u32 {
    DEFAULT_METHOD_ORDER
        .iter()
        .position(|m| *m == method)
        .map_or(UNLISTED_METHOD_RANK, |i| i as u32 + 1)
}

/// Presentation rules for document generation.
///
/// Deserialized from camelCase JSON or YAML. Missing fields take the
/// built-in defaults, so a file containing only `{"tagOrder": [...]}` is a
/// complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    pub tag_order: Vec<String>,
    /// Ordering for CRUD-style route files; read by external route tooling.
    pub crud_order: IndexMap<String, u32>,
    pub http_method_order: IndexMap<String, u32>,
    pub options: ApiOptions,
    pub path_patterns: PathPatterns,
    /// Glob patterns for files route-discovery tooling should skip.
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiOptions {
    pub include_timestamp: bool,
    pub include_warning: bool,
    pub group_by_tag: bool,
    pub subgroup_by_crud: bool,
    pub include_method_comments: bool,
    pub include_path_comments: bool,
    pub detect_duplicates: bool,
    pub warn_missing_tags: bool,
    pub uncategorized_last: bool,
    pub uncategorized_tag_name: String,
}

/// Path fragments identifying resource shapes; read by external route tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathPatterns {
    pub single_resource: Vec<String>,
    pub nested_resource: Vec<String>,
    pub action: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            tag_order: Vec::new(),
            crud_order: ranks(&[
                "POST",
                "GET_LIST",
                "GET_SINGLE",
                "PUT",
                "PATCH",
                "DELETE",
            ]),
            http_method_order: ranks(&DEFAULT_METHOD_ORDER.map(|m| m.as_str())),
            options: ApiOptions::default(),
            path_patterns: PathPatterns::default(),
            exclude_patterns: strings(&[
                "**/test/**",
                "**/mock/**",
                "**/*.test.ts",
                "**/*.spec.ts",
            ]),
        }
    }
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            include_timestamp: true,
            include_warning: true,
            group_by_tag: true,
            subgroup_by_crud: true,
            include_method_comments: true,
            include_path_comments: true,
            detect_duplicates: true,
            warn_missing_tags: true,
            uncategorized_last: true,
            uncategorized_tag_name: "Uncategorized".to_string(),
        }
    }
}

impl Default for PathPatterns {
    fn default() -> Self {
        Self {
            single_resource: strings(&["$id", "{id}", ":id"]),
            nested_resource: strings(&["$", "{", ":"]),
            action: strings(&[".", "/"]),
        }
    }
}

impl ApiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag_order<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tag_order = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the method order; methods are ranked 1.. in the given order.
    pub fn with_method_order(mut self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        self.http_method_order = methods
            .into_iter()
            .enumerate()
            .map(|(i, m)| (m.as_str().to_string(), i as u32 + 1))
            .collect();
        self
    }

    pub fn with_group_by_tag(mut self, enabled: bool) -> Self {
        self.options.group_by_tag = enabled;
        self
    }

    pub fn with_uncategorized_last(mut self, last: bool) -> Self {
        self.options.uncategorized_last = last;
        self
    }

    /// Rank of `method` in `httpMethodOrder`; keys match case-insensitively.
    pub fn method_rank(&self, method: HttpMethod) -> u32 {
        self.http_method_order
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(method.as_str()))
            .map_or(UNLISTED_METHOD_RANK, |(_, rank)| *rank)
    }

    /// Position of `tag` in `tagOrder`; unlisted tags rank [`UNLISTED_TAG_RANK`].
    pub fn tag_rank(&self, tag: &str) -> usize {
        self.tag_order
            .iter()
            .position(|t| t == tag)
            .unwrap_or(UNLISTED_TAG_RANK)
    }

    pub fn uncategorized_tag(&self) -> &str {
        &self.options.uncategorized_tag_name
    }

    /// Whether `path` matches any of `excludePatterns`.
    ///
    /// Patterns that fail to compile are skipped with a warning.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_patterns
            .iter()
            .filter_map(|raw| match Pattern::new(raw) {
                Ok(pattern) => Some(pattern),
                Err(err) => {
                    tracing::warn!(pattern = %raw, error = %err, "Ignoring invalid exclude pattern");
                    None
                }
            })
            .any(|pattern| pattern.matches(path))
    }
}

fn ranks(keys: &[&str]) -> IndexMap<String, u32> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| (key.to_string(), i as u32 + 1))
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
