use std::path::{Path, PathBuf};

use routespec_core::{load_api_config, with_registry, ApiConfig, Registry};
use routespec_openapi::{
    build_spec, to_json, to_yaml, Document, Info, RenderError, Server, SpecOptions,
};

/// Inputs for [`generate_openapi_spec`] and [`generate_from`].
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub info: Info,
    pub servers: Option<Vec<Server>>,
    /// Tried before the conventional `api.config.json` locations.
    pub config_path: Option<PathBuf>,
}

impl GenerateOptions {
    pub fn new(info: Info) -> Self {
        Self {
            info,
            servers: None,
            config_path: None,
        }
    }

    pub fn with_servers(mut self, servers: Vec<Server>) -> Self {
        self.servers = Some(servers);
        self
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    fn spec_options(&self) -> SpecOptions {
        let options = SpecOptions::new(self.info.clone());
        match &self.servers {
            Some(servers) => options.with_servers(servers.clone()),
            None => options,
        }
    }
}

/// A generated document, renderable as JSON or YAML.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSpec {
    document: Document,
}

impl GeneratedSpec {
    pub fn spec(&self) -> &Document {
        &self.document
    }

    pub fn into_spec(self) -> Document {
        self.document
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn json(&self) -> Result<String, RenderError> {
        to_json(&self.document)
    }

    pub fn yaml(&self) -> Result<String, RenderError> {
        to_yaml(&self.document)
    }
}

/// Generate a document from the process-wide registry.
///
/// The config is reloaded on every call (falling back to the defaults) and
/// cached on the registry before it is snapshotted. Routes registered after
/// the snapshot do not appear in the returned document.
pub fn generate_openapi_spec(options: &GenerateOptions) -> GeneratedSpec {
    let config = resolve_config(options.config_path.as_deref());
    let snapshot = with_registry(|registry| {
        registry.set_config(config);
        registry.clone()
    });
    generate_with(&snapshot, options)
}

/// Generate a document from an injected registry.
///
/// A config already cached on `registry` is used as-is; otherwise one is
/// loaded the same way [`generate_openapi_spec`] does.
pub fn generate_from(registry: &Registry, options: &GenerateOptions) -> GeneratedSpec {
    if registry.config().is_some() {
        return generate_with(registry, options);
    }
    let registry = registry
        .clone()
        .with_config(resolve_config(options.config_path.as_deref()));
    generate_with(&registry, options)
}

fn generate_with(registry: &Registry, options: &GenerateOptions) -> GeneratedSpec {
    GeneratedSpec {
        document: build_spec(registry, &options.spec_options()),
    }
}

fn resolve_config(path: Option<&Path>) -> ApiConfig {
    load_api_config(path).unwrap_or_else(|| {
        tracing::debug!("No API config found; using defaults");
        ApiConfig::default()
    })
}
