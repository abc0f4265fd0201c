use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::config::ApiConfig;
use crate::route::{schema_key, RouteDefinition, Slot};
use crate::schema::SchemaNode;

/// Route definitions and every schema they reference.
///
/// Both maps keep insertion order; generation uses it as the tie-break when
/// sorting. Schemas are keyed by [`schema_key`] (`path_slot`), so two methods
/// under one path that declare the same slot share a single entry and the
/// last registration wins.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    routes: IndexMap<String, RouteDefinition>,
    schemas: IndexMap<String, SchemaNode>,
    config: Option<ApiConfig>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a route and index each schema slot it declares.
    ///
    /// Re-registering a path replaces the previous definition wholesale and
    /// logs a warning; the path keeps its original position.
    pub fn register(
        &mut self,
        path: impl Into<String>,
        definition: RouteDefinition,
    ) -> &RouteDefinition {
        let path = path.into();

        for spec in definition.methods.values() {
            for (slot, node) in spec.schema.slots() {
                self.schemas.insert(schema_key(&path, slot), node.clone());
            }
        }

        match self.routes.entry(path) {
            Entry::Occupied(mut entry) => {
                tracing::warn!(
                    path = %entry.key(),
                    "Route already registered; overwriting previous definition"
                );
                entry.insert(definition);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(definition),
        }
    }

    /// Builder-style registration.
    pub fn with_route(mut self, path: impl Into<String>, definition: RouteDefinition) -> Self {
        self.register(path, definition);
        self
    }

    pub fn route(&self, path: &str) -> Option<&RouteDefinition> {
        self.routes.get(path)
    }

    /// Routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &RouteDefinition)> {
        self.routes.iter().map(|(path, def)| (path.as_str(), def))
    }

    pub fn schema(&self, key: &str) -> Option<&SchemaNode> {
        self.schemas.get(key)
    }

    pub fn schema_for(&self, path: &str, slot: Slot) -> Option<&SchemaNode> {
        self.schemas.get(&schema_key(path, slot))
    }

    /// Schemas in first-registration order.
    pub fn schemas(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.schemas.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// The config cached for the next generation call, if any.
    pub fn config(&self) -> Option<&ApiConfig> {
        self.config.as_ref()
    }

    pub fn set_config(&mut self, config: ApiConfig) {
        self.config = Some(config);
    }

    pub fn with_config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Empty both maps. A cached config is kept.
    pub fn clear(&mut self) {
        self.routes.clear();
        self.schemas.clear();
    }
}

// ── Process-wide default instance ───────────────────────────────────────────

static DEFAULT_REGISTRY: OnceLock<Mutex<Registry>> = OnceLock::new();

fn lock_default() -> MutexGuard<'static, Registry> {
    DEFAULT_REGISTRY
        .get_or_init(|| Mutex::new(Registry::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Register a route on the process-wide registry, returning the stored definition.
pub fn register_route(path: impl Into<String>, definition: RouteDefinition) -> RouteDefinition {
    lock_default().register(path, definition).clone()
}

/// Snapshot of the process-wide registry.
pub fn get_registry() -> Registry {
    lock_default().clone()
}

/// Swap the process-wide registry wholesale.
pub fn set_registry(registry: Registry) {
    *lock_default() = registry;
}

pub fn clear_registry() {
    lock_default().clear();
}

/// Run `f` with exclusive access to the process-wide registry.
pub fn with_registry<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    f(&mut lock_default())
}
