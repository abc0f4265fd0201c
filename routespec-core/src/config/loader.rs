use std::path::{Path, PathBuf};

use super::ApiConfig;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "api.config.json";

/// Conventional config locations, tried in order after any caller-supplied path.
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(DEFAULT_CONFIG_FILE),
        Path::new(".").join(DEFAULT_CONFIG_FILE),
    ];
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(DEFAULT_CONFIG_FILE));
    }
    paths
}

/// Load the presentation config.
///
/// Tries `config_path` first, then [`default_config_paths`]. Missing files are
/// skipped; a file that fails to read or parse is logged and the search
/// continues. Returns `None` when no candidate yields a config.
pub fn load_api_config(config_path: Option<&Path>) -> Option<ApiConfig> {
    let candidates = config_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain(default_config_paths());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded API config");
                return Some(config);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Failed to load API config");
            }
        }
    }

    None
}

/// Read and parse a single config file. `.yaml`/`.yml` files are parsed as
/// YAML, everything else as JSON.
pub fn load_config_file(path: &Path) -> Result<ApiConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
