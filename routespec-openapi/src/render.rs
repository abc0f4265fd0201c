use crate::document::Document;

/// Failure to render a document as text.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Pretty-printed JSON.
pub fn to_json(document: &Document) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Block-style YAML. Long strings are never folded and repeated values are
/// written out in full rather than as anchors.
pub fn to_yaml(document: &Document) -> Result<String, RenderError> {
    Ok(serde_yaml::to_string(document)?)
}
