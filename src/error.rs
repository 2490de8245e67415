//! Error taxonomy for graph construction, reference resolution and template loading

use thiserror::Error;

/// Structural misuse of a [`ResourceGraph`](crate::models::ResourceGraph)
///
/// Raised while the graph is being built; the evaluator never sees these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Resource '{0}' is already declared in this stack")]
    DuplicateId(String),
    #[error("Resource '{0}' is not declared in this stack")]
    NotFound(String),
}

/// A resource of a known type lacks a field needed to derive its relations
///
/// The evaluator recovers from this per resource and turns it into a finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Resource '{resource_id}' is malformed: {reason}")]
pub struct MalformedResourceError {
    pub resource_id: String,
    pub reason: String,
}

impl MalformedResourceError {
    pub fn new(resource_id: &str, reason: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for the common "required property is missing" case
    pub fn missing(resource_id: &str, property: &str) -> Self {
        Self::new(resource_id, format!("missing required property '{}'", property))
    }
}

/// Errors raised while turning a synthesized template into a graph
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to parse template JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read template file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid template: {0}")]
    Invalid(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
}
