//! Cross-resource relations derived from string references
//!
//! Nothing here is cached: every answer is recomputed from the immutable
//! graph, so relations never go stale and never form cycles.

pub mod expression;
pub mod naming;
pub mod scaling;

use serde_json::Value;
use tracing::debug;

use crate::error::MalformedResourceError;
use crate::models::{ResourceGraph, ResourceNode, ResourceType};

pub use expression::{resolve_string, ResolvedString};
pub use naming::{matchable_name, LogicalIdNaming, NameDerivation, StackScopedNaming};
pub use scaling::{Capacity, ResourcePath, ScalableDimension, ScalingBinding, DYNAMODB_NAMESPACE};

/// One entry of a backup selection, reduced to the table name it protects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReference {
    pub selection_id: String,
    pub table_name: String,
    /// Declared table the entry points at directly, when it does
    pub target: Option<String>,
}

/// Answers relation queries over one graph
#[derive(Debug)]
pub struct ReferenceResolver {
    naming: Box<dyn NameDerivation>,
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new(Box::new(LogicalIdNaming))
    }
}

impl ReferenceResolver {
    pub fn new(naming: Box<dyn NameDerivation>) -> Self {
        Self { naming }
    }

    pub fn naming(&self) -> &dyn NameDerivation {
        self.naming.as_ref()
    }

    /// Name other resources use to refer to `node`
    pub fn matchable_name(&self, node: &ResourceNode) -> String {
        matchable_name(self.naming.as_ref(), node)
    }

    fn required_string(
        &self,
        graph: &ResourceGraph,
        node: &ResourceNode,
        property: &str,
    ) -> Result<ResolvedString, MalformedResourceError> {
        let value = node
            .property(property)
            .ok_or_else(|| MalformedResourceError::missing(node.logical_id(), property))?;
        resolve_string(value, graph, self.naming()).ok_or_else(|| {
            MalformedResourceError::new(
                node.logical_id(),
                format!("property '{}' is not a string or reference expression", property),
            )
        })
    }

    /// The capacity binding declared by one scalable target
    ///
    /// `Ok(None)` when the target is well formed but does not bind DynamoDB
    /// capacity (other namespace, unknown dimension, path outside both grammars).
    pub fn scaling_binding(
        &self,
        graph: &ResourceGraph,
        target: &ResourceNode,
    ) -> Result<Option<ScalingBinding>, MalformedResourceError> {
        let namespace = self.required_string(graph, target, "ServiceNamespace")?;
        if namespace.text != DYNAMODB_NAMESPACE {
            return Ok(None);
        }
        let dimension = self.required_string(graph, target, "ScalableDimension")?;
        let resource_id = self.required_string(graph, target, "ResourceId")?;

        Ok(ScalingBinding::from_parts(
            target.logical_id(),
            &namespace.text,
            &dimension.text,
            &resource_id.text,
        ))
    }

    /// Does some scalable target autoscale `capacity` of `table` (or of one of its indexes)?
    ///
    /// Malformed targets contribute no binding; they are reported on their own
    /// by the rule that draws evidence from them.
    pub fn has_scaling_binding(
        &self,
        graph: &ResourceGraph,
        table: &str,
        index: Option<&str>,
        capacity: Capacity,
    ) -> bool {
        graph
            .all_resources(Some(&ResourceType::ScalableTarget))
            .any(|target| match self.scaling_binding(graph, target) {
                Ok(Some(binding)) => binding.covers(table, index, capacity),
                Ok(None) => false,
                Err(err) => {
                    debug!(target_id = target.logical_id(), error = %err, "Skipping malformed scalable target");
                    false
                }
            })
    }

    /// Table references listed by one backup selection, in declaration order
    pub fn backup_references(
        &self,
        graph: &ResourceGraph,
        selection: &ResourceNode,
    ) -> Result<Vec<BackupReference>, MalformedResourceError> {
        let body = selection
            .property("BackupSelection")
            .ok_or_else(|| MalformedResourceError::missing(selection.logical_id(), "BackupSelection"))?;
        if !body.is_object() {
            return Err(MalformedResourceError::new(
                selection.logical_id(),
                "property 'BackupSelection' is not a mapping",
            ));
        }

        let entries = match body.get("Resources") {
            None => return Ok(Vec::new()),
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(MalformedResourceError::new(
                    selection.logical_id(),
                    "property 'BackupSelection.Resources' is not a list",
                ))
            }
        };

        entries
            .iter()
            .map(|entry| {
                let resolved = resolve_string(entry, graph, self.naming()).ok_or_else(|| {
                    MalformedResourceError::new(
                        selection.logical_id(),
                        "backup resource entry is not a string or reference expression",
                    )
                })?;
                let target = resolved
                    .refs
                    .iter()
                    .find(|id| {
                        graph
                            .find(id)
                            .map_or(false, |node| node.resource_type() == &ResourceType::Table)
                    })
                    .cloned();
                Ok(BackupReference {
                    selection_id: selection.logical_id().to_string(),
                    table_name: table_name_from_reference(&resolved.text).to_string(),
                    target,
                })
            })
            .collect()
    }

    /// Is `table` protected by any backup selection in the graph?
    ///
    /// Matching is by exact, case-sensitive name equality; a direct reference
    /// still counts only through the name it resolves to. Malformed selections
    /// protect nothing.
    pub fn is_in_backup_plan(&self, graph: &ResourceGraph, table: &ResourceNode) -> bool {
        let name = self.matchable_name(table);
        let found = graph
            .all_resources(Some(&ResourceType::BackupPlanSelection))
            .filter_map(|selection| match self.backup_references(graph, selection) {
                Ok(refs) => Some(refs),
                Err(err) => {
                    debug!(selection = selection.logical_id(), error = %err, "Skipping malformed backup selection");
                    None
                }
            })
            .flatten()
            .find(|reference| reference.table_name == name);

        if let Some(reference) = &found {
            debug!(
                table = %name,
                selection = %reference.selection_id,
                direct = reference.target.is_some(),
                "Table found in backup selection"
            );
        }
        found.is_some()
    }
}

/// Table name carried by a backup reference
///
/// ARNs contribute the segment after `:table/` (up to the next `/`); any other
/// string is taken as a name as-is.
pub fn table_name_from_reference(reference: &str) -> &str {
    match reference.rfind(":table/") {
        Some(pos) if reference.starts_with("arn:") => {
            let rest = &reference[pos + ":table/".len()..];
            rest.split('/').next().unwrap_or(rest)
        }
        _ => reference,
    }
}
