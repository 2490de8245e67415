//! Synthesized template loading
//!
//! Turns a template document of the form
//! `{"Resources": {"<logical id>": {"Type": ..., "Properties": ..., "Metadata": ...}}}`
//! into a [`ResourceGraph`], keeping declaration order. Suppressions are read
//! from `Metadata.cdk_nag.rules_to_suppress`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::TemplateError;
use crate::models::{ResourceGraph, ResourceNode, ResourceType, Suppression};

#[derive(Debug, Deserialize)]
struct SuppressionEntry {
    id: String,
    #[serde(default)]
    reason: String,
}

/// Parse a template document held in memory
pub fn load_str(stack_name: &str, document: &str) -> Result<ResourceGraph, TemplateError> {
    let value: Value = serde_json::from_str(document)?;
    load_value(stack_name, &value)
}

/// Parse a template file; the stack is named after the file stem
pub fn load_file(path: &Path) -> Result<ResourceGraph, TemplateError> {
    let document = fs::read_to_string(path)?;
    let stack_name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("stack");
    load_str(stack_name, &document)
}

pub fn load_value(stack_name: &str, template: &Value) -> Result<ResourceGraph, TemplateError> {
    let resources = template
        .get("Resources")
        .and_then(Value::as_object)
        .ok_or_else(|| TemplateError::Invalid("template has no 'Resources' mapping".to_string()))?;

    let mut graph = ResourceGraph::new(stack_name);
    for (logical_id, definition) in resources {
        graph.add_resource(node_from_definition(logical_id, definition)?)?;
    }
    debug!(stack = stack_name, resources = graph.len(), "Template loaded");
    Ok(graph)
}

fn node_from_definition(logical_id: &str, definition: &Value) -> Result<ResourceNode, TemplateError> {
    let type_name = definition
        .get("Type")
        .and_then(Value::as_str)
        .ok_or_else(|| TemplateError::Invalid(format!("resource '{}' has no 'Type'", logical_id)))?;
    let resource_type = ResourceType::from_str(type_name);

    let properties = match definition.get("Properties") {
        None => Value::Object(Map::new()),
        Some(Value::Object(map)) => Value::Object(map.clone()),
        Some(_) => {
            return Err(TemplateError::Invalid(format!(
                "resource '{}' has non-mapping 'Properties'",
                logical_id
            )))
        }
    };

    let explicit_name = match resource_type {
        ResourceType::Table => properties
            .get("TableName")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    };

    let mut node = ResourceNode::new(logical_id, resource_type).with_properties(properties);
    if let Some(name) = explicit_name {
        node = node.with_explicit_name(&name);
    }
    for suppression in suppressions(logical_id, definition)? {
        node = node.with_suppression(suppression);
    }
    Ok(node)
}

fn suppressions(logical_id: &str, definition: &Value) -> Result<Vec<Suppression>, TemplateError> {
    let entries = match definition.pointer("/Metadata/cdk_nag/rules_to_suppress") {
        None => return Ok(Vec::new()),
        Some(entries) => entries,
    };
    let entries: Vec<SuppressionEntry> = serde_json::from_value(entries.clone())?;

    entries
        .into_iter()
        .map(|entry| {
            if entry.reason.trim().is_empty() {
                return Err(TemplateError::Invalid(format!(
                    "suppression of '{}' on '{}' has no reason",
                    entry.id, logical_id
                )));
            }
            Ok(Suppression {
                id: entry.id,
                reason: entry.reason,
            })
        })
        .collect()
}
