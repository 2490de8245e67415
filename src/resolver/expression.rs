//! Resolution of intrinsic reference expressions inside property values
//!
//! Supported forms:
//! - a plain string
//! - `{"Ref": "<logical id>"}` - the referenced resource's matchable name, or
//!   `${<id>}` when the id is a pseudo parameter or not declared in the stack
//! - `{"Fn::GetAtt": ["<logical id>", "<attribute>"]}` (or `"<id>.<attribute>"`) -
//!   a table's `Arn` becomes its ARN ending in `:table/<matchable name>`;
//!   any other attribute becomes `${<id>.<attribute>}`
//! - `{"Fn::Join": ["<sep>", [part, ...]]}` where every part is itself resolvable

use serde_json::Value;

use crate::models::{ResourceGraph, ResourceType};
use crate::resolver::naming::{matchable_name, NameDerivation};

/// A property value flattened to a concrete string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedString {
    pub text: String,
    /// Logical ids of declared resources referenced along the way, in order
    pub refs: Vec<String>,
}

/// Flatten `value` to a string, or `None` if it is not a supported form
pub fn resolve_string(
    value: &Value,
    graph: &ResourceGraph,
    naming: &dyn NameDerivation,
) -> Option<ResolvedString> {
    let mut refs = Vec::new();
    let text = resolve_into(value, graph, naming, &mut refs)?;
    Some(ResolvedString { text, refs })
}

fn resolve_into(
    value: &Value,
    graph: &ResourceGraph,
    naming: &dyn NameDerivation,
    refs: &mut Vec<String>,
) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) if map.len() == 1 => {
            if let Some(target) = map.get("Ref") {
                let id = target.as_str()?;
                return Some(match graph.find(id) {
                    Some(node) => {
                        refs.push(id.to_string());
                        matchable_name(naming, node)
                    }
                    None => format!("${{{}}}", id),
                });
            }
            if let Some(args) = map.get("Fn::GetAtt") {
                let (id, attribute) = get_att_args(args)?;
                if let Some(node) = graph.find(id) {
                    refs.push(id.to_string());
                    if attribute == "Arn" && node.resource_type() == &ResourceType::Table {
                        return Some(format!(
                            "arn:${{AWS::Partition}}:dynamodb:${{AWS::Region}}:${{AWS::AccountId}}:table/{}",
                            matchable_name(naming, node)
                        ));
                    }
                }
                return Some(format!("${{{}.{}}}", id, attribute));
            }
            if let Some(args) = map.get("Fn::Join") {
                let args = args.as_array()?;
                if args.len() != 2 {
                    return None;
                }
                let separator = args[0].as_str()?;
                let parts = args[1]
                    .as_array()?
                    .iter()
                    .map(|part| resolve_into(part, graph, naming, refs))
                    .collect::<Option<Vec<_>>>()?;
                return Some(parts.join(separator));
            }
            None
        }
        _ => None,
    }
}

fn get_att_args(args: &Value) -> Option<(&str, &str)> {
    match args {
        Value::Array(parts) if parts.len() == 2 => Some((parts[0].as_str()?, parts[1].as_str()?)),
        Value::String(dotted) => dotted.split_once('.'),
        _ => None,
    }
}
