//! DynamoDBAutoscalingEnabled
//!
//! Provisioned-capacity tables must autoscale read and write capacity on the
//! table itself and on every global secondary index. On-demand tables are
//! exempt. The required bindings are data dependent: 2 for the table plus 2
//! per declared index. Scalable targets are the rule's evidence; a malformed
//! one is reported against itself.

use serde_json::Value;
use tracing::debug;

use crate::error::MalformedResourceError;
use crate::models::{ControlSet, ResourceGraph, ResourceNode, ResourceType, RuleLevel};
use crate::resolver::{resolve_string, Capacity, ReferenceResolver};
use crate::rules::Rule;

pub const RULE_NAME: &str = "DynamoDBAutoscalingEnabled";

const INFO: &str = "Provisioned capacity DynamoDB tables have auto-scaling enabled on their indexes";

const EXPLANATION: &str = "Amazon DynamoDB auto scaling uses the AWS Application Auto Scaling service to adjust provisioned throughput capacity that automatically responds to actual traffic patterns. This enables a table or a global secondary index to increase its provisioned read/write capacity to handle sudden increases in traffic, without throttling.";

const CONTROLS: ControlSet = ControlSet::new(&[
    "CP-1a.1(b)",
    "CP-1a.2",
    "CP-2a",
    "CP-2a.6",
    "CP-2a.7",
    "CP-2d",
    "CP-2e",
    "CP-2(5)",
    "CP-2(6)",
    "CP-6(2)",
    "CP-10",
    "SC-5(2)",
    "SC-6",
    "SC-22",
    "SC-36",
    "SI-13(5)",
]);

/// Billing mode value that switches a table to on-demand capacity
pub const ON_DEMAND_BILLING_MODE: &str = "PAY_PER_REQUEST";

pub fn rule(prefix: &str) -> Rule {
    Rule::new(
        prefix,
        RULE_NAME,
        ResourceType::Table,
        RuleLevel::Error,
        INFO,
        EXPLANATION,
        CONTROLS,
        check,
    )
    .with_evidence(ResourceType::ScalableTarget, validate_target)
}

fn validate_target(
    target: &ResourceNode,
    graph: &ResourceGraph,
    resolver: &ReferenceResolver,
) -> Result<(), MalformedResourceError> {
    resolver.scaling_binding(graph, target).map(|_| ())
}

pub fn is_on_demand(table: &ResourceNode) -> bool {
    table.property("BillingMode").and_then(Value::as_str) == Some(ON_DEMAND_BILLING_MODE)
}

/// Names of the table's global secondary indexes, in declaration order
pub fn secondary_index_names(
    table: &ResourceNode,
    graph: &ResourceGraph,
    resolver: &ReferenceResolver,
) -> Result<Vec<String>, MalformedResourceError> {
    let indexes = match table.property("GlobalSecondaryIndexes") {
        None => return Ok(Vec::new()),
        Some(Value::Array(indexes)) => indexes,
        Some(_) => {
            return Err(MalformedResourceError::new(
                table.logical_id(),
                "property 'GlobalSecondaryIndexes' is not a list",
            ))
        }
    };

    indexes
        .iter()
        .map(|index| {
            index
                .get("IndexName")
                .and_then(|name| resolve_string(name, graph, resolver.naming()))
                .map(|resolved| resolved.text)
                .ok_or_else(|| {
                    MalformedResourceError::new(
                        table.logical_id(),
                        "global secondary index without a resolvable 'IndexName'",
                    )
                })
        })
        .collect()
}

fn check(
    table: &ResourceNode,
    graph: &ResourceGraph,
    resolver: &ReferenceResolver,
) -> Result<bool, MalformedResourceError> {
    if is_on_demand(table) {
        return Ok(true);
    }

    let name = resolver.matchable_name(table);
    let indexes = secondary_index_names(table, graph, resolver)?;

    let required = std::iter::once(None).chain(indexes.iter().map(|i| Some(i.as_str())));
    for index in required {
        for capacity in [Capacity::Read, Capacity::Write] {
            if !resolver.has_scaling_binding(graph, &name, index, capacity) {
                debug!(
                    table = %name,
                    index = index.unwrap_or("<table>"),
                    capacity = capacity.as_str(),
                    "No scalable target covers required capacity"
                );
                return Ok(false);
            }
        }
    }
    Ok(true)
}
