//! DynamoDBPITREnabled
//!
//! Single-resource check: point-in-time recovery must be explicitly enabled.

use serde_json::Value;

use crate::error::MalformedResourceError;
use crate::models::{ControlSet, ResourceGraph, ResourceNode, ResourceType, RuleLevel};
use crate::resolver::ReferenceResolver;
use crate::rules::Rule;

pub const RULE_NAME: &str = "DynamoDBPITREnabled";

const INFO: &str = "DynamoDB tables have point in time recovery enabled";

const EXPLANATION: &str = "The recovery maintains continuous backups of your table for the last 35 days.";

const CONTROLS: ControlSet = ControlSet::new(&[
    "CP-1(2)",
    "CP-2(5)",
    "CP-6(2)",
    "CP-9a",
    "CP-9b",
    "CP-9c",
    "CP-10",
    "CP-10(2)",
    "SC-5(2)",
    "SI-13(5)",
]);

const PITR_PATH: [&str; 2] = ["PointInTimeRecoverySpecification", "PointInTimeRecoveryEnabled"];

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
}

fn check(
    table: &ResourceNode,
    _graph: &ResourceGraph,
    _resolver: &ReferenceResolver,
) -> Result<bool, MalformedResourceError> {
    Ok(table.property_path(&PITR_PATH) == Some(&Value::Bool(true)))
}
