//! DynamoDBInBackupPlan
//!
//! A table is covered when any backup selection in the stack names it. The
//! selection may come before or after the table and may reference it directly
//! or through an imported name; both are compared by name only. Backup
//! selections are the rule's evidence; a malformed one is reported against
//! itself.

use crate::error::MalformedResourceError;
use crate::models::{ControlSet, ResourceGraph, ResourceNode, ResourceType, RuleLevel};
use crate::resolver::ReferenceResolver;
use crate::rules::Rule;

pub const RULE_NAME: &str = "DynamoDBInBackupPlan";

const INFO: &str = "DynamoDB tables are part of AWS Backup plan(s)";

const EXPLANATION: &str = "To help with data back-up processes, ensure your Amazon DynamoDB tables are a part of an AWS Backup plan. AWS Backup is a fully managed backup service with a policy-based backup solution.";

const CONTROLS: ControlSet = ControlSet::new(&[
    "CP-1(2)",
    "CP-2(5)",
    "CP-6a",
    "CP-6(1)",
    "CP-6(2)",
    "CP-9a",
    "CP-9b",
    "CP-9c",
    "CP-10",
    "CP-10(2)",
    "SC-5(2)",
    "SI-13(5)",
]);

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
    .with_evidence(ResourceType::BackupPlanSelection, validate_selection)
}

fn validate_selection(
    selection: &ResourceNode,
    graph: &ResourceGraph,
    resolver: &ReferenceResolver,
) -> Result<(), MalformedResourceError> {
    resolver.backup_references(graph, selection).map(|_| ())
}

fn check(
    table: &ResourceNode,
    graph: &ResourceGraph,
    resolver: &ReferenceResolver,
) -> Result<bool, MalformedResourceError> {
    Ok(resolver.is_in_backup_plan(graph, table))
}
