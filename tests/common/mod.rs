//! Common test helpers for integration tests
//!
//! `TestStack` builds resource graphs shaped like synthesized templates:
//! tables, the scalable targets that autoscaling helpers emit, and backup
//! selections that reference tables directly or by imported name.

#![allow(dead_code)]

use serde_json::{json, Value};
use stackguard::{
    check_stack, ResourceGraph, ResourceNode, ResourceType, Settings, ViolationSink,
};

pub const AUTOSCALING: &str = "NIST.800.53.R5-DynamoDBAutoscalingEnabled";
pub const BACKUP: &str = "NIST.800.53.R5-DynamoDBInBackupPlan";
pub const PITR: &str = "NIST.800.53.R5-DynamoDBPITREnabled";

/// Builder for an isolated stack
pub struct TestStack {
    graph: ResourceGraph,
    counter: usize,
}

/// Options for a table declaration
#[derive(Default, Clone)]
pub struct TableProps {
    pub table_name: Option<&'static str>,
    pub on_demand: bool,
    pub point_in_time_recovery: Option<bool>,
    pub global_secondary_indexes: Vec<&'static str>,
}

impl TestStack {
    pub fn new(name: &str) -> Self {
        Self {
            graph: ResourceGraph::new(name),
            counter: 0,
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{}{}", prefix, self.counter)
    }

    /// Declare a table with only a partition key
    pub fn table(&mut self, id: &str) -> &mut Self {
        self.table_with(id, TableProps::default())
    }

    pub fn table_with(&mut self, id: &str, props: TableProps) -> &mut Self {
        let mut properties = json!({
            "KeySchema": [{ "AttributeName": "foo", "KeyType": "HASH" }],
            "AttributeDefinitions": [{ "AttributeName": "foo", "AttributeType": "S" }],
        });
        if props.on_demand {
            properties["BillingMode"] = json!("PAY_PER_REQUEST");
        } else {
            properties["ProvisionedThroughput"] =
                json!({ "ReadCapacityUnits": 5, "WriteCapacityUnits": 5 });
        }
        if let Some(enabled) = props.point_in_time_recovery {
            properties["PointInTimeRecoverySpecification"] =
                json!({ "PointInTimeRecoveryEnabled": enabled });
        }
        if !props.global_secondary_indexes.is_empty() {
            properties["GlobalSecondaryIndexes"] = Value::Array(
                props
                    .global_secondary_indexes
                    .iter()
                    .map(|name| {
                        json!({
                            "IndexName": name,
                            "KeySchema": [{ "AttributeName": "foo", "KeyType": "HASH" }],
                            "Projection": { "ProjectionType": "ALL" },
                        })
                    })
                    .collect(),
            );
        }

        let mut node = ResourceNode::new(id, ResourceType::Table);
        if let Some(name) = props.table_name {
            properties["TableName"] = json!(name);
            node = node.with_explicit_name(name);
        }
        self.graph.add_resource(node.with_properties(properties)).unwrap();
        self
    }

    /// Path to the table as autoscaling helpers emit it: joined around a `Ref`
    fn table_path(table_id: &str, index: Option<&str>) -> Value {
        let mut parts = vec![json!("table/"), json!({ "Ref": table_id })];
        if let Some(index) = index {
            parts.push(json!(format!("/index/{}", index)));
        }
        json!({ "Fn::Join": ["", parts] })
    }

    fn scalable_target(&mut self, dimension: &str, resource_id: Value) -> &mut Self {
        let id = self.next_id("rScalableTarget");
        self.scalable_target_named(&id, dimension, resource_id)
    }

    pub fn scalable_target_named(&mut self, id: &str, dimension: &str, resource_id: Value) -> &mut Self {
        let node = ResourceNode::new(id, ResourceType::ScalableTarget).with_properties(json!({
            "ServiceNamespace": "dynamodb",
            "ScalableDimension": dimension,
            "ResourceId": resource_id,
            "MinCapacity": 7,
            "MaxCapacity": 42,
        }));
        self.graph.add_resource(node).unwrap();
        self
    }

    pub fn autoscale_read(&mut self, table_id: &str) -> &mut Self {
        self.scalable_target("dynamodb:table:ReadCapacityUnits", Self::table_path(table_id, None))
    }

    pub fn autoscale_write(&mut self, table_id: &str) -> &mut Self {
        self.scalable_target("dynamodb:table:WriteCapacityUnits", Self::table_path(table_id, None))
    }

    pub fn autoscale_index_read(&mut self, table_id: &str, index: &str) -> &mut Self {
        self.scalable_target("dynamodb:index:ReadCapacityUnits", Self::table_path(table_id, Some(index)))
    }

    pub fn autoscale_index_write(&mut self, table_id: &str, index: &str) -> &mut Self {
        self.scalable_target("dynamodb:index:WriteCapacityUnits", Self::table_path(table_id, Some(index)))
    }

    /// Stand-alone scalable target declared with a literal resource path
    pub fn raw_scalable_target(&mut self, id: &str, dimension: &str, resource_id: &str) -> &mut Self {
        self.scalable_target_named(id, dimension, json!(resource_id))
    }

    fn selection(&mut self, id: &str, resources: Vec<Value>) -> &mut Self {
        let node = ResourceNode::new(id, ResourceType::BackupPlanSelection).with_properties(json!({
            "BackupPlanId": { "Fn::GetAtt": ["rPlan", "BackupPlanId"] },
            "BackupSelection": {
                "SelectionName": "Selection",
                "IamRoleArn": { "Fn::GetAtt": ["rPlanRole", "Arn"] },
                "Resources": resources,
            }
        }));
        self.graph.add_resource(node).unwrap();
        self
    }

    /// Backup selection holding a direct reference to a declared table,
    /// emitted as the table's `Arn` attribute
    pub fn backup_table(&mut self, selection_id: &str, table_id: &str) -> &mut Self {
        let arn = json!({ "Fn::GetAtt": [table_id, "Arn"] });
        self.selection(selection_id, vec![arn])
    }

    /// Backup selection naming tables imported by name
    pub fn backup_imported(&mut self, selection_id: &str, table_names: &[&str]) -> &mut Self {
        let arns = table_names
            .iter()
            .map(|name| {
                json!({ "Fn::Join": ["", [
                    "arn:", { "Ref": "AWS::Partition" }, ":dynamodb:", { "Ref": "AWS::Region" },
                    ":", { "Ref": "AWS::AccountId" }, ":table/", name
                ]] })
            })
            .collect();
        self.selection(selection_id, arns)
    }

    pub fn add(&mut self, node: ResourceNode) -> &mut Self {
        self.graph.add_resource(node).unwrap();
        self
    }

    pub fn graph(&self) -> &ResourceGraph {
        &self.graph
    }

    pub fn check(&self) -> ViolationSink {
        check_stack(&self.graph, &Settings::default())
    }
}

/// Does any message start with `<rule id>:`, the way reporters match findings
pub fn reports(sink: &ViolationSink, rule_id: &str) -> bool {
    let prefix = format!("{}:", rule_id);
    sink.violations().iter().any(|v| v.message.starts_with(&prefix))
}
