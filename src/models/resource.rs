use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Resource types the rule catalogue knows about
///
/// Anything else lands in `Other` with its original type string so that it
/// still occupies its slot in the stack's declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Table,
    ScalableTarget,
    BackupPlanSelection,
    Other(String),
}

impl ResourceType {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceType::Table => "AWS::DynamoDB::Table",
            ResourceType::ScalableTarget => "AWS::ApplicationAutoScaling::ScalableTarget",
            ResourceType::BackupPlanSelection => "AWS::Backup::BackupSelection",
            ResourceType::Other(name) => name,
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "AWS::DynamoDB::Table" => ResourceType::Table,
            "AWS::ApplicationAutoScaling::ScalableTarget" => ResourceType::ScalableTarget,
            "AWS::Backup::BackupSelection" => ResourceType::BackupPlanSelection,
            other => ResourceType::Other(other.to_string()),
        }
    }
}

/// An acknowledged exception: `id` names the rule that should stay quiet for
/// this resource, `reason` records why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suppression {
    pub id: String,
    pub reason: String,
}

impl Suppression {
    pub fn new(id: &str, reason: &str) -> Self {
        Self {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// One declared resource in a stack
///
/// Built once by the producer of the graph and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    logical_id: String,
    resource_type: ResourceType,
    properties: Map<String, Value>,
    explicit_name: Option<String>,
    suppressions: Vec<Suppression>,
}

impl ResourceNode {
    pub fn new(logical_id: &str, resource_type: ResourceType) -> Self {
        Self {
            logical_id: logical_id.to_string(),
            resource_type,
            properties: Map::new(),
            explicit_name: None,
            suppressions: Vec::new(),
        }
    }

    /// Replace the whole property map. Non-object values leave the node
    /// without properties.
    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = match properties {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self
    }

    pub fn with_property(mut self, name: &str, value: Value) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }

    /// Name given by the user, as opposed to one the producer would generate
    pub fn with_explicit_name(mut self, name: &str) -> Self {
        self.explicit_name = Some(name.to_string());
        self
    }

    pub fn with_suppression(mut self, suppression: Suppression) -> Self {
        self.suppressions.push(suppression);
        self
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn explicit_name(&self) -> Option<&str> {
        self.explicit_name.as_deref()
    }

    pub fn suppressions(&self) -> &[Suppression] {
        &self.suppressions
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Walk nested mappings, e.g. `["PointInTimeRecoverySpecification", "PointInTimeRecoveryEnabled"]`
    pub fn property_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.properties.get(*first)?;
        for key in rest {
            current = current.get(*key)?;
        }
        Some(current)
    }

    pub fn is_suppressed(&self, rule_id: &str) -> Option<&Suppression> {
        self.suppressions.iter().find(|s| s.id == rule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_type_round_trip_known() {
        for ty in [
            ResourceType::Table,
            ResourceType::ScalableTarget,
            ResourceType::BackupPlanSelection,
        ] {
            assert_eq!(ResourceType::from_str(ty.as_str()), ty);
        }
    }

    #[test]
    fn test_resource_type_other_keeps_name() {
        let ty = ResourceType::from_str("AWS::S3::Bucket");
        assert_eq!(ty, ResourceType::Other("AWS::S3::Bucket".to_string()));
        assert_eq!(ty.as_str(), "AWS::S3::Bucket");
    }

    #[test]
    fn test_property_path_nested() {
        let node = ResourceNode::new("rTable", ResourceType::Table).with_properties(json!({
            "PointInTimeRecoverySpecification": { "PointInTimeRecoveryEnabled": true }
        }));

        assert_eq!(
            node.property_path(&["PointInTimeRecoverySpecification", "PointInTimeRecoveryEnabled"]),
            Some(&json!(true))
        );
        assert_eq!(node.property_path(&["PointInTimeRecoverySpecification", "Nope"]), None);
        assert_eq!(node.property_path(&[]), None);
    }

    #[test]
    fn test_with_properties_ignores_non_object() {
        let node = ResourceNode::new("rTable", ResourceType::Table).with_properties(json!([1, 2]));
        assert!(node.properties().is_empty());
    }

    #[test]
    fn test_suppression_lookup() {
        let node = ResourceNode::new("rTable", ResourceType::Table)
            .with_suppression(Suppression::new("NIST.800.53.R5-DynamoDBPITREnabled", "restored nightly from S3"));

        assert!(node.is_suppressed("NIST.800.53.R5-DynamoDBPITREnabled").is_some());
        assert!(node.is_suppressed("NIST.800.53.R5-DynamoDBInBackupPlan").is_none());
    }

    #[test]
    fn test_explicit_name_optional() {
        let unnamed = ResourceNode::new("rTable", ResourceType::Table);
        assert_eq!(unnamed.explicit_name(), None);

        let named = unnamed.with_explicit_name("baz");
        assert_eq!(named.explicit_name(), Some("baz"));
    }
}
