use std::collections::HashMap;

use crate::error::GraphError;
use crate::models::resource::{ResourceNode, ResourceType};

/// All resources declared in one stack
///
/// Write-once, read-many: nodes can be added while the stack is being built,
/// never removed, and iteration always follows insertion order so findings
/// come out in a reproducible order.
#[derive(Debug, Clone, Default)]
pub struct ResourceGraph {
    name: String,
    nodes: Vec<ResourceNode>,
    index: HashMap<String, usize>,
}

impl ResourceGraph {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Stack name, used when reporting
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_resource(&mut self, node: ResourceNode) -> Result<(), GraphError> {
        if self.index.contains_key(node.logical_id()) {
            return Err(GraphError::DuplicateId(node.logical_id().to_string()));
        }
        self.index.insert(node.logical_id().to_string(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    pub fn get_resource(&self, logical_id: &str) -> Result<&ResourceNode, GraphError> {
        self.find(logical_id)
            .ok_or_else(|| GraphError::NotFound(logical_id.to_string()))
    }

    /// Non-failing lookup for callers where absence is a normal answer
    pub fn find(&self, logical_id: &str) -> Option<&ResourceNode> {
        self.index.get(logical_id).map(|&idx| &self.nodes[idx])
    }

    /// Resources in declaration order, optionally restricted to one type
    ///
    /// The returned iterator is `Clone`, so a caller can restart the walk.
    pub fn all_resources<'a>(
        &'a self,
        of_type: Option<&'a ResourceType>,
    ) -> impl Iterator<Item = &'a ResourceNode> + Clone + 'a {
        self.nodes
            .iter()
            .filter(move |node| of_type.map_or(true, |ty| node.resource_type() == ty))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(ids: &[(&str, ResourceType)]) -> ResourceGraph {
        let mut graph = ResourceGraph::new("test-stack");
        for (id, ty) in ids {
            graph.add_resource(ResourceNode::new(id, ty.clone())).unwrap();
        }
        graph
    }

    #[test]
    fn test_add_and_get() {
        let graph = graph_with(&[("rTable", ResourceType::Table)]);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get_resource("rTable").unwrap().logical_id(), "rTable");
        assert_eq!(graph.name(), "test-stack");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut graph = graph_with(&[("rTable", ResourceType::Table)]);
        let err = graph
            .add_resource(ResourceNode::new("rTable", ResourceType::ScalableTarget))
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateId("rTable".to_string()));
        assert_eq!(graph.len(), 1);
        assert_eq!(
            graph.get_resource("rTable").unwrap().resource_type(),
            &ResourceType::Table
        );
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let graph = ResourceGraph::new("empty");
        assert!(graph.is_empty());
        assert_eq!(
            graph.get_resource("nope").unwrap_err(),
            GraphError::NotFound("nope".to_string())
        );
        assert!(graph.find("nope").is_none());
    }

    #[test]
    fn test_all_resources_insertion_order_and_filter() {
        let graph = graph_with(&[
            ("b", ResourceType::Table),
            ("a", ResourceType::ScalableTarget),
            ("c", ResourceType::Table),
        ]);

        let all: Vec<&str> = graph.all_resources(None).map(|n| n.logical_id()).collect();
        assert_eq!(all, vec!["b", "a", "c"]);

        let tables: Vec<&str> = graph
            .all_resources(Some(&ResourceType::Table))
            .map(|n| n.logical_id())
            .collect();
        assert_eq!(tables, vec!["b", "c"]);
    }

    #[test]
    fn test_all_resources_restartable() {
        let graph = graph_with(&[("x", ResourceType::Table), ("y", ResourceType::Table)]);
        let iter = graph.all_resources(None);
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
    }
}
