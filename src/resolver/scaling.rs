//! Scalable-target resource paths and dimensions
//!
//! Two path grammars bind a target to DynamoDB capacity:
//! - `table/<tableName>` - the table's own read/write capacity
//! - `table/<tableName>/index/<indexName>` - one global secondary index
//!
//! Anything else is not a DynamoDB capacity binding.

use once_cell::sync::Lazy;
use regex::Regex;

/// Namespace a scalable target must declare to count as DynamoDB coverage
pub const DYNAMODB_NAMESPACE: &str = "dynamodb";

static RESOURCE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^table/([^/]+)(?:/index/([^/]+))?$").expect("resource path pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capacity {
    Read,
    Write,
}

impl Capacity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capacity::Read => "ReadCapacityUnits",
            Capacity::Write => "WriteCapacityUnits",
        }
    }
}

/// Whether a dimension names table-level or index-level capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionScope {
    Table,
    Index,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalableDimension {
    /// `None` for the bare `ReadCapacityUnits` / `WriteCapacityUnits` forms
    pub scope: Option<DimensionScope>,
    pub capacity: Capacity,
}

impl ScalableDimension {
    /// Parse `dynamodb:table:ReadCapacityUnits`, `dynamodb:index:WriteCapacityUnits`
    /// or the bare capacity names
    pub fn parse(raw: &str) -> Option<Self> {
        let (scope, capacity) = match raw.split(':').collect::<Vec<_>>().as_slice() {
            [capacity] => (None, *capacity),
            [DYNAMODB_NAMESPACE, "table", capacity] => (Some(DimensionScope::Table), *capacity),
            [DYNAMODB_NAMESPACE, "index", capacity] => (Some(DimensionScope::Index), *capacity),
            _ => return None,
        };
        let capacity = match capacity {
            "ReadCapacityUnits" => Capacity::Read,
            "WriteCapacityUnits" => Capacity::Write,
            _ => return None,
        };
        Some(Self { scope, capacity })
    }

    fn accepts(&self, path: &ResourcePath) -> bool {
        match (self.scope, path) {
            (None, _) => true,
            (Some(DimensionScope::Table), ResourcePath::Table { .. }) => true,
            (Some(DimensionScope::Index), ResourcePath::Index { .. }) => true,
            _ => false,
        }
    }
}

/// Capacity a scalable target points at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourcePath {
    Table { table: String },
    Index { table: String, index: String },
}

impl ResourcePath {
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = RESOURCE_PATH.captures(raw)?;
        let table = caps.get(1)?.as_str().to_string();
        Some(match caps.get(2) {
            Some(index) => ResourcePath::Index {
                table,
                index: index.as_str().to_string(),
            },
            None => ResourcePath::Table { table },
        })
    }

    pub fn table(&self) -> &str {
        match self {
            ResourcePath::Table { table } | ResourcePath::Index { table, .. } => table,
        }
    }

    pub fn index(&self) -> Option<&str> {
        match self {
            ResourcePath::Table { .. } => None,
            ResourcePath::Index { index, .. } => Some(index),
        }
    }
}

/// Relation: scalable target `target_id` autoscales `capacity` of `path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingBinding {
    pub target_id: String,
    pub path: ResourcePath,
    pub capacity: Capacity,
}

impl ScalingBinding {
    /// Combine the three declared strings, or `None` if they do not describe a
    /// DynamoDB capacity binding
    pub fn from_parts(target_id: &str, namespace: &str, dimension: &str, resource_id: &str) -> Option<Self> {
        if namespace != DYNAMODB_NAMESPACE {
            return None;
        }
        let dimension = ScalableDimension::parse(dimension)?;
        let path = ResourcePath::parse(resource_id)?;
        if !dimension.accepts(&path) {
            return None;
        }
        Some(Self {
            target_id: target_id.to_string(),
            path,
            capacity: dimension.capacity,
        })
    }

    pub fn covers(&self, table: &str, index: Option<&str>, capacity: Capacity) -> bool {
        self.capacity == capacity && self.path.table() == table && self.path.index() == index
    }
}
