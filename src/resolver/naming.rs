//! Physical names for resources that were not given one explicitly
//!
//! Scalable-target paths and backup selections always refer to tables by a
//! concrete name, so the engine has to arrive at the same name the producer of
//! the stack assigned. The producer owns that scheme; the engine only needs an
//! implementation that agrees with it.

use crate::models::ResourceNode;

/// Deterministic name assignment for unnamed resources
///
/// Implementations must be pure: the same node always yields the same name.
pub trait NameDerivation: Send + Sync + std::fmt::Debug {
    fn derive(&self, node: &ResourceNode) -> String;
}

/// Uses the logical id verbatim
///
/// Matches producers that hand over stacks with `Ref` already resolved to the
/// logical id of the referenced resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicalIdNaming;

impl NameDerivation for LogicalIdNaming {
    fn derive(&self, node: &ResourceNode) -> String {
        node.logical_id().to_string()
    }
}

/// `<stack>-<logical id>`, for producers that scope generated names to the stack
#[derive(Debug, Clone)]
pub struct StackScopedNaming {
    pub stack_name: String,
}

impl StackScopedNaming {
    pub fn new(stack_name: &str) -> Self {
        Self {
            stack_name: stack_name.to_string(),
        }
    }
}

impl NameDerivation for StackScopedNaming {
    fn derive(&self, node: &ResourceNode) -> String {
        format!("{}-{}", self.stack_name, node.logical_id())
    }
}

/// The name other resources use to point at `node`
pub fn matchable_name(naming: &dyn NameDerivation, node: &ResourceNode) -> String {
    match node.explicit_name() {
        Some(name) => name.to_string(),
        None => naming.derive(node),
    }
}
