// stackguard data models

pub mod control;
pub mod graph;
pub mod resource;
pub mod settings;
pub mod violation;

// Re-exports for convenience
pub use control::ControlSet;
pub use graph::ResourceGraph;
pub use resource::{ResourceNode, ResourceType, Suppression};
pub use settings::Settings;
pub use violation::{FindingKind, RuleLevel, SuppressedFinding, Violation};
