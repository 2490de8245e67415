// stackguard - static NIST 800-53 R5 compliance checks for infrastructure stacks
// Module re-exports

pub mod engine;
pub mod error;
pub mod models;
pub mod resolver;
pub mod rules;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use models::{
    ResourceGraph, ResourceNode, ResourceType, RuleLevel, Settings, Suppression, Violation,
};

pub use engine::{EvaluationReport, Evaluator, ViolationSink};
pub use error::{GraphError, MalformedResourceError, TemplateError};
pub use resolver::{LogicalIdNaming, NameDerivation, ReferenceResolver};
pub use rules::{Rule, RuleCatalogue, NIST_800_53_R5};

/// Check one stack against the NIST 800-53 R5 catalogue with default naming
pub fn check_stack(graph: &ResourceGraph, settings: &Settings) -> ViolationSink {
    let resolver = ReferenceResolver::default();
    Evaluator::new(&NIST_800_53_R5, &resolver, settings).evaluate(graph)
}
